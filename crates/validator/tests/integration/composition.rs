use formkit_validator::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn gmail_chain_reports_first_failing_rule() {
    let email_rule = not_empty()
        .with_message("O email é obrigatório")
        .and(email().with_message("Formato de email inválido"))
        .and(ends_with("@gmail.com").ignore_case().with_message("O email deve ser do gmail"));

    assert!(email_rule.validate("ana@gmail.com").is_ok());
    assert!(email_rule.validate("ANA@Gmail.COM").is_ok());

    let cases = [
        ("", "O email é obrigatório"),
        ("not-an-email", "Formato de email inválido"),
        ("ana@yahoo.com", "O email deve ser do gmail"),
    ];
    for (input, expected) in cases {
        let err = email_rule.validate(input).unwrap_err();
        assert_eq!(err.message, expected, "input {input:?}");
    }
}

#[test]
fn knowledge_chain_checks_integrality_before_range() {
    let knowledge = integral()
        .with_message("O conhecimento deve ser um número inteiro")
        .and(in_range(1.0, 100.0).with_message("O conhecimento deve estar entre 1 e 100"));

    assert!(knowledge.validate(&80.0).is_ok());
    assert_eq!(
        knowledge.validate(&150.5).unwrap_err().message,
        "O conhecimento deve ser um número inteiro"
    );
    assert_eq!(
        knowledge.validate(&0.0).unwrap_err().message,
        "O conhecimento deve estar entre 1 e 100"
    );
}

#[test]
fn boxed_validators_compose_at_runtime() {
    let rules: Vec<Box<dyn Validate<Input = str> + Send + Sync>> = vec![
        Box::new(not_empty()),
        Box::new(min_length(6)),
        Box::new(max_length(64)),
    ];
    let rules = chain(rules);

    assert!(rules.validate("123456").is_ok());
    assert_eq!(rules.validate("").unwrap_err().code, "not_empty");
    assert_eq!(rules.validate("12345").unwrap_err().code, "min_length");
}

#[test]
fn overridden_message_keeps_original_cause() {
    let rule = min_size::<u8>(2).with_message("Insira pelo menos 2 tecnologias");
    let err = rule.validate(&[1]).unwrap_err();

    assert_eq!(err.code, "min_size");
    assert_eq!(err.root_cause().param("actual"), Some("1"));
    assert_eq!(err.message, "Insira pelo menos 2 tecnologias");
}

#[test]
fn collect_all_failures() {
    let short = min_length(10);
    let long = min_length(20);
    let errors =
        formkit_validator::foundation::validate_with_all("abc", &[&short, &long]).unwrap_err();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors.to_string(), "Must be at least 10 characters (min_length); Must be at least 20 characters (min_length)");
}
