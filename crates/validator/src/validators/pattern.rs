//! Shape checks on text: suffixes, regular expressions, email addresses.

use std::sync::LazyLock;

use regex::Regex;

use crate::foundation::ValidationError;

/// Local part, `@`, then dot-separated DNS labels.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$",
    )
    .unwrap()
});

crate::validator! {
    /// Text ends with `suffix`. Case-sensitive unless [`EndsWith::ignore_case`].
    #[derive(PartialEq, Eq)]
    pub EndsWith { suffix: String, ignore_case: bool } for str;
    rule(self, input) {
        if self.ignore_case {
            input.to_lowercase().ends_with(&self.suffix.to_lowercase())
        } else {
            input.ends_with(self.suffix.as_str())
        }
    }
    error(self, input) {
        ValidationError::new("ends_with", format!("Must end with {}", self.suffix))
            .with_param("suffix", &self.suffix)
    }
    new(suffix: impl Into<String>) { Self { suffix: suffix.into(), ignore_case: false } }
    fn ends_with(suffix: impl Into<String>);
}

impl EndsWith {
    #[must_use = "builder methods must be chained or built"]
    pub fn ignore_case(self) -> Self {
        Self {
            ignore_case: true,
            ..self
        }
    }
}

crate::validator! {
    /// Text matches a regular expression somewhere; anchor it for a full match.
    pub MatchesRegex { pattern: Regex } for str;
    rule(self, input) { self.pattern.is_match(input) }
    error(self, input) {
        ValidationError::invalid_format("regex").with_param("pattern", self.pattern.as_str())
    }
    new(pattern: &str) -> regex::Error { Regex::new(pattern).map(Self::from) }
    fn matches_regex(pattern: &str) -> regex::Error;
}

impl From<Regex> for MatchesRegex {
    fn from(pattern: Regex) -> Self {
        Self { pattern }
    }
}

crate::validator! {
    /// Text looks like an email address. Deliverability is not checked.
    pub Email for str;
    rule(input) { EMAIL.is_match(input) }
    error(input) { ValidationError::invalid_format("email") }
    fn email();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Validate;
    use rstest::rstest;

    #[rstest]
    #[case("ana@gmail.com", true)]
    #[case("ana@GMAIL.com", false)]
    #[case("ana@yahoo.com", false)]
    fn suffix_is_case_sensitive_by_default(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(ends_with("@gmail.com").validate(input).is_ok(), ok);
    }

    #[test]
    fn ignore_case_suffix() {
        let gmail = ends_with("@gmail.com").ignore_case();
        assert!(gmail.validate("Ana@GMAIL.COM").is_ok());
        assert_eq!(gmail.validate("ana@yahoo.com").unwrap_err().param("suffix"), Some("@gmail.com"));
    }

    #[test]
    fn regex_compiles_or_fails() {
        let phone = matches_regex(r"^\d{3}-\d{4}$").unwrap();
        assert!(phone.validate("123-4567").is_ok());
        assert_eq!(phone.validate("1234567").unwrap_err().param("pattern"), Some(r"^\d{3}-\d{4}$"));
        assert!(matches_regex("(").is_err());
    }

    #[rstest]
    #[case("ana@gmail.com", true)]
    #[case("ana.silva+forms@mail.example.org", true)]
    #[case("invalid", false)]
    #[case("@gmail.com", false)]
    #[case("ana@", false)]
    #[case("ana silva@gmail.com", false)]
    fn email_shape(#[case] input: &str, #[case] ok: bool) {
        let result = email().validate(input);
        assert_eq!(result.is_ok(), ok, "{input}");
        if let Err(error) = result {
            assert_eq!(error.code, "invalid_format");
        }
    }
}
