//! The create-user screen.
//!
//! [`signup_schema`] is the final form (avatar, name, email, password and a
//! list of technologies). [`login_schema`] is the plain email and password
//! form it grew out of.

use std::sync::{Arc, LazyLock};

use serde::Serialize;

use crate::error::FormError;
use crate::schema::{Constraint, FieldSpec, FormSchema, Refinement, Transform};
use crate::value::{RawRecord, Record};
use crate::FileHandle;

/// User-facing messages of the create-user form.
pub mod messages {
    pub const AVATAR_SINGLE: &str = "Selecione apenas um arquivo";
    pub const AVATAR_SIZE: &str = "O arquivo precisa ter no máximo 4MB";
    pub const NAME_REQUIRED: &str = "O nome é obrigatório";
    pub const EMAIL_REQUIRED: &str = "O email é obrigatório";
    pub const EMAIL_FORMAT: &str = "Formato de email inválido";
    pub const EMAIL_NOT_GMAIL: &str = "O email deve ser do gmail";
    pub const PASSWORD_LENGTH: &str = "A senha precisa de no mínimo 6 caracteres";
    pub const TECHS_MIN: &str = "Insira pelo menos 2 tecnologias";
    pub const TITLE_REQUIRED: &str = "O título é obrigatório";
    pub const KNOWLEDGE_INTEGER: &str = "O conhecimento deve ser um número inteiro";
    pub const KNOWLEDGE_RANGE: &str = "O conhecimento deve estar entre 1 e 100";
    pub const STILL_LEARNING: &str = "Você ainda está aprendendo!";
}

/// Largest accepted avatar.
pub const MAX_AVATAR_BYTES: u64 = 4 * 1024 * 1024;

/// Domain every signup email must belong to.
pub const EMAIL_DOMAIN: &str = "@gmail.com";

/// Knowledge a user needs in at least one technology.
pub const EXPERT_KNOWLEDGE: i64 = 50;

static SIGNUP: LazyLock<Arc<FormSchema>> = LazyLock::new(|| {
    Arc::new(build_signup().expect("signup schema is statically valid"))
});

static LOGIN: LazyLock<Arc<FormSchema>> = LazyLock::new(|| {
    Arc::new(build_login().expect("login schema is statically valid"))
});

/// Schema of the create-user form. Built once, shared afterwards.
pub fn signup_schema() -> Arc<FormSchema> {
    Arc::clone(&SIGNUP)
}

/// Schema of the plain email and password form.
pub fn login_schema() -> Arc<FormSchema> {
    Arc::clone(&LOGIN)
}

fn build_signup() -> Result<FormSchema, FormError> {
    use messages::*;

    let tech = FormSchema::builder()
        .field(FieldSpec::text("title").constraint(Constraint::not_empty(TITLE_REQUIRED)))
        .field(
            FieldSpec::integer("knowledge")
                .required(KNOWLEDGE_INTEGER)
                .type_message(KNOWLEDGE_INTEGER)
                .constraint(Constraint::range(1.0, 100.0, KNOWLEDGE_RANGE)),
        )
        .build()?;

    FormSchema::builder()
        .field(
            FieldSpec::file("avatar")
                .constraint(Constraint::max_files(1, AVATAR_SINGLE))
                .constraint(Constraint::max_bytes(MAX_AVATAR_BYTES, AVATAR_SIZE)),
        )
        .field(
            FieldSpec::text("name")
                .constraint(Constraint::not_empty(NAME_REQUIRED))
                .transform(Transform::CapitalizeWords),
        )
        .field(
            FieldSpec::text("email")
                .constraint(Constraint::not_empty(EMAIL_REQUIRED))
                .constraint(Constraint::email(EMAIL_FORMAT))
                .constraint(Constraint::ends_with(EMAIL_DOMAIN, EMAIL_NOT_GMAIL))
                .transform(Transform::Lowercase),
        )
        .field(FieldSpec::password("password").constraint(Constraint::min_length(6, PASSWORD_LENGTH)))
        .field(
            FieldSpec::list("techs", tech).constraint(Constraint::min_items(2, TECHS_MIN)),
        )
        .refine(Refinement::new(STILL_LEARNING, has_expert_tech).at("techs"))
        .build()
}

fn build_login() -> Result<FormSchema, FormError> {
    use messages::*;

    FormSchema::builder()
        .field(
            FieldSpec::text("email")
                .constraint(Constraint::not_empty(EMAIL_REQUIRED))
                .constraint(Constraint::email(EMAIL_FORMAT)),
        )
        .field(FieldSpec::password("password").constraint(Constraint::min_length(6, PASSWORD_LENGTH)))
        .build()
}

fn has_expert_tech(record: &Record) -> bool {
    record
        .get_list("techs")
        .unwrap_or_default()
        .iter()
        .filter_map(|tech| tech.get_integer("knowledge"))
        .any(|knowledge| knowledge > EXPERT_KNOWLEDGE)
}

/// One row of the `techs` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TechEntry {
    pub title: String,
    pub knowledge: i64,
}

impl TechEntry {
    pub fn new(title: impl Into<String>, knowledge: i64) -> Self {
        Self {
            title: title.into(),
            knowledge,
        }
    }

    /// The row as a form control reports it: knowledge arrives as text.
    pub fn to_raw(&self) -> RawRecord {
        RawRecord::new()
            .with("title", self.title.as_str())
            .with("knowledge", self.knowledge.to_string())
    }

    /// Reads a validated row back.
    pub fn from_record(record: &Record) -> Option<Self> {
        Some(Self {
            title: record.get_text("title")?.to_string(),
            knowledge: record.get_integer("knowledge")?,
        })
    }
}

/// Typed view of a validated create-user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<FileHandle>,
    pub name: String,
    pub email: String,
    pub password: String,
    pub techs: Vec<TechEntry>,
}

impl TryFrom<&Record> for CreateUser {
    type Error = FormError;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        let text = |name: &str| {
            record
                .get_text(name)
                .map(str::to_string)
                .ok_or_else(|| missing(name))
        };
        let techs = record
            .get_list("techs")
            .ok_or_else(|| missing("techs"))?
            .iter()
            .map(|row| TechEntry::from_record(row).ok_or_else(|| missing("techs")))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            avatar: record.get_file("avatar").cloned(),
            name: text("name")?,
            email: text("email")?,
            password: text("password")?,
            techs,
        })
    }
}

fn missing(name: &str) -> FormError {
    FormError::InvalidInput {
        reason: format!("record has no valid `{name}`"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::RawValue;
    use pretty_assertions::assert_eq;

    fn valid_input() -> RawRecord {
        RawRecord::new()
            .with("name", "ana silva")
            .with("email", "ana@gmail.com")
            .with("password", "123456")
            .with(
                "techs",
                vec![TechEntry::new("go", 80).to_raw(), TechEntry::new("ts", 40).to_raw()],
            )
    }

    #[test]
    fn schemas_are_shared() {
        let schema = signup_schema();
        assert!(Arc::ptr_eq(&schema, &signup_schema()));
        let names: Vec<&str> = schema.fields().map(FieldSpec::name).collect();
        assert_eq!(names, vec!["avatar", "name", "email", "password", "techs"]);
    }

    #[test]
    fn create_user_view() {
        let record = signup_schema().validate(&valid_input()).unwrap();
        let user = CreateUser::try_from(&record).unwrap();
        assert_eq!(user.name, "Ana Silva");
        assert_eq!(user.avatar, None);
        assert_eq!(user.techs, vec![TechEntry::new("go", 80), TechEntry::new("ts", 40)]);
    }

    #[test]
    fn knowledge_must_be_whole() {
        let mut input = valid_input();
        input.insert(
            "techs",
            vec![
                TechEntry::new("go", 80).to_raw(),
                RawRecord::new().with("title", "ts").with("knowledge", "4.5"),
            ],
        );
        let errors = signup_schema().validate(&input).unwrap_err();
        assert_eq!(errors.message("techs.1.knowledge"), Some(messages::KNOWLEDGE_INTEGER));
    }

    #[test]
    fn email_domain_ignores_case_and_is_lowercased() {
        let input = valid_input().with("email", "Ana@GMAIL.com");
        let record = signup_schema().validate(&input).unwrap();
        assert_eq!(record.get_text("email"), Some("ana@gmail.com"));
    }

    #[test]
    fn avatar_limits() {
        let big = FileHandle::untyped("big.png", vec![0_u8; (MAX_AVATAR_BYTES + 1) as usize]);
        let input = valid_input().with("avatar", big);
        let errors = signup_schema().validate(&input).unwrap_err();
        assert_eq!(errors.message("avatar"), Some(messages::AVATAR_SIZE));

        let two = vec![FileHandle::untyped("a.png", vec![1_u8]), FileHandle::untyped("b.png", vec![2_u8])];
        let errors = signup_schema().validate(&valid_input().with("avatar", two)).unwrap_err();
        assert_eq!(errors.message("avatar"), Some(messages::AVATAR_SINGLE));
    }

    #[test]
    fn login_has_no_domain_rule() {
        let input = RawRecord::new()
            .with("email", "ana@yahoo.com")
            .with("password", "123456");
        let record = login_schema().validate(&input).unwrap();
        assert_eq!(record.get_text("email"), Some("ana@yahoo.com"));
        assert!(matches!(input.get("email"), Some(RawValue::Text(_))));
    }
}
