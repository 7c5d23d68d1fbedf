//! Declarative form schemas.
//!
//! A [`FormSchema`] is an ordered list of [`FieldSpec`]s plus whole-record
//! [`Refinement`]s. Each field carries a constraint chain built from
//! `formkit-validator` rules, each with the message shown to the user.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use formkit_storage::FileHandle;
use formkit_validator::prelude::*;
use indexmap::IndexMap;

use crate::error::FormError;
use crate::path::FieldPath;
use crate::value::{RawRecord, Record, Value};

/// Message used when input cannot be coerced to the field's kind.
pub const DEFAULT_TYPE_MESSAGE: &str = "Valor inválido";

type Boxed<T> = Box<dyn Validate<Input = T> + Send + Sync>;

// ============================================================================
// FIELD KIND
// ============================================================================

/// Primitive kind of a field; decides how raw input is coerced.
#[derive(Debug, Clone)]
pub enum FieldKind {
    Text,
    /// Text that must never be logged.
    Password,
    Number,
    /// Number without fractional part; normalized to `i64`.
    Integer,
    /// Single file selected in a file input.
    File,
    /// Repeatable rows, each validated against the item schema.
    List(Arc<FormSchema>),
}

impl FieldKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Password => "password",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::File => "file",
            Self::List(_) => "list",
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }
}

// ============================================================================
// CONSTRAINT
// ============================================================================

/// The input a constraint checks, after coercion.
pub(crate) enum Check {
    Text(Boxed<str>),
    Number(Boxed<f64>),
    /// The whole file selection (count rules).
    Files(Boxed<[FileHandle]>),
    /// Size in bytes of each selected file.
    FileSize(Boxed<u64>),
    /// List rows (count rules).
    Items(Boxed<[RawRecord]>),
}

impl Check {
    fn applies_to(&self, kind: &FieldKind) -> bool {
        matches!(
            (self, kind),
            (Self::Text(_), FieldKind::Text | FieldKind::Password)
                | (Self::Number(_), FieldKind::Number | FieldKind::Integer)
                | (Self::Files(_) | Self::FileSize(_), FieldKind::File)
                | (Self::Items(_), FieldKind::List(_))
        )
    }
}

/// One rule of a field's chain with its user-facing message.
pub struct Constraint {
    name: &'static str,
    message: Cow<'static, str>,
    pub(crate) check: Check,
}

impl Constraint {
    fn new(
        name: &'static str,
        message: impl Into<Cow<'static, str>>,
        check: impl FnOnce(Cow<'static, str>) -> Check,
    ) -> Self {
        let message = message.into();
        let check = check(message.clone());
        Self {
            name,
            message,
            check,
        }
    }

    /// Text must not be empty.
    pub fn not_empty(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new("not_empty", message, |m| Check::Text(Box::new(not_empty().with_message(m))))
    }

    /// Text must have at least `min` characters.
    pub fn min_length(min: usize, message: impl Into<Cow<'static, str>>) -> Self {
        Self::new("min_length", message, |m| {
            Check::Text(Box::new(min_length(min).with_message(m)))
        })
    }

    /// Text must have at most `max` characters.
    pub fn max_length(max: usize, message: impl Into<Cow<'static, str>>) -> Self {
        Self::new("max_length", message, |m| {
            Check::Text(Box::new(max_length(max).with_message(m)))
        })
    }

    /// Text must match `pattern`.
    pub fn pattern(pattern: &str, message: impl Into<Cow<'static, str>>) -> Result<Self, FormError> {
        let validator = matches_regex(pattern).map_err(|e| FormError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::new("pattern", message, |m| {
            Check::Text(Box::new(validator.with_message(m)))
        }))
    }

    /// Text must be an email address.
    pub fn email(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new("email", message, |m| Check::Text(Box::new(email().with_message(m))))
    }

    /// Text must end with `suffix`, ignoring case.
    pub fn ends_with(suffix: impl Into<String>, message: impl Into<Cow<'static, str>>) -> Self {
        let suffix = suffix.into();
        Self::new("ends_with", message, |m| {
            Check::Text(Box::new(ends_with(suffix).ignore_case().with_message(m)))
        })
    }

    /// Text must satisfy `check`.
    pub fn text_predicate<F>(message: impl Into<Cow<'static, str>>, check: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self::new("custom", message, |m| {
            Check::Text(Box::new(predicate::<str, _, _>("custom", check).with_message(m)))
        })
    }

    /// Number must lie in `min..=max`.
    pub fn range(min: f64, max: f64, message: impl Into<Cow<'static, str>>) -> Self {
        Self::new("range", message, |m| {
            Check::Number(Box::new(in_range(min, max).with_message(m)))
        })
    }

    /// Number must be at least `min`.
    pub fn min(min_value: f64, message: impl Into<Cow<'static, str>>) -> Self {
        Self::new("min", message, |m| Check::Number(Box::new(min(min_value).with_message(m))))
    }

    /// Number must be at most `max`.
    pub fn max(max_value: f64, message: impl Into<Cow<'static, str>>) -> Self {
        Self::new("max", message, |m| Check::Number(Box::new(max(max_value).with_message(m))))
    }

    /// Number must satisfy `check`.
    pub fn number_predicate<F>(message: impl Into<Cow<'static, str>>, check: F) -> Self
    where
        F: Fn(f64) -> bool + Send + Sync + 'static,
    {
        Self::new("custom", message, |m| {
            Check::Number(Box::new(predicate::<f64, _, _>("custom", move |n: &f64| check(*n)).with_message(m)))
        })
    }

    /// At most `max` files may be selected.
    pub fn max_files(max: usize, message: impl Into<Cow<'static, str>>) -> Self {
        Self::new("max_files", message, |m| {
            Check::Files(Box::new(max_size::<FileHandle>(max).with_message(m)))
        })
    }

    /// Every selected file must be at most `max` bytes.
    pub fn max_bytes(max: u64, message: impl Into<Cow<'static, str>>) -> Self {
        Self::new("max_bytes", message, |m| {
            Check::FileSize(Box::new(max_bytes(max).with_message(m)))
        })
    }

    /// A list must have at least `min` rows.
    pub fn min_items(min: usize, message: impl Into<Cow<'static, str>>) -> Self {
        Self::new("min_items", message, |m| {
            Check::Items(Box::new(min_size::<RawRecord>(min).with_message(m)))
        })
    }

    /// A list must have at most `max` rows.
    pub fn max_items(max: usize, message: impl Into<Cow<'static, str>>) -> Self {
        Self::new("max_items", message, |m| {
            Check::Items(Box::new(max_size::<RawRecord>(max).with_message(m)))
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraint")
            .field("name", &self.name)
            .field("message", &self.message)
            .finish()
    }
}

// ============================================================================
// TRANSFORM
// ============================================================================

/// Normalization applied once a field's constraints pass.
#[derive(Clone)]
pub enum Transform {
    /// Upper-cases the first character of each whitespace-separated word and
    /// joins the words with single spaces.
    CapitalizeWords,
    Lowercase,
    Trim,
    Custom(Arc<dyn Fn(Value) -> Value + Send + Sync>),
}

impl Transform {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Built-in transforms touch text only; other values pass through.
    pub fn apply(&self, value: Value) -> Value {
        match (self, value) {
            (Self::CapitalizeWords, Value::Text(text)) => Value::Text(capitalize_words(&text)),
            (Self::Lowercase, Value::Text(text)) => Value::Text(text.to_lowercase()),
            (Self::Trim, Value::Text(text)) => Value::Text(text.trim().to_string()),
            (Self::Custom(f), value) => f(value),
            (_, value) => value,
        }
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapitalizeWords => f.write_str("CapitalizeWords"),
            Self::Lowercase => f.write_str("Lowercase"),
            Self::Trim => f.write_str("Trim"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// `"ana  silva"` → `"Ana Silva"`; the rest of each word is kept as typed.
pub fn capitalize_words(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// FIELD SPEC
// ============================================================================

/// Declarative rule set for one form field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    name: String,
    kind: FieldKind,
    required: Option<Cow<'static, str>>,
    type_message: Cow<'static, str>,
    constraints: Vec<Arc<Constraint>>,
    transforms: Vec<Transform>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: None,
            type_message: Cow::Borrowed(DEFAULT_TYPE_MESSAGE),
            constraints: Vec::new(),
            transforms: Vec::new(),
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    pub fn password(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Password)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Number)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::File)
    }

    pub fn list(name: impl Into<String>, item: FormSchema) -> Self {
        Self::new(name, FieldKind::List(Arc::new(item)))
    }

    /// Reports `message` when the value is missing (or empty text).
    #[must_use = "builder methods must be chained or built"]
    pub fn required(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.required = Some(message.into());
        self
    }

    /// Message for input that cannot be coerced to this field's kind.
    #[must_use = "builder methods must be chained or built"]
    pub fn type_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.type_message = message.into();
        self
    }

    /// Appends a constraint; constraints run in the order added.
    #[must_use = "builder methods must be chained or built"]
    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(Arc::new(constraint));
        self
    }

    /// Appends a transform; transforms run in the order added.
    #[must_use = "builder methods must be chained or built"]
    pub fn transform(mut self, transform: Transform) -> Self {
        self.transforms.push(transform);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required.is_some()
    }

    pub fn required_message(&self) -> Option<&str> {
        self.required.as_deref()
    }

    pub fn type_mismatch_message(&self) -> &str {
        &self.type_message
    }

    pub fn constraints(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints.iter().map(AsRef::as_ref)
    }

    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }
}

// ============================================================================
// REFINEMENT
// ============================================================================

/// Rule over the whole normalized record, run once every field passed.
#[derive(Clone)]
pub struct Refinement {
    target: FieldPath,
    message: Cow<'static, str>,
    predicate: Arc<dyn Fn(&Record) -> bool + Send + Sync>,
}

impl Refinement {
    /// A refinement reported against the whole record.
    pub fn new<F>(message: impl Into<Cow<'static, str>>, predicate: F) -> Self
    where
        F: Fn(&Record) -> bool + Send + Sync + 'static,
    {
        Self {
            target: FieldPath::root(),
            message: message.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Reports against `target` instead of the whole record.
    #[must_use = "builder methods must be chained or built"]
    pub fn at(mut self, target: impl Into<FieldPath>) -> Self {
        self.target = target.into();
        self
    }

    pub fn target(&self) -> &FieldPath {
        &self.target
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn holds(&self, record: &Record) -> bool {
        (self.predicate)(record)
    }
}

impl fmt::Debug for Refinement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Refinement")
            .field("target", &self.target)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// FORM SCHEMA
// ============================================================================

/// Ordered field specs plus refinements. Immutable once built.
#[derive(Debug, Clone)]
pub struct FormSchema {
    fields: IndexMap<String, FieldSpec>,
    refinements: Vec<Refinement>,
}

impl FormSchema {
    pub fn builder() -> FormSchemaBuilder {
        FormSchemaBuilder::default()
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.values()
    }

    pub fn refinements(&self) -> &[Refinement] {
        &self.refinements
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Collects fields and refinements, checking them on [`build`](Self::build).
#[derive(Debug, Default)]
pub struct FormSchemaBuilder {
    fields: Vec<FieldSpec>,
    refinements: Vec<Refinement>,
}

impl FormSchemaBuilder {
    #[must_use = "builder methods must be chained or built"]
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn refine(mut self, refinement: Refinement) -> Self {
        self.refinements.push(refinement);
        self
    }

    /// Rejects duplicate names and constraints that cannot check their field's kind.
    pub fn build(self) -> Result<FormSchema, FormError> {
        let mut fields = IndexMap::with_capacity(self.fields.len());

        for field in self.fields {
            if let Some(constraint) = field.constraints().find(|c| !c.check.applies_to(&field.kind)) {
                return Err(FormError::IncompatibleConstraint {
                    field: field.name.clone(),
                    constraint: constraint.name().to_string(),
                    kind: field.kind.name().to_string(),
                });
            }
            if fields.contains_key(&field.name) {
                return Err(FormError::DuplicateField { name: field.name });
            }
            fields.insert(field.name.clone(), field);
        }

        Ok(FormSchema {
            fields,
            refinements: self.refinements,
        })
    }
}
