//! The failure a validator reports.
//!
//! Codes and default messages are `&'static str` in almost every case, so
//! text fields are `Cow<'static, str>` and only formatted messages allocate.

use std::borrow::Cow;
use std::fmt;

use smallvec::SmallVec;

/// Key/value details of a failure (`min`, `actual`, ...). Rarely more than three.
pub type ErrorParams = SmallVec<[(Cow<'static, str>, Cow<'static, str>); 3]>;

/// One validation failure.
///
/// `code` is stable and meant for programs; `message` is what the user sees.
/// When a form overrides the message, the validator's own error is kept as
/// the `cause`.
///
/// ```rust,ignore
/// use formkit_validator::foundation::ValidationError;
///
/// let error = ValidationError::min_length(6, 3).with_field("password");
/// assert_eq!(error.param("min"), Some("6"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub code: Cow<'static, str>,
    pub message: Cow<'static, str>,
    /// Dotted path of the offending field, e.g. `techs.0.title`.
    pub field: Option<Cow<'static, str>>,
    pub params: ErrorParams,
    pub cause: Option<Box<ValidationError>>,
}

impl ValidationError {
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
            params: ErrorParams::new(),
            cause: None,
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, field: impl Into<Cow<'static, str>>) -> Self {
        self.field = Some(field.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(mut self, key: impl Into<Cow<'static, str>>, value: impl fmt::Display) -> Self {
        self.params.push((key.into(), Cow::Owned(value.to_string())));
        self
    }

    /// Keeps `cause` as the error this one replaced.
    #[must_use = "builder methods must be chained or built"]
    pub fn caused_by(mut self, cause: ValidationError) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find_map(|(k, v)| (k == key).then_some(v.as_ref()))
    }

    /// Last error in the `cause` chain; `self` when there is none.
    pub fn root_cause(&self) -> &ValidationError {
        let mut error = self;
        while let Some(cause) = &error.cause {
            error = cause;
        }
        error
    }

    // ── common failures ────────────────────────────────────────────────────

    pub fn min_length(min: usize, actual: usize) -> Self {
        Self::new("min_length", format!("Must be at least {min} characters"))
            .with_param("min", min)
            .with_param("actual", actual)
    }

    pub fn max_length(max: usize, actual: usize) -> Self {
        Self::new("max_length", format!("Must be at most {max} characters"))
            .with_param("max", max)
            .with_param("actual", actual)
    }

    pub fn out_of_range<T: fmt::Display>(min: T, max: T, actual: T) -> Self {
        Self::new("out_of_range", format!("Must be between {min} and {max}"))
            .with_param("min", min)
            .with_param("max", max)
            .with_param("actual", actual)
    }

    /// Input does not have the expected shape (`email`, `regex`, ...).
    pub fn invalid_format(expected: &'static str) -> Self {
        Self::new("invalid_format", "Invalid format").with_param("expected", expected)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "{field}: ")?;
        }
        write!(f, "{} ({})", self.message, self.code)
    }
}

impl std::error::Error for ValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause.as_deref().map(|cause| cause as _)
    }
}

/// Every failure of a non-short-circuiting run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    /// `Ok(())` when nothing failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl FromIterator<ValidationError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::error::Error as _;

    #[test]
    fn static_text_is_borrowed() {
        let error = ValidationError::new("required", "Obrigatório");
        assert!(matches!(error.code, Cow::Borrowed(_)));
        assert!(matches!(error.message, Cow::Borrowed(_)));
        assert!(error.field.is_none());
    }

    #[test]
    fn params_keep_insertion_order() {
        let error = ValidationError::min_length(6, 3).with_field("password");
        let keys: Vec<&str> = error.params.iter().map(|(k, _)| k.as_ref()).collect();

        assert_eq!(keys, vec!["min", "actual"]);
        assert_eq!(error.param("actual"), Some("3"));
        assert_eq!(error.param("max"), None);
    }

    #[test]
    fn cause_chain() {
        let inner = ValidationError::min_length(6, 3);
        let error = ValidationError::new("min_length", "A senha é curta").caused_by(inner.clone());

        assert_eq!(error.root_cause(), &inner);
        assert_eq!(inner.root_cause(), &inner);
        assert!(error.source().is_some());
        assert!(inner.source().is_none());
    }

    #[test]
    fn display_leads_with_field() {
        let error = ValidationError::out_of_range(1, 100, 120).with_field("techs.0.knowledge");
        assert_eq!(
            error.to_string(),
            "techs.0.knowledge: Must be between 1 and 100 (out_of_range)"
        );
    }

    #[test]
    fn collected_errors() {
        assert_eq!(ValidationErrors::new().into_result(), Ok(()));

        let errors: ValidationErrors = [
            ValidationError::new("a", "first"),
            ValidationError::new("b", "second"),
        ]
        .into_iter()
        .collect();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.to_string(), "first (a); second (b)");
        assert!(errors.into_result().is_err());
    }
}
