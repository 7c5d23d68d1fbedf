//! Message override: forms attach their own text to every rule.

use std::borrow::Cow;

use crate::foundation::{Validate, ValidationError};

/// Reports `message` instead of the inner validator's text.
///
/// Code, field and params are copied from the inner error, which is kept as
/// the cause.
///
/// ```rust,ignore
/// let password = min_length(6).with_message("A senha precisa de no mínimo 6 caracteres");
/// let err = password.validate("123").unwrap_err();
/// assert_eq!(err.code, "min_length");
/// assert_eq!(err.param("actual"), Some("3"));
/// ```
#[derive(Debug, Clone)]
pub struct WithMessage<V> {
    inner: V,
    message: Cow<'static, str>,
}

impl<V> WithMessage<V> {
    pub fn new(inner: V, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            inner,
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl<V: Validate> Validate for WithMessage<V> {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        self.inner.validate(input).map_err(|cause| {
            let mut error = ValidationError::new(cause.code.clone(), self.message.clone());
            error.field.clone_from(&cause.field);
            error.params.clone_from(&cause.params);
            error.caused_by(cause)
        })
    }
}

pub fn with_message<V>(validator: V, message: impl Into<Cow<'static, str>>) -> WithMessage<V> {
    WithMessage::new(validator, message)
}
