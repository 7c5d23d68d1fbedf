//! `Validate` and its combinator methods.

use std::borrow::Cow;

use crate::combinators::{And, WithMessage};
use crate::foundation::ValidationError;

/// A rule over one kind of input.
///
/// `Input` is usually unsized (`str`, `[T]`) so a validator is checked
/// against borrowed data; a number validator takes `f64`.
///
/// ```rust,ignore
/// struct NoSpaces;
///
/// impl Validate for NoSpaces {
///     type Input = str;
///
///     fn validate(&self, input: &str) -> Result<(), ValidationError> {
///         match input.contains(' ') {
///             true => Err(ValidationError::new("no_spaces", "Remove the spaces")),
///             false => Ok(()),
///         }
///     }
/// }
/// ```
pub trait Validate {
    type Input: ?Sized;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError>;
}

impl<V: Validate + ?Sized> Validate for Box<V> {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        V::validate(self, input)
    }
}

impl<V: Validate + ?Sized> Validate for &V {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        V::validate(self, input)
    }
}

/// Combinator methods, available on every [`Validate`].
pub trait ValidateExt: Validate + Sized {
    /// `self` then `other`; the first failure is returned.
    fn and<V>(self, other: V) -> And<Self, V>
    where
        V: Validate<Input = Self::Input>,
    {
        And(self, other)
    }

    /// Reports `message` on failure, see [`WithMessage`].
    fn with_message(self, message: impl Into<Cow<'static, str>>) -> WithMessage<Self> {
        WithMessage::new(self, message)
    }
}

impl<T: Validate> ValidateExt for T {}

#[cfg(test)]
mod tests {
    use super::*;

    struct Even;

    impl Validate for Even {
        type Input = f64;

        fn validate(&self, input: &f64) -> Result<(), ValidationError> {
            if input % 2.0 == 0.0 {
                Ok(())
            } else {
                Err(ValidationError::new("even", "Must be even"))
            }
        }
    }

    #[test]
    fn boxed_and_borrowed_validators_delegate() {
        let boxed: Box<dyn Validate<Input = f64>> = Box::new(Even);
        assert!(boxed.validate(&4.0).is_ok());
        assert!((&Even).validate(&3.0).is_err());
    }

    #[test]
    fn ext_methods_compose() {
        let rule = Even.and(Even).with_message("Use um número par");
        let err = rule.validate(&3.0).unwrap_err();
        assert_eq!(err.message, "Use um número par");
        assert_eq!(err.code, "even");
    }
}
