//! Closure-backed validator for one-off rules.

use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

use crate::foundation::{Validate, ValidationError};

/// Passes when the wrapped predicate returns `true`.
pub struct Predicate<T: ?Sized, F> {
    code: Cow<'static, str>,
    check: F,
    _input: PhantomData<fn(&T)>,
}

impl<T: ?Sized, F> fmt::Debug for Predicate<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate").field("code", &self.code).finish()
    }
}

impl<T, F> Validate for Predicate<T, F>
where
    T: ?Sized,
    F: Fn(&T) -> bool,
{
    type Input = T;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        if (self.check)(input) {
            Ok(())
        } else {
            Err(ValidationError::new(
                self.code.clone(),
                "Value does not satisfy the rule",
            ))
        }
    }
}

/// Creates a validator from a predicate; failures carry `code`.
///
/// ```
/// use formkit_validator::validators::predicate;
/// use formkit_validator::foundation::Validate;
///
/// let even = predicate("even", |n: &f64| n % 2.0 == 0.0);
/// assert!(even.validate(&4.0).is_ok());
/// assert_eq!(even.validate(&3.0).unwrap_err().code, "even");
/// ```
pub fn predicate<T, F, C>(code: C, check: F) -> Predicate<T, F>
where
    T: ?Sized,
    F: Fn(&T) -> bool,
    C: Into<Cow<'static, str>>,
{
    Predicate {
        code: code.into(),
        check,
        _input: PhantomData,
    }
}
