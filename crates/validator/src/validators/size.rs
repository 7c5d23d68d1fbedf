//! Element-count bounds on slices: list rows, selected files.

use std::fmt;
use std::marker::PhantomData;

use crate::foundation::{Validate, ValidationError};

macro_rules! size_bound {
    ($(#[$doc:meta])* $name:ident, $factory:ident, $code:literal, $param:literal, $word:literal, $holds:expr) => {
        $(#[$doc])*
        pub struct $name<T> {
            limit: usize,
            _elem: PhantomData<fn(&T)>,
        }

        impl<T> $name<T> {
            pub fn limit(&self) -> usize {
                self.limit
            }
        }

        // Manual impls: `T` itself need not be `Clone` or `Debug`.
        impl<T> Clone for $name<T> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<T> Copy for $name<T> {}

        impl<T> fmt::Debug for $name<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.limit).finish()
            }
        }

        impl<T> Validate for $name<T> {
            type Input = [T];

            fn validate(&self, input: &[T]) -> Result<(), ValidationError> {
                let holds: fn(usize, usize) -> bool = $holds;
                if holds(input.len(), self.limit) {
                    return Ok(());
                }
                Err(ValidationError::new(
                    $code,
                    format!(concat!("Must have ", $word, " {} items"), self.limit),
                )
                .with_param($param, self.limit)
                .with_param("actual", input.len()))
            }
        }

        #[must_use]
        pub fn $factory<T>(limit: usize) -> $name<T> {
            $name {
                limit,
                _elem: PhantomData,
            }
        }
    };
}

size_bound!(
    /// At least `limit` elements.
    ///
    /// ```
    /// use formkit_validator::foundation::Validate;
    /// use formkit_validator::validators::min_size;
    ///
    /// let techs = min_size::<&str>(2);
    /// assert!(techs.validate(&["go", "ts"]).is_ok());
    /// assert!(techs.validate(&["go"]).is_err());
    /// ```
    MinSize, min_size, "min_size", "min", "at least", |len, limit| len >= limit
);

size_bound!(
    /// At most `limit` elements.
    MaxSize, max_size, "max_size", "max", "at most", |len, limit| len <= limit
);
