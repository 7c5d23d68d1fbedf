//! The [`Validate`] trait, its extension methods and [`ValidationError`].

pub mod error;
pub mod traits;

pub use error::{ErrorParams, ValidationError, ValidationErrors};
pub use traits::{Validate, ValidateExt};

/// Runs every validator against `value` and keeps every failure.
///
/// Unlike `.and()`, nothing short-circuits.
pub fn validate_with_all<V>(value: &V::Input, validators: &[&V]) -> Result<(), ValidationErrors>
where
    V: Validate + ?Sized,
{
    validators
        .iter()
        .filter_map(|validator| validator.validate(value).err())
        .collect::<ValidationErrors>()
        .into_result()
}
