//! # formkit-validator
//!
//! Composable, type-safe validators used to describe form field constraints.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use formkit_validator::prelude::*;
//!
//! // Compose validators with .and(), override messages with .with_message()
//! let password = not_empty().and(min_length(6)).with_message("Too short");
//! assert!(password.validate("123456").is_ok());
//! ```
//!
//! ## Creating Validators
//!
//! Use the [`validator!`] macro for zero-boilerplate validators,
//! or implement [`Validate`](foundation::Validate) manually for complex cases.
//!
//! ## Built-in Validators
//!
//! - **String**: [`NotEmpty`](validators::NotEmpty), [`MinLength`](validators::MinLength),
//!   [`MaxLength`](validators::MaxLength), [`EndsWith`](validators::EndsWith),
//!   [`MatchesRegex`](validators::MatchesRegex), [`Email`](validators::Email)
//! - **Numeric**: [`Min`](validators::Min), [`Max`](validators::Max),
//!   [`InRange`](validators::InRange), [`Integral`](validators::Integral)
//! - **Collection**: [`MinSize`](validators::MinSize), [`MaxSize`](validators::MaxSize)
//! - **File**: [`MaxBytes`](validators::MaxBytes)
//! - **Custom**: [`Predicate`](validators::Predicate)

// ValidationError is the fundamental error type for all validators;
// boxing it would add indirection to every validation call.
#![allow(clippy::result_large_err)]

pub mod combinators;
pub mod foundation;
mod macros;
pub mod prelude;
pub mod validators;
