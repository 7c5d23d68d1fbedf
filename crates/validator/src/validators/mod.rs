//! Built-in validators
//!
//! - **String**: length and pattern checks (email, suffix, regex)
//! - **Numeric**: ranges and integrality over `f64`
//! - **Collection**: element counts over slices
//! - **File**: byte-size limits
//! - **Custom**: closures via [`predicate`]
//!
//! ```rust,ignore
//! use formkit_validator::prelude::*;
//!
//! let email = not_empty().and(email()).and(ends_with("@gmail.com").ignore_case());
//! let knowledge = integral().and(in_range(1.0, 100.0));
//! let techs = min_size::<Tech>(2);
//! let avatar = max_bytes(4 * 1024 * 1024);
//! ```

pub mod file;
pub mod length;
pub mod pattern;
pub mod predicate;
pub mod range;
pub mod size;

pub use file::{MaxBytes, max_bytes};
pub use length::{MaxLength, MinLength, NotEmpty, max_length, min_length, not_empty};
pub use pattern::{Email, EndsWith, MatchesRegex, email, ends_with, matches_regex};
pub use predicate::{Predicate, predicate};
pub use range::{InRange, Integral, Max, Min, in_range, integral, max, min};
pub use size::{MaxSize, MinSize, max_size, min_size};
