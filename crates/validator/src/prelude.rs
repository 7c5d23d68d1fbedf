//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use formkit_validator::prelude::*;
//!
//! let name = not_empty().with_message("Name is required");
//! let knowledge = integral().and(in_range(1.0, 100.0));
//! let techs = min_size::<String>(2);
//! ```

pub use crate::foundation::{Validate, ValidateExt, ValidationError, ValidationErrors};

#[allow(clippy::wildcard_imports, ambiguous_glob_reexports)]
pub use crate::validators::*;

pub use crate::combinators::{And, Chain, WithMessage, and, chain, with_message};
