//! Composing validators.
//!
//! - [`And`] / [`Chain`]: all rules must pass, first failure is reported
//! - [`WithMessage`]: the form's message on top of the validator's error

pub mod and;
pub mod message;

pub use and::{And, Chain, and, chain};
pub use message::{WithMessage, with_message};
