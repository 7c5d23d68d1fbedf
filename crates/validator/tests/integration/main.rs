//! Integration tests for formkit-validator, exercised through the public prelude.

mod composition;
mod properties;
