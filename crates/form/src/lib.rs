//! # formkit-form
//!
//! Declarative form schemas and everything around them:
//!
//! - [`FormSchema`] / [`FieldSpec`]: ordered fields with constraint chains,
//!   transforms and whole-record refinements
//! - [`FormSchema::validate`]: raw value bag in, normalized [`Record`] or
//!   [`ErrorTree`] out
//! - [`FieldArray`]: repeatable sub-records with stable [`EntryKey`]s
//! - [`FormState`]: values, arrays, errors and output of one mounted form
//! - [`SubmitHandler`]: uploads the record's files and renders it as JSON
//! - [`signup`]: the create-user form
//!
//! ```rust,ignore
//! use formkit_form::{FormError, FormState, signup};
//!
//! let mut form = FormState::new(signup::signup_schema());
//! form.set_value("name", "ana silva")?;
//! form.set_value("email", "ana@gmail.com")?;
//! form.set_value("password", "123456")?;
//! form.append_entry("techs", signup::TechEntry::new("go", 80).to_raw())?;
//! form.append_entry("techs", signup::TechEntry::new("ts", 40).to_raw())?;
//!
//! let record = form.validate().map_err(FormError::Invalid)?;
//! assert_eq!(record.get_text("name"), Some("Ana Silva"));
//! ```

mod error;
mod error_tree;
mod field_array;
mod path;
mod schema;
pub mod signup;
mod state;
mod submit;
mod validate;
mod value;

pub use error::FormError;
pub use error_tree::ErrorTree;
pub use field_array::{EntryKey, FieldArray};
pub use formkit_storage::FileHandle;
pub use path::{FieldPath, PathSegment};
pub use schema::{
    Constraint, FieldKind, FieldSpec, FormSchema, FormSchemaBuilder, Refinement, Transform, capitalize_words,
};
pub use state::{FormConfig, FormState, ValidationMode};
pub use submit::{SubmissionOutcome, SubmitHandler, UploadReport, UploadStatus};
pub use validate::ValidationResult;
pub use value::{RawRecord, RawValue, Record, Value};
