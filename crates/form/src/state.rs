//! State of one mounted form: raw values, field arrays, errors, output.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::FormError;
use crate::error_tree::ErrorTree;
use crate::field_array::{EntryKey, FieldArray};
use crate::path::FieldPath;
use crate::schema::{FieldSpec, FormSchema};
use crate::submit::{SubmissionOutcome, SubmitHandler};
use crate::validate::ValidationResult;
use crate::value::{RawRecord, RawValue};

/// When edits trigger validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Only `validate()` and `submit()` validate.
    #[default]
    OnSubmit,
    /// Every edit re-validates and refreshes the error tree.
    OnChange,
}

/// Behaviour of a [`FormState`].
///
/// ```toml
/// mode = "on_submit"
/// re_validate_mode = "on_change"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Validation trigger before the first submit.
    pub mode: ValidationMode,
    /// Validation trigger once the form has been submitted.
    pub re_validate_mode: ValidationMode,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            mode: ValidationMode::OnSubmit,
            re_validate_mode: ValidationMode::OnChange,
        }
    }
}

impl FormConfig {
    pub fn from_toml(source: &str) -> Result<Self, FormError> {
        toml::from_str(source).map_err(|e| FormError::Config {
            reason: e.to_string(),
        })
    }
}

/// Controller for one form on screen.
///
/// Scalar fields hold their last raw value; list fields are edited through
/// their [`FieldArray`]. Nothing here is persisted.
#[derive(Debug)]
pub struct FormState {
    schema: Arc<FormSchema>,
    config: FormConfig,
    values: RawRecord,
    arrays: IndexMap<String, FieldArray>,
    errors: ErrorTree,
    outcome: Option<SubmissionOutcome>,
    submit_count: usize,
}

impl FormState {
    pub fn new(schema: Arc<FormSchema>) -> Self {
        Self::with_config(schema, FormConfig::default())
    }

    pub fn with_config(schema: Arc<FormSchema>, config: FormConfig) -> Self {
        let arrays = empty_arrays(&schema);
        Self {
            schema,
            config,
            values: RawRecord::new(),
            arrays,
            errors: ErrorTree::new(),
            outcome: None,
            submit_count: 0,
        }
    }

    pub fn schema(&self) -> &Arc<FormSchema> {
        &self.schema
    }

    pub fn config(&self) -> FormConfig {
        self.config
    }

    fn spec(&self, name: &str) -> Result<&FieldSpec, FormError> {
        self.schema.field(name).ok_or_else(|| FormError::UnknownField {
            name: name.to_string(),
        })
    }

    // ── scalar fields ───────────────────────────────────────────────────────

    /// Records an edit of a scalar field.
    pub fn set_value(&mut self, name: &str, value: impl Into<RawValue>) -> Result<(), FormError> {
        if self.spec(name)?.kind().is_list() {
            return Err(FormError::NotAScalar {
                name: name.to_string(),
            });
        }
        self.values.insert(name, value);
        trace!(field = name, "field changed");
        self.on_change();
        Ok(())
    }

    /// Last raw value of a scalar field.
    pub fn value(&self, name: &str) -> Option<&RawValue> {
        self.values.get(name)
    }

    // ── list fields ─────────────────────────────────────────────────────────

    pub fn field_array(&self, name: &str) -> Result<&FieldArray, FormError> {
        self.spec(name)?;
        self.arrays.get(name).ok_or_else(|| FormError::NotAList {
            name: name.to_string(),
        })
    }

    /// Direct access to a field array. Edits made through it do not trigger
    /// on-change validation.
    pub fn field_array_mut(&mut self, name: &str) -> Result<&mut FieldArray, FormError> {
        self.spec(name)?;
        self.arrays.get_mut(name).ok_or_else(|| FormError::NotAList {
            name: name.to_string(),
        })
    }

    /// Adds a row at the end of a list field.
    pub fn append_entry(&mut self, name: &str, entry: RawRecord) -> Result<EntryKey, FormError> {
        let key = self.field_array_mut(name)?.append(entry);
        self.on_change();
        Ok(key)
    }

    /// Removes the row at `index` of a list field.
    pub fn remove_entry(&mut self, name: &str, index: usize) -> Result<Option<RawRecord>, FormError> {
        let removed = self.field_array_mut(name)?.remove(index);
        self.on_change();
        Ok(removed)
    }

    /// Edits one field of a row.
    pub fn set_entry_field(
        &mut self,
        name: &str,
        key: EntryKey,
        field: &str,
        value: impl Into<RawValue>,
    ) -> Result<(), FormError> {
        self.field_array_mut(name)?.set_field(key, field, value)?;
        trace!(field = name, entry = %key, sub_field = field, "entry changed");
        self.on_change();
        Ok(())
    }

    // ── validation ──────────────────────────────────────────────────────────

    /// The raw value bag as it would be submitted, in schema order.
    pub fn values(&self) -> RawRecord {
        self.schema
            .fields()
            .filter_map(|spec| {
                let name = spec.name();
                match self.arrays.get(name) {
                    Some(array) => Some((name, array.to_raw())),
                    None => self.values.get(name).map(|value| (name, value.clone())),
                }
            })
            .collect()
    }

    /// Validates the current values and stores the resulting error tree.
    pub fn validate(&mut self) -> ValidationResult {
        let result = self.schema.validate(&self.values());
        self.errors = match &result {
            Ok(_) => ErrorTree::new(),
            Err(errors) => errors.clone(),
        };
        result
    }

    fn on_change(&mut self) {
        let mode = if self.submit_count == 0 {
            self.config.mode
        } else {
            self.config.re_validate_mode
        };
        if mode == ValidationMode::OnChange {
            self.errors = self.schema.validate(&self.values()).err().unwrap_or_default();
        }
    }

    pub fn errors(&self) -> &ErrorTree {
        &self.errors
    }

    /// Message shown next to `path`, if any.
    pub fn error(&self, path: impl Into<FieldPath>) -> Option<&str> {
        self.errors.message(path)
    }

    // ── submission ──────────────────────────────────────────────────────────

    /// Validates and, when valid, hands the record to `handler`.
    ///
    /// An invalid form is refused with [`FormError::Invalid`] and the handler
    /// is not called. A valid one replaces the previous output.
    pub async fn submit(&mut self, handler: &SubmitHandler) -> Result<SubmissionOutcome, FormError> {
        self.submit_count += 1;

        let record = match self.validate() {
            Ok(record) => record,
            Err(errors) => {
                debug!(invalid_paths = errors.len(), "submit refused");
                return Err(FormError::Invalid(errors));
            }
        };

        let outcome = handler.submit(&record).await?;
        self.outcome = Some(outcome.clone());
        Ok(outcome)
    }

    /// Outcome of the last successful submit.
    pub fn outcome(&self) -> Option<&SubmissionOutcome> {
        self.outcome.as_ref()
    }

    /// Rendered record of the last successful submit.
    pub fn output(&self) -> Option<&str> {
        self.outcome.as_ref().map(SubmissionOutcome::output)
    }

    pub fn submit_count(&self) -> usize {
        self.submit_count
    }

    /// Back to the freshly mounted state.
    pub fn reset(&mut self) {
        self.values = RawRecord::new();
        self.arrays = empty_arrays(&self.schema);
        self.errors = ErrorTree::new();
        self.outcome = None;
        self.submit_count = 0;
    }
}

fn empty_arrays(schema: &FormSchema) -> IndexMap<String, FieldArray> {
    schema
        .fields()
        .filter(|spec| spec.kind().is_list())
        .map(|spec| (spec.name().to_string(), FieldArray::new()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Constraint;
    use pretty_assertions::assert_eq;

    fn schema() -> Arc<FormSchema> {
        let item = FormSchema::builder()
            .field(FieldSpec::text("title").constraint(Constraint::not_empty("título")))
            .build()
            .unwrap();
        Arc::new(
            FormSchema::builder()
                .field(FieldSpec::text("email").constraint(Constraint::not_empty("email")))
                .field(FieldSpec::list("techs", item))
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn unknown_and_mismatched_fields() {
        let mut form = FormState::new(schema());
        assert_eq!(form.set_value("phone", "1").unwrap_err().code(), "FORM_UNKNOWN_FIELD");
        assert_eq!(form.set_value("techs", "1").unwrap_err().code(), "FORM_NOT_A_SCALAR");
        assert_eq!(form.field_array("email").unwrap_err().code(), "FORM_NOT_A_LIST");
        assert_eq!(form.field_array("nope").unwrap_err().code(), "FORM_UNKNOWN_FIELD");
    }

    #[test]
    fn values_follow_schema_order_and_arrays() {
        let mut form = FormState::new(schema());
        form.append_entry("techs", RawRecord::new().with("title", "go")).unwrap();
        form.set_value("email", "ana@gmail.com").unwrap();

        let values = form.values();
        let names: Vec<&str> = values.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["email", "techs"]);
        assert_eq!(values.get("techs"), Some(&form.field_array("techs").unwrap().to_raw()));
    }

    #[test]
    fn on_submit_mode_waits_for_validate() {
        let mut form = FormState::new(schema());
        form.set_value("email", "").unwrap();
        assert!(form.errors().is_empty());

        assert!(form.validate().is_err());
        assert_eq!(form.error("email"), Some("email"));
    }

    #[test]
    fn on_change_mode_revalidates_every_edit() {
        let config = FormConfig {
            mode: ValidationMode::OnChange,
            ..FormConfig::default()
        };
        let mut form = FormState::with_config(schema(), config);

        form.set_value("email", "").unwrap();
        assert_eq!(form.error("email"), Some("email"));

        let key = form.append_entry("techs", RawRecord::new().with("title", "")).unwrap();
        assert_eq!(form.error("techs.0.title"), Some("título"));

        form.set_entry_field("techs", key, "title", "go").unwrap();
        form.set_value("email", "ana@gmail.com").unwrap();
        assert!(form.errors().is_empty());
    }

    #[test]
    fn reset_discards_everything() {
        let mut form = FormState::new(schema());
        form.set_value("email", "x").unwrap();
        form.append_entry("techs", RawRecord::new()).unwrap();
        assert!(form.validate().is_err());

        form.reset();
        assert!(form.value("email").is_none());
        assert!(form.field_array("techs").unwrap().is_empty());
        assert!(form.errors().is_empty());
        assert_eq!(form.submit_count(), 0);
        assert!(form.output().is_none());
    }

    #[test]
    fn config_from_toml() {
        let config = FormConfig::from_toml(r#"mode = "on_change""#).unwrap();
        assert_eq!(config.mode, ValidationMode::OnChange);
        assert_eq!(config.re_validate_mode, ValidationMode::OnChange);

        let err = FormConfig::from_toml(r#"mode = "sometimes""#).unwrap_err();
        assert_eq!(err.category(), "config");
    }
}
