//! Runs a [`FormSchema`] against a raw value bag.
//!
//! Fields are checked independently in declaration order. A field's chain
//! stops at its first failing constraint, transforms run only on a passing
//! field, and refinements run only when every field of the record passed.

use formkit_storage::FileHandle;
use formkit_validator::foundation::{Validate, ValidationError};
use formkit_validator::validators::integral;
use tracing::debug;

use crate::error_tree::ErrorTree;
use crate::path::FieldPath;
use crate::schema::{Check, FieldKind, FieldSpec, FormSchema};
use crate::value::{RawRecord, RawValue, Record, Value};

/// Either the normalized record or every failure, keyed by path.
pub type ValidationResult = Result<Record, ErrorTree>;

/// What one field contributed to the record.
enum FieldOutcome {
    Valid(Value),
    /// Optional and not supplied: left out of the record.
    Absent,
    Invalid,
}

impl FormSchema {
    /// Validates `raw` into a normalized [`Record`].
    ///
    /// Never panics and never mutates `raw`; the same input always yields
    /// the same result.
    pub fn validate(&self, raw: &RawRecord) -> ValidationResult {
        let mut errors = ErrorTree::new();
        let record = self.validate_at(raw, &FieldPath::root(), &mut errors);

        debug!(
            fields = self.len(),
            invalid_paths = errors.len(),
            "validated form"
        );

        match record {
            Some(record) if errors.is_empty() => Ok(record),
            _ => Err(errors),
        }
    }

    /// Validates `raw` as the record at `prefix`, adding failures to `errors`.
    pub(crate) fn validate_at(&self, raw: &RawRecord, prefix: &FieldPath, errors: &mut ErrorTree) -> Option<Record> {
        let mut record = Record::new();
        let mut valid = true;

        for spec in self.fields() {
            let path = prefix.key(spec.name());
            match validate_field(spec, raw.get(spec.name()), &path, errors) {
                FieldOutcome::Valid(value) => record.insert(spec.name(), value),
                FieldOutcome::Absent => {}
                FieldOutcome::Invalid => valid = false,
            }
        }

        if !valid {
            return None;
        }

        for refinement in self.refinements() {
            if !refinement.holds(&record) {
                errors.push(
                    prefix.join(refinement.target()),
                    ValidationError::new("refinement", refinement.message().to_string()),
                );
                valid = false;
            }
        }

        valid.then_some(record)
    }
}

fn validate_field(spec: &FieldSpec, raw: Option<&RawValue>, path: &FieldPath, errors: &mut ErrorTree) -> FieldOutcome {
    let outcome = match spec.kind() {
        FieldKind::Text | FieldKind::Password => validate_text(spec, raw),
        FieldKind::Number => validate_number(spec, raw, false),
        FieldKind::Integer => validate_number(spec, raw, true),
        FieldKind::File => validate_file(spec, raw),
        FieldKind::List(item) => return validate_list(spec, item, raw, path, errors),
    };

    match outcome {
        Ok(Some(value)) => FieldOutcome::Valid(apply_transforms(spec, value)),
        Ok(None) => FieldOutcome::Absent,
        Err(error) => {
            errors.push(path.clone(), error);
            FieldOutcome::Invalid
        }
    }
}

fn apply_transforms(spec: &FieldSpec, value: Value) -> Value {
    spec.transforms()
        .iter()
        .fold(value, |value, transform| transform.apply(value))
}

fn required_error(spec: &FieldSpec) -> Option<ValidationError> {
    spec.required_message()
        .map(|message| ValidationError::new("required", message.to_string()))
}

fn type_error(spec: &FieldSpec, raw: &RawValue) -> ValidationError {
    ValidationError::new("type_mismatch", spec.type_mismatch_message().to_string())
        .with_param("expected", spec.kind().name())
        .with_param("actual", raw.type_name())
}

// ── text ────────────────────────────────────────────────────────────────────

fn validate_text(spec: &FieldSpec, raw: Option<&RawValue>) -> Result<Option<Value>, ValidationError> {
    let text = match raw {
        None | Some(RawValue::Null) => String::new(),
        Some(RawValue::Text(text)) => text.clone(),
        Some(RawValue::Number(n)) => format_number(*n),
        Some(other) => return Err(type_error(spec, other)),
    };

    if text.is_empty() {
        if let Some(error) = required_error(spec) {
            return Err(error);
        }
    }

    for constraint in spec.constraints() {
        if let Check::Text(check) = &constraint.check {
            check.validate(&text)?;
        }
    }

    Ok(Some(Value::Text(text)))
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

// ── numbers ─────────────────────────────────────────────────────────────────

/// Parse-or-fail: numbers and numeric strings are accepted, blank is absent.
fn coerce_number(spec: &FieldSpec, raw: Option<&RawValue>) -> Result<Option<f64>, ValidationError> {
    let number = match raw {
        None | Some(RawValue::Null) => return Ok(None),
        Some(RawValue::Number(n)) => *n,
        Some(raw @ RawValue::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse::<f64>().map_err(|_| type_error(spec, raw))?
        }
        Some(other) => return Err(type_error(spec, other)),
    };

    if number.is_finite() {
        Ok(Some(number))
    } else {
        Err(type_error(spec, &RawValue::Number(number)))
    }
}

fn validate_number(spec: &FieldSpec, raw: Option<&RawValue>, integer: bool) -> Result<Option<Value>, ValidationError> {
    let Some(number) = coerce_number(spec, raw)? else {
        return match required_error(spec) {
            Some(error) => Err(error),
            None => Ok(None),
        };
    };

    if integer && !fits_i64(number) {
        return Err(type_error(spec, &RawValue::Number(number)));
    }

    for constraint in spec.constraints() {
        if let Check::Number(check) = &constraint.check {
            check.validate(&number)?;
        }
    }

    Ok(Some(if integer {
        Value::Integer(number as i64)
    } else {
        Value::Number(number)
    }))
}

/// Whole and inside `i64`; `i64::MAX as f64` rounds up to 2^63, so it is excluded.
fn fits_i64(number: f64) -> bool {
    integral().validate(&number).is_ok() && number >= i64::MIN as f64 && number < i64::MAX as f64
}

// ── files ───────────────────────────────────────────────────────────────────

fn validate_file(spec: &FieldSpec, raw: Option<&RawValue>) -> Result<Option<Value>, ValidationError> {
    let files: &[FileHandle] = match raw {
        None | Some(RawValue::Null) => &[],
        Some(RawValue::Files(files)) => files,
        Some(other) => return Err(type_error(spec, other)),
    };

    if files.is_empty() {
        return match required_error(spec) {
            Some(error) => Err(error),
            None => Ok(None),
        };
    }

    for constraint in spec.constraints() {
        match &constraint.check {
            Check::Files(check) => check.validate(files)?,
            Check::FileSize(check) => {
                for file in files {
                    check.validate(&file.size())?;
                }
            }
            _ => {}
        }
    }

    match files {
        [file] => Ok(Some(Value::File(file.clone()))),
        _ => Err(type_error(spec, &RawValue::Files(files.to_vec()))),
    }
}

// ── lists ───────────────────────────────────────────────────────────────────

fn validate_list(
    spec: &FieldSpec,
    item: &FormSchema,
    raw: Option<&RawValue>,
    path: &FieldPath,
    errors: &mut ErrorTree,
) -> FieldOutcome {
    let rows: &[RawRecord] = match raw {
        None | Some(RawValue::Null) => &[],
        Some(RawValue::List(rows)) => rows,
        Some(other) => {
            errors.push(path.clone(), type_error(spec, other));
            return FieldOutcome::Invalid;
        }
    };

    let mut items = Vec::with_capacity(rows.len());
    let mut rows_valid = true;
    for (index, row) in rows.iter().enumerate() {
        match item.validate_at(row, &path.index(index), errors) {
            Some(record) => items.push(record),
            None => rows_valid = false,
        }
    }

    // Count rules run whether or not the rows are valid.
    let count_check = spec.constraints().try_for_each(|constraint| match &constraint.check {
        Check::Items(check) => check.validate(rows),
        _ => Ok(()),
    });
    if let Err(error) = count_check {
        errors.push(path.clone(), error);
        return FieldOutcome::Invalid;
    }

    if rows_valid {
        FieldOutcome::Valid(apply_transforms(spec, Value::List(items)))
    } else {
        FieldOutcome::Invalid
    }
}
