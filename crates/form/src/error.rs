use crate::error_tree::ErrorTree;

/// Error type for form operations.
///
/// Covers schema construction, field lookup, field array edits and
/// rendering. Validation itself returns its failures as data; only a
/// submit of an invalid form surfaces them here, as [`FormError::Invalid`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// Submit was refused because the form does not validate.
    #[error("{0}")]
    Invalid(ErrorTree),

    /// No field with this name in the schema.
    #[error("unknown field: `{name}`")]
    UnknownField { name: String },

    /// Two fields of one schema share a name.
    #[error("field declared twice: `{name}`")]
    DuplicateField { name: String },

    /// A list operation was used on a non-list field.
    #[error("field `{name}` is not a list")]
    NotAList { name: String },

    /// A scalar operation was used on a list field.
    #[error("field `{name}` is a list; edit it through its field array")]
    NotAScalar { name: String },

    /// A constraint cannot check values of the field's kind.
    #[error("constraint `{constraint}` does not apply to {kind} field `{field}`")]
    IncompatibleConstraint {
        field: String,
        constraint: String,
        kind: String,
    },

    /// A pattern constraint's regex does not compile.
    #[error("invalid pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Field array position past the end.
    #[error("index {index} out of bounds for field array of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// No field array entry carries this key.
    #[error("unknown field array entry: #{key}")]
    UnknownEntry { key: u64 },

    /// Input could not be read as a raw value bag.
    #[error("invalid raw input: {reason}")]
    InvalidInput { reason: String },

    /// The record could not be rendered.
    #[error("serialization failed: {error}")]
    Serialization { error: String },

    /// Form configuration could not be parsed.
    #[error("invalid form config: {reason}")]
    Config { reason: String },
}

impl FormError {
    /// Broad error category for grouping in logs.
    #[must_use]
    pub fn category(&self) -> &str {
        match self {
            Self::Invalid(_) => "validation",
            Self::UnknownField { .. } | Self::UnknownEntry { .. } => "lookup",
            Self::DuplicateField { .. }
            | Self::IncompatibleConstraint { .. }
            | Self::InvalidPattern { .. } => "schema",
            Self::NotAList { .. } | Self::NotAScalar { .. } => "type",
            Self::IndexOutOfBounds { .. } => "bounds",
            Self::InvalidInput { .. } => "input",
            Self::Serialization { .. } => "serialization",
            Self::Config { .. } => "config",
        }
    }

    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Invalid(_) => "FORM_INVALID",
            Self::UnknownField { .. } => "FORM_UNKNOWN_FIELD",
            Self::DuplicateField { .. } => "FORM_DUPLICATE_FIELD",
            Self::NotAList { .. } => "FORM_NOT_A_LIST",
            Self::NotAScalar { .. } => "FORM_NOT_A_SCALAR",
            Self::IncompatibleConstraint { .. } => "FORM_INCOMPATIBLE_CONSTRAINT",
            Self::InvalidPattern { .. } => "FORM_INVALID_PATTERN",
            Self::IndexOutOfBounds { .. } => "FORM_INDEX_OUT_OF_BOUNDS",
            Self::UnknownEntry { .. } => "FORM_UNKNOWN_ENTRY",
            Self::InvalidInput { .. } => "FORM_INVALID_INPUT",
            Self::Serialization { .. } => "FORM_SER",
            Self::Config { .. } => "FORM_CONFIG",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = FormError::UnknownField {
            name: "phone".into(),
        };
        assert_eq!(err.to_string(), "unknown field: `phone`");
        assert_eq!(err.code(), "FORM_UNKNOWN_FIELD");
        assert_eq!(err.category(), "lookup");

        let err = FormError::IncompatibleConstraint {
            field: "email".into(),
            constraint: "range".into(),
            kind: "text".into(),
        };
        assert_eq!(
            err.to_string(),
            "constraint `range` does not apply to text field `email`"
        );
        assert_eq!(err.category(), "schema");

        let err = FormError::IndexOutOfBounds { index: 3, len: 2 };
        assert_eq!(
            err.to_string(),
            "index 3 out of bounds for field array of length 2"
        );
    }
}
