//! Raw input values and normalized output values.
//!
//! [`RawRecord`] is what form controls hand over: loosely typed, possibly
//! incomplete. [`Record`] is what a successful validation produces; only
//! the validator can build one.

use formkit_storage::FileHandle;
use indexmap::IndexMap;
use serde::Serialize;

use crate::error::FormError;
use crate::path::FieldPath;

// ============================================================================
// RAW INPUT
// ============================================================================

/// A value as entered in a form control.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RawValue {
    /// Never touched or cleared.
    #[default]
    Null,
    Text(String),
    Number(f64),
    /// Selection of a file input; may hold zero or many files.
    Files(Vec<FileHandle>),
    /// Rows of a repeatable sub-form.
    List(Vec<RawRecord>),
}

impl RawValue {
    /// Short name of the variant, used in type-mismatch params.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Text(_) => "text",
            Self::Number(_) => "number",
            Self::Files(_) => "files",
            Self::List(_) => "list",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<FileHandle> for RawValue {
    fn from(file: FileHandle) -> Self {
        Self::Files(vec![file])
    }
}

impl From<Vec<FileHandle>> for RawValue {
    fn from(files: Vec<FileHandle>) -> Self {
        Self::Files(files)
    }
}

impl From<Vec<RawRecord>> for RawValue {
    fn from(rows: Vec<RawRecord>) -> Self {
        Self::List(rows)
    }
}

impl TryFrom<&serde_json::Value> for RawValue {
    type Error = FormError;

    /// Arrays must hold objects (list rows); nested objects are rejected.
    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        use serde_json::Value as Json;

        match value {
            Json::Null => Ok(Self::Null),
            Json::Bool(b) => Ok(Self::Text(b.to_string())),
            Json::String(s) => Ok(Self::Text(s.clone())),
            Json::Number(n) => n.as_f64().map(Self::Number).ok_or_else(|| FormError::InvalidInput {
                reason: format!("number {n} is not representable"),
            }),
            Json::Array(items) => items
                .iter()
                .map(RawRecord::from_json)
                .collect::<Result<Vec<_>, _>>()
                .map(Self::List),
            Json::Object(_) => Err(FormError::InvalidInput {
                reason: "nested objects are only allowed as list rows".into(),
            }),
        }
    }
}

/// Field name → raw value, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: IndexMap<String, RawValue>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets a field, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<RawValue>) -> Option<RawValue> {
        self.fields.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.fields.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<RawValue> {
        self.fields.shift_remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Reads a JSON object such as a serialized form submission.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, FormError> {
        let object = value.as_object().ok_or_else(|| FormError::InvalidInput {
            reason: format!("expected an object, got {value}"),
        })?;

        object
            .iter()
            .map(|(name, value)| -> Result<(String, RawValue), FormError> {
                Ok((name.clone(), RawValue::try_from(value)?))
            })
            .collect::<Result<IndexMap<_, _>, FormError>>()
            .map(|fields| Self { fields })
    }
}

impl<K: Into<String>, V: Into<RawValue>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

// ============================================================================
// NORMALIZED OUTPUT
// ============================================================================

/// A validated, transformed value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Integer(i64),
    Number(f64),
    /// Rendered as `{ name, size, type }`.
    File(FileHandle),
    List(Vec<Record>),
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric view of `Number` and `Integer` values.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_file(&self) -> Option<&FileHandle> {
        match self {
            Self::File(file) => Some(file),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Record]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

/// Normalized record produced by a successful validation.
///
/// Serializes as a JSON object in schema order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    pub(crate) fn new() -> Self {
        Self {
            fields: IndexMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_text)
    }

    pub fn get_integer(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_integer)
    }

    pub fn get_number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_number)
    }

    pub fn get_file(&self, name: &str) -> Option<&FileHandle> {
        self.get(name).and_then(Value::as_file)
    }

    pub fn get_list(&self, name: &str) -> Option<&[Record]> {
        self.get(name).and_then(Value::as_list)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Every file in the record with its path, depth-first in field order.
    pub fn files(&self) -> Vec<(FieldPath, &FileHandle)> {
        let mut files = Vec::new();
        self.collect_files(&FieldPath::root(), &mut files);
        files
    }

    fn collect_files<'a>(&'a self, prefix: &FieldPath, out: &mut Vec<(FieldPath, &'a FileHandle)>) {
        for (name, value) in &self.fields {
            match value {
                Value::File(file) => out.push((prefix.key(name.as_str()), file)),
                Value::List(items) => {
                    for (i, item) in items.iter().enumerate() {
                        item.collect_files(&prefix.key(name.as_str()).index(i), out);
                    }
                }
                _ => {}
            }
        }
    }

    /// Indented JSON rendering shown after a successful submit.
    pub fn to_json_pretty(&self) -> Result<String, FormError> {
        serde_json::to_string_pretty(self).map_err(|e| FormError::Serialization {
            error: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn raw_record_from_json_object() {
        let raw = RawRecord::from_json(&json!({
            "name": "ana silva",
            "age": 30,
            "techs": [{ "title": "go", "knowledge": "80" }],
            "avatar": null,
        }))
        .unwrap();

        assert_eq!(raw.get("name"), Some(&RawValue::Text("ana silva".into())));
        assert_eq!(raw.get("age"), Some(&RawValue::Number(30.0)));
        assert_eq!(raw.get("avatar"), Some(&RawValue::Null));
        match raw.get("techs") {
            Some(RawValue::List(rows)) => {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].get("knowledge"), Some(&RawValue::Text("80".into())));
            }
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn raw_record_from_json_rejects_bad_shapes() {
        assert!(RawRecord::from_json(&json!([1, 2])).is_err());
        assert!(RawRecord::from_json(&json!({ "a": { "b": 1 } })).is_err());
        assert!(RawRecord::from_json(&json!({ "techs": [1] })).is_err());
    }

    #[test]
    fn record_serializes_in_insertion_order() {
        let mut record = Record::new();
        record.insert("name", Value::Text("Ana".into()));
        record.insert("age", Value::Integer(30));
        record.insert("avatar", Value::File(FileHandle::new("a.png", "image/png", vec![0u8; 4])));

        let rendered = serde_json::to_string(&record).unwrap();
        assert_eq!(
            rendered,
            r#"{"name":"Ana","age":30,"avatar":{"name":"a.png","size":4,"type":"image/png"}}"#
        );
    }

    #[test]
    fn files_are_collected_with_paths() {
        let mut row = Record::new();
        row.insert("doc", Value::File(FileHandle::untyped("cv.pdf", vec![1u8])));
        let mut record = Record::new();
        record.insert("avatar", Value::File(FileHandle::untyped("me.png", vec![1u8])));
        record.insert("rows", Value::List(vec![row]));

        let files: Vec<(String, &str)> = record
            .files()
            .into_iter()
            .map(|(path, file)| (path.to_string(), file.name()))
            .collect();
        assert_eq!(
            files,
            vec![
                ("avatar".to_string(), "me.png"),
                ("rows.0.doc".to_string(), "cv.pdf"),
            ]
        );
    }

    #[test]
    fn typed_getters() {
        let mut record = Record::new();
        record.insert("knowledge", Value::Integer(80));
        assert_eq!(record.get_integer("knowledge"), Some(80));
        assert_eq!(record.get_number("knowledge"), Some(80.0));
        assert_eq!(record.get_text("knowledge"), None);
        assert_eq!(record.get_list("missing"), None);
    }
}
