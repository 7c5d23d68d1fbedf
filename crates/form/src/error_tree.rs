//! Validation failures keyed by where they happened.

use std::fmt;

use formkit_validator::foundation::ValidationError;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value as Json};

use crate::path::{FieldPath, PathSegment};

/// Key under which whole-record messages are rendered.
const ROOT_KEY: &str = "_root";
/// Key holding a node's own message when it also has child errors.
const MESSAGE_KEY: &str = "_message";

/// Ordered mapping from [`FieldPath`] to the failures reported there.
///
/// Each path keeps every error pushed to it; the UI shows the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorTree {
    errors: IndexMap<FieldPath, Vec<ValidationError>>,
}

impl ErrorTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `error` at `path`, stamping the path into the error's `field`.
    pub fn push(&mut self, path: FieldPath, error: ValidationError) {
        let error = error.with_field(path.to_string());
        self.errors.entry(path).or_default().push(error);
    }

    /// Number of failing paths.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn contains(&self, path: impl Into<FieldPath>) -> bool {
        self.errors.contains_key(&path.into())
    }

    /// All errors at `path`, oldest first.
    pub fn get(&self, path: impl Into<FieldPath>) -> &[ValidationError] {
        self.errors.get(&path.into()).map(Vec::as_slice).unwrap_or_default()
    }

    /// The error shown for `path`.
    pub fn first(&self, path: impl Into<FieldPath>) -> Option<&ValidationError> {
        self.get(path).first()
    }

    /// Message of the error shown for `path`.
    pub fn message(&self, path: impl Into<FieldPath>) -> Option<&str> {
        self.first(path).map(|error| error.message.as_ref())
    }

    /// Failing paths in the order they were first reported.
    pub fn paths(&self) -> impl Iterator<Item = &FieldPath> {
        self.errors.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &[ValidationError])> {
        self.errors.iter().map(|(path, errors)| (path, errors.as_slice()))
    }

    /// Nested JSON mirroring the record's shape.
    ///
    /// Leaves are the first message of each path, list indices become object
    /// keys, whole-record messages are listed under `"_root"` and a node with
    /// both its own message and child errors keeps it under `"_message"`.
    pub fn to_json(&self) -> Json {
        let mut root = Map::new();
        for (path, errors) in &self.errors {
            let Some(first) = errors.first() else {
                continue;
            };
            let message = first.message.to_string();

            if path.is_root() {
                if let Json::Array(messages) = root
                    .entry(ROOT_KEY)
                    .or_insert_with(|| Json::Array(Vec::new()))
                {
                    messages.push(Json::String(message));
                }
            } else {
                insert_message(&mut root, path.segments(), message);
            }
        }
        Json::Object(root)
    }
}

fn insert_message(node: &mut Map<String, Json>, segments: &[PathSegment], message: String) {
    let [head, rest @ ..] = segments else {
        return;
    };
    let key = head.to_string();

    if rest.is_empty() {
        match node.get_mut(&key) {
            Some(Json::Object(children)) => {
                children
                    .entry(MESSAGE_KEY)
                    .or_insert(Json::String(message));
            }
            Some(_) => {}
            None => {
                node.insert(key, Json::String(message));
            }
        }
        return;
    }

    let child = node.entry(key).or_insert_with(|| Json::Object(Map::new()));
    if let Json::String(own) = child {
        let mut children = Map::new();
        children.insert(MESSAGE_KEY.to_string(), Json::String(std::mem::take(own)));
        *child = Json::Object(children);
    }
    if let Json::Object(children) = child {
        insert_message(children, rest, message);
    }
}

impl Serialize for ErrorTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "form has {} invalid field(s):", self.errors.len())?;
        for (path, errors) in &self.errors {
            if let Some(first) = errors.first() {
                let label = if path.is_root() { ROOT_KEY.to_string() } else { path.to_string() };
                writeln!(f, "  {label}: {}", first.message)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ErrorTree {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn err(message: &'static str) -> ValidationError {
        ValidationError::new("test", message)
    }

    #[test]
    fn first_error_per_path_wins() {
        let mut tree = ErrorTree::new();
        tree.push(FieldPath::field("email"), err("first"));
        tree.push(FieldPath::field("email"), err("second"));

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.message("email"), Some("first"));
        assert_eq!(tree.get("email").len(), 2);
        assert_eq!(tree.first("email").unwrap().field.as_deref(), Some("email"));
        assert_eq!(tree.message("password"), None);
    }

    #[test]
    fn to_json_mirrors_record_shape() {
        let mut tree = ErrorTree::new();
        tree.push(FieldPath::field("email"), err("O email deve ser do gmail"));
        tree.push(FieldPath::from("techs.1.knowledge"), err("fora do intervalo"));
        tree.push(FieldPath::root(), err("registro inválido"));

        assert_eq!(
            tree.to_json(),
            json!({
                "email": "O email deve ser do gmail",
                "techs": { "1": { "knowledge": "fora do intervalo" } },
                "_root": ["registro inválido"],
            })
        );
    }

    #[test]
    fn node_with_message_and_children_keeps_both() {
        let mut tree = ErrorTree::new();
        tree.push(FieldPath::field("techs"), err("Insira pelo menos 2 tecnologias"));
        tree.push(FieldPath::from("techs.0.title"), err("O título é obrigatório"));

        let expected = json!({
            "techs": {
                "_message": "Insira pelo menos 2 tecnologias",
                "0": { "title": "O título é obrigatório" },
            }
        });
        assert_eq!(tree.to_json(), expected);

        let mut reversed = ErrorTree::new();
        reversed.push(FieldPath::from("techs.0.title"), err("O título é obrigatório"));
        reversed.push(FieldPath::field("techs"), err("Insira pelo menos 2 tecnologias"));
        assert_eq!(reversed.to_json(), expected);
    }

    #[test]
    fn display_lists_paths() {
        let mut tree = ErrorTree::new();
        tree.push(FieldPath::field("password"), err("curta"));
        let rendered = tree.to_string();
        assert!(rendered.contains("1 invalid field(s)"));
        assert!(rendered.contains("password: curta"));
    }
}
