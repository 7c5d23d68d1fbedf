use std::fmt;

use bytes::Bytes;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// A file picked in a file input.
///
/// Cloning is cheap: the content is reference counted.
#[derive(Clone, PartialEq, Eq)]
pub struct FileHandle {
    name: String,
    content_type: String,
    bytes: Bytes,
}

impl FileHandle {
    /// Content type used when none is known.
    pub const DEFAULT_CONTENT_TYPE: &'static str = "application/octet-stream";

    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// A file of unknown type.
    pub fn untyped(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self::new(name, Self::DEFAULT_CONTENT_TYPE, bytes)
    }

    /// Original file name, used as the object key on upload.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

// Content is left out: handles end up in logs and rendered output.
impl fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileHandle")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("size", &self.size())
            .finish()
    }
}

/// Serializes as `{ "name", "size", "type" }`.
impl Serialize for FileHandle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FileHandle", 3)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("size", &self.size())?;
        state.serialize_field("type", &self.content_type)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn serializes_metadata_only() {
        let file = FileHandle::new("me.png", "image/png", vec![0u8; 10]);
        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "name": "me.png", "size": 10, "type": "image/png" })
        );
    }

    #[test]
    fn debug_hides_content() {
        let file = FileHandle::untyped("secret.txt", "hunter2");
        let rendered = format!("{file:?}");
        assert!(rendered.contains("secret.txt"));
        assert!(rendered.contains("size: 7"));
        assert!(!rendered.contains("hunter2"));
    }
}
