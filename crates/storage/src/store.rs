//! Object storage abstraction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StorageResult;
use crate::file::FileHandle;

/// Where an uploaded object ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredObject {
    pub bucket: String,
    pub key: String,
    pub size: u64,
}

/// Abstract object storage interface.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Returns the name of the storage provider.
    fn provider_name(&self) -> &'static str;

    /// Uploads `file` under `bucket/key`.
    ///
    /// The key is used verbatim: no collision handling, no sanitization.
    /// Called once per file; implementations must not retry.
    async fn upload(&self, bucket: &str, key: &str, file: &FileHandle) -> StorageResult<StoredObject>;
}
