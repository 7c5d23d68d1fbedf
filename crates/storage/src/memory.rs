use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{StorageError, StorageResult};
use crate::file::FileHandle;
use crate::store::{ObjectStore, StoredObject};

/// In-process object store.
///
/// Keeps every upload (later uploads to the same key replace earlier ones)
/// and can be switched to reject uploads to exercise failure paths.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    objects: Mutex<BTreeMap<(String, String), FileHandle>>,
    uploads: Mutex<Vec<(String, String)>>,
    rejecting: AtomicBool,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent upload fail with [`StorageError::Unavailable`].
    pub fn reject_uploads(&self, reject: bool) {
        self.rejecting.store(reject, Ordering::SeqCst);
    }

    pub fn get(&self, bucket: &str, key: &str) -> Option<FileHandle> {
        self.objects
            .lock()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    /// Every `(bucket, key)` upload attempt that reached the store, in order.
    pub fn upload_log(&self) -> Vec<(String, String)> {
        self.uploads.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.lock().is_empty()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    fn provider_name(&self) -> &'static str {
        "memory"
    }

    async fn upload(&self, bucket: &str, key: &str, file: &FileHandle) -> StorageResult<StoredObject> {
        self.uploads.lock().push((bucket.to_string(), key.to_string()));

        if self.rejecting.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("memory store is rejecting uploads".into()));
        }
        if key.is_empty() {
            return Err(StorageError::InvalidKey {
                key: key.to_string(),
                reason: "object key is empty".into(),
            });
        }

        self.objects
            .lock()
            .insert((bucket.to_string(), key.to_string()), file.clone());

        Ok(StoredObject {
            bucket: bucket.to_string(),
            key: key.to_string(),
            size: file.size(),
        })
    }
}
