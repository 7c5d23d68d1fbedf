//! Object store reached over HTTP.
//!
//! Speaks the Supabase-style storage API: one `POST` per object to
//! `{endpoint}/storage/v1/object/{bucket}/{key}`.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};
use url::Url;

use crate::config::StorageConfig;
use crate::error::{StorageError, StorageResult};
use crate::file::FileHandle;
use crate::store::{ObjectStore, StoredObject};

/// `ObjectStore` backed by an HTTP storage service.
#[derive(Debug, Clone)]
pub struct HttpObjectStore {
    client: reqwest::Client,
    config: StorageConfig,
}

impl HttpObjectStore {
    pub fn new(config: StorageConfig) -> StorageResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Builds the store with a caller-provided client.
    pub fn with_client(client: reqwest::Client, config: StorageConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Object URL for `bucket/key`.
    ///
    /// `/` in the key separates folders; every folder and the file name are
    /// percent-encoded as their own segment.
    pub fn object_url(&self, bucket: &str, key: &str) -> StorageResult<Url> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey {
                key: key.to_string(),
                reason: "object key is empty".into(),
            });
        }
        if key.split('/').any(str::is_empty) {
            return Err(StorageError::InvalidKey {
                key: key.to_string(),
                reason: "object key has an empty folder name".into(),
            });
        }

        let mut url = self.config.endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| StorageError::Config(format!("endpoint `{}` cannot be a base", self.config.endpoint)))?
            .pop_if_empty()
            .extend(["storage", "v1", "object", bucket])
            .extend(key.split('/'));
        Ok(url)
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    fn provider_name(&self) -> &'static str {
        "http"
    }

    async fn upload(&self, bucket: &str, key: &str, file: &FileHandle) -> StorageResult<StoredObject> {
        let url = self.object_url(bucket, key)?;

        debug!(bucket, key, size = file.size(), "uploading object");

        let response = self
            .client
            .post(url)
            .bearer_auth(self.config.api_key())
            .header("apikey", self.config.api_key())
            .header(reqwest::header::CONTENT_TYPE, file.content_type())
            .header("x-upsert", "false")
            .body(file.bytes().clone())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        info!(bucket, key, "uploaded object");
        Ok(StoredObject {
            bucket: bucket.to_string(),
            key: key.to_string(),
            size: file.size(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn store(endpoint: &str) -> HttpObjectStore {
        let config = StorageConfig::new(endpoint.parse().unwrap(), "key", "avatars");
        HttpObjectStore::new(config).unwrap()
    }

    #[test]
    fn object_url_appends_segments() {
        let url = store("https://xyz.supabase.co").object_url("avatars", "me.png").unwrap();
        assert_eq!(url.as_str(), "https://xyz.supabase.co/storage/v1/object/avatars/me.png");
    }

    #[test]
    fn object_url_keeps_endpoint_prefix() {
        let url = store("http://localhost:8080/api/").object_url("b", "k").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/storage/v1/object/b/k");
    }

    #[test]
    fn object_url_keeps_key_folders() {
        let url = store("http://localhost").object_url("b", "users/my photo/1.png").unwrap();
        assert_eq!(url.path(), "/storage/v1/object/b/users/my%20photo/1.png");
    }

    #[rstest]
    #[case("/me.png")]
    #[case("users//me.png")]
    #[case("users/")]
    fn empty_folder_names_are_rejected(#[case] key: &str) {
        let err = store("http://localhost").object_url("b", key).unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey { .. }));
    }

    #[test]
    fn empty_key_is_rejected() {
        let err = store("http://localhost").object_url("b", "").unwrap_err();
        assert_eq!(err.code(), "STORAGE_INVALID_KEY");
    }
}
