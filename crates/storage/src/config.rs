//! Storage configuration.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{StorageError, StorageResult};

const fn default_timeout_secs() -> u64 {
    30
}

fn default_bucket() -> String {
    "avatars".to_string()
}

/// Connection settings for [`HttpObjectStore`](crate::HttpObjectStore).
///
/// ```toml
/// endpoint = "https://xyz.supabase.co"
/// api_key = "..."
/// bucket = "avatars"
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub endpoint: Url,
    api_key: String,
    #[serde(default = "default_bucket")]
    pub bucket: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl StorageConfig {
    pub fn new(endpoint: Url, api_key: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            endpoint,
            api_key: api_key.into(),
            bucket: bucket.into(),
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Parses a TOML document.
    pub fn from_toml(source: &str) -> StorageResult<Self> {
        toml::from_str(source).map_err(|e| StorageError::Config(e.to_string()))
    }

    /// Reads and parses a TOML file.
    pub fn load(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| StorageError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml(&source)
    }

    /// Builds a config from `FORMKIT_STORAGE_URL`, `FORMKIT_STORAGE_KEY` and
    /// `FORMKIT_STORAGE_BUCKET`.
    pub fn from_env() -> StorageResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`StorageConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> StorageResult<Self> {
        let endpoint = lookup("FORMKIT_STORAGE_URL")
            .ok_or_else(|| StorageError::Config("FORMKIT_STORAGE_URL is not set".into()))?;
        let endpoint = parse_endpoint(&endpoint)?;
        let api_key = lookup("FORMKIT_STORAGE_KEY")
            .ok_or_else(|| StorageError::Config("FORMKIT_STORAGE_KEY is not set".into()))?;
        let bucket = lookup("FORMKIT_STORAGE_BUCKET").unwrap_or_else(default_bucket);
        Ok(Self::new(endpoint, api_key, bucket))
    }

    /// Overrides fields with any of the `FORMKIT_STORAGE_*` variables that are set.
    pub fn with_env_overrides(self, lookup: impl Fn(&str) -> Option<String>) -> StorageResult<Self> {
        let mut config = self;
        if let Some(endpoint) = lookup("FORMKIT_STORAGE_URL") {
            config.endpoint = parse_endpoint(&endpoint)?;
        }
        if let Some(api_key) = lookup("FORMKIT_STORAGE_KEY") {
            config.api_key = api_key;
        }
        if let Some(bucket) = lookup("FORMKIT_STORAGE_BUCKET") {
            config.bucket = bucket;
        }
        Ok(config)
    }
}

fn parse_endpoint(raw: &str) -> StorageResult<Url> {
    Url::parse(raw).map_err(|e| StorageError::Config(format!("invalid endpoint `{raw}`: {e}")))
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &"[REDACTED]")
            .field("bucket", &self.bucket)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
