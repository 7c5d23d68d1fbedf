//! # formkit-storage
//!
//! Upload target for form file fields.
//!
//! - [`FileHandle`]: a selected file (name, content type, bytes)
//! - [`ObjectStore`]: `upload(bucket, key, file)`, implemented over HTTP
//!   ([`HttpObjectStore`]) and in memory ([`MemoryObjectStore`])
//! - [`StorageConfig`]: endpoint, api key and bucket, from TOML and env

mod config;
mod error;
mod file;
mod http;
mod memory;
mod store;

pub use config::StorageConfig;
pub use error::{StorageError, StorageResult};
pub use file::FileHandle;
pub use http::HttpObjectStore;
pub use memory::MemoryObjectStore;
pub use store::{ObjectStore, StoredObject};
