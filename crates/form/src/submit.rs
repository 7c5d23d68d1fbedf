//! Submission of a validated record: upload its files, render it.

use std::sync::Arc;

use formkit_storage::{ObjectStore, StorageError, StoredObject};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::FormError;
use crate::path::FieldPath;
use crate::value::Record;

/// Result of one file upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UploadStatus {
    Uploaded(StoredObject),
    Failed {
        code: String,
        message: String,
        retryable: bool,
    },
}

impl UploadStatus {
    fn failed(error: &StorageError) -> Self {
        Self::Failed {
            code: error.code().to_string(),
            message: error.to_string(),
            retryable: error.is_retryable(),
        }
    }

    pub fn is_uploaded(&self) -> bool {
        matches!(self, Self::Uploaded(_))
    }
}

/// One file of the record and what happened to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadReport {
    pub field: FieldPath,
    pub key: String,
    pub status: UploadStatus,
}

/// What a submit did: per-file upload results plus the rendered record.
///
/// The record is rendered whether or not uploads succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionOutcome {
    uploads: Vec<UploadReport>,
    output: String,
}

impl SubmissionOutcome {
    /// True when every upload succeeded (or there was nothing to upload).
    pub fn is_success(&self) -> bool {
        self.uploads.iter().all(|report| report.status.is_uploaded())
    }

    pub fn uploads(&self) -> &[UploadReport] {
        &self.uploads
    }

    pub fn failures(&self) -> impl Iterator<Item = &UploadReport> {
        self.uploads.iter().filter(|report| !report.status.is_uploaded())
    }

    /// Indented JSON of the normalized record.
    pub fn output(&self) -> &str {
        &self.output
    }
}

/// Uploads every file of a record to one bucket, then renders the record.
#[derive(Clone)]
pub struct SubmitHandler {
    store: Arc<dyn ObjectStore>,
    bucket: String,
}

impl SubmitHandler {
    pub fn new(store: Arc<dyn ObjectStore>, bucket: impl Into<String>) -> Self {
        Self {
            store,
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Handles a validated record.
    ///
    /// Each file is uploaded exactly once under its own name, in field
    /// order. Failures are reported in the outcome, not returned as errors.
    pub async fn submit(&self, record: &Record) -> Result<SubmissionOutcome, FormError> {
        let mut uploads = Vec::new();

        for (field, file) in record.files() {
            let key = file.name().to_string();
            info!(
                provider = self.store.provider_name(),
                bucket = %self.bucket,
                %field,
                %key,
                size = file.size(),
                "uploading file"
            );

            let status = match self.store.upload(&self.bucket, &key, file).await {
                Ok(stored) => {
                    info!(%field, %key, "upload finished");
                    UploadStatus::Uploaded(stored)
                }
                Err(error) => {
                    warn!(%field, %key, code = error.code(), error = %error, "upload failed");
                    UploadStatus::failed(&error)
                }
            };
            uploads.push(UploadReport { field, key, status });
        }

        let outcome = SubmissionOutcome {
            uploads,
            output: record.to_json_pretty()?,
        };
        info!(
            uploads = outcome.uploads.len(),
            success = outcome.is_success(),
            "form submitted"
        );
        Ok(outcome)
    }
}

impl std::fmt::Debug for SubmitHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmitHandler")
            .field("provider", &self.store.provider_name())
            .field("bucket", &self.bucket)
            .finish()
    }
}
