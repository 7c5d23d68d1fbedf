/// Error type for object storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Transport failure talking to the storage endpoint.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("upload rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The object key cannot be used as a path segment.
    #[error("invalid object key `{key}`: {reason}")]
    InvalidKey { key: String, reason: String },

    /// The store is not accepting uploads.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Configuration could not be loaded or is incomplete.
    #[error("invalid storage config: {0}")]
    Config(String),
}

impl StorageError {
    /// Broad error category for grouping in logs.
    #[must_use]
    pub fn category(&self) -> &str {
        match self {
            Self::Http(_) | Self::Unavailable(_) => "transport",
            Self::Rejected { .. } => "remote",
            Self::InvalidKey { .. } => "input",
            Self::Config(_) => "config",
        }
    }

    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Http(_) => "STORAGE_HTTP",
            Self::Rejected { .. } => "STORAGE_REJECTED",
            Self::InvalidKey { .. } => "STORAGE_INVALID_KEY",
            Self::Unavailable(_) => "STORAGE_UNAVAILABLE",
            Self::Config(_) => "STORAGE_CONFIG",
        }
    }

    /// Whether the same upload might succeed later.
    ///
    /// Nothing in formkit retries; this only informs the caller.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Rejected { status, .. } => *status == 429 || *status >= 500,
            Self::Unavailable(_) => true,
            Self::InvalidKey { .. } | Self::Config(_) => false,
        }
    }
}

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(400, false)]
    #[case(409, false)]
    #[case(429, true)]
    #[case(503, true)]
    fn rejected_retryability_follows_status(#[case] status: u16, #[case] retryable: bool) {
        let err = StorageError::Rejected {
            status,
            body: String::new(),
        };
        assert_eq!(err.is_retryable(), retryable);
        assert_eq!(err.code(), "STORAGE_REJECTED");
    }

    #[test]
    fn display_messages() {
        let err = StorageError::InvalidKey {
            key: String::new(),
            reason: "empty".into(),
        };
        assert_eq!(err.to_string(), "invalid object key ``: empty");
        assert_eq!(err.category(), "input");
        assert!(!err.is_retryable());

        let err = StorageError::Unavailable("offline".into());
        assert_eq!(err.to_string(), "storage unavailable: offline");
        assert!(err.is_retryable());
    }
}
