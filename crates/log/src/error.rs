//! Logging errors

/// Errors raised while installing the subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// The level / directive string is not a valid `EnvFilter`.
    #[error("invalid log filter: {0}")]
    Filter(String),

    /// A global subscriber was already installed.
    #[error("failed to install subscriber: {0}")]
    Init(String),
}

/// Result alias for logging setup.
pub type LogResult<T> = Result<T, LogError>;
