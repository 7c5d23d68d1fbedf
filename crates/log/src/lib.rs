//! # formkit-log
//!
//! Logging setup for formkit: one [`Config`] describing level, format and
//! display, and a [`LoggerBuilder`] that installs a `tracing` subscriber.
//!
//! ```rust,ignore
//! // Reads FORMKIT_LOG / RUST_LOG and FORMKIT_LOG_FORMAT
//! let _guard = formkit_log::init()?;
//! tracing::info!(form = "signup", "form submitted");
//! ```

mod builder;
mod config;
mod error;

pub use builder::{LoggerBuilder, LoggerGuard};
pub use config::{Config, DisplayConfig, Format};
pub use error::{LogError, LogResult};

/// Initializes logging from the environment.
///
/// # Errors
///
/// Fails if the filter cannot be parsed or a global subscriber is already set.
pub fn init() -> LogResult<LoggerGuard> {
    init_with(Config::from_env())
}

/// Initializes logging with an explicit configuration.
///
/// # Errors
///
/// Fails if the filter cannot be parsed or a global subscriber is already set.
pub fn init_with(config: Config) -> LogResult<LoggerGuard> {
    LoggerBuilder::from_config(config).build()
}
