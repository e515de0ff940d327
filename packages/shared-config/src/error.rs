//! Error types for configuration loading

use thiserror::Error;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable was not set
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// An environment variable was set to an unparseable value
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
