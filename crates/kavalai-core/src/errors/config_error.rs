//! Configuration errors.

use super::error_code::{self, KavalaiErrorCode};

/// Errors raised while resolving the layered `kavalai.toml` configuration.
///
/// `ValidationFailed` covers range violations (thresholds, weights,
/// parallelism); `InvalidValue` covers values that are malformed regardless
/// of range, such as a blank rules path.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    FileNotFound {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed TOML in {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("{field} out of range: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("{field} is malformed: {message}")]
    InvalidValue { field: String, message: String },
}

impl ConfigError {
    /// The offending config key, for errors tied to a single field.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::ValidationFailed { field, .. } | Self::InvalidValue { field, .. } => Some(field),
            Self::FileNotFound { .. } | Self::ParseError { .. } => None,
        }
    }
}

impl KavalaiErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }
}
