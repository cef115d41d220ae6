//! Top-level engine construction errors.

use super::error_code::KavalaiErrorCode;
use super::{ConfigError, DetectionError};

/// Errors that can occur while building a scorer from configuration.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Detection error: {0}")]
    Detection(#[from] DetectionError),
}

impl KavalaiErrorCode for EngineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Detection(e) => e.error_code(),
        }
    }
}
