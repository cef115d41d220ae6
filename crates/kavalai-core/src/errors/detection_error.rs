//! Detection rule errors.

use super::error_code::{self, KavalaiErrorCode};

/// Errors raised while loading or compiling detector and classifier rules.
#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("Invalid rule '{id}': {message}")]
    InvalidRule { id: String, message: String },

    #[error("Rule compilation failed for '{id}': {message}")]
    RuleCompilationFailed { id: String, message: String },

    #[error("Duplicate detector id: {0}")]
    DuplicateRule(String),

    #[error("Detector '{id}' reuses the label \"{label}\" of an earlier detector")]
    DuplicateLabel { id: String, label: String },

    #[error("Detector '{id}' requires '{dependency}', which is not an earlier enabled detector")]
    UnknownDependency { id: String, dependency: String },

    #[error("Unknown detector id in {context}: {id}")]
    UnknownDetector { id: String, context: String },

    #[error("Rules parse error in {path}: {message}")]
    RulesParseError { path: String, message: String },

    #[error("Failed to read rules file {path}: {message}")]
    RulesFileUnreadable { path: String, message: String },
}

impl KavalaiErrorCode for DetectionError {
    fn error_code(&self) -> &'static str {
        error_code::DETECTION_ERROR
    }
}
