//! Error handling for Kavalai.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.
//!
//! Scoring itself never fails; these errors only surface while loading
//! configuration or compiling detector rules.

pub mod config_error;
pub mod detection_error;
pub mod engine_error;
pub mod error_code;

pub use config_error::ConfigError;
pub use detection_error::DetectionError;
pub use engine_error::EngineError;
pub use error_code::KavalaiErrorCode;
