//! Core types shared across the Kavalai workspace: configuration,
//! error enums, tracing setup, and constants.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;

pub use config::KavalaiConfig;
pub use errors::{ConfigError, DetectionError, EngineError, KavalaiErrorCode};
