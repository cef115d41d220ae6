//! Configuration system for Kavalai.
//! TOML-based, layered resolution: runtime > env > project > user > defaults.

pub mod batch_config;
pub mod kavalai_config;
pub mod scoring_config;

pub use batch_config::BatchConfig;
pub use kavalai_config::{KavalaiConfig, RuntimeOverrides};
pub use scoring_config::ScoringConfig;
