//! Shared constants for the Kavalai risk-scoring engine.

/// Kavalai version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Upper bound of the aggregate risk score.
pub const MAX_SCORE: u32 = 100;

/// Default lower bound (inclusive) of the CAUTION tier.
pub const DEFAULT_CAUTION_THRESHOLD: u32 = 45;

/// Default lower bound (inclusive) of the CRITICAL tier.
pub const DEFAULT_CRITICAL_THRESHOLD: u32 = 75;

/// Attack-pattern label used when no classifier rule matches.
pub const DEFAULT_FALLBACK_PATTERN: &str = "Social Engineering Attempt";

/// Project-level config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "kavalai.toml";

/// User-level config directory under the home directory.
pub const USER_CONFIG_DIR: &str = ".kavalai";

/// Environment variable holding the tracing filter.
pub const LOG_ENV_VAR: &str = "KAVALAI_LOG";

/// Filter used when `KAVALAI_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "kavalai_core=info,kavalai_analysis=info";
