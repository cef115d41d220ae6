//! Top-level Kavalai configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{BatchConfig, ScoringConfig};
use crate::constants::{MAX_SCORE, PROJECT_CONFIG_FILE, USER_CONFIG_DIR};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Runtime overrides (applied via `apply_runtime_overrides`)
/// 2. Environment variables (`KAVALAI_*`)
/// 3. Project config (`kavalai.toml` in project root)
/// 4. User config (`~/.kavalai/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct KavalaiConfig {
    pub scoring: ScoringConfig,
    pub batch: BatchConfig,
}

/// Overrides supplied by the embedding caller; they win over every other layer.
#[derive(Debug, Clone, Default)]
pub struct RuntimeOverrides {
    pub caution_threshold: Option<u32>,
    pub critical_threshold: Option<u32>,
    pub classify_patterns: Option<bool>,
    pub rules_path: Option<String>,
    pub parallelism: Option<usize>,
}

impl KavalaiConfig {
    /// Load configuration with layered resolution.
    ///
    /// A relative `scoring.rules_path` is resolved against the directory of
    /// the file that set it: `root` for the project config, `~/.kavalai` for
    /// the user config.
    pub fn load(
        root: &Path,
        overrides: Option<&RuntimeOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::read_layer(&user_config_path) {
                    Ok(user) => Self::merge(&mut config, &user),
                    Err(err @ ConfigError::ParseError { .. }) => return Err(err),
                    Err(err) => {
                        tracing::warn!(
                            path = %user_config_path.display(),
                            error = %err,
                            "ignoring unreadable user config"
                        );
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            let project = Self::read_layer(&project_config_path)?;
            Self::merge(&mut config, &project);
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): runtime overrides
        if let Some(rt) = overrides {
            Self::apply_runtime_overrides(&mut config, rt);
        }

        Self::validate(&config)?;

        tracing::debug!(
            caution = config.scoring.effective_caution_threshold(),
            critical = config.scoring.effective_critical_threshold(),
            classify = config.scoring.effective_classify_patterns(),
            "configuration resolved"
        );

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &KavalaiConfig) -> Result<(), ConfigError> {
        let scoring = &config.scoring;
        for (field, value) in [
            ("scoring.caution_threshold", scoring.caution_threshold),
            ("scoring.critical_threshold", scoring.critical_threshold),
        ] {
            if let Some(v) = value {
                if v > MAX_SCORE {
                    return Err(ConfigError::ValidationFailed {
                        field: field.to_string(),
                        message: format!("must be between 0 and {MAX_SCORE}"),
                    });
                }
            }
        }

        let caution = scoring.effective_caution_threshold();
        let critical = scoring.effective_critical_threshold();
        if caution >= critical {
            return Err(ConfigError::ValidationFailed {
                field: "scoring.caution_threshold".to_string(),
                message: format!(
                    "must be lower than critical_threshold ({caution} >= {critical})"
                ),
            });
        }

        if let Some(ref path) = scoring.rules_path {
            if path.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "scoring.rules_path".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        if scoring.disabled_detectors.iter().any(|id| id.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "scoring.disabled_detectors".to_string(),
                message: "detector ids must not be empty".to_string(),
            });
        }

        for (id, points) in &scoring.weight_overrides {
            if *points == 0 || *points > MAX_SCORE {
                return Err(ConfigError::ValidationFailed {
                    field: format!("scoring.weight_overrides.{id}"),
                    message: format!("must be between 1 and {MAX_SCORE}"),
                });
            }
        }

        if config.batch.parallelism == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "batch.parallelism".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Returns the user config path: `~/.kavalai/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(USER_CONFIG_DIR).join("config.toml"))
    }

    fn read_toml_file(path: &Path) -> Result<KavalaiConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileNotFound {
            path: path.display().to_string(),
            source,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Read one file layer and anchor its relative `rules_path` to the
    /// file's directory. Unknown keys are silently ignored (forward-compatible).
    fn read_layer(path: &Path) -> Result<KavalaiConfig, ConfigError> {
        let mut layer = Self::read_toml_file(path)?;
        if let (Some(rules_path), Some(dir)) = (layer.scoring.rules_path.as_mut(), path.parent()) {
            *rules_path = resolve_against(dir, rules_path).display().to_string();
        }
        Ok(layer)
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` (or non-empty) value.
    fn merge(base: &mut KavalaiConfig, other: &KavalaiConfig) {
        // Scoring
        if other.scoring.caution_threshold.is_some() {
            base.scoring.caution_threshold = other.scoring.caution_threshold;
        }
        if other.scoring.critical_threshold.is_some() {
            base.scoring.critical_threshold = other.scoring.critical_threshold;
        }
        if other.scoring.classify_patterns.is_some() {
            base.scoring.classify_patterns = other.scoring.classify_patterns;
        }
        if other.scoring.rules_path.is_some() {
            base.scoring.rules_path = other.scoring.rules_path.clone();
        }
        if !other.scoring.disabled_detectors.is_empty() {
            base.scoring.disabled_detectors = other.scoring.disabled_detectors.clone();
        }
        if !other.scoring.weight_overrides.is_empty() {
            base.scoring.weight_overrides = other.scoring.weight_overrides.clone();
        }

        // Batch
        if other.batch.parallelism.is_some() {
            base.batch.parallelism = other.batch.parallelism;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `KAVALAI_SCORING_CRITICAL_THRESHOLD`, `KAVALAI_BATCH_PARALLELISM`, etc.
    /// Values that fail to parse are logged and ignored.
    fn apply_env_overrides(config: &mut KavalaiConfig) {
        if let Some(v) = env_value::<u32>("KAVALAI_SCORING_CAUTION_THRESHOLD") {
            config.scoring.caution_threshold = Some(v);
        }
        if let Some(v) = env_value::<u32>("KAVALAI_SCORING_CRITICAL_THRESHOLD") {
            config.scoring.critical_threshold = Some(v);
        }
        if let Some(v) = env_value::<bool>("KAVALAI_SCORING_CLASSIFY_PATTERNS") {
            config.scoring.classify_patterns = Some(v);
        }
        if let Ok(val) = std::env::var("KAVALAI_SCORING_RULES_PATH") {
            if !val.is_empty() {
                config.scoring.rules_path = Some(val);
            }
        }
        if let Some(v) = env_value::<usize>("KAVALAI_BATCH_PARALLELISM") {
            config.batch.parallelism = Some(v);
        }
    }

    /// Apply runtime overrides (highest priority).
    fn apply_runtime_overrides(config: &mut KavalaiConfig, rt: &RuntimeOverrides) {
        if let Some(v) = rt.caution_threshold {
            config.scoring.caution_threshold = Some(v);
        }
        if let Some(v) = rt.critical_threshold {
            config.scoring.critical_threshold = Some(v);
        }
        if let Some(v) = rt.classify_patterns {
            config.scoring.classify_patterns = Some(v);
        }
        if let Some(ref v) = rt.rules_path {
            config.scoring.rules_path = Some(v.clone());
        }
        if let Some(v) = rt.parallelism {
            config.batch.parallelism = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn env_value<T: std::str::FromStr>(var: &str) -> Option<T> {
    let raw = std::env::var(var).ok()?;
    match raw.parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(var, value = %raw, "ignoring unparseable environment override");
            None
        }
    }
}

fn resolve_against(root: &Path, path: &str) -> PathBuf {
    let candidate = Path::new(path);
    if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        root.join(candidate)
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
