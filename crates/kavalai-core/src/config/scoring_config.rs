//! Scoring configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CAUTION_THRESHOLD, DEFAULT_CRITICAL_THRESHOLD};

/// Configuration for detector scoring, tiering, and classification.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    /// Lower bound (inclusive) of the CAUTION tier. Default: 45.
    pub caution_threshold: Option<u32>,
    /// Lower bound (inclusive) of the CRITICAL tier. Default: 75.
    pub critical_threshold: Option<u32>,
    /// Attach an attack-pattern label to every result. Default: true.
    pub classify_patterns: Option<bool>,
    /// Optional TOML file with extra detector/classifier rules.
    pub rules_path: Option<String>,
    /// Detector ids to leave out of the table.
    #[serde(default)]
    pub disabled_detectors: Vec<String>,
    /// Per-detector point overrides (id -> points).
    #[serde(default)]
    pub weight_overrides: HashMap<String, u32>,
}

impl ScoringConfig {
    /// Returns the effective CAUTION threshold, defaulting to 45.
    pub fn effective_caution_threshold(&self) -> u32 {
        self.caution_threshold.unwrap_or(DEFAULT_CAUTION_THRESHOLD)
    }

    /// Returns the effective CRITICAL threshold, defaulting to 75.
    pub fn effective_critical_threshold(&self) -> u32 {
        self.critical_threshold.unwrap_or(DEFAULT_CRITICAL_THRESHOLD)
    }

    /// Returns whether pattern classification is on, defaulting to true.
    pub fn effective_classify_patterns(&self) -> bool {
        self.classify_patterns.unwrap_or(true)
    }
}
