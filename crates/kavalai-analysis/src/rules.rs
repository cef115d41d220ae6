//! Declarative rule definitions, extensible through TOML without recompiling.
//!
//! A `RuleSet` holds the uncompiled detector table and classifier priority
//! list. Built-ins come from `detectors::builtin` and `classifier::builtin`;
//! a rules file either appends to them or replaces them.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use kavalai_core::constants::DEFAULT_FALLBACK_PATTERN;
use kavalai_core::errors::DetectionError;

use crate::classifier::builtin::builtin_classifier_rules;
use crate::detectors::builtin::builtin_detectors;

/// A weighted detector definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorRuleDef {
    pub id: String,
    pub label: String,
    pub points: u32,
    /// Case-insensitive substrings; any one fires the matcher.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Case-insensitive regexes; any one fires the matcher.
    #[serde(default)]
    pub patterns: Vec<String>,
    /// Ids of earlier detectors that must all have fired.
    #[serde(default)]
    pub requires: Vec<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// One entry of the attack-pattern priority list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierRuleDef {
    pub label: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Uncompiled detector table plus classifier list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    /// When loaded from a file: discard the built-ins instead of appending.
    #[serde(default)]
    pub replace_builtin: bool,
    pub fallback_pattern: Option<String>,
    #[serde(default)]
    pub detectors: Vec<DetectorRuleDef>,
    #[serde(default)]
    pub classifier: Vec<ClassifierRuleDef>,
}

impl RuleSet {
    /// The canonical built-in rules.
    pub fn builtin() -> Self {
        Self {
            replace_builtin: false,
            fallback_pattern: Some(DEFAULT_FALLBACK_PATTERN.to_string()),
            detectors: builtin_detectors(),
            classifier: builtin_classifier_rules(),
        }
    }

    /// Load rules from a TOML string. Entries with `enabled = false` are dropped.
    pub fn load_from_str(toml_str: &str) -> Result<Self, DetectionError> {
        Self::parse(toml_str, "<string>")
    }

    /// Load rules from a file path.
    pub fn load_from_file(path: &Path) -> Result<Self, DetectionError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| DetectionError::RulesFileUnreadable {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        Self::parse(&content, &path.display().to_string())
    }

    fn parse(toml_str: &str, source: &str) -> Result<Self, DetectionError> {
        let mut set: RuleSet =
            toml::from_str(toml_str).map_err(|e| DetectionError::RulesParseError {
                path: source.to_string(),
                message: e.to_string(),
            })?;
        set.detectors.retain(|d| d.enabled != Some(false));
        set.classifier.retain(|c| c.enabled != Some(false));
        Ok(set)
    }

    /// Combine `self` with rules loaded from a file.
    ///
    /// Appended detectors come after the existing ones, appended classifier
    /// rules after the existing ones and before the fallback.
    pub fn merge(mut self, other: RuleSet) -> RuleSet {
        if other.replace_builtin {
            return RuleSet {
                replace_builtin: false,
                fallback_pattern: other.fallback_pattern.or(self.fallback_pattern),
                detectors: other.detectors,
                classifier: other.classifier,
            };
        }
        self.detectors.extend(other.detectors);
        self.classifier.extend(other.classifier);
        if other.fallback_pattern.is_some() {
            self.fallback_pattern = other.fallback_pattern;
        }
        self
    }

    /// Remove the detectors named in `ids`.
    pub fn disable(&mut self, ids: &[String]) -> Result<(), DetectionError> {
        for id in ids {
            self.ensure_known(id, "scoring.disabled_detectors")?;
        }
        self.detectors.retain(|d| !ids.contains(&d.id));
        Ok(())
    }

    /// Replace the points of the detectors named in `overrides`.
    pub fn override_points(&mut self, overrides: &HashMap<String, u32>) -> Result<(), DetectionError> {
        for (id, points) in overrides {
            self.ensure_known(id, "scoring.weight_overrides")?;
            for def in self.detectors.iter_mut().filter(|d| &d.id == id) {
                def.points = *points;
            }
        }
        Ok(())
    }

    /// Apply config-level weight overrides and disabled ids together.
    ///
    /// Both lists are checked against the merged rules before anything is
    /// removed, so an id may be overridden in one config layer and disabled
    /// in another.
    pub fn apply_overrides(
        &mut self,
        disabled: &[String],
        weights: &HashMap<String, u32>,
    ) -> Result<(), DetectionError> {
        self.override_points(weights)?;
        self.disable(disabled)
    }

    /// The fallback label, or the default when none is configured.
    pub fn effective_fallback(&self) -> &str {
        self.fallback_pattern.as_deref().unwrap_or(DEFAULT_FALLBACK_PATTERN)
    }

    fn ensure_known(&self, id: &str, context: &str) -> Result<(), DetectionError> {
        if self.detectors.iter().any(|d| d.id == id) {
            Ok(())
        } else {
            Err(DetectionError::UnknownDetector {
                id: id.to_string(),
                context: context.to_string(),
            })
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::builtin()
    }
}
