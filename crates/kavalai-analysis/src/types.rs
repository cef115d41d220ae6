//! Result types produced by the risk scorer.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use kavalai_core::constants::{
    DEFAULT_CAUTION_THRESHOLD, DEFAULT_CRITICAL_THRESHOLD, MAX_SCORE,
};

/// Risk tier derived from the capped score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    /// score < caution threshold.
    LowRisk,
    /// caution threshold <= score < critical threshold.
    Caution,
    /// score >= critical threshold.
    Critical,
}

impl RiskLevel {
    pub fn all() -> &'static [RiskLevel] {
        &[Self::LowRisk, Self::Caution, Self::Critical]
    }

    /// Tier name as shown on the badge.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LowRisk => "LOW RISK",
            Self::Caution => "CAUTION",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tier boundaries. Each bound is the inclusive lower edge of its tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierThresholds {
    pub caution: u32,
    pub critical: u32,
}

impl TierThresholds {
    pub fn new(caution: u32, critical: u32) -> Self {
        Self { caution, critical }
    }

    /// Classify a capped score into a tier.
    pub fn level_for(&self, score: u32) -> RiskLevel {
        if score >= self.critical {
            RiskLevel::Critical
        } else if score >= self.caution {
            RiskLevel::Caution
        } else {
            RiskLevel::LowRisk
        }
    }
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self::new(DEFAULT_CAUTION_THRESHOLD, DEFAULT_CRITICAL_THRESHOLD)
    }
}

/// One fired detector and its contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reason {
    /// Id of the detector that fired.
    pub id: String,
    pub label: String,
    /// Contribution on the 0-100 scale.
    pub points: u32,
    /// `points / 100`, in (0, 1]. Rendered as a progress-bar fraction.
    pub weight: f32,
}

impl Reason {
    pub fn new(id: impl Into<String>, label: impl Into<String>, points: u32) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            points,
            weight: points as f32 / MAX_SCORE as f32,
        }
    }
}

/// Reasons in detection order. The built-in table has five detectors.
pub type Reasons = SmallVec<[Reason; 5]>;

/// Outcome of analysing one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Aggregate score, capped at 100.
    pub score: u32,
    pub level: RiskLevel,
    pub reasons: Reasons,
    /// Attack-pattern label; `None` when classification is disabled.
    pub pattern: Option<String>,
}

impl AnalysisResult {
    /// Whether the detector with `id` contributed to this result.
    pub fn fired(&self, id: &str) -> bool {
        self.reasons.iter().any(|r| r.id == id)
    }

    /// Sum of reason points before the cap was applied.
    pub fn uncapped_score(&self) -> u32 {
        self.reasons.iter().map(|r| r.points).sum()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.reasons.iter().map(|r| r.label.as_str())
    }
}
