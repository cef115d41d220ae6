//! Risk scorer: runs the detector table, caps the score, assigns a tier,
//! and attaches the attack-pattern label.

use std::path::Path;
use std::sync::OnceLock;

use kavalai_core::config::KavalaiConfig;
use kavalai_core::constants::{DEFAULT_FALLBACK_PATTERN, MAX_SCORE, VERSION};
use kavalai_core::errors::{DetectionError, EngineError};

use crate::classifier::PatternClassifier;
use crate::detectors::{DetectorTable, MessageContext};
use crate::rules::RuleSet;
use crate::types::{AnalysisResult, Reasons, TierThresholds};

/// Immutable scoring configuration. Cheap to share across threads.
#[derive(Debug, Clone)]
pub struct RiskScorer {
    table: DetectorTable,
    classifier: Option<PatternClassifier>,
    tiers: TierThresholds,
}

impl RiskScorer {
    /// Scorer over the built-in rules with default tiers.
    pub fn builtin() -> Result<Self, DetectionError> {
        Self::from_rules(&RuleSet::builtin(), TierThresholds::default(), true)
    }

    /// Compile a rule set. `classify = false` leaves `pattern` unset on results.
    pub fn from_rules(
        rules: &RuleSet,
        tiers: TierThresholds,
        classify: bool,
    ) -> Result<Self, DetectionError> {
        let table = DetectorTable::compile(&rules.detectors)?;
        let classifier = if classify {
            Some(PatternClassifier::compile(
                &rules.classifier,
                rules.effective_fallback(),
            )?)
        } else {
            None
        };

        tracing::info!(
            version = VERSION,
            detectors = table.len(),
            classifier_rules = classifier.as_ref().map_or(0, |c| c.rules().len()),
            caution = tiers.caution,
            critical = tiers.critical,
            "risk scorer built"
        );

        Ok(Self {
            table,
            classifier,
            tiers,
        })
    }

    /// Build a scorer from resolved configuration.
    ///
    /// Order: built-ins, then the rules file, then `weight_overrides`,
    /// then `disabled_detectors`.
    pub fn from_config(config: &KavalaiConfig) -> Result<Self, EngineError> {
        KavalaiConfig::validate(config)?;
        let scoring = &config.scoring;

        let mut rules = RuleSet::builtin();
        if let Some(ref path) = scoring.rules_path {
            let extra = RuleSet::load_from_file(Path::new(path))?;
            tracing::debug!(
                path = %path,
                detectors = extra.detectors.len(),
                classifier_rules = extra.classifier.len(),
                replace = extra.replace_builtin,
                "loaded rules file"
            );
            rules = rules.merge(extra);
        }
        rules.apply_overrides(&scoring.disabled_detectors, &scoring.weight_overrides)?;

        let tiers = TierThresholds::new(
            scoring.effective_caution_threshold(),
            scoring.effective_critical_threshold(),
        );
        Ok(Self::from_rules(
            &rules,
            tiers,
            scoring.effective_classify_patterns(),
        )?)
    }

    /// Score one message. Total over every input, including the empty string.
    pub fn analyze(&self, message: &str) -> AnalysisResult {
        let ctx = MessageContext::new(message);
        let reasons = self.table.evaluate(&ctx);
        let score = capped_score(&reasons);
        let level = self.tiers.level_for(score);
        let pattern = self
            .classifier
            .as_ref()
            .map(|c| c.classify(&ctx).to_string());

        tracing::debug!(
            len = message.len(),
            score,
            level = %level,
            fired = reasons.len(),
            pattern = pattern.as_deref().unwrap_or("-"),
            "message analyzed"
        );

        AnalysisResult {
            score,
            level,
            reasons,
            pattern,
        }
    }

    pub fn table(&self) -> &DetectorTable {
        &self.table
    }

    pub fn classifier(&self) -> Option<&PatternClassifier> {
        self.classifier.as_ref()
    }

    pub fn tiers(&self) -> TierThresholds {
        self.tiers
    }
}

fn capped_score(reasons: &Reasons) -> u32 {
    reasons
        .iter()
        .fold(0u32, |acc, r| acc.saturating_add(r.points))
        .min(MAX_SCORE)
}

static BUILTIN: OnceLock<Option<RiskScorer>> = OnceLock::new();

/// Score a message with the shared built-in scorer.
///
/// The built-in rules are compiled on first use. If they ever failed to
/// compile, the failure is logged and every message scores as an empty one.
pub fn analyze(message: &str) -> AnalysisResult {
    let scorer = BUILTIN.get_or_init(|| match RiskScorer::builtin() {
        Ok(scorer) => Some(scorer),
        Err(err) => {
            tracing::error!(error = %err, "built-in detector table failed to compile");
            None
        }
    });

    match scorer {
        Some(scorer) => scorer.analyze(message),
        None => unscored_result(),
    }
}

fn unscored_result() -> AnalysisResult {
    AnalysisResult {
        score: 0,
        level: TierThresholds::default().level_for(0),
        reasons: Reasons::new(),
        pattern: Some(DEFAULT_FALLBACK_PATTERN.to_string()),
    }
}
