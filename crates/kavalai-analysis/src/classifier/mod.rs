//! Attack-pattern classifier: ordered keyword rules, first match wins.
//!
//! Runs independently of the weighted detectors: a message can be labelled
//! "Bank KYC Phishing" whether or not any detector fired.

pub mod builtin;

use kavalai_core::errors::DetectionError;

use crate::detectors::{Matcher, MessageContext};
use crate::rules::ClassifierRuleDef;

/// One compiled priority rule.
#[derive(Debug, Clone)]
pub struct ClassifierRule {
    pub label: String,
    matcher: Matcher,
}

/// Ordered priority list with a fallback label.
#[derive(Debug, Clone)]
pub struct PatternClassifier {
    rules: Vec<ClassifierRule>,
    fallback: String,
}

impl PatternClassifier {
    pub fn compile(defs: &[ClassifierRuleDef], fallback: &str) -> Result<Self, DetectionError> {
        if fallback.trim().is_empty() {
            return Err(DetectionError::InvalidRule {
                id: "fallback_pattern".to_string(),
                message: "fallback label must not be empty".to_string(),
            });
        }

        let mut rules = Vec::with_capacity(defs.len());
        for def in defs {
            if def.label.trim().is_empty() {
                return Err(DetectionError::InvalidRule {
                    id: "classifier".to_string(),
                    message: "label must not be empty".to_string(),
                });
            }
            let matcher = Matcher::compile(&def.label, &def.keywords, &[])?.ok_or_else(|| {
                DetectionError::InvalidRule {
                    id: def.label.clone(),
                    message: "classifier rule needs at least one keyword".to_string(),
                }
            })?;
            rules.push(ClassifierRule {
                label: def.label.clone(),
                matcher,
            });
        }

        Ok(Self {
            rules,
            fallback: fallback.to_string(),
        })
    }

    /// Label of the first rule whose keywords appear in the message.
    pub fn classify(&self, ctx: &MessageContext<'_>) -> &str {
        self.rules
            .iter()
            .find(|rule| rule.matcher.is_match(ctx))
            .map_or(self.fallback.as_str(), |rule| rule.label.as_str())
    }

    /// Convenience wrapper over [`classify`](Self::classify) for a bare string.
    pub fn classify_text(&self, text: &str) -> &str {
        self.classify(&MessageContext::new(text))
    }

    pub fn rules(&self) -> &[ClassifierRule] {
        &self.rules
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }
}
