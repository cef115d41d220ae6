//! Compiled detector table.
//!
//! Keywords are folded to lower case and matched with a single Aho-Corasick
//! automaton per detector; regexes are compiled into one case-insensitive
//! `RegexSet` per detector. Both run in a single pass over the message.

use aho_corasick::AhoCorasick;
use regex::{RegexSet, RegexSetBuilder};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use kavalai_core::constants::MAX_SCORE;
use kavalai_core::errors::DetectionError;

use super::context::MessageContext;
use crate::rules::DetectorRuleDef;
use crate::types::{Reason, Reasons};

/// Keyword and regex matcher. Fires when any keyword or any regex matches.
#[derive(Debug, Clone)]
pub struct Matcher {
    keywords: Option<AhoCorasick>,
    patterns: Option<RegexSet>,
}

impl Matcher {
    /// Compile a matcher. Returns `Ok(None)` when both lists are empty.
    pub fn compile(
        id: &str,
        keywords: &[String],
        patterns: &[String],
    ) -> Result<Option<Self>, DetectionError> {
        if keywords.is_empty() && patterns.is_empty() {
            return Ok(None);
        }

        if keywords.iter().any(|k| k.is_empty()) {
            return Err(DetectionError::InvalidRule {
                id: id.to_string(),
                message: "keywords must not be empty strings".to_string(),
            });
        }

        let folded: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
        let automaton = if folded.is_empty() {
            None
        } else {
            Some(AhoCorasick::new(&folded).map_err(|e| {
                DetectionError::RuleCompilationFailed {
                    id: id.to_string(),
                    message: e.to_string(),
                }
            })?)
        };

        let set = if patterns.is_empty() {
            None
        } else {
            Some(
                RegexSetBuilder::new(patterns)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| DetectionError::RuleCompilationFailed {
                        id: id.to_string(),
                        message: e.to_string(),
                    })?,
            )
        };

        Ok(Some(Self {
            keywords: automaton,
            patterns: set,
        }))
    }

    pub fn is_match(&self, ctx: &MessageContext<'_>) -> bool {
        let keyword_hit = self
            .keywords
            .as_ref()
            .is_some_and(|ac| ac.is_match(ctx.folded()));
        keyword_hit || self.patterns.as_ref().is_some_and(|rs| rs.is_match(ctx.raw()))
    }
}

/// A detector ready for evaluation.
#[derive(Debug, Clone)]
pub struct CompiledDetector {
    pub id: String,
    pub label: String,
    pub points: u32,
    /// `None` for pure combination detectors.
    pub matcher: Option<Matcher>,
    /// Indices of earlier detectors that must have fired.
    pub requires: SmallVec<[usize; 2]>,
}

/// Ordered, immutable detector table.
#[derive(Debug, Clone)]
pub struct DetectorTable {
    detectors: Vec<CompiledDetector>,
    index: FxHashMap<String, usize>,
}

impl DetectorTable {
    /// Compile detector definitions in order.
    ///
    /// Ids and labels must be unique, points within 1..=100, and every
    /// required id must name an earlier detector.
    pub fn compile(defs: &[DetectorRuleDef]) -> Result<Self, DetectionError> {
        let mut detectors = Vec::with_capacity(defs.len());
        let mut index = FxHashMap::default();
        let mut labels = FxHashSet::default();

        for def in defs {
            if def.id.trim().is_empty() {
                return Err(DetectionError::InvalidRule {
                    id: def.id.clone(),
                    message: "id must not be empty".to_string(),
                });
            }
            if def.label.trim().is_empty() {
                return Err(DetectionError::InvalidRule {
                    id: def.id.clone(),
                    message: "label must not be empty".to_string(),
                });
            }
            if def.points == 0 || def.points > MAX_SCORE {
                return Err(DetectionError::InvalidRule {
                    id: def.id.clone(),
                    message: format!("points must be between 1 and {MAX_SCORE}, got {}", def.points),
                });
            }
            if index.contains_key(&def.id) {
                return Err(DetectionError::DuplicateRule(def.id.clone()));
            }
            if !labels.insert(def.label.as_str()) {
                return Err(DetectionError::DuplicateLabel {
                    id: def.id.clone(),
                    label: def.label.clone(),
                });
            }

            let mut requires = SmallVec::new();
            for dep in &def.requires {
                let dep_idx = index.get(dep).copied().ok_or_else(|| {
                    DetectionError::UnknownDependency {
                        id: def.id.clone(),
                        dependency: dep.clone(),
                    }
                })?;
                requires.push(dep_idx);
            }

            let matcher = Matcher::compile(&def.id, &def.keywords, &def.patterns)?;
            if matcher.is_none() && requires.is_empty() {
                return Err(DetectionError::InvalidRule {
                    id: def.id.clone(),
                    message: "needs at least one keyword, pattern or requirement".to_string(),
                });
            }

            index.insert(def.id.clone(), detectors.len());
            detectors.push(CompiledDetector {
                id: def.id.clone(),
                label: def.label.clone(),
                points: def.points,
                matcher,
                requires,
            });
        }

        Ok(Self { detectors, index })
    }

    /// Run every detector against the message, in table order.
    pub fn evaluate(&self, ctx: &MessageContext<'_>) -> Reasons {
        let mut fired: SmallVec<[bool; 8]> = SmallVec::from_elem(false, self.detectors.len());
        let mut reasons = Reasons::new();

        for (i, detector) in self.detectors.iter().enumerate() {
            let matched = detector.matcher.as_ref().map_or(true, |m| m.is_match(ctx));
            let deps_met = detector.requires.iter().all(|&dep| fired[dep]);
            if matched && deps_met {
                fired[i] = true;
                reasons.push(Reason::new(&detector.id, &detector.label, detector.points));
            }
        }

        reasons
    }

    pub fn get(&self, id: &str) -> Option<&CompiledDetector> {
        self.index.get(id).map(|&i| &self.detectors[i])
    }

    pub fn detectors(&self) -> &[CompiledDetector] {
        &self.detectors
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.detectors.iter().map(|d| d.id.as_str())
    }

    /// Sum of every detector's points, before capping.
    pub fn max_points(&self) -> u32 {
        self.detectors.iter().map(|d| d.points).sum()
    }

    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }
}
