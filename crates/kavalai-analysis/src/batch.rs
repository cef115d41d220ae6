//! Batch analysis: rayon-parallel scoring of many messages.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use kavalai_core::config::BatchConfig;

use crate::scorer::RiskScorer;
use crate::types::{AnalysisResult, RiskLevel};

impl RiskScorer {
    /// Score every message in parallel. Output order matches input order.
    pub fn analyze_batch<S>(&self, messages: &[S]) -> Vec<AnalysisResult>
    where
        S: AsRef<str> + Sync,
    {
        messages.par_iter().map(|m| self.analyze(m.as_ref())).collect()
    }
}

/// A scorer paired with an optional dedicated thread pool.
pub struct BatchAnalyzer {
    scorer: RiskScorer,
    pool: Option<rayon::ThreadPool>,
}

impl BatchAnalyzer {
    /// Build with `config.parallelism` workers, or the global pool when unset.
    /// A pool that cannot be built falls back to the global pool.
    pub fn new(scorer: RiskScorer, config: &BatchConfig) -> Self {
        let pool = config.parallelism.and_then(|threads| {
            match rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .thread_name(|i| format!("kavalai-batch-{i}"))
                .build()
            {
                Ok(pool) => Some(pool),
                Err(err) => {
                    tracing::warn!(
                        threads,
                        error = %err,
                        "failed to build batch thread pool, using global pool"
                    );
                    None
                }
            }
        });
        Self { scorer, pool }
    }

    pub fn analyze<S>(&self, messages: &[S]) -> Vec<AnalysisResult>
    where
        S: AsRef<str> + Sync,
    {
        let started = std::time::Instant::now();
        let results = match self.pool {
            Some(ref pool) => pool.install(|| self.scorer.analyze_batch(messages)),
            None => self.scorer.analyze_batch(messages),
        };
        tracing::debug!(
            messages = messages.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            dedicated_pool = self.pool.is_some(),
            "batch analyzed"
        );
        results
    }

    pub fn scorer(&self) -> &RiskScorer {
        &self.scorer
    }

    /// Worker count of the dedicated pool, if any.
    pub fn threads(&self) -> Option<usize> {
        self.pool.as_ref().map(|p| p.current_num_threads())
    }
}

/// Aggregate view over a batch of results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub low_risk: usize,
    pub caution: usize,
    pub critical: usize,
    pub max_score: u32,
    pub mean_score: f64,
}

impl BatchSummary {
    pub fn from_results(results: &[AnalysisResult]) -> Self {
        let mut summary = Self {
            total: results.len(),
            ..Default::default()
        };
        let mut sum: u64 = 0;
        for r in results {
            match r.level {
                RiskLevel::LowRisk => summary.low_risk += 1,
                RiskLevel::Caution => summary.caution += 1,
                RiskLevel::Critical => summary.critical += 1,
            }
            summary.max_score = summary.max_score.max(r.score);
            sum += u64::from(r.score);
        }
        if summary.total > 0 {
            summary.mean_score = sum as f64 / summary.total as f64;
        }
        summary
    }

    pub fn count(&self, level: RiskLevel) -> usize {
        match level {
            RiskLevel::LowRisk => self.low_risk,
            RiskLevel::Caution => self.caution,
            RiskLevel::Critical => self.critical,
        }
    }
}
