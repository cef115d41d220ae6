//! Kavalai analysis engine: scores shared text messages for scam risk.
//!
//! ```
//! use kavalai_analysis::{analyze, RiskLevel};
//!
//! let result = analyze("URGENT: verify your bank account at http://secure-update-bank.com");
//! assert_eq!(result.level, RiskLevel::Critical);
//! assert!(result.fired("combo"));
//! ```

pub mod batch;
pub mod classifier;
pub mod detectors;
pub mod reporters;
pub mod rules;
pub mod scorer;
pub mod types;

pub use batch::{BatchAnalyzer, BatchSummary};
pub use classifier::PatternClassifier;
pub use detectors::DetectorTable;
pub use rules::RuleSet;
pub use scorer::{analyze, RiskScorer};
pub use types::{AnalysisResult, Reason, RiskLevel, TierThresholds};
