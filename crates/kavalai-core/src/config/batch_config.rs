//! Batch analysis configuration.

use serde::{Deserialize, Serialize};

/// Configuration for batch analysis.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct BatchConfig {
    /// Dedicated worker count. `None` uses the global rayon pool.
    pub parallelism: Option<usize>,
}
