//! JSON reporter.

use super::Reporter;
use crate::types::AnalysisResult;

pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn generate(&self, result: &AnalysisResult) -> Result<String, String> {
        serde_json::to_string_pretty(result).map_err(|e| format!("JSON serialization failed: {e}"))
    }
}
