//! Console reporter: score gauge, tier badge, and one bar per reason.

use super::Reporter;
use crate::types::{AnalysisResult, RiskLevel};

const BAR_WIDTH: usize = 20;

/// Console reporter for human-readable terminal output.
pub struct ConsoleReporter {
    pub use_color: bool,
}

impl ConsoleReporter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn color_start(&self, level: RiskLevel) -> &'static str {
        if !self.use_color {
            return "";
        }
        match level {
            RiskLevel::Critical => "\x1b[31m", // red
            RiskLevel::Caution => "\x1b[33m",  // amber
            RiskLevel::LowRisk => "\x1b[32m",  // green
        }
    }

    fn color_end(&self) -> &'static str {
        if self.use_color {
            "\x1b[0m"
        } else {
            ""
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Fixed-width bar for a fraction in [0, 1].
fn bar(fraction: f32) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * BAR_WIDTH as f32).round() as usize).min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

impl Reporter for ConsoleReporter {
    fn name(&self) -> &'static str {
        "console"
    }

    fn generate(&self, result: &AnalysisResult) -> Result<String, String> {
        let mut output = String::new();
        let cs = self.color_start(result.level);
        let ce = self.color_end();

        output.push_str(&format!(
            "Risk score: {:>3}%  [{}]  {}{}{}\n",
            result.score,
            bar(result.score as f32 / 100.0),
            cs,
            result.level,
            ce
        ));

        if let Some(ref pattern) = result.pattern {
            output.push_str(&format!("Pattern:    {pattern}\n"));
        }

        output.push_str("\nRisk breakdown\n");
        if result.reasons.is_empty() {
            output.push_str("  no indicators found\n");
        }
        for reason in &result.reasons {
            output.push_str(&format!(
                "  {} +{:<3} {}\n",
                bar(reason.weight),
                reason.points,
                reason.label
            ));
        }

        Ok(output)
    }
}
