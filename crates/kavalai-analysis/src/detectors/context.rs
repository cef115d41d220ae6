//! Per-message matching context.

/// A message prepared for matching: the raw text plus a case-folded copy
/// shared by every keyword matcher.
#[derive(Debug, Clone)]
pub struct MessageContext<'a> {
    raw: &'a str,
    folded: String,
}

impl<'a> MessageContext<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw,
            folded: raw.to_lowercase(),
        }
    }

    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// Lower-cased message, used for keyword matching.
    pub fn folded(&self) -> &str {
        &self.folded
    }
}
