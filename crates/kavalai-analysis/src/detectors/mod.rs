//! Detector system: weighted scam-indicator detectors compiled into a table.
//!
//! Each detector is a keyword/regex matcher plus optional dependencies on
//! earlier detectors. The table is built once and evaluated in order for
//! every message.

pub mod builtin;
pub mod context;
pub mod table;

pub use context::MessageContext;
pub use table::{CompiledDetector, DetectorTable, Matcher};
