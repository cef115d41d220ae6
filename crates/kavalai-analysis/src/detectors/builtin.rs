//! Built-in scam-indicator detectors.
//!
//! Order matters: reasons are reported in table order, and a detector may
//! only require detectors listed before it.

use crate::rules::DetectorRuleDef;

/// Static shape of a built-in detector.
struct BuiltinDetector {
    id: &'static str,
    label: &'static str,
    points: u32,
    keywords: &'static [&'static str],
    patterns: &'static [&'static str],
    requires: &'static [&'static str],
}

const BUILTIN_DETECTORS: &[BuiltinDetector] = &[
    BuiltinDetector {
        id: "link",
        label: "Suspicious Link Detected",
        points: 35,
        keywords: &[
            "http://", "https://", "bit.ly", "tinyurl", "t.co", "goo.gl", "cutt.ly",
            "rb.gy", "is.gd", "tiny.cc",
        ],
        patterns: &[],
        requires: &[],
    },
    BuiltinDetector {
        id: "urgency",
        label: "Artificial Urgency Language",
        points: 25,
        keywords: &["urgent", "immediately", "action required"],
        // "u-r-g-e-n-t", "U.R.G.E.N.T", "u r g e n t"
        patterns: &[r"u[\W_]+r[\W_]+g[\W_]+e[\W_]+n[\W_]+t"],
        requires: &[],
    },
    BuiltinDetector {
        id: "financial",
        label: "Financial Trigger Words",
        points: 20,
        keywords: &[
            "payment", "transfer", "prize", "win", "won", "bank", "kyc", "amount", "₹", "$",
            "€", "£",
        ],
        patterns: &[],
        requires: &[],
    },
    BuiltinDetector {
        id: "logistics",
        label: "Fake Delivery Phishing Pattern",
        points: 25,
        keywords: &["delivery", "courier", "package", "parcel", "shipment", "tracking"],
        patterns: &[],
        requires: &["link"],
    },
    BuiltinDetector {
        id: "combo",
        label: "High-Pressure Phishing Combo",
        points: 20,
        keywords: &[],
        patterns: &[],
        requires: &["link", "urgency"],
    },
];

/// Build the built-in detector definitions.
pub fn builtin_detectors() -> Vec<DetectorRuleDef> {
    BUILTIN_DETECTORS
        .iter()
        .map(|d| DetectorRuleDef {
            id: d.id.to_string(),
            label: d.label.to_string(),
            points: d.points,
            keywords: to_owned_vec(d.keywords),
            patterns: to_owned_vec(d.patterns),
            requires: to_owned_vec(d.requires),
            enabled: None,
        })
        .collect()
}

fn to_owned_vec(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
