//! Built-in attack-pattern priority list. First match wins.

use crate::rules::ClassifierRuleDef;

const BUILTIN_CLASSIFIER: &[(&str, &[&str])] = &[
    ("Bank KYC Phishing", &["kyc"]),
    ("OTP Credential Theft", &["otp"]),
    ("Fake Logistics Scam", &["delivery", "package"]),
    ("Advance Fee Fraud", &["lottery", "prize"]),
];

/// Build the built-in classifier rules, highest priority first.
pub fn builtin_classifier_rules() -> Vec<ClassifierRuleDef> {
    BUILTIN_CLASSIFIER
        .iter()
        .map(|(label, keywords)| ClassifierRuleDef {
            label: label.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            enabled: None,
        })
        .collect()
}
