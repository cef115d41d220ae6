//! Scoring tests over the built-in detector table.

use kavalai_analysis::{analyze, AnalysisResult, RiskLevel, RiskScorer, TierThresholds};

const BANK_PHISH: &str =
    "URGENT: Your bank account has been suspended. Verify now at http://secure-update-bank.com";
const DELIVERY_PHISH: &str =
    "Your package delivery failed. Reschedule here: bit.ly/update-delivery-info";
const BENIGN: &str = "Hey, are we still meeting tomorrow at 5?";

fn scorer() -> RiskScorer {
    RiskScorer::builtin().unwrap()
}

fn ids(result: &AnalysisResult) -> Vec<&str> {
    result.reasons.iter().map(|r| r.id.as_str()).collect()
}

#[test]
fn test_bank_phishing_saturates_to_critical() {
    let result = scorer().analyze(BANK_PHISH);
    assert_eq!(ids(&result), vec!["link", "urgency", "financial", "combo"]);
    assert_eq!(result.score, 100);
    assert_eq!(result.level, RiskLevel::Critical);
    assert_eq!(result.pattern.as_deref(), Some("Social Engineering Attempt"));
}

#[test]
fn test_benign_message_scores_zero() {
    let result = scorer().analyze(BENIGN);
    assert_eq!(result.score, 0);
    assert_eq!(result.level, RiskLevel::LowRisk);
    assert!(result.reasons.is_empty());
    assert_eq!(result.pattern.as_deref(), Some("Social Engineering Attempt"));
}

#[test]
fn test_empty_message() {
    let result = scorer().analyze("");
    assert_eq!(result.score, 0);
    assert_eq!(result.level, RiskLevel::LowRisk);
    assert!(result.reasons.is_empty());
    assert_eq!(result.pattern.as_deref(), Some("Social Engineering Attempt"));
}

#[test]
fn test_delivery_phishing_is_caution() {
    let result = scorer().analyze(DELIVERY_PHISH);
    assert_eq!(ids(&result), vec!["link", "logistics"]);
    assert_eq!(result.score, 60);
    assert_eq!(result.level, RiskLevel::Caution);
    assert_eq!(result.pattern.as_deref(), Some("Fake Logistics Scam"));
}

#[test]
fn test_logistics_requires_link() {
    let result = scorer().analyze("Your parcel is out for delivery");
    assert!(!result.fired("logistics"));
    assert_eq!(result.score, 0);
    // The classifier is independent of the detectors.
    assert_eq!(result.pattern.as_deref(), Some("Fake Logistics Scam"));
}

#[test]
fn test_obfuscated_urgency() {
    for message in [
        "This is U-R-G-E-N-T, reply now",
        "u.r.g.e.n.t response needed",
        "u r g e n t",
        "U_R_G_E_N_T",
    ] {
        let result = scorer().analyze(message);
        assert_eq!(ids(&result), vec!["urgency"], "message: {message}");
        assert_eq!(result.score, 25);
    }
}

#[test]
fn test_urgency_vocabulary() {
    for message in ["respond IMMEDIATELY", "Action Required on your profile", "urgent!!"] {
        assert!(scorer().analyze(message).fired("urgency"), "message: {message}");
    }
}

#[test]
fn test_link_variants() {
    for message in [
        "see HTTPS://EXAMPLE.ORG",
        "go to http://x.io",
        "tinyurl.com/abc",
        "goo.gl/xyz",
        "cutt.ly/qq",
    ] {
        let result = scorer().analyze(message);
        assert!(result.fired("link"), "message: {message}");
        assert_eq!(result.reasons[0].label, "Suspicious Link Detected");
        assert!((result.reasons[0].weight - 0.35).abs() < f32::EPSILON);
    }
}

#[test]
fn test_currency_symbols_are_financial() {
    for message in ["Pay ₹500 now", "only $5", "€20 fee", "£3 charge"] {
        let result = scorer().analyze(message);
        assert_eq!(ids(&result), vec!["financial"], "message: {message}");
        assert_eq!(result.reasons[0].label, "Financial Trigger Words");
    }
}

#[test]
fn test_substring_semantics_match_inside_words() {
    // Keywords are plain substrings: "win" fires inside "window".
    let result = scorer().analyze("close the window please");
    assert!(result.fired("financial"));
}

#[test]
fn test_caution_lower_bound_is_inclusive() {
    // urgency (25) + financial (20) = 45
    let result = scorer().analyze("Urgent: confirm the payment");
    assert_eq!(result.score, 45);
    assert_eq!(result.level, RiskLevel::Caution);
}

#[test]
fn test_combo_without_financial() {
    let result = scorer().analyze("Act immediately: https://verify.example");
    assert_eq!(ids(&result), vec!["link", "urgency", "combo"]);
    assert_eq!(result.score, 80);
    assert_eq!(result.level, RiskLevel::Critical);
}

#[test]
fn test_kyc_message_classified_and_capped() {
    let message = "Dear customer, your KYC is pending. Update immediately at \
                   https://kyc-verify.in or your account will be blocked";
    let result = scorer().analyze(message);
    assert_eq!(result.uncapped_score(), 100);
    assert_eq!(result.score, 100);
    assert_eq!(result.pattern.as_deref(), Some("Bank KYC Phishing"));
}

#[test]
fn test_all_detectors_cap_at_100() {
    let message = "URGENT bank payment: your package is held, pay at https://bit.ly/x";
    let result = scorer().analyze(message);
    assert_eq!(result.reasons.len(), 5);
    assert_eq!(result.uncapped_score(), 125);
    assert_eq!(scorer().table().max_points(), 125);
    assert_eq!(result.score, 100);
    assert_eq!(result.level, RiskLevel::Critical);
}

#[test]
fn test_reasons_keep_detection_order() {
    let result = scorer().analyze("bank transfer via http://x.io");
    assert_eq!(ids(&result), vec!["link", "financial"]);
    let weights: Vec<f32> = result.reasons.iter().map(|r| r.weight).collect();
    // Not re-sorted: 0.35 before 0.20 only because link comes first in the table.
    assert!(weights[0] > weights[1]);
}

#[test]
fn test_analyze_is_idempotent() {
    let s = scorer();
    assert_eq!(s.analyze(BANK_PHISH), s.analyze(BANK_PHISH));
    assert_eq!(analyze(DELIVERY_PHISH), analyze(DELIVERY_PHISH));
}

#[test]
fn test_shared_builtin_matches_owned_scorer() {
    for message in [BANK_PHISH, DELIVERY_PHISH, BENIGN, ""] {
        assert_eq!(analyze(message), scorer().analyze(message));
    }
}

#[test]
fn test_tier_boundaries() {
    let tiers = TierThresholds::default();
    assert_eq!(tiers.level_for(0), RiskLevel::LowRisk);
    assert_eq!(tiers.level_for(44), RiskLevel::LowRisk);
    assert_eq!(tiers.level_for(45), RiskLevel::Caution);
    assert_eq!(tiers.level_for(74), RiskLevel::Caution);
    assert_eq!(tiers.level_for(75), RiskLevel::Critical);
    assert_eq!(tiers.level_for(100), RiskLevel::Critical);
}

#[test]
fn test_scorer_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RiskScorer>();
}
