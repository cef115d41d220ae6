//! Tests for the Kavalai configuration system.

use std::sync::Mutex;

use kavalai_core::config::{KavalaiConfig, RuntimeOverrides};
use kavalai_core::errors::ConfigError;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all KAVALAI_ env vars and point HOME at an empty directory so the
/// developer's own user config cannot leak into the tests.
fn isolate_env(home: &std::path::Path) {
    for key in [
        "KAVALAI_SCORING_CAUTION_THRESHOLD",
        "KAVALAI_SCORING_CRITICAL_THRESHOLD",
        "KAVALAI_SCORING_CLASSIFY_PATTERNS",
        "KAVALAI_SCORING_RULES_PATH",
        "KAVALAI_BATCH_PARALLELISM",
    ] {
        std::env::remove_var(key);
    }
    std::env::set_var("HOME", home);
    std::env::remove_var("USERPROFILE");
}

#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let dir = tempdir();
    std::fs::write(
        dir.path().join("kavalai.toml"),
        r#"
[scoring]
caution_threshold = 40
critical_threshold = 80

[batch]
parallelism = 2
"#,
    )
    .unwrap();

    std::env::set_var("KAVALAI_SCORING_CRITICAL_THRESHOLD", "85");

    let rt = RuntimeOverrides {
        caution_threshold: Some(30),
        ..Default::default()
    };

    let config = KavalaiConfig::load(dir.path(), Some(&rt)).unwrap();

    // Runtime beats project for caution.
    assert_eq!(config.scoring.caution_threshold, Some(30));
    // Env beats project for critical.
    assert_eq!(config.scoring.critical_threshold, Some(85));
    // Project value survives where nothing overrides it.
    assert_eq!(config.batch.parallelism, Some(2));

    isolate_env(home.path());
}

#[test]
fn test_user_config_is_lowest_file_layer() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let user_dir = home.path().join(".kavalai");
    std::fs::create_dir_all(&user_dir).unwrap();
    std::fs::write(
        user_dir.join("config.toml"),
        r#"
[scoring]
classify_patterns = false
caution_threshold = 50
"#,
    )
    .unwrap();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("kavalai.toml"),
        "[scoring]\ncaution_threshold = 55\n",
    )
    .unwrap();

    let config = KavalaiConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.scoring.classify_patterns, Some(false));
    assert_eq!(config.scoring.caution_threshold, Some(55));
}

#[test]
fn test_load_missing_files_fallback() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let dir = tempdir();
    let config = KavalaiConfig::load(dir.path(), None).unwrap();

    assert_eq!(config, KavalaiConfig::default());
    assert_eq!(config.scoring.effective_caution_threshold(), 45);
    assert_eq!(config.scoring.effective_critical_threshold(), 75);
    assert!(config.scoring.effective_classify_patterns());
    assert!(config.batch.parallelism.is_none());
}

#[test]
fn test_invalid_project_toml_is_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let dir = tempdir();
    std::fs::write(dir.path().join("kavalai.toml"), "[scoring\ncaution = ").unwrap();

    let err = KavalaiConfig::load(dir.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }), "got {err:?}");
}

#[test]
fn test_unparseable_env_values_are_ignored() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    std::env::set_var("KAVALAI_SCORING_CRITICAL_THRESHOLD", "very high");
    std::env::set_var("KAVALAI_SCORING_CLASSIFY_PATTERNS", "maybe");

    let dir = tempdir();
    let config = KavalaiConfig::load(dir.path(), None).unwrap();
    assert!(config.scoring.critical_threshold.is_none());
    assert!(config.scoring.classify_patterns.is_none());

    isolate_env(home.path());
}

#[test]
fn test_relative_rules_path_resolves_against_root() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let dir = tempdir();
    std::fs::write(
        dir.path().join("kavalai.toml"),
        "[scoring]\nrules_path = \"rules/extra.toml\"\n",
    )
    .unwrap();

    let config = KavalaiConfig::load(dir.path(), None).unwrap();
    let expected = dir.path().join("rules/extra.toml");
    assert_eq!(
        config.scoring.rules_path.as_deref(),
        Some(expected.display().to_string().as_str())
    );
}

#[test]
fn test_validation_rejects_inverted_thresholds() {
    let err = KavalaiConfig::from_toml(
        r#"
[scoring]
caution_threshold = 80
critical_threshold = 60
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}

#[test]
fn test_validation_rejects_threshold_above_max() {
    let err = KavalaiConfig::from_toml("[scoring]\ncritical_threshold = 101\n").unwrap_err();
    match err {
        ConfigError::ValidationFailed { field, .. } => {
            assert_eq!(field, "scoring.critical_threshold");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_validation_rejects_zero_weight_override() {
    let err = KavalaiConfig::from_toml(
        r#"
[scoring.weight_overrides]
link = 0
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}

#[test]
fn test_validation_rejects_zero_parallelism() {
    let err = KavalaiConfig::from_toml("[batch]\nparallelism = 0\n").unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}

#[test]
fn test_unknown_keys_are_ignored() {
    let config = KavalaiConfig::from_toml(
        r#"
[scoring]
critical_threshold = 70
future_option = "yes"

[telemetry]
enabled = true
"#,
    )
    .unwrap();
    assert_eq!(config.scoring.critical_threshold, Some(70));
}

#[test]
fn test_toml_round_trip_keeps_overrides() {
    let config = KavalaiConfig::from_toml(
        r#"
[scoring]
disabled_detectors = ["logistics"]

[scoring.weight_overrides]
financial = 25
"#,
    )
    .unwrap();

    let serialized = config.to_toml().unwrap();
    let reparsed = KavalaiConfig::from_toml(&serialized).unwrap();
    assert_eq!(reparsed, config);
    assert_eq!(reparsed.scoring.weight_overrides.get("financial"), Some(&25));
}

#[test]
fn test_user_config_rules_path_resolves_against_user_dir() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let user_dir = home.path().join(".kavalai");
    std::fs::create_dir_all(&user_dir).unwrap();
    std::fs::write(
        user_dir.join("config.toml"),
        "[scoring]\nrules_path = \"my-rules.toml\"\n",
    )
    .unwrap();

    let dir = tempdir();
    let config = KavalaiConfig::load(dir.path(), None).unwrap();
    let expected = user_dir.join("my-rules.toml");
    assert_eq!(
        config.scoring.rules_path.as_deref(),
        Some(expected.display().to_string().as_str())
    );
}

#[test]
fn test_absolute_rules_path_is_kept() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let rules_dir = tempdir();
    let absolute = rules_dir.path().join("rules.toml").display().to_string();
    let dir = tempdir();
    std::fs::write(
        dir.path().join("kavalai.toml"),
        format!("[scoring]\nrules_path = {absolute:?}\n"),
    )
    .unwrap();

    let config = KavalaiConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.scoring.rules_path.as_deref(), Some(absolute.as_str()));
}

#[test]
fn test_empty_rules_path_is_invalid_value() {
    let err = KavalaiConfig::from_toml("[scoring]\nrules_path = \"  \"\n").unwrap_err();
    match err {
        ConfigError::InvalidValue { field, .. } => assert_eq!(field, "scoring.rules_path"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_blank_disabled_detector_is_invalid_value() {
    let err = KavalaiConfig::from_toml("[scoring]\ndisabled_detectors = [\"\"]\n").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "scoring.disabled_detectors"));
}
