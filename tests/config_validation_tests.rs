//! Config Validation Tests
//!
//! Typo detection on raw TOML keys and range validation on parsed values,
//! exercised independently from the viewer.

use horizon_uncertainty::config::validation::{
    known_config_keys, suggest_correction, validate_physical_ranges, validate_unknown_keys,
};
use horizon_uncertainty::config::{ConfigError, ViewerConfig};

// ============================================================================
// Typo Detection
// ============================================================================

#[test]
fn typo_in_fence_key_warns_with_suggestion() {
    let toml_str = r#"
[fence]
extention = 250.0
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1, "Expected exactly 1 warning");
    assert!(warnings[0].field.contains("extention"));
    assert_eq!(warnings[0].suggestion.as_deref(), Some("fence.extension"));
}

#[test]
fn typo_in_section_name_warns() {
    let toml_str = r#"
[zonaton]
min_zone_code = 1
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert!(!warnings.is_empty());
    assert!(warnings.iter().any(|w| w.field == "zonaton"));
    assert!(warnings
        .iter()
        .any(|w| w.suggestion.as_deref() == Some("zonation")));
}

#[test]
fn valid_config_produces_zero_warnings() {
    let toml_str = r#"
[model]
basedir = "/project/drogon/hum"

[fence]
extension = 100.0
sampling_interval = 5.0

[zonation]
min_zone_code = 1

[display]
zunit = "TVD (m)"
colors = ["red", "blue", "green"]

[server]
addr = "0.0.0.0:8050"
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert!(warnings.is_empty(), "Unexpected warnings: {warnings:?}");

    let config = ViewerConfig::from_toml_str(toml_str).unwrap();
    assert!((config.fence.extension - 100.0).abs() < f64::EPSILON);
    assert_eq!(config.zonation.min_zone_code, 1);
    assert_eq!(config.display.colors.len(), 3);
}

#[test]
fn far_off_key_gets_no_suggestion() {
    let warnings = validate_unknown_keys("completely_unrelated_setting = true\n");
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].suggestion.is_none());
}

#[test]
fn known_keys_cover_every_default_field() {
    let known = known_config_keys();
    let rendered = ViewerConfig::default().to_toml().unwrap();
    assert!(validate_unknown_keys(&rendered).is_empty());
    assert!(known.contains("fence.sampling_interval"));
    assert_eq!(
        suggest_correction("server.adr", &known).as_deref(),
        Some("server.addr")
    );
}

// ============================================================================
// Range Validation
// ============================================================================

#[test]
fn defaults_pass_range_validation() {
    let (errors, warnings) = validate_physical_ranges(&ViewerConfig::default());
    assert!(errors.is_empty(), "{errors:?}");
    assert!(warnings.is_empty(), "{warnings:?}");
}

#[test]
fn zero_sampling_interval_is_error() {
    let mut config = ViewerConfig::default();
    config.fence.sampling_interval = 0.0;
    let (errors, _) = validate_physical_ranges(&config);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("fence.sampling_interval"));
}

#[test]
fn negative_extension_is_error_and_huge_one_warns() {
    let mut config = ViewerConfig::default();
    config.fence.extension = -1.0;
    let (errors, _) = validate_physical_ranges(&config);
    assert!(errors.iter().any(|e| e.contains("fence.extension")));

    config.fence.extension = 50_000.0;
    let (errors, warnings) = validate_physical_ranges(&config);
    assert!(errors.is_empty());
    assert!(warnings.iter().any(|w| w.field == "fence.extension"));
}

#[test]
fn empty_palette_is_error() {
    let mut config = ViewerConfig::default();
    config.display.colors.clear();
    let (errors, _) = validate_physical_ranges(&config);
    assert!(errors.iter().any(|e| e.contains("display.colors")));
}

#[test]
fn invalid_server_addr_fails_parse_from_toml() {
    let toml_str = r#"
[server]
addr = "not-an-address"
"#;
    match ViewerConfig::from_toml_str(toml_str) {
        Err(ConfigError::Validation(errors)) => {
            assert!(errors.iter().any(|e| e.contains("server.addr")));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn load_from_missing_file_is_io_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = ViewerConfig::load_from_file(&dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(..)));
}

#[test]
fn load_from_file_reports_path_on_parse_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("horizon_viewer.toml");
    std::fs::write(&path, "[fence\nextension = 1").unwrap();

    match ViewerConfig::load_from_file(&path) {
        Err(ConfigError::Parse(p, _)) => assert_eq!(p, path),
        other => panic!("expected parse error, got {other:?}"),
    }
}
