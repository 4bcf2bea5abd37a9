//! Integration tests for extraction configuration loading.

use std::path::Path;

use swatch_common::{ConfigError, DEFAULT_SELECTORS, DigestLimits, ExtractConfig};

#[test]
fn test_default_config_matches_reference_limits() {
    let config = ExtractConfig::default();
    assert!(config.sample_components);
    assert_eq!(config.max_html_chars, 1000);
    assert_eq!(config.max_text_chars, 100);
    assert_eq!(config.selectors.len(), DEFAULT_SELECTORS.len());
    assert_eq!(config.selectors[0], "nav");
    assert_eq!(config.selectors.last().map(String::as_str), Some(".menu"));

    let digest = DigestLimits::default();
    assert_eq!(digest.colors, Some(50));
    assert_eq!(digest.spacings, Some(20));
    assert_eq!(digest.font_families, None);
    assert_eq!(digest.border_radii, None);
    assert_eq!(digest.shadows, None);
    assert_eq!(digest.component_tags, 5);
}

#[test]
fn test_empty_object_yields_defaults() {
    let config = ExtractConfig::from_json_str("{}").unwrap();
    assert_eq!(config, ExtractConfig::default());
}

#[test]
fn test_partial_override_keeps_other_defaults() {
    let config = ExtractConfig::from_json_str(
        r#"{ "selectors": [".pricing", "table"], "max_text_chars": 40, "digest": { "colors": 10 } }"#,
    )
    .unwrap();
    assert_eq!(config.selectors, vec![".pricing", "table"]);
    assert_eq!(config.max_text_chars, 40);
    assert_eq!(config.max_html_chars, 1000);
    assert_eq!(config.digest.colors, Some(10));
    assert_eq!(config.digest.spacings, Some(20));
}

#[test]
fn test_null_limit_means_unlimited() {
    let config = ExtractConfig::from_json_str(r#"{ "digest": { "colors": null } }"#).unwrap();
    assert_eq!(config.digest.colors, None);
}

#[test]
fn test_unknown_field_is_rejected() {
    let err = ExtractConfig::from_json_str(r#"{ "max_html": 5 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_invalid_json_is_rejected() {
    let err = ExtractConfig::from_json_str("selectors = [nav]").unwrap_err();
    assert!(err.to_string().starts_with("invalid config"));
}

#[test]
fn test_missing_file_reports_path() {
    let path = Path::new("/definitely/not/here/swatch.json");
    let err = ExtractConfig::load(path).unwrap_err();
    match &err {
        ConfigError::Io { path: reported, .. } => assert_eq!(reported, path),
        ConfigError::Parse(_) => panic!("Expected Io error"),
    }
    assert!(err.to_string().contains("swatch.json"));
}
