//! Integration tests for config loading from fixture files.
//!
//! These tests verify that the sample config file stays in sync with the
//! settings the binary actually reads.

use std::fs;
use std::path::Path;

/// Read the sample config file content.
fn read_sample_config() -> String {
    let config_path = Path::new("tests/fixtures/sample_config.toml");
    fs::read_to_string(config_path).expect("Failed to read sample config file")
}

#[test]
fn sample_config_file_exists() {
    let config_path = Path::new("tests/fixtures/sample_config.toml");
    assert!(config_path.exists(), "Sample config file should exist");
}

#[test]
fn sample_config_is_valid_toml() {
    let config_content = read_sample_config();
    let result: Result<toml::Value, _> = toml::from_str(&config_content);
    assert!(result.is_ok(), "Sample config should be valid TOML: {:?}", result.err());
}

#[test]
fn sample_config_has_nxshot_section() {
    let config_content = read_sample_config();
    let value: toml::Value = toml::from_str(&config_content).expect("should parse");

    let table = value.as_table().expect("should be a table");
    assert!(table.contains_key("nxshot"), "Config should have [nxshot] section");
}

#[test]
fn nxshot_section_has_expected_structure() {
    let config_content = read_sample_config();
    let value: toml::Value = toml::from_str(&config_content).expect("should parse");

    let nxshot = value.get("nxshot").expect("should have nxshot section");

    assert!(nxshot.get("catalog").is_some());
    assert!(nxshot.get("debug").is_some());
    assert!(nxshot.get("dryrun").is_some());
    assert!(nxshot.get("skip_existing").is_some());
    assert!(nxshot.get("verbose").is_some());
}
