//! Tests for configuration handling.

use pypiler_core::RedefinitionPolicy;
use pypiler_utils::{CONFIG_FILE, Config, OutputFormat};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_new() {
    let config = Config::new();
    assert_eq!(config.lowering.redefinition, RedefinitionPolicy::Replace);
    assert_eq!(config.output.format, OutputFormat::Text);
}

#[test]
fn test_config_save_and_load() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join(CONFIG_FILE);

    let mut config = Config::new();
    config.lowering.redefinition = RedefinitionPolicy::Reject;
    config.output.format = OutputFormat::Json;
    config.save(&config_path).unwrap();

    let loaded = Config::load(&config_path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_config_sections_are_optional() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join(CONFIG_FILE);
    fs::write(&config_path, "[output]\nformat = \"json\"\n").unwrap();

    let loaded = Config::load(&config_path).unwrap();
    assert_eq!(loaded.output.format, OutputFormat::Json);
    assert_eq!(loaded.lowering.redefinition, RedefinitionPolicy::Replace);
}

#[test]
fn test_config_rejects_unknown_policy() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join(CONFIG_FILE);
    fs::write(&config_path, "[lowering]\nredefinition = \"merge\"\n").unwrap();

    assert!(Config::load(&config_path).is_err());
}

#[test]
fn test_config_find_from_subdirectory() {
    let temp_dir = TempDir::new().unwrap();
    let project_dir = temp_dir.path();

    let mut config = Config::new();
    config.lowering.redefinition = RedefinitionPolicy::Reject;
    config.save(project_dir.join(CONFIG_FILE)).unwrap();

    let sub_dir = project_dir.join("src");
    fs::create_dir(&sub_dir).unwrap();

    let (found_config, found_dir) = Config::find_from(&sub_dir).unwrap();
    assert_eq!(found_config.lowering.redefinition, RedefinitionPolicy::Reject);
    assert_eq!(found_dir, project_dir);
}
