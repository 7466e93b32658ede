/*!
 * Tests for client configuration
 */

use gengo::app_config::{ClientMode, Config, LogLevel, PRODUCTION_URL, SANDBOX_URL};

use crate::common::{create_temp_dir, create_test_file};

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert!(config.public_key.is_empty());
    assert_eq!(config.mode, ClientMode::Sandbox);
    assert_eq!(config.timeout_secs, 30);
    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.endpoint(), SANDBOX_URL);

    // Default config has no keys
    assert!(config.validate().is_err());
}

#[test]
fn test_saveAndLoad_shouldPreserveSettings() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("gengo.json");

    let mut config = Config::new("public", "private");
    config.mode = ClientMode::Production;
    config.log_level = LogLevel::Debug;
    config.timeout_secs = 5;
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.endpoint(), PRODUCTION_URL);
}

#[test]
fn test_load_withHandWrittenFile_shouldApplyDefaults() {
    let dir = create_temp_dir().unwrap();
    let path = create_test_file(
        dir.path(),
        "gengo.json",
        r#"{"public_key": "p", "private_key": "s", "base_url": "http://localhost:9000/v2"}"#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.endpoint(), "http://localhost:9000/v2/");
    assert_eq!(config.timeout_secs, 30);
}

#[test]
fn test_load_withMissingFile_shouldFailWithContext() {
    let dir = create_temp_dir().unwrap();
    let err = Config::load(dir.path().join("missing.json")).unwrap_err();
    assert!(err.to_string().contains("Failed to open config file"));
}

#[test]
fn test_load_withInvalidJson_shouldFail() {
    let dir = create_temp_dir().unwrap();
    let path = create_test_file(dir.path(), "gengo.json", "{ nope").unwrap();
    let err = Config::load(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn test_logLevel_shouldMapToLevelFilter() {
    assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
