//! Tests for the configuration module.
//!
//! Each test uses its own environment prefix so parallel tests never see
//! each other's overrides.

use crate::config::{ConfigLoader, DetectorConfig, Validate};
use crate::error::config::ConfigError;
use crate::matching::Algorithm;

use super::TestFixture;

/// Test that default configuration can be created and is valid.
#[test]
fn test_default_config_is_valid() {
    let config = DetectorConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.engine.default_algorithm, Algorithm::Kmp);
    assert_eq!(config.engine.max_text_length, 5000);
    assert_eq!(config.batch.max_texts, 100);
}

/// Test that configuration validation catches invalid values.
#[test]
fn test_config_validation() {
    let mut config = DetectorConfig::default();

    config.server.runtime_threads = 0;
    assert_eq!(config.validate().unwrap_err().key(), Some("server.runtime_threads"));

    config.server.runtime_threads = 4;
    config.engine.max_text_length = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::Invalid { key: "engine.max_text_length", .. })
    ));

    config.engine.max_text_length = 5000;
    config.batch.worker_threads = 1000;
    assert!(config.validate().is_err());

    config.batch.worker_threads = 2;
    config.storage.setup_path = config.storage.patterns_path.clone();
    assert_eq!(config.validate().unwrap_err().key(), Some("storage.setup_path"));

    config.storage.in_memory = true;
    assert!(config.validate().is_ok());

    config.log.level = "verbose".to_string();
    let err = config.validate().unwrap_err();
    assert_eq!(err.key(), Some("log.level"));
    assert!(err.to_string().contains("verbose"));
}

/// Test that the request line limit follows the text limit.
#[test]
fn test_line_limit_must_hold_longest_text() {
    let mut config = DetectorConfig::default();
    config.engine.max_text_length = 1_000_000;
    config.server.max_line_bytes = 1024 * 1024;

    let err = config.validate().unwrap_err();
    assert_eq!(err.key(), Some("server.max_line_bytes"));
    assert!(err.to_string().contains("1000000 characters"));

    config.server.max_line_bytes = 8 * 1024 * 1024;
    assert!(config.validate().is_ok());
}

/// Test that the line limit can be raised alongside the text limit.
#[test]
fn test_text_limit_override_needs_line_room() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture
        .create_file(
            "detector.toml",
            "[engine]\nmax_text_length = 2000000\n\n[server]\nmax_line_bytes = 1048576\n",
        )
        .unwrap();

    let result = ConfigLoader::new(Some(&path), "TEST_LINE").load();
    assert!(matches!(
        result,
        Err(ConfigError::Invalid { key: "server.max_line_bytes", .. })
    ));
}

/// Test loading configuration from a file.
#[test]
fn test_load_config_from_file() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture
        .create_file(
            "detector.toml",
            r#"
            [engine]
            default_algorithm = "boyer_moore"
            max_text_length = 8000

            [engine.normalization]
            strip_diacritics = false

            [batch]
            max_texts = 10
            worker_threads = 2
            "#,
        )
        .unwrap();

    let config = ConfigLoader::new(Some(&path), "TEST_FILE").load().unwrap();

    assert_eq!(config.engine.default_algorithm, Algorithm::BoyerMoore);
    assert_eq!(config.engine.max_text_length, 8000);
    assert!(!config.engine.normalization.strip_diacritics);
    assert!(config.engine.normalization.remove_punctuation);
    assert_eq!(config.batch.max_texts, 10);

    // Untouched sections keep their defaults
    assert_eq!(config.server.name, "complaint-detector");
    assert_eq!(config.log.level, "info");
}

/// Test that environment variables override file values.
#[test]
fn test_environment_overrides() {
    let mut fixture = TestFixture::new().unwrap();
    let path = fixture
        .create_file("detector.toml", "[engine]\nmax_text_length = 8000\n")
        .unwrap();
    fixture.set_env("TEST_ENV__ENGINE__MAX_TEXT_LENGTH", "9000");
    fixture.set_env("TEST_ENV__STORAGE__IN_MEMORY", "true");

    let config = ConfigLoader::new(Some(&path), "TEST_ENV").load().unwrap();

    assert_eq!(config.engine.max_text_length, 9000);
    assert!(config.storage.in_memory);
}

/// Test that an unknown algorithm in the file is rejected.
#[test]
fn test_unknown_algorithm_rejected() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture
        .create_file("detector.toml", "[engine]\ndefault_algorithm = \"regex\"\n")
        .unwrap();

    let result = ConfigLoader::new(Some(&path), "TEST_ALGO").load();
    assert!(matches!(result, Err(ConfigError::Malformed(_))));
}

/// Test that loaded values are validated.
#[test]
fn test_loaded_values_are_validated() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture
        .create_file("detector.json", r#"{"batch": {"max_texts": 0}}"#)
        .unwrap();

    let result = ConfigLoader::new(Some(&path), "TEST_JSON").load();
    assert!(matches!(result, Err(ConfigError::Invalid { key: "batch.max_texts", .. })));
}

/// Test the missing file and unsupported extension cases.
#[test]
fn test_file_errors() {
    let fixture = TestFixture::new().unwrap();

    let missing = fixture.path("missing.toml");
    let result = ConfigLoader::new(Some(&missing), "TEST_MISSING").load();
    assert!(matches!(result, Err(ConfigError::MissingFile(ref p)) if p == &missing));

    let ini = fixture.create_file("detector.ini", "x = 1").unwrap();
    let result = ConfigLoader::new(Some(&ini), "TEST_INI").load();
    assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
}

/// Test that a generated file loads back to the defaults.
#[test]
fn test_generated_config_round_trip() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture.path("nested/generated.toml");

    let mut config = DetectorConfig::default();
    config.batch.worker_threads = 3;
    config.write_toml(&path).unwrap();

    let loaded = ConfigLoader::new(Some(&path), "TEST_GEN").load().unwrap();
    assert_eq!(loaded.batch.worker_threads, 3);
    assert_eq!(loaded.storage.patterns_path, config.storage.patterns_path);
    assert_eq!(loaded.engine.normalization, config.engine.normalization);
}
