// Copyright (c) 2025 Complaint Detector Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Caller preferences: display name, pattern group and algorithm.

use std::path::PathBuf;

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::repository::{atomic_write_json, read_json_optional};
use crate::error::DetectorResult;
use crate::matching::Algorithm;

/// Default pattern group shown before anything was configured.
pub const DEFAULT_PATTERN_GROUP: &str = "Claims";

/// Setup preferences with last-write-wins semantics.
///
/// Missing fields take their defaults when a saved file is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupConfig {
    /// Display name of the analyzed text
    pub text_name: String,

    /// Pattern group shown to the caller
    pub pattern_group: String,

    /// Algorithm used when a request does not name one
    pub algorithm: Algorithm,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            text_name: String::new(),
            pattern_group: DEFAULT_PATTERN_GROUP.to_string(),
            algorithm: Algorithm::Kmp,
        }
    }
}

/// Holds the current [`SetupConfig`], optionally mirrored to a JSON file.
#[derive(Debug)]
pub struct SetupConfigStore {
    current: RwLock<SetupConfig>,
    writer: Mutex<()>,
    path: Option<PathBuf>,
}

impl SetupConfigStore {
    /// Creates a store that keeps the value in memory only.
    pub fn in_memory() -> Self {
        Self::in_memory_with_defaults(SetupConfig::default())
    }

    /// In-memory store whose never-set value is `defaults`.
    pub fn in_memory_with_defaults(defaults: SetupConfig) -> Self {
        Self {
            current: RwLock::new(defaults),
            writer: Mutex::new(()),
            path: None,
        }
    }

    /// Opens a store mirrored to `path`, loading the saved value if present.
    ///
    /// # Errors
    ///
    /// Returns [`DetectorError::Persistence`](crate::error::DetectorError::Persistence)
    /// if the file exists but cannot be read.
    pub fn open<P: Into<PathBuf>>(path: P) -> DetectorResult<Self> {
        Self::open_with_defaults(path, SetupConfig::default())
    }

    /// Like [`open`](Self::open), with `defaults` used when nothing was saved.
    pub fn open_with_defaults<P: Into<PathBuf>>(
        path: P,
        defaults: SetupConfig,
    ) -> DetectorResult<Self> {
        let path = path.into();
        let current = read_json_optional(&path)?.unwrap_or(defaults);
        debug!(path = %path.display(), "Opened setup configuration store");

        Ok(Self {
            current: RwLock::new(current),
            writer: Mutex::new(()),
            path: Some(path),
        })
    }

    /// Returns the current configuration, defaults if never set.
    pub fn get(&self) -> SetupConfig {
        self.current.read().clone()
    }

    /// Replaces the configuration.
    ///
    /// When a file is configured it is written first; on failure the
    /// in-memory value is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`DetectorError::Persistence`](crate::error::DetectorError::Persistence)
    /// if the file cannot be written.
    pub fn set(&self, config: SetupConfig) -> DetectorResult<SetupConfig> {
        let _writer = self.writer.lock();

        if let Some(path) = &self.path {
            atomic_write_json(path, &config)?;
        }
        *self.current.write() = config.clone();

        info!(
            text_name = %config.text_name,
            pattern_group = %config.pattern_group,
            algorithm = %config.algorithm,
            "Updated setup configuration"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DetectorError;
    use tempfile::tempdir;

    fn sample() -> SetupConfig {
        SetupConfig {
            text_name: "Encuesta marzo".to_string(),
            pattern_group: "Reclamos".to_string(),
            algorithm: Algorithm::BoyerMoore,
        }
    }

    #[test]
    fn test_defaults_when_never_set() {
        let store = SetupConfigStore::in_memory();
        let config = store.get();
        assert_eq!(config.text_name, "");
        assert_eq!(config.pattern_group, "Claims");
        assert_eq!(config.algorithm, Algorithm::Kmp);
    }

    #[test]
    fn test_last_write_wins() {
        let store = SetupConfigStore::in_memory();
        store.set(SetupConfig::default()).unwrap();
        store.set(sample()).unwrap();
        assert_eq!(store.get(), sample());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("setup.json");

        let store = SetupConfigStore::open(&path).unwrap();
        assert_eq!(store.get(), SetupConfig::default());
        store.set(sample()).unwrap();

        let reopened = SetupConfigStore::open(&path).unwrap();
        assert_eq!(reopened.get(), sample());
    }

    #[test]
    fn test_failed_write_keeps_previous_value() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let store = SetupConfigStore::open(blocker.join("setup.json")).unwrap();
        let err = store.set(sample()).unwrap_err();

        assert!(matches!(err, DetectorError::Persistence { .. }));
        assert_eq!(store.get(), SetupConfig::default());
    }

    #[test]
    fn test_custom_defaults() {
        let defaults = SetupConfig {
            algorithm: Algorithm::BoyerMoore,
            ..SetupConfig::default()
        };
        let store = SetupConfigStore::in_memory_with_defaults(defaults.clone());
        assert_eq!(store.get(), defaults);
    }

    #[test]
    fn test_unknown_algorithm_is_rejected_on_parse() {
        let json = r#"{"text_name": "x", "pattern_group": "y", "algorithm": "regex"}"#;
        assert!(serde_json::from_str::<SetupConfig>(json).is_err());
    }
}
