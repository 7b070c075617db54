//! Storage configuration module.

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the pattern and setup stores keep their files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Keep everything in memory; `patterns/save` then only checkpoints in memory
    pub in_memory: bool,

    /// JSON document holding the saved patterns
    pub patterns_path: PathBuf,

    /// JSON document holding the setup configuration
    pub setup_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            in_memory: false,
            patterns_path: PathBuf::from("data/patterns.json"),
            setup_path: PathBuf::from("data/setup.json"),
        }
    }
}

impl Validate for StorageConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.in_memory {
            return Ok(());
        }

        if self.patterns_path.as_os_str().is_empty() {
            return Err(ConfigError::invalid("storage.patterns_path", "must name a file"));
        }

        if self.setup_path.as_os_str().is_empty() {
            return Err(ConfigError::invalid("storage.setup_path", "must name a file"));
        }

        if self.patterns_path == self.setup_path {
            return Err(ConfigError::invalid(
                "storage.setup_path",
                "must differ from storage.patterns_path",
            ));
        }

        Ok(())
    }
}
