//! Configuration module for the complaint detector.
//!
//! Settings are layered: serialized defaults, then an optional file (TOML,
//! YAML, JSON), then environment variables such as
//! `DETECTOR__ENGINE__MAX_TEXT_LENGTH=8000`. The merged result is validated
//! before use.

use std::path::{Path, PathBuf};

use crate::error::config::ConfigError;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

pub mod batch;
pub mod engine;
pub mod server;
pub mod storage;

pub use batch::BatchConfig;
pub use engine::EngineConfig;
pub use server::ServerConfig;
pub use storage::StorageConfig;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Default configuration location
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "DETECTOR";

/// A trait for types that can be validated.
pub trait Validate {
    /// Validates that the configuration is correct.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the configuration is valid
    /// * `Err(ConfigError)` if the configuration is invalid
    fn validate(&self) -> ConfigResult<()>;
}

/// Main configuration for the complaint detector.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DetectorConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Detection engine configuration
    pub engine: EngineConfig,

    /// Batch runner configuration
    pub batch: BatchConfig,

    /// Storage configuration
    pub storage: StorageConfig,

    /// Log configuration
    pub log: LogConfig,
}

impl Validate for DetectorConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.server.validate()?;
        self.engine.validate()?;
        self.server.check_fits_text(self.engine.max_text_length)?;
        self.batch.validate()?;
        self.storage.validate()?;
        self.log.validate()?;
        Ok(())
    }
}

impl DetectorConfig {
    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Malformed(e.to_string()))
    }

    /// Writes the configuration as TOML to `path`.
    pub fn write_toml(&self, path: &Path) -> ConfigResult<()> {
        let rendered = self.to_toml()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                    path: parent.to_path_buf(),
                    reason: e.to_string(),
                })?;
            }
        }
        std::fs::write(path, rendered).map_err(|e| ConfigError::Write {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Whether to log in JSON format
    pub json: bool,

    /// Whether to include source code locations in logs
    pub source_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            source_location: false,
        }
    }
}

impl Validate for LogConfig {
    fn validate(&self) -> ConfigResult<()> {
        match self.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(ConfigError::invalid(
                "log.level",
                format!("is '{other}', expected trace, debug, info, warn or error"),
            )),
        }
    }
}

/// Configuration loader for the complaint detector.
#[derive(Debug)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_prefix: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Optional path to the configuration file
    /// * `env_prefix` - Prefix for environment variables that override configuration values
    pub fn new<P: AsRef<Path>>(config_path: Option<P>, env_prefix: &str) -> Self {
        Self {
            config_path: config_path.map(|p| p.as_ref().to_path_buf()),
            env_prefix: env_prefix.to_string(),
        }
    }

    /// Loads the configuration from defaults, the file and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFile`] if a file was given but does not
    /// exist, [`ConfigError::UnsupportedFormat`] for an unknown extension,
    /// [`ConfigError::Malformed`] for undecodable sources, or the first
    /// [`ConfigError::Invalid`] value.
    pub fn load(&self) -> ConfigResult<DetectorConfig> {
        let mut builder = Config::builder().add_source(Config::try_from(&DetectorConfig::default())?);

        if let Some(path) = &self.config_path {
            if !path.exists() {
                return Err(ConfigError::MissingFile(path.clone()));
            }

            let format = match path.extension().and_then(|ext| ext.to_str()) {
                Some("toml") => FileFormat::Toml,
                Some("json") => FileFormat::Json,
                Some("yaml" | "yml") => FileFormat::Yaml,
                _ => return Err(ConfigError::UnsupportedFormat(path.clone())),
            };
            builder = builder.add_source(File::from(path.as_path()).format(format));
        }

        builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .separator("__")
                .try_parsing(true),
        );

        let detector_config: DetectorConfig = builder.build()?.try_deserialize()?;
        detector_config.validate()?;

        Ok(detector_config)
    }
}

/// Loads the configuration the binary starts with.
///
/// An explicit path must exist. Without one, [`DEFAULT_CONFIG_PATH`] is used
/// when present and built-in defaults otherwise.
pub fn load_config(path: Option<&Path>) -> ConfigResult<DetectorConfig> {
    match path {
        Some(path) => ConfigLoader::new(Some(path), ENV_PREFIX).load(),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                ConfigLoader::new(Some(default_path), ENV_PREFIX).load()
            } else {
                tracing::debug!(
                    "Default configuration file not found at: {}",
                    DEFAULT_CONFIG_PATH
                );
                ConfigLoader::new(None::<&Path>, ENV_PREFIX).load()
            }
        }
    }
}
