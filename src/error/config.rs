//! Errors raised while assembling the detector settings.
//!
//! Every variant names the settings key or file involved, so a failed start
//! can be fixed without reading the logs.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to load, check or write the detector settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A settings file was named explicitly but is not there.
    #[error("Settings file {} does not exist", .0.display())]
    MissingFile(PathBuf),

    /// The settings file is not `.toml`, `.yaml`/`.yml` or `.json`.
    #[error("Settings file {} has no supported extension (toml, yaml, json)", .0.display())]
    UnsupportedFormat(PathBuf),

    /// A source could not be decoded into the settings, e.g. an algorithm
    /// other than `kmp` or `boyer_moore`.
    #[error("Malformed settings: {0}")]
    Malformed(String),

    /// A key holds a value the detector cannot run with.
    #[error("Setting `{key}` {problem}")]
    Invalid {
        /// Dotted settings key, e.g. `engine.max_text_length`
        key: &'static str,
        /// What is wrong with the value
        problem: String,
    },

    /// Writing a generated settings file failed.
    #[error("Cannot write settings to {}: {reason}", path.display())]
    Write {
        /// Target file or directory
        path: PathBuf,
        /// Underlying failure
        reason: String,
    },

    /// A component configured from the settings refused to start.
    #[error("Cannot start {component}: {reason}")]
    Startup {
        /// Component being built, e.g. the batch worker pool
        component: &'static str,
        /// Underlying failure
        reason: String,
    },
}

impl ConfigError {
    /// Rejects the value of `key`.
    pub fn invalid(key: &'static str, problem: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            problem: problem.into(),
        }
    }

    /// The settings key at fault, for [`ConfigError::Invalid`].
    pub fn key(&self) -> Option<&'static str> {
        match self {
            Self::Invalid { key, .. } => Some(key),
            _ => None,
        }
    }
}

// Missing files are caught before the loader runs, so every loader failure
// is a decoding problem
impl From<::config::ConfigError> for ConfigError {
    fn from(err: ::config::ConfigError) -> Self {
        Self::Malformed(err.to_string())
    }
}
