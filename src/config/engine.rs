//! Detection engine configuration module.

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use crate::matching::Algorithm;
use crate::normalize::NormalizationOptions;
use serde::{Deserialize, Serialize};

/// Upper bound accepted for `engine.max_text_length`.
const MAX_TEXT_LENGTH_CEILING: usize = 10 * 1024 * 1024;

/// Detection engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Algorithm used when a request names none
    pub default_algorithm: Algorithm,

    /// Maximum length of an analyzed text, in characters
    pub max_text_length: usize,

    /// Normalization step switches
    pub normalization: NormalizationOptions,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_algorithm: Algorithm::Kmp,
            max_text_length: 5000,
            normalization: NormalizationOptions::default(),
        }
    }
}

impl Validate for EngineConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_text_length == 0 || self.max_text_length > MAX_TEXT_LENGTH_CEILING {
            return Err(ConfigError::invalid(
                "engine.max_text_length",
                format!("must be between 1 and {MAX_TEXT_LENGTH_CEILING} characters"),
            ));
        }

        Ok(())
    }
}
