//! Settings of the stdio JSON-RPC service.
//!
//! A request line has to fit in `max_line_bytes`; [`ServerConfig::check_fits_text`]
//! keeps that limit consistent with the longest text the engine accepts.

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Worst-case UTF-8 width of one character.
const MAX_UTF8_WIDTH: usize = 4;

/// Room left in a line for the envelope around an `analyze` text.
const ENVELOPE_BYTES: usize = 1024;

/// Stdio service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Service name reported by `health` and tagged on startup logs
    pub name: String,

    /// Threads of the async runtime reading stdin and dispatching methods
    pub runtime_threads: usize,

    /// Longest request line accepted from stdin, in bytes
    pub max_line_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "complaint-detector".to_string(),
            runtime_threads: num_cpus::get().clamp(1, 8),
            max_line_bytes: 4 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// Checks that an `analyze` request carrying a text of `max_text_length`
    /// characters still fits in one line.
    pub fn check_fits_text(&self, max_text_length: usize) -> ConfigResult<()> {
        let needed = max_text_length
            .saturating_mul(MAX_UTF8_WIDTH)
            .saturating_add(ENVELOPE_BYTES);
        if self.max_line_bytes < needed {
            return Err(ConfigError::invalid(
                "server.max_line_bytes",
                format!(
                    "is {} but a text of {max_text_length} characters needs up to {needed}",
                    self.max_line_bytes
                ),
            ));
        }
        Ok(())
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::invalid("server.name", "must not be blank"));
        }

        if self.runtime_threads == 0 {
            return Err(ConfigError::invalid("server.runtime_threads", "must be at least 1"));
        }

        Ok(())
    }
}
