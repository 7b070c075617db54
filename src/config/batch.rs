//! Batch analysis configuration module.

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Largest accepted worker pool.
const MAX_WORKER_THREADS: usize = 256;

/// Batch runner configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Maximum number of texts in a single batch call
    pub max_texts: usize,

    /// Size of the worker pool analyzing texts in parallel
    pub worker_threads: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_texts: 100,
            worker_threads: num_cpus::get().min(MAX_WORKER_THREADS),
        }
    }
}

impl Validate for BatchConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_texts == 0 {
            return Err(ConfigError::invalid("batch.max_texts", "must be at least 1"));
        }

        if self.worker_threads == 0 || self.worker_threads > MAX_WORKER_THREADS {
            return Err(ConfigError::invalid(
                "batch.worker_threads",
                format!("must be between 1 and {MAX_WORKER_THREADS}"),
            ));
        }

        Ok(())
    }
}
