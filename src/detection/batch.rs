// Copyright (c) 2025 Complaint Detector Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Batch runner: independent analyses of many texts on a bounded pool.
//!
//! Batch-level problems (empty batch, too many texts) reject the whole call
//! before any scanning. A text that fails on its own becomes a
//! [`BatchItem::Failed`] entry and the remaining texts are still analyzed.

use std::fmt;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{DetectionEngine, DetectionResult};
use crate::config::BatchConfig;
use crate::error::config::ConfigError;
use crate::error::{DetectorError, DetectorResult};
use crate::matching::Algorithm;
use crate::store::Pattern;

/// Outcome for one text of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchItem {
    /// The text was analyzed
    Analyzed(DetectionResult),

    /// The text could not be analyzed
    Failed {
        /// Position of the text in the batch
        index: usize,
        /// Text as submitted
        original_text: String,
        /// Why the text was rejected
        detail: String,
    },
}

impl BatchItem {
    /// Text as submitted, whatever the outcome.
    pub fn original_text(&self) -> &str {
        match self {
            Self::Analyzed(result) => &result.original_text,
            Self::Failed { original_text, .. } => original_text,
        }
    }

    /// The analysis result, if the text was analyzed.
    pub fn result(&self) -> Option<&DetectionResult> {
        match self {
            Self::Analyzed(result) => Some(result),
            Self::Failed { .. } => None,
        }
    }
}

/// Report of a batch call, one item per input text in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Number of texts analyzed successfully; `results.len()` counts all submitted
    pub total_analyzed: usize,

    /// Number of texts that failed
    pub failed: usize,

    /// Algorithm used for every text
    pub algorithm: Algorithm,

    /// Items in input order
    pub results: Vec<BatchItem>,
}

/// Runs the detection engine over many texts in parallel.
pub struct BatchRunner {
    pool: rayon::ThreadPool,
    max_texts: usize,
}

impl fmt::Debug for BatchRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchRunner")
            .field("worker_threads", &self.pool.current_num_threads())
            .field("max_texts", &self.max_texts)
            .finish()
    }
}

impl BatchRunner {
    /// Creates a runner with a dedicated worker pool.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the pool cannot be built.
    pub fn new(config: &BatchConfig) -> DetectorResult<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.worker_threads)
            .thread_name(|i| format!("batch-worker-{i}"))
            .build()
            .map_err(|e| ConfigError::Startup {
                component: "batch worker pool",
                reason: e.to_string(),
            })?;

        Ok(Self {
            pool,
            max_texts: config.max_texts,
        })
    }

    /// Maximum number of texts accepted in one call.
    pub fn max_texts(&self) -> usize {
        self.max_texts
    }

    /// Analyzes every text against `patterns`.
    ///
    /// # Errors
    ///
    /// Returns [`DetectorError::Validation`] for an empty batch or one with
    /// more than `max_texts` texts. Per-text failures are reported inside the
    /// returned [`BatchReport`].
    pub fn analyze_batch(
        &self,
        engine: &DetectionEngine,
        texts: &[String],
        patterns: &[Pattern],
        algorithm: Algorithm,
    ) -> DetectorResult<BatchReport> {
        if texts.is_empty() {
            return Err(DetectorError::Validation("batch cannot be empty".to_string()));
        }
        if texts.len() > self.max_texts {
            return Err(DetectorError::Validation(format!(
                "batch has {} texts, maximum is {}",
                texts.len(),
                self.max_texts
            )));
        }

        // Indexed parallel iterators collect in input order
        let results: Vec<BatchItem> = self.pool.install(|| {
            texts
                .par_iter()
                .enumerate()
                .map(|(index, text)| analyze_item(engine, index, text, patterns, algorithm))
                .collect()
        });

        let failed = results
            .iter()
            .filter(|item| matches!(item, BatchItem::Failed { .. }))
            .count();

        info!(
            texts = texts.len(),
            failed,
            algorithm = %algorithm,
            "Analyzed batch"
        );

        Ok(BatchReport {
            total_analyzed: texts.len() - failed,
            failed,
            algorithm,
            results,
        })
    }
}

fn analyze_item(
    engine: &DetectionEngine,
    index: usize,
    text: &str,
    patterns: &[Pattern],
    algorithm: Algorithm,
) -> BatchItem {
    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        engine.analyze(text, patterns, algorithm)
    }));

    let detail = match outcome {
        Ok(Ok(result)) => return BatchItem::Analyzed(result),
        Ok(Err(e)) => e.to_string(),
        Err(_) => "Internal error: analysis panicked".to_string(),
    };

    warn!(index, detail = %detail, "Skipping batch item");
    BatchItem::Failed {
        index,
        original_text: text.to_string(),
        detail,
    }
}
