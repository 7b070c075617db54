// Copyright (c) 2025 Complaint Detector Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Multi-pattern detection built on the single-pattern matchers.
//!
//! - [`DetectionEngine`] scans one text against every stored pattern.
//! - [`BatchRunner`] runs the engine over many texts on a bounded pool.
//! - [`compare`](DetectionEngine::compare) runs both algorithms on one prepared input.
//! - [`benchmark`] repeats single-pattern searches to time the algorithms.

mod aggregator;
mod batch;
pub mod benchmark;
mod compare;

use serde::{Deserialize, Serialize};

use crate::matching::Algorithm;
use crate::store::{AlertLevel, Category};

pub use aggregator::{DetectionEngine, PreparedText};
pub use batch::{BatchItem, BatchReport, BatchRunner};
pub use compare::{AlgorithmTiming, Comparison, ComparisonResult};

/// One pattern matching one or more times in a text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    /// Id of the stored pattern, absent for ad-hoc probes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_id: Option<u64>,

    /// The pattern text as stored
    pub pattern: String,

    /// Character offsets into the normalized text, ascending
    pub positions: Vec<usize>,

    /// Number of occurrences
    pub match_count: usize,

    /// Category of the pattern
    pub category: Category,

    /// Alert level of the pattern
    pub alert_level: AlertLevel,

    /// Alert message of the pattern
    pub alert_message: String,
}

impl Detection {
    /// Offset of the first occurrence.
    pub fn first_position(&self) -> Option<usize> {
        self.positions.first().copied()
    }
}

/// Occurrence counts per alert level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AlertCounts {
    /// Occurrences of high level patterns
    pub high: usize,
    /// Occurrences of medium level patterns
    pub medium: usize,
    /// Occurrences of low level patterns
    pub low: usize,
}

impl AlertCounts {
    /// Adds `occurrences` to the bucket of `level`.
    pub fn record(&mut self, level: AlertLevel, occurrences: usize) {
        match level {
            AlertLevel::High => self.high += occurrences,
            AlertLevel::Medium => self.medium += occurrences,
            AlertLevel::Low => self.low += occurrences,
        }
    }

    /// Sum of all buckets.
    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

/// Overall verdict of an analysis, driven by the highest non-empty bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Nothing matched
    None,
    /// Only low level patterns matched
    Minor,
    /// At least one medium level pattern matched
    Complaint,
    /// At least one high level pattern matched
    Critical,
}

impl Severity {
    /// Derives the verdict from the alert counts.
    pub fn from_counts(counts: &AlertCounts) -> Self {
        if counts.high > 0 {
            Self::Critical
        } else if counts.medium > 0 {
            Self::Complaint
        } else if counts.low > 0 {
            Self::Minor
        } else {
            Self::None
        }
    }
}

/// Timing of an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Performance {
    /// Wall-clock time of the whole analysis, rounded to 4 decimals
    pub total_execution_time_ms: f64,

    /// Algorithm that produced the positions
    pub algorithm_used: Algorithm,
}

/// Report of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Text as submitted
    pub original_text: String,

    /// Text after normalization; positions index into this
    pub normalized_text: String,

    /// Algorithm used
    pub algorithm: Algorithm,

    /// Detections ordered by first occurrence, ties in store order
    pub detections: Vec<Detection>,

    /// Whether anything matched
    pub has_complaints: bool,

    /// Occurrences per alert level
    pub alert_levels: AlertCounts,

    /// Overall verdict
    pub severity: Severity,

    /// Number of patterns with at least one occurrence
    pub patterns_found: usize,

    /// Number of patterns in the snapshot the analysis ran against
    pub total_patterns_checked: usize,

    /// Timing
    pub performance: Performance,
}

/// Rounds a millisecond value to 4 decimals.
pub(crate) fn round_ms(ms: f64) -> f64 {
    (ms * 10_000.0).round() / 10_000.0
}

/// Milliseconds elapsed since `start`, rounded to 4 decimals.
pub(crate) fn elapsed_ms(start: std::time::Instant) -> f64 {
    round_ms(start.elapsed().as_secs_f64() * 1000.0)
}
