// Copyright (c) 2025 Complaint Detector Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Head-to-head comparison of KMP and Boyer-Moore on one prepared input.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::{elapsed_ms, round_ms, DetectionEngine, DetectionResult};
use crate::error::{DetectorError, DetectorResult};
use crate::matching::Algorithm;
use crate::store::Pattern;

/// Relative timing of the two algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// The quicker algorithm; KMP on ties
    pub faster: Algorithm,

    /// Absolute time difference in milliseconds
    pub difference_ms: f64,

    /// KMP time minus Boyer-Moore time, in milliseconds
    pub timing_delta_ms: f64,

    /// Boyer-Moore time divided by KMP time, 1.0 when KMP took no measurable time
    pub speedup_factor: f64,
}

impl Comparison {
    /// Builds the comparison from the two scan times.
    pub fn from_timings(kmp_ms: f64, boyer_moore_ms: f64) -> Self {
        let timing_delta_ms = round_ms(kmp_ms - boyer_moore_ms);
        let faster = if boyer_moore_ms < kmp_ms {
            Algorithm::BoyerMoore
        } else {
            Algorithm::Kmp
        };
        let speedup_factor = if kmp_ms > 0.0 {
            round_ms(boyer_moore_ms / kmp_ms)
        } else {
            1.0
        };

        Self {
            faster,
            difference_ms: timing_delta_ms.abs(),
            timing_delta_ms,
            speedup_factor,
        }
    }
}

/// Both reports over identical input plus their relative timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Text as submitted
    pub original_text: String,

    /// Text after normalization
    pub normalized_text: String,

    /// Report produced by KMP
    pub kmp: DetectionResult,

    /// Report produced by Boyer-Moore
    pub boyer_moore: DetectionResult,

    /// Relative timing
    pub comparison: Comparison,
}

/// Per-algorithm timing line used by benchmark style reports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmTiming {
    /// Algorithm measured
    pub algorithm: Algorithm,
    /// Time in milliseconds
    pub execution_time_ms: f64,
    /// Number of patterns found
    pub patterns_found: usize,
}

impl ComparisonResult {
    /// Timing lines for both algorithms, KMP first.
    pub fn timings(&self) -> [AlgorithmTiming; 2] {
        [&self.kmp, &self.boyer_moore].map(|result| AlgorithmTiming {
            algorithm: result.algorithm,
            execution_time_ms: result.performance.total_execution_time_ms,
            patterns_found: result.patterns_found,
        })
    }
}

impl DetectionEngine {
    /// Runs KMP and then Boyer-Moore over the same normalized text and patterns.
    ///
    /// Normalization happens once; each reported time covers only the scan
    /// of its algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`DetectorError::Validation`] for rejected texts and
    /// [`DetectorError::AlgorithmMismatch`] if the two algorithms disagree.
    pub fn compare(&self, text: &str, patterns: &[Pattern]) -> DetectorResult<ComparisonResult> {
        self.validate_text(text)?;

        let prepared_text = self.prepare_text(text);
        let prepared_patterns = self.prepare_patterns(patterns);

        let start = Instant::now();
        let kmp_detections = self.scan(&prepared_text, &prepared_patterns, Algorithm::Kmp)?;
        let kmp_ms = elapsed_ms(start);

        let start = Instant::now();
        let bm_detections = self.scan(&prepared_text, &prepared_patterns, Algorithm::BoyerMoore)?;
        let bm_ms = elapsed_ms(start);

        if kmp_detections != bm_detections {
            error!(
                text = %prepared_text.normalized,
                kmp = kmp_detections.len(),
                boyer_moore = bm_detections.len(),
                "Matchers disagree on the same input"
            );
            return Err(DetectorError::AlgorithmMismatch);
        }

        let comparison = Comparison::from_timings(kmp_ms, bm_ms);
        debug!(
            kmp_ms,
            boyer_moore_ms = bm_ms,
            faster = %comparison.faster,
            "Compared algorithms"
        );

        let total = patterns.len();
        Ok(ComparisonResult {
            original_text: prepared_text.original.clone(),
            normalized_text: prepared_text.normalized.clone(),
            kmp: Self::build_result(&prepared_text, kmp_detections, Algorithm::Kmp, total, kmp_ms),
            boyer_moore: Self::build_result(
                &prepared_text,
                bm_detections,
                Algorithm::BoyerMoore,
                total,
                bm_ms,
            ),
            comparison,
        })
    }
}
