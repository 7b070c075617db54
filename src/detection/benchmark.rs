// Copyright (c) 2025 Complaint Detector Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Repeated single-pattern searches for timing the two algorithms.
//!
//! Texts and patterns are searched as given, without normalization, and each
//! measurement includes building the matcher.

use std::hint::black_box;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::{round_ms, Comparison};
use crate::error::{DetectorError, DetectorResult};
use crate::matching::Algorithm;

/// Upper bound on iterations per case.
pub const MAX_ITERATIONS: usize = 10_000;

/// Averaged timing of one algorithm on one case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Algorithm measured
    pub algorithm: Algorithm,
    /// Text length in characters
    pub text_length: usize,
    /// Pattern length in characters
    pub pattern_length: usize,
    /// Average time per iteration in milliseconds
    pub execution_time_ms: f64,
    /// Occurrences found
    pub match_count: usize,
}

/// Both algorithms measured on the same case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseComparison {
    /// KMP measurement
    pub kmp: Measurement,
    /// Boyer-Moore measurement
    pub boyer_moore: Measurement,
    /// Relative timing
    pub comparison: Comparison,
    /// Iterations averaged
    pub iterations: usize,
}

/// Min, average and max over the cases of a bulk run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BulkSummary {
    /// Average KMP time
    pub kmp_avg_ms: f64,
    /// Fastest KMP case
    pub kmp_min_ms: f64,
    /// Slowest KMP case
    pub kmp_max_ms: f64,
    /// Average Boyer-Moore time
    pub boyer_moore_avg_ms: f64,
    /// Fastest Boyer-Moore case
    pub boyer_moore_min_ms: f64,
    /// Slowest Boyer-Moore case
    pub boyer_moore_max_ms: f64,
}

/// Result of [`bulk`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkReport {
    /// Number of cases
    pub total_cases: usize,
    /// Iterations averaged per case
    pub iterations_per_case: usize,
    /// Per-case results in input order
    pub results: Vec<CaseComparison>,
    /// Aggregate timings
    pub summary: BulkSummary,
}

fn check_iterations(iterations: usize) -> DetectorResult<()> {
    if iterations == 0 || iterations > MAX_ITERATIONS {
        return Err(DetectorError::Validation(format!(
            "iterations must be between 1 and {MAX_ITERATIONS}"
        )));
    }
    Ok(())
}

/// Times `algorithm` searching `pattern` in `text`, averaged over `iterations`.
///
/// # Errors
///
/// Returns [`DetectorError::Validation`] for an out of range iteration count,
/// or a matcher error if the pattern is too large.
pub fn measure(
    algorithm: Algorithm,
    text: &str,
    pattern: &str,
    iterations: usize,
) -> DetectorResult<Measurement> {
    check_iterations(iterations)?;

    let text_chars: Vec<char> = text.chars().collect();
    let pattern_chars: Vec<char> = pattern.chars().collect();

    let mut match_count = 0;
    let start = Instant::now();
    for _ in 0..iterations {
        let positions = algorithm.find_all(black_box(&pattern_chars), black_box(&text_chars))?;
        match_count = positions.len();
    }
    let total_ms = start.elapsed().as_secs_f64() * 1000.0;

    Ok(Measurement {
        algorithm,
        text_length: text_chars.len(),
        pattern_length: pattern_chars.len(),
        execution_time_ms: round_ms(total_ms / iterations as f64),
        match_count,
    })
}

/// Measures both algorithms on one case.
///
/// # Errors
///
/// See [`measure`].
pub fn compare(text: &str, pattern: &str, iterations: usize) -> DetectorResult<CaseComparison> {
    let kmp = measure(Algorithm::Kmp, text, pattern, iterations)?;
    let boyer_moore = measure(Algorithm::BoyerMoore, text, pattern, iterations)?;

    if kmp.match_count != boyer_moore.match_count {
        return Err(DetectorError::AlgorithmMismatch);
    }

    let comparison = Comparison::from_timings(kmp.execution_time_ms, boyer_moore.execution_time_ms);
    Ok(CaseComparison {
        kmp,
        boyer_moore,
        comparison,
        iterations,
    })
}

/// Measures both algorithms on every `(text, pattern)` case.
///
/// # Errors
///
/// Returns [`DetectorError::Validation`] when `cases` is empty, plus the
/// errors of [`compare`].
pub fn bulk(cases: &[(String, String)], iterations: usize) -> DetectorResult<BulkReport> {
    if cases.is_empty() {
        return Err(DetectorError::Validation(
            "at least one benchmark case is required".to_string(),
        ));
    }

    let results = cases
        .iter()
        .map(|(text, pattern)| compare(text, pattern, iterations))
        .collect::<DetectorResult<Vec<_>>>()?;

    let kmp: Vec<f64> = results.iter().map(|r| r.kmp.execution_time_ms).collect();
    let bm: Vec<f64> = results.iter().map(|r| r.boyer_moore.execution_time_ms).collect();
    let (kmp_min_ms, kmp_avg_ms, kmp_max_ms) = min_avg_max(&kmp);
    let (boyer_moore_min_ms, boyer_moore_avg_ms, boyer_moore_max_ms) = min_avg_max(&bm);

    Ok(BulkReport {
        total_cases: cases.len(),
        iterations_per_case: iterations,
        results,
        summary: BulkSummary {
            kmp_avg_ms,
            kmp_min_ms,
            kmp_max_ms,
            boyer_moore_avg_ms,
            boyer_moore_min_ms,
            boyer_moore_max_ms,
        },
    })
}

fn min_avg_max(values: &[f64]) -> (f64, f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let avg = values.iter().sum::<f64>() / values.len().max(1) as f64;
    (round_ms(min), round_ms(avg), round_ms(max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_counts_matches() {
        let measurement = measure(Algorithm::Kmp, "aaaa", "aa", 3).unwrap();
        assert_eq!(measurement.match_count, 3);
        assert_eq!(measurement.text_length, 4);
        assert_eq!(measurement.pattern_length, 2);
        assert!(measurement.execution_time_ms >= 0.0);
    }

    #[test]
    fn test_iterations_are_bounded() {
        assert!(measure(Algorithm::Kmp, "a", "a", 0).is_err());
        assert!(measure(Algorithm::Kmp, "a", "a", MAX_ITERATIONS + 1).is_err());
    }

    #[test]
    fn test_compare_agrees_on_counts() {
        let result = compare("el cliente reclama, el cliente insiste", "cliente", 5).unwrap();
        assert_eq!(result.kmp.match_count, 2);
        assert_eq!(result.boyer_moore.match_count, 2);
        assert_eq!(result.iterations, 5);
    }

    #[test]
    fn test_bulk_summary() {
        let cases = vec![
            ("problema problema".to_string(), "problema".to_string()),
            ("sin coincidencias".to_string(), "xyz".to_string()),
        ];
        let report = bulk(&cases, 2).unwrap();

        assert_eq!(report.total_cases, 2);
        assert_eq!(report.results.len(), 2);
        assert!(report.summary.kmp_min_ms <= report.summary.kmp_max_ms);
        assert!(report.summary.boyer_moore_min_ms <= report.summary.boyer_moore_avg_ms + 1e-4);
        assert!(bulk(&[], 1).is_err());
    }

    #[test]
    fn test_min_avg_max() {
        assert_eq!(min_avg_max(&[1.0, 2.0, 6.0]), (1.0, 3.0, 6.0));
    }
}
