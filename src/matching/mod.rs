// Copyright (c) 2025 Complaint Detector Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Exact single-pattern matchers.
//!
//! Two interchangeable algorithms are provided, Knuth-Morris-Pratt and
//! Boyer-Moore. Both operate on slices of `char` so that reported offsets are
//! character offsets, and both share one occurrence contract:
//!
//! - every start offset is reported, including overlapping occurrences
//!   (`"aa"` in `"aaaa"` yields `[0, 1, 2]`);
//! - offsets are reported in ascending order;
//! - the empty pattern matches nowhere.
//!
//! # Example
//!
//! ```
//! use complaint_detector_lib::matching::{find_all_str, Algorithm};
//!
//! let kmp = find_all_str(Algorithm::Kmp, "ana", "banana").unwrap();
//! let bm = find_all_str(Algorithm::BoyerMoore, "ana", "banana").unwrap();
//! assert_eq!(kmp, vec![1, 3]);
//! assert_eq!(kmp, bm);
//! ```

pub mod boyer_moore;
mod error;
pub mod kmp;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use boyer_moore::BoyerMooreMatcher;
pub use error::{MatcherError, Result};
pub use kmp::KmpMatcher;

/// Maximum allowed pattern length in characters.
pub const MAX_PATTERN_LENGTH: usize = 32 * 1024;

/// Matching algorithm selectable by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Knuth-Morris-Pratt
    #[default]
    Kmp,
    /// Boyer-Moore with bad-character and good-suffix rules
    BoyerMoore,
}

impl Algorithm {
    /// Every supported algorithm, in comparison order.
    pub const ALL: [Algorithm; 2] = [Algorithm::Kmp, Algorithm::BoyerMoore];

    /// Wire name of the algorithm.
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Kmp => "kmp",
            Algorithm::BoyerMoore => "boyer_moore",
        }
    }

    /// Human readable name used in benchmark reports.
    pub fn display_name(&self) -> &'static str {
        match self {
            Algorithm::Kmp => "KMP",
            Algorithm::BoyerMoore => "Boyer-Moore",
        }
    }

    /// Finds every occurrence of `pattern` in `text` with this algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::PatternTooLarge`] if the pattern exceeds
    /// [`MAX_PATTERN_LENGTH`].
    pub fn find_all(&self, pattern: &[char], text: &[char]) -> Result<Vec<usize>> {
        match self {
            Algorithm::Kmp => Ok(KmpMatcher::try_new(pattern)?.find_all(text).collect()),
            Algorithm::BoyerMoore => {
                Ok(BoyerMooreMatcher::try_new(pattern)?.find_all(text).collect())
            }
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = MatcherError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kmp" => Ok(Algorithm::Kmp),
            "boyer_moore" | "boyer-moore" => Ok(Algorithm::BoyerMoore),
            _ => Err(MatcherError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Convenience wrapper over [`Algorithm::find_all`] for string slices.
///
/// Offsets are character offsets into `text`, not byte offsets.
pub fn find_all_str(algorithm: Algorithm, pattern: &str, text: &str) -> Result<Vec<usize>> {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    algorithm.find_all(&pattern, &text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("kmp", Algorithm::Kmp ; "plain kmp")]
    #[test_case("KMP", Algorithm::Kmp ; "uppercase kmp")]
    #[test_case("boyer_moore", Algorithm::BoyerMoore ; "snake case")]
    #[test_case(" boyer-moore ", Algorithm::BoyerMoore ; "dashed with spaces")]
    fn test_parse_algorithm(input: &str, expected: Algorithm) {
        assert_eq!(input.parse::<Algorithm>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown_algorithm() {
        let err = "rabin_karp".parse::<Algorithm>().unwrap_err();
        assert_eq!(err, MatcherError::UnknownAlgorithm("rabin_karp".to_string()));
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Algorithm::BoyerMoore).unwrap(), "\"boyer_moore\"");
        let parsed: Algorithm = serde_json::from_str("\"kmp\"").unwrap();
        assert_eq!(parsed, Algorithm::Kmp);
    }

    #[test_case(Algorithm::Kmp)]
    #[test_case(Algorithm::BoyerMoore)]
    fn test_overlap_law(algorithm: Algorithm) {
        assert_eq!(find_all_str(algorithm, "aa", "aaaa").unwrap(), vec![0, 1, 2]);
        assert_eq!(find_all_str(algorithm, "aa", "aaa").unwrap(), vec![0, 1]);
    }

    #[test_case(Algorithm::Kmp)]
    #[test_case(Algorithm::BoyerMoore)]
    fn test_empty_pattern_law(algorithm: Algorithm) {
        assert!(find_all_str(algorithm, "", "anything at all").unwrap().is_empty());
        assert!(find_all_str(algorithm, "", "").unwrap().is_empty());
    }

    #[test_case(Algorithm::Kmp)]
    #[test_case(Algorithm::BoyerMoore)]
    fn test_offsets_are_character_offsets(algorithm: Algorithm) {
        // "ñ" is two bytes, so byte and character offsets differ here
        assert_eq!(find_all_str(algorithm, "roto", "ñañ roto").unwrap(), vec![4]);
    }

    #[test_case(Algorithm::Kmp)]
    #[test_case(Algorithm::BoyerMoore)]
    fn test_pattern_too_large(algorithm: Algorithm) {
        let pattern = vec!['a'; MAX_PATTERN_LENGTH + 1];
        let err = algorithm.find_all(&pattern, &['a']).unwrap_err();
        assert_eq!(
            err,
            MatcherError::PatternTooLarge {
                len: MAX_PATTERN_LENGTH + 1,
                max: MAX_PATTERN_LENGTH
            }
        );
    }
}
