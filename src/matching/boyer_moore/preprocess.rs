// Copyright (c) 2025 Complaint Detector Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Pattern preprocessing for the Boyer-Moore algorithm.
//!
//! The preprocessing step analyzes the pattern once and builds the lookup
//! tables that let the search phase skip over text.

use super::tables::{BadCharTable, GoodSuffixTable};
use crate::matching::error::{MatcherError, Result};
use crate::matching::MAX_PATTERN_LENGTH;

/// Result of the preprocessing step containing all necessary lookup tables.
#[derive(Debug, Clone)]
pub struct PreprocessedPattern {
    /// The pattern characters
    pub chars: Vec<char>,

    /// Bad character rule table
    pub bad_char_table: BadCharTable,

    /// Good suffix rule table
    pub good_suffix_table: GoodSuffixTable,

    /// The length of the pattern in characters
    pub pattern_len: usize,
}

impl PreprocessedPattern {
    /// Preprocesses a pattern for use in the Boyer-Moore algorithm.
    ///
    /// An empty pattern is accepted and simply never matches.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::PatternTooLarge`] if the pattern exceeds the
    /// maximum allowed length.
    pub fn new(pattern: &[char]) -> Result<Self> {
        let pattern_len = pattern.len();
        if pattern_len > MAX_PATTERN_LENGTH {
            return Err(MatcherError::PatternTooLarge {
                len: pattern_len,
                max: MAX_PATTERN_LENGTH,
            });
        }

        Ok(Self {
            chars: pattern.to_vec(),
            bad_char_table: BadCharTable::new(pattern),
            good_suffix_table: GoodSuffixTable::new(pattern),
            pattern_len,
        })
    }

    /// Whether the pattern has no characters.
    pub fn is_empty(&self) -> bool {
        self.pattern_len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preprocess_valid_pattern() {
        let chars: Vec<char> = "reclamo".chars().collect();
        let processed = PreprocessedPattern::new(&chars).unwrap();

        assert_eq!(processed.chars, chars);
        assert_eq!(processed.pattern_len, 7);
        assert!(!processed.is_empty());
        assert_eq!(processed.bad_char_table.last_occurrence('o'), Some(6));
    }

    #[test]
    fn test_preprocess_empty_pattern() {
        let processed = PreprocessedPattern::new(&[]).unwrap();
        assert!(processed.is_empty());
    }

    #[test]
    fn test_preprocess_pattern_too_large() {
        let large_pattern = vec!['a'; MAX_PATTERN_LENGTH + 1];
        let err = PreprocessedPattern::new(&large_pattern).unwrap_err();
        assert!(matches!(err, MatcherError::PatternTooLarge { .. }));
    }
}
