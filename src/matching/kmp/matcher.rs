// Copyright (c) 2025 Complaint Detector Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Knuth-Morris-Pratt matcher and its occurrence iterator.

use std::iter::FusedIterator;

use super::failure::FailureTable;
use crate::matching::error::{MatcherError, Result};
use crate::matching::MAX_PATTERN_LENGTH;

/// Iterator over match start offsets produced by a [`KmpMatcher`].
///
/// The iterator keeps the matched-length counter between calls so a single
/// left-to-right pass over the text yields every occurrence.
#[derive(Debug)]
pub struct KmpMatches<'a> {
    /// The matcher instance
    matcher: &'a KmpMatcher,

    /// The text being searched
    text: &'a [char],

    /// Index of the next text character to consume
    position: usize,

    /// Number of pattern characters currently matched
    matched: usize,
}

impl Iterator for KmpMatches<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let pattern = &self.matcher.pattern;
        let m = pattern.len();
        if m == 0 {
            return None;
        }

        while self.position < self.text.len() {
            let ch = self.text[self.position];
            self.position += 1;

            while self.matched > 0 && ch != pattern[self.matched] {
                self.matched = self.matcher.failure.get(self.matched - 1);
            }
            if ch == pattern[self.matched] {
                self.matched += 1;
            }
            if self.matched == m {
                // Fall back instead of resetting so overlapping matches survive
                self.matched = self.matcher.failure.get(m - 1);
                return Some(self.position - m);
            }
        }

        None
    }
}

impl FusedIterator for KmpMatches<'_> {}

/// Knuth-Morris-Pratt matcher for a single preprocessed pattern.
#[derive(Debug, Clone)]
pub struct KmpMatcher {
    /// Pattern characters
    pattern: Vec<char>,

    /// Failure function of the pattern
    failure: FailureTable,
}

impl KmpMatcher {
    /// Preprocesses a pattern.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::PatternTooLarge`] when the pattern is longer than
    /// [`MAX_PATTERN_LENGTH`] characters.
    pub fn try_new(pattern: &[char]) -> Result<Self> {
        if pattern.len() > MAX_PATTERN_LENGTH {
            return Err(MatcherError::PatternTooLarge {
                len: pattern.len(),
                max: MAX_PATTERN_LENGTH,
            });
        }

        Ok(Self {
            pattern: pattern.to_vec(),
            failure: FailureTable::new(pattern),
        })
    }

    /// Pattern length in characters.
    pub fn pattern_len(&self) -> usize {
        self.pattern.len()
    }

    /// The failure function built for the pattern.
    pub fn failure_table(&self) -> &FailureTable {
        &self.failure
    }

    /// Finds the first occurrence of the pattern.
    pub fn find_first(&self, text: &[char]) -> Option<usize> {
        self.find_all(text).next()
    }

    /// Returns an iterator over every occurrence, overlapping ones included.
    pub fn find_all<'a>(&'a self, text: &'a [char]) -> KmpMatches<'a> {
        KmpMatches {
            matcher: self,
            text,
            position: 0,
            matched: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn positions(pattern: &str, text: &str) -> Vec<usize> {
        let matcher = KmpMatcher::try_new(&chars(pattern)).unwrap();
        let text = chars(text);
        matcher.find_all(&text).collect()
    }

    #[test]
    fn test_find_first_basic() {
        let matcher = KmpMatcher::try_new(&chars("cliente")).unwrap();
        let text = chars("el cliente no esta satisfecho con el servicio");
        assert_eq!(matcher.find_first(&text), Some(3));

        let text = chars("el servicio es excelente");
        assert_eq!(matcher.find_first(&text), None);
    }

    #[test]
    fn test_multiple_matches() {
        assert_eq!(
            positions("problema", "problema problema problema no se resuelve"),
            vec![0, 9, 18]
        );
    }

    #[test]
    fn test_overlapping_matches() {
        assert_eq!(positions("aaa", "aaaaaaaaaa"), (0..=7).collect::<Vec<_>>());
        assert_eq!(positions("ana", "banana"), vec![1, 3]);
        assert_eq!(positions("abab", "abababab"), vec![0, 2, 4]);
    }

    #[test]
    fn test_edge_cases() {
        assert!(positions("pattern", "").is_empty());
        assert!(positions("pattern", "pat").is_empty());
        assert_eq!(positions("pattern", "pattern"), vec![0]);
        assert_eq!(positions("end", "the end"), vec![4]);
        assert!(positions("", "text").is_empty());
    }

    #[test]
    fn test_iterator_is_fused() {
        let matcher = KmpMatcher::try_new(&chars("a")).unwrap();
        let text = chars("a");
        let mut iter = matcher.find_all(&text);
        assert_eq!(iter.next(), Some(0));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }
}
