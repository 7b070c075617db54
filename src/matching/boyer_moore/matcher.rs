// Copyright (c) 2025 Complaint Detector Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Boyer-Moore string matching algorithm implementation.
//!
//! This module contains the matcher itself and the iterator used to walk
//! every occurrence of a pattern in a text.

use std::iter::FusedIterator;

use super::preprocess::PreprocessedPattern;
use crate::matching::error::Result;

/// Iterator over matches in a text.
#[derive(Debug)]
pub struct MatchIterator<'a> {
    /// The matcher instance
    matcher: &'a BoyerMooreMatcher,

    /// The text being searched
    text: &'a [char],

    /// Alignment of the pattern start in the text
    position: usize,
}

impl Iterator for MatchIterator<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let found = self.matcher.find_from(self.text, self.position)?;
        // The shift after a match never passes the widest border, so overlaps survive
        self.position = found + self.matcher.pattern.good_suffix_table.full_match_shift();
        Some(found)
    }
}

impl FusedIterator for MatchIterator<'_> {}

/// Boyer-Moore matcher for a single preprocessed pattern.
#[derive(Debug, Clone)]
pub struct BoyerMooreMatcher {
    /// The preprocessed pattern
    pattern: PreprocessedPattern,
}

impl BoyerMooreMatcher {
    /// Preprocesses a pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern exceeds the maximum length.
    pub fn try_new(pattern: &[char]) -> Result<Self> {
        Ok(Self {
            pattern: PreprocessedPattern::new(pattern)?,
        })
    }

    /// Pattern length in characters.
    pub fn pattern_len(&self) -> usize {
        self.pattern.pattern_len
    }

    /// Finds the first occurrence of the pattern.
    pub fn find_first(&self, text: &[char]) -> Option<usize> {
        self.find_from(text, 0)
    }

    /// Finds the first occurrence starting at or after `start`.
    ///
    /// The scan compares right to left. On a mismatch the alignment advances
    /// by the larger of the bad character and good suffix shifts.
    pub fn find_from(&self, text: &[char], start: usize) -> Option<usize> {
        let pattern = &self.pattern.chars;
        let m = self.pattern.pattern_len;
        let n = text.len();
        if m == 0 || m > n {
            return None;
        }

        let mut s = start;
        while s + m <= n {
            let mut j = m;
            while j > 0 && pattern[j - 1] == text[s + j - 1] {
                j -= 1;
            }

            if j == 0 {
                return Some(s);
            }

            let bad = self
                .pattern
                .bad_char_table
                .get_shift(text[s + j - 1], j - 1);
            let good = self.pattern.good_suffix_table.get_shift(j);
            s += bad.max(good).max(1);
        }

        None
    }

    /// Returns an iterator over every occurrence, overlapping ones included.
    pub fn find_all<'a>(&'a self, text: &'a [char]) -> MatchIterator<'a> {
        MatchIterator {
            matcher: self,
            text,
            position: 0,
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
        let matcher = BoyerMooreMatcher::try_new(&chars(pattern)).unwrap();
        let text = chars(text);
        matcher.find_all(&text).collect()
    }

    #[test]
    fn test_find_first_basic() {
        let matcher = BoyerMooreMatcher::try_new(&chars("producto")).unwrap();
        let text = chars("mi producto roto");
        assert_eq!(matcher.find_first(&text), Some(3));

        let text = chars("todo bien");
        assert_eq!(matcher.find_first(&text), None);
    }

    #[test]
    fn test_find_all() {
        assert_eq!(
            positions("test", "This is a test. Another test. Final test."),
            vec![10, 24, 36]
        );
    }

    #[test]
    fn test_overlapping_matches() {
        assert_eq!(positions("ana", "banana"), vec![1, 3]);
        assert_eq!(positions("aaa", "aaaaa"), vec![0, 1, 2]);
        assert_eq!(positions("ANPANMAN", "ANPANMANPANMAN"), vec![0, 6]);
        assert_eq!(positions("anan", "ananananan"), vec![0, 2, 4, 6]);
    }

    #[test]
    fn test_full_match_shift_agrees_with_naive_scan() {
        let cases = [
            ("abab", "abababab ab abab"),
            ("ANPANMAN", "ANPANMANPANMANPANMAN"),
            ("no funciona", "no funciona no funciona"),
            ("aa", "aaaa"),
            ("xyzxy", "xyzxyzxyzxy"),
        ];
        for (pattern, text) in cases {
            let p = chars(pattern);
            let t = chars(text);
            let naive: Vec<usize> = (0..=t.len().saturating_sub(p.len()))
                .filter(|&i| t.len() >= p.len() && t[i..i + p.len()] == p[..])
                .collect();
            assert_eq!(positions(pattern, text), naive, "pattern {pattern:?}");
        }
    }

    #[test]
    fn test_find_from_skips_earlier_matches() {
        let matcher = BoyerMooreMatcher::try_new(&chars("roto")).unwrap();
        let text = chars("roto y roto");
        assert_eq!(matcher.find_from(&text, 1), Some(7));
        assert_eq!(matcher.find_from(&text, 8), None);
        assert_eq!(matcher.find_from(&text, 100), None);
    }

    #[test]
    fn test_edge_cases() {
        assert!(positions("pattern", "").is_empty());
        assert!(positions("pattern", "pat").is_empty());
        assert_eq!(positions("pattern", "pattern"), vec![0]);
        assert!(positions("", "text").is_empty());
        assert_eq!(positions("café", "un café"), vec![3]);
    }
}
