// Copyright (c) 2025 Complaint Detector Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Tables for the Boyer-Moore string matching algorithm.
//!
//! This module contains the lookup tables used by the Boyer-Moore algorithm:
//!
//! 1. Bad Character Table: the rightmost index of every character in the
//!    pattern, used to realign the pattern under the mismatched text character.
//!
//! 2. Good Suffix Table: for every mismatch position, the smallest shift that
//!    realigns the already-matched suffix with another occurrence of it (or
//!    with a prefix of the pattern).

use fnv::FnvHashMap;

/// Represents the bad character table for the Boyer-Moore algorithm.
#[derive(Debug, Clone)]
pub struct BadCharTable {
    /// Maps each character to its rightmost occurrence in the pattern
    last_occurrence: FnvHashMap<char, usize>,
}

impl BadCharTable {
    /// Creates a new bad character table for the given pattern.
    pub fn new(pattern: &[char]) -> Self {
        let mut last_occurrence = FnvHashMap::default();

        // Later indices overwrite earlier ones, leaving the rightmost occurrence
        for (i, &ch) in pattern.iter().enumerate() {
            last_occurrence.insert(ch, i);
        }

        Self { last_occurrence }
    }

    /// Rightmost index of `ch` in the pattern, if it occurs at all.
    pub fn last_occurrence(&self, ch: char) -> Option<usize> {
        self.last_occurrence.get(&ch).copied()
    }

    /// Gets the shift distance for a mismatch.
    ///
    /// # Arguments
    ///
    /// * `ch` - The text character that failed to match.
    /// * `pos` - The pattern index where the mismatch occurred.
    ///
    /// # Returns
    ///
    /// The number of positions the alignment may advance, at least 1.
    pub fn get_shift(&self, ch: char, pos: usize) -> usize {
        match self.last_occurrence(ch) {
            Some(idx) if idx < pos => pos - idx,
            // Occurs only to the right of the mismatch: the rule gives no skip
            Some(_) => 1,
            None => pos + 1,
        }
    }
}

/// Represents the good suffix table for the Boyer-Moore algorithm.
///
/// `shift[j]` is the shift to apply when the mismatch happened at pattern
/// index `j - 1`, i.e. after `pattern[j..]` matched. `shift[0]` is the shift
/// after a full match.
#[derive(Debug, Clone)]
pub struct GoodSuffixTable {
    /// Shift distances, `pattern_len + 1` entries
    shift: Vec<usize>,
}

impl GoodSuffixTable {
    /// Creates a new good suffix table for the given pattern.
    pub fn new(pattern: &[char]) -> Self {
        let m = pattern.len();
        if m == 0 {
            return Self { shift: vec![1] };
        }

        let mut shift = vec![0; m + 1];
        let border = Self::compute_border(pattern, &mut shift);
        Self::fill_from_prefix_borders(&mut shift, &border);

        Self { shift }
    }

    /// Computes the border positions of every suffix and records the shifts
    /// for suffixes that reoccur inside the pattern.
    ///
    /// `border[i]` is the start of the widest border of `pattern[i..]`.
    fn compute_border(pattern: &[char], shift: &mut [usize]) -> Vec<usize> {
        let m = pattern.len();
        let mut border = vec![0; m + 1];

        let mut i = m;
        let mut j = m + 1;
        border[i] = j;

        while i > 0 {
            while j <= m && pattern[i - 1] != pattern[j - 1] {
                if shift[j] == 0 {
                    shift[j] = j - i;
                }
                j = border[j];
            }
            i -= 1;
            j -= 1;
            border[i] = j;
        }

        border
    }

    /// Fills the remaining entries from the borders of the whole pattern,
    /// i.e. the case where only a prefix of the pattern matches the suffix.
    fn fill_from_prefix_borders(shift: &mut [usize], border: &[usize]) {
        let m = shift.len() - 1;
        let mut j = border[0];

        for i in 0..=m {
            if shift[i] == 0 {
                shift[i] = j;
            }
            if i == j {
                j = border[j];
            }
        }
    }

    /// Gets the shift distance after `pattern[matched_from..]` matched.
    pub fn get_shift(&self, matched_from: usize) -> usize {
        self.shift.get(matched_from).copied().unwrap_or(1).max(1)
    }

    /// Shift to apply after a complete match.
    pub fn full_match_shift(&self) -> usize {
        self.get_shift(0)
    }
}
