// Copyright (c) 2025 Complaint Detector Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Failure function for the Knuth-Morris-Pratt algorithm.
//!
//! For every prefix `pattern[..=i]` the table stores the length of the longest
//! proper prefix of that prefix which is also its suffix. On a mismatch after
//! `q` matched characters the scan falls back to `table[q - 1]` matched
//! characters instead of restarting, which keeps the scan linear.

/// Longest-proper-prefix-suffix table for a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureTable {
    values: Vec<usize>,
}

impl FailureTable {
    /// Builds the table in O(m) time.
    pub fn new(pattern: &[char]) -> Self {
        let mut values = vec![0; pattern.len()];
        let mut k = 0;

        for i in 1..pattern.len() {
            while k > 0 && pattern[i] != pattern[k] {
                k = values[k - 1];
            }
            if pattern[i] == pattern[k] {
                k += 1;
            }
            values[i] = k;
        }

        Self { values }
    }

    /// Border length of `pattern[..=index]`.
    ///
    /// Out of range indices report 0.
    pub fn get(&self, index: usize) -> usize {
        self.values.get(index).copied().unwrap_or(0)
    }

    /// The raw table.
    pub fn as_slice(&self) -> &[usize] {
        &self.values
    }

    /// Number of entries, equal to the pattern length.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the table was built for an empty pattern.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
