// Copyright (c) 2025 Complaint Detector Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Boyer-Moore pattern matcher.
//!
//! The implementation uses both the bad character rule and the strong good
//! suffix rule. After a full match the alignment moves by exactly one
//! character so overlapping occurrences are reported.
//!
//! # Example
//!
//! ```
//! use complaint_detector_lib::matching::BoyerMooreMatcher;
//!
//! let pattern: Vec<char> = "roto".chars().collect();
//! let text: Vec<char> = "producto roto, llego roto".chars().collect();
//!
//! let matcher = BoyerMooreMatcher::try_new(&pattern).unwrap();
//! let matches: Vec<usize> = matcher.find_all(&text).collect();
//! assert_eq!(matches, vec![9, 21]);
//! ```
//!
//! # Performance Characteristics
//!
//! - Preprocessing time: O(m + σ) where σ is the number of distinct pattern characters
//! - Best case: O(n/m) comparisons
//! - Worst case: O(n*m) comparisons on highly periodic inputs

mod matcher;
mod preprocess;
mod tables;

pub use matcher::{BoyerMooreMatcher, MatchIterator};
pub use preprocess::PreprocessedPattern;
pub use tables::{BadCharTable, GoodSuffixTable};

#[cfg(test)]
mod tests;
