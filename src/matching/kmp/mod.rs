// Copyright (c) 2025 Complaint Detector Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Knuth-Morris-Pratt pattern matcher.
//!
//! The matcher precomputes a failure function for the pattern and then scans
//! the text exactly once, never moving backwards in the text.
//!
//! # Example
//!
//! ```
//! use complaint_detector_lib::matching::KmpMatcher;
//!
//! let pattern: Vec<char> = "aa".chars().collect();
//! let text: Vec<char> = "aaaa".chars().collect();
//!
//! let matcher = KmpMatcher::try_new(&pattern).unwrap();
//! let matches: Vec<usize> = matcher.find_all(&text).collect();
//! assert_eq!(matches, vec![0, 1, 2]);
//! ```
//!
//! # Performance Characteristics
//!
//! - Preprocessing time: O(m)
//! - Search time: O(n), independent of the number of matches
//! - Space complexity: O(m)

mod failure;
mod matcher;

pub use failure::FailureTable;
pub use matcher::{KmpMatcher, KmpMatches};
