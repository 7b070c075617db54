// Copyright (c) 2025 Complaint Detector Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types shared by the exact-match algorithms.

/// Error types for matcher construction and algorithm selection.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum MatcherError {
    /// Pattern is too large
    #[error("Pattern of {len} characters exceeds the maximum of {max}")]
    PatternTooLarge {
        /// Length of the rejected pattern in characters
        len: usize,
        /// Maximum accepted length in characters
        max: usize,
    },

    /// Algorithm name not recognised
    #[error("Unknown algorithm '{0}', expected 'kmp' or 'boyer_moore'")]
    UnknownAlgorithm(String),
}

/// Result type for matcher operations
pub type Result<T> = std::result::Result<T, MatcherError>;
