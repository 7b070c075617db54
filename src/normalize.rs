// Copyright (c) 2025 Complaint Detector Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Text normalization applied to both scanned texts and stored patterns.
//!
//! The transformation runs in a fixed order:
//!
//! 1. Unicode lowercase folding (`Á` → `á`, `Ñ` → `ñ`)
//! 2. Diacritic stripping via NFD decomposition (`á` → `a`, `ñ` → `n`)
//! 3. Punctuation removal (ASCII punctuation, `¡`, `¿`, `«`, `»`)
//! 4. Control characters become spaces, whitespace runs collapse, the result is trimmed
//!
//! Steps 2 to 4 can be switched off individually. With any combination of
//! switches the function is idempotent.
//!
//! Positions reported by the matchers are offsets into the *normalized* text.
//! Callers that need offsets into the original text must re-map them.
//!
//! # Example
//!
//! ```
//! use complaint_detector_lib::normalize::normalize;
//!
//! assert_eq!(normalize("¡PÉSIMO Servicio!"), "pesimo servicio");
//! ```

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Punctuation outside the ASCII range that Spanish text commonly carries.
const EXTRA_PUNCTUATION: [char; 4] = ['¡', '¿', '«', '»'];

/// Switches for the optional normalization steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationOptions {
    /// Strip combining marks after NFD decomposition
    pub strip_diacritics: bool,

    /// Remove punctuation characters
    pub remove_punctuation: bool,

    /// Turn control characters into spaces and collapse whitespace runs
    pub collapse_whitespace: bool,
}

impl Default for NormalizationOptions {
    fn default() -> Self {
        Self {
            strip_diacritics: true,
            remove_punctuation: true,
            collapse_whitespace: true,
        }
    }
}

/// Deterministic text normalizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Normalizer {
    options: NormalizationOptions,
}

impl Normalizer {
    /// Creates a normalizer with the given step switches.
    pub fn new(options: NormalizationOptions) -> Self {
        Self { options }
    }

    /// Returns the active step switches.
    pub fn options(&self) -> NormalizationOptions {
        self.options
    }

    /// Normalizes `text`.
    pub fn normalize(&self, text: &str) -> String {
        let mut folded = text.to_lowercase();

        if self.options.strip_diacritics {
            folded = folded.nfd().filter(|c| !is_combining_mark(*c)).collect();
        }

        if self.options.remove_punctuation {
            folded.retain(|c| !is_punctuation(c));
        }

        if self.options.collapse_whitespace {
            folded = collapse_whitespace(&folded);
        }

        folded
    }

    /// Normalizes `text` and returns its characters, ready for matching.
    pub fn normalize_chars(&self, text: &str) -> Vec<char> {
        self.normalize(text).chars().collect()
    }
}

/// Normalizes `text` with every step enabled.
pub fn normalize(text: &str) -> String {
    Normalizer::default().normalize(text)
}

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation() || EXTRA_PUNCTUATION.contains(&c)
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars() {
        if c.is_whitespace() || c.is_control() {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }

    out
}
