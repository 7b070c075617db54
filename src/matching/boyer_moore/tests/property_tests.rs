// Copyright (c) 2025 Complaint Detector Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Property-based tests for the Boyer-Moore matcher, checked against KMP and
//! a naive scan.

use proptest::prelude::*;

use crate::matching::{BoyerMooreMatcher, KmpMatcher};

// Small alphabets produce many (overlapping) matches
fn pattern_strategy() -> impl Strategy<Value = Vec<char>> {
    prop::collection::vec(prop::sample::select(vec!['a', 'b', 'c', 'ñ']), 1..8)
}

fn text_strategy() -> impl Strategy<Value = Vec<char>> {
    prop::collection::vec(prop::sample::select(vec!['a', 'b', 'c', 'ñ', ' ']), 0..200)
}

fn naive_positions(pattern: &[char], text: &[char]) -> Vec<usize> {
    if pattern.is_empty() || pattern.len() > text.len() {
        return Vec::new();
    }
    (0..=text.len() - pattern.len())
        .filter(|&i| &text[i..i + pattern.len()] == pattern)
        .collect()
}

proptest! {
    #[test]
    fn prop_matches_naive_scan(pattern in pattern_strategy(), text in text_strategy()) {
        let matcher = BoyerMooreMatcher::try_new(&pattern).unwrap();
        let found: Vec<usize> = matcher.find_all(&text).collect();
        prop_assert_eq!(found, naive_positions(&pattern, &text));
    }

    #[test]
    fn prop_agrees_with_kmp(pattern in pattern_strategy(), text in text_strategy()) {
        let bm = BoyerMooreMatcher::try_new(&pattern).unwrap();
        let kmp = KmpMatcher::try_new(&pattern).unwrap();

        let bm_positions: Vec<usize> = bm.find_all(&text).collect();
        let kmp_positions: Vec<usize> = kmp.find_all(&text).collect();
        prop_assert_eq!(bm_positions, kmp_positions);
    }

    #[test]
    fn prop_finds_inserted_pattern(
        prefix in text_strategy(),
        pattern in pattern_strategy(),
        suffix in text_strategy(),
    ) {
        let mut text = prefix.clone();
        text.extend_from_slice(&pattern);
        text.extend_from_slice(&suffix);

        let matcher = BoyerMooreMatcher::try_new(&pattern).unwrap();
        let found: Vec<usize> = matcher.find_all(&text).collect();
        prop_assert!(found.contains(&prefix.len()));
        prop_assert!(found.windows(2).all(|w| w[0] < w[1]));
    }
}
