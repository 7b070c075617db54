// Copyright (c) 2025 Complaint Detector Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Detection aggregator: one text against every stored pattern.

use std::time::Instant;

use tracing::debug;

use super::{elapsed_ms, AlertCounts, Detection, DetectionResult, Performance, Severity};
use crate::config::EngineConfig;
use crate::error::{DetectorError, DetectorResult};
use crate::matching::Algorithm;
use crate::normalize::Normalizer;
use crate::store::{AlertLevel, Category, Pattern};

/// A text normalized once and ready to be scanned by any number of patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedText {
    /// Text as submitted
    pub original: String,
    /// Text after normalization
    pub normalized: String,
    /// Characters of the normalized text
    pub chars: Vec<char>,
}

/// A stored pattern with its normalized characters.
#[derive(Debug, Clone)]
pub(crate) struct PreparedPattern<'a> {
    pub(crate) pattern: &'a Pattern,
    pub(crate) chars: Vec<char>,
}

/// Scans texts against pattern snapshots.
#[derive(Debug, Clone)]
pub struct DetectionEngine {
    normalizer: Normalizer,
    max_text_length: usize,
    default_algorithm: Algorithm,
}

impl Default for DetectionEngine {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl DetectionEngine {
    /// Creates an engine from its configuration section.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            normalizer: Normalizer::new(config.normalization),
            max_text_length: config.max_text_length,
            default_algorithm: config.default_algorithm,
        }
    }

    /// The normalizer applied to texts and patterns.
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Maximum accepted text length in characters.
    pub fn max_text_length(&self) -> usize {
        self.max_text_length
    }

    /// Algorithm used when the caller names none.
    pub fn default_algorithm(&self) -> Algorithm {
        self.default_algorithm
    }

    /// Resolves an optional algorithm name, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`DetectorError::InvalidAlgorithm`] for unknown names.
    pub fn resolve_algorithm(&self, name: Option<&str>) -> DetectorResult<Algorithm> {
        match name {
            Some(name) => Ok(name.parse::<Algorithm>()?),
            None => Ok(self.default_algorithm),
        }
    }

    /// Checks that a text can be analyzed.
    ///
    /// # Errors
    ///
    /// Returns [`DetectorError::Validation`] for blank texts and texts longer
    /// than the configured maximum.
    pub fn validate_text(&self, text: &str) -> DetectorResult<()> {
        if text.trim().is_empty() {
            return Err(DetectorError::Validation("text cannot be empty".to_string()));
        }

        let len = text.chars().count();
        if len > self.max_text_length {
            return Err(DetectorError::Validation(format!(
                "text is {len} characters long, maximum is {}",
                self.max_text_length
            )));
        }

        Ok(())
    }

    /// Normalizes a text once for scanning.
    pub fn prepare_text(&self, text: &str) -> PreparedText {
        let normalized = self.normalizer.normalize(text);
        let chars = normalized.chars().collect();
        PreparedText {
            original: text.to_string(),
            normalized,
            chars,
        }
    }

    pub(crate) fn prepare_patterns<'a>(&self, patterns: &'a [Pattern]) -> Vec<PreparedPattern<'a>> {
        patterns
            .iter()
            .map(|pattern| PreparedPattern {
                pattern,
                chars: self.normalizer.normalize_chars(&pattern.text),
            })
            .collect()
    }

    /// Runs `algorithm` for every prepared pattern and orders the detections.
    pub(crate) fn scan(
        &self,
        text: &PreparedText,
        patterns: &[PreparedPattern<'_>],
        algorithm: Algorithm,
    ) -> DetectorResult<Vec<Detection>> {
        let mut detections = Vec::new();

        for prepared in patterns {
            let positions = algorithm.find_all(&prepared.chars, &text.chars)?;
            if positions.is_empty() {
                continue;
            }

            let pattern = prepared.pattern;
            detections.push(Detection {
                pattern_id: Some(pattern.id),
                pattern: pattern.text.clone(),
                match_count: positions.len(),
                positions,
                category: pattern.category.clone(),
                alert_level: pattern.alert_level,
                alert_message: pattern.alert_message.clone(),
            });
        }

        // Stable sort keeps store order for equal first offsets
        detections.sort_by_key(|d| d.first_position());
        Ok(detections)
    }

    pub(crate) fn build_result(
        text: &PreparedText,
        detections: Vec<Detection>,
        algorithm: Algorithm,
        total_patterns_checked: usize,
        total_execution_time_ms: f64,
    ) -> DetectionResult {
        let mut alert_levels = AlertCounts::default();
        for detection in &detections {
            alert_levels.record(detection.alert_level, detection.positions.len());
        }

        DetectionResult {
            original_text: text.original.clone(),
            normalized_text: text.normalized.clone(),
            algorithm,
            has_complaints: !detections.is_empty(),
            patterns_found: detections.len(),
            severity: Severity::from_counts(&alert_levels),
            alert_levels,
            detections,
            total_patterns_checked,
            performance: Performance {
                total_execution_time_ms,
                algorithm_used: algorithm,
            },
        }
    }

    /// Analyzes one text against `patterns`.
    ///
    /// The result is computed completely or not at all.
    ///
    /// # Errors
    ///
    /// Returns [`DetectorError::Validation`] for texts rejected by
    /// [`validate_text`](Self::validate_text).
    pub fn analyze(
        &self,
        text: &str,
        patterns: &[Pattern],
        algorithm: Algorithm,
    ) -> DetectorResult<DetectionResult> {
        self.validate_text(text)?;

        let start = Instant::now();
        let prepared_text = self.prepare_text(text);
        let prepared_patterns = self.prepare_patterns(patterns);
        let detections = self.scan(&prepared_text, &prepared_patterns, algorithm)?;
        let elapsed = elapsed_ms(start);

        debug!(
            algorithm = %algorithm,
            patterns = patterns.len(),
            detections = detections.len(),
            elapsed_ms = elapsed,
            "Analyzed text"
        );

        Ok(Self::build_result(
            &prepared_text,
            detections,
            algorithm,
            patterns.len(),
            elapsed,
        ))
    }

    /// Searches one ad-hoc pattern, outside the store.
    ///
    /// The returned detection carries category `custom` and level `low`, and
    /// may have no positions.
    ///
    /// # Errors
    ///
    /// Returns [`DetectorError::Validation`] for rejected texts, or a matcher
    /// error if the pattern is too large.
    pub fn analyze_single_pattern(
        &self,
        text: &str,
        pattern: &str,
        algorithm: Algorithm,
    ) -> DetectorResult<Detection> {
        self.validate_text(text)?;

        let text_chars = self.normalizer.normalize_chars(text);
        let pattern_chars = self.normalizer.normalize_chars(pattern);
        let positions = algorithm.find_all(&pattern_chars, &text_chars)?;

        Ok(Detection {
            pattern_id: None,
            pattern: pattern.to_string(),
            match_count: positions.len(),
            positions,
            category: Category::Custom,
            alert_level: AlertLevel::Low,
            alert_message: format!("Patron '{pattern}' encontrado"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::PatternDraft;
    use proptest::prelude::*;
    use test_case::test_case;

    fn pattern(id: u64, text: &str, level: AlertLevel) -> Pattern {
        Pattern::from_draft(id, PatternDraft::new(text, "reclamo", level, format!("alerta {id}")))
    }

    #[test_case(Algorithm::Kmp)]
    #[test_case(Algorithm::BoyerMoore)]
    fn test_repeated_pattern_counts_every_occurrence(algorithm: Algorithm) {
        let engine = DetectionEngine::default();
        let patterns = vec![pattern(1, "producto roto", AlertLevel::High)];

        let result = engine
            .analyze("mi producto roto llegó producto roto otra vez", &patterns, algorithm)
            .unwrap();

        assert_eq!(result.normalized_text, "mi producto roto llego producto roto otra vez");
        assert_eq!(result.detections.len(), 1);
        assert_eq!(result.detections[0].positions, vec![3, 23]);
        assert_eq!(result.alert_levels.high, 2);
        assert_eq!(result.severity, Severity::Critical);
        assert!(result.has_complaints);
    }

    #[test]
    fn test_detections_ordered_by_first_occurrence_then_store_order() {
        let engine = DetectionEngine::default();
        let patterns = vec![
            pattern(1, "tarde", AlertLevel::Low),
            pattern(2, "pedido", AlertLevel::Medium),
            pattern(3, "pedido llego", AlertLevel::High),
        ];

        let result = engine
            .analyze("el pedido llegó tarde", &patterns, Algorithm::Kmp)
            .unwrap();

        let ids: Vec<Option<u64>> = result.detections.iter().map(|d| d.pattern_id).collect();
        assert_eq!(ids, vec![Some(2), Some(3), Some(1)]);
    }

    #[test]
    fn test_empty_and_unmatched_patterns_are_skipped() {
        let engine = DetectionEngine::default();
        let patterns = vec![
            pattern(1, "", AlertLevel::High),
            pattern(2, "fraude", AlertLevel::High),
            pattern(3, "¡Demora!", AlertLevel::Low),
        ];

        let result = engine
            .analyze("hubo demora en la entrega", &patterns, Algorithm::BoyerMoore)
            .unwrap();

        assert_eq!(result.patterns_found, 1);
        assert_eq!(result.total_patterns_checked, 3);
        assert_eq!(result.detections[0].pattern, "¡Demora!");
        assert_eq!(result.severity, Severity::Minor);
    }

    #[test]
    fn test_rejects_blank_and_oversized_text() {
        let engine = DetectionEngine::new(&EngineConfig {
            max_text_length: 10,
            ..EngineConfig::default()
        });

        assert!(matches!(
            engine.analyze("   ", &[], Algorithm::Kmp),
            Err(DetectorError::Validation(_))
        ));
        assert!(matches!(
            engine.analyze("texto demasiado largo", &[], Algorithm::Kmp),
            Err(DetectorError::Validation(_))
        ));
        // Exactly at the limit, counted in characters
        assert!(engine.analyze("ñññññññññð", &[], Algorithm::Kmp).is_ok());
    }

    #[test]
    fn test_resolve_algorithm() {
        let engine = DetectionEngine::default();
        assert_eq!(engine.resolve_algorithm(None).unwrap(), Algorithm::Kmp);
        assert_eq!(
            engine.resolve_algorithm(Some("boyer_moore")).unwrap(),
            Algorithm::BoyerMoore
        );
        assert!(matches!(
            engine.resolve_algorithm(Some("regex")),
            Err(DetectorError::InvalidAlgorithm(name)) if name == "regex"
        ));
    }

    #[test]
    fn test_analyze_single_pattern() {
        let engine = DetectionEngine::default();
        let detection = engine
            .analyze_single_pattern("No funciona, NO FUNCIONA", "no funciona", Algorithm::Kmp)
            .unwrap();

        assert_eq!(detection.positions, vec![0, 12]);
        assert_eq!(detection.category, Category::Custom);
        assert_eq!(detection.alert_level, AlertLevel::Low);
        assert_eq!(detection.pattern_id, None);

        let miss = engine
            .analyze_single_pattern("todo bien", "roto", Algorithm::BoyerMoore)
            .unwrap();
        assert_eq!(miss.match_count, 0);
    }

    fn level_strategy() -> impl Strategy<Value = AlertLevel> {
        prop_oneof![
            Just(AlertLevel::Low),
            Just(AlertLevel::Medium),
            Just(AlertLevel::High)
        ]
    }

    proptest! {
        #[test]
        fn prop_result_invariants(
            text in "[a-c ]{1,60}",
            specs in prop::collection::vec(("[a-c]{0,3}", level_strategy()), 0..6),
        ) {
            let engine = DetectionEngine::default();
            let patterns: Vec<Pattern> = specs
                .iter()
                .enumerate()
                .map(|(i, (text, level))| pattern(i as u64 + 1, text, *level))
                .collect();

            for algorithm in Algorithm::ALL {
                let result = match engine.analyze(&text, &patterns, algorithm) {
                    Ok(result) => result,
                    // Only blank texts are rejected
                    Err(_) => {
                        prop_assert!(text.trim().is_empty());
                        continue;
                    }
                };

                let occurrences: usize = result.detections.iter().map(|d| d.positions.len()).sum();
                prop_assert_eq!(result.alert_levels.total(), occurrences);
                prop_assert_eq!(result.has_complaints, !result.detections.is_empty());
                prop_assert_eq!(result.patterns_found, result.detections.len());
                prop_assert!(result
                    .detections
                    .windows(2)
                    .all(|w| w[0].first_position() <= w[1].first_position()));
            }
        }
    }
}
