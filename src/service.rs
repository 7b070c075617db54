// Copyright (c) 2025 Complaint Detector Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! The detector service wires the engine, the batch runner and both stores
//! together. Transports (JSON-RPC, CLI) talk only to this type.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::DetectorConfig;
use crate::detection::{
    BatchReport, BatchRunner, ComparisonResult, Detection, DetectionEngine, DetectionResult,
};
use crate::error::DetectorResult;
use crate::matching::Algorithm;
use crate::store::{
    JsonFileRepository, MemoryRepository, PatternRepository, PatternStore, SetupConfig,
    SetupConfigStore,
};

/// Liveness report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Always `"healthy"` while the service answers
    pub status: String,
    /// Service name
    pub service: String,
    /// Crate version
    pub version: String,
    /// Patterns in the current snapshot
    pub patterns_loaded: usize,
}

/// Facade over the detection engine and the stores.
#[derive(Debug)]
pub struct DetectorService {
    name: String,
    engine: DetectionEngine,
    batch: BatchRunner,
    patterns: PatternStore,
    setup: SetupConfigStore,
}

impl DetectorService {
    /// Builds the service from configuration, opening both stores.
    ///
    /// # Errors
    ///
    /// Returns an error if a store cannot be read or the worker pool cannot
    /// be built.
    pub fn from_config(config: &DetectorConfig) -> DetectorResult<Self> {
        let engine = DetectionEngine::new(&config.engine);
        let batch = BatchRunner::new(&config.batch)?;
        let setup_defaults = SetupConfig {
            algorithm: config.engine.default_algorithm,
            ..SetupConfig::default()
        };

        let (repository, setup): (Box<dyn PatternRepository>, SetupConfigStore) =
            if config.storage.in_memory {
                (
                    Box::new(MemoryRepository::new()),
                    SetupConfigStore::in_memory_with_defaults(setup_defaults),
                )
            } else {
                (
                    Box::new(JsonFileRepository::new(&config.storage.patterns_path)),
                    SetupConfigStore::open_with_defaults(&config.storage.setup_path, setup_defaults)?,
                )
            };
        let patterns = PatternStore::open(repository)?;

        info!(
            patterns = patterns.len(),
            in_memory = config.storage.in_memory,
            "Detector service ready"
        );

        Ok(Self::new(config.server.name.clone(), engine, batch, patterns, setup))
    }

    /// Builds the service from already constructed parts.
    pub fn new(
        name: String,
        engine: DetectionEngine,
        batch: BatchRunner,
        patterns: PatternStore,
        setup: SetupConfigStore,
    ) -> Self {
        Self {
            name,
            engine,
            batch,
            patterns,
            setup,
        }
    }

    /// Wraps the service for sharing between request handlers.
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// The detection engine.
    pub fn engine(&self) -> &DetectionEngine {
        &self.engine
    }

    /// The pattern store.
    pub fn patterns(&self) -> &PatternStore {
        &self.patterns
    }

    /// The setup configuration store.
    pub fn setup(&self) -> &SetupConfigStore {
        &self.setup
    }

    /// Resolves an optional algorithm name; without one, the algorithm of
    /// the setup configuration applies.
    ///
    /// # Errors
    ///
    /// Returns [`DetectorError::InvalidAlgorithm`](crate::error::DetectorError::InvalidAlgorithm)
    /// for unknown names.
    pub fn resolve_algorithm(&self, name: Option<&str>) -> DetectorResult<Algorithm> {
        match name {
            Some(name) => Ok(name.parse::<Algorithm>()?),
            None => Ok(self.setup.get().algorithm),
        }
    }

    /// Analyzes one text against the current pattern snapshot.
    pub fn analyze(&self, text: &str, algorithm: Option<&str>) -> DetectorResult<DetectionResult> {
        let algorithm = self.resolve_algorithm(algorithm)?;
        let snapshot = self.patterns.list();
        self.engine.analyze(text, snapshot.patterns(), algorithm)
    }

    /// Analyzes many texts against one pattern snapshot.
    pub fn analyze_batch(
        &self,
        texts: &[String],
        algorithm: Option<&str>,
    ) -> DetectorResult<BatchReport> {
        let algorithm = self.resolve_algorithm(algorithm)?;
        let snapshot = self.patterns.list();
        self.batch
            .analyze_batch(&self.engine, texts, snapshot.patterns(), algorithm)
    }

    /// Searches one ad-hoc pattern.
    pub fn analyze_pattern(
        &self,
        text: &str,
        pattern: &str,
        algorithm: Option<&str>,
    ) -> DetectorResult<Detection> {
        let algorithm = self.resolve_algorithm(algorithm)?;
        self.engine.analyze_single_pattern(text, pattern, algorithm)
    }

    /// Compares both algorithms on one text and the current patterns.
    pub fn compare(&self, text: &str) -> DetectorResult<ComparisonResult> {
        let snapshot = self.patterns.list();
        self.engine.compare(text, snapshot.patterns())
    }

    /// Liveness report.
    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "healthy".to_string(),
            service: self.name.clone(),
            version: crate::VERSION.to_string(),
            patterns_loaded: self.patterns.len(),
        }
    }
}
