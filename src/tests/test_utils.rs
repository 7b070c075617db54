//! Test utilities and fixtures for the complaint detector.

use std::path::PathBuf;
use std::sync::Arc;

use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use tempfile::TempDir;

use crate::config::{DetectorConfig, StorageConfig};
use crate::service::DetectorService;
use crate::store::{AlertLevel, PatternDraft};

/// Maximum length of generated texts.
const MAX_TEXT_LENGTH: usize = 200;

/// Generates short Spanish-looking texts, accents, punctuation and case
/// included.
pub fn spanish_text_strategy() -> BoxedStrategy<String> {
    proptest::collection::vec(
        prop_oneof![
            Just("producto"),
            Just("Roto"),
            Just("DEMORA"),
            Just("pésimo"),
            Just("¡nunca!"),
            Just("llegó"),
            Just("daño"),
            Just("no funciona"),
            Just("¿reembolso?"),
            Just("bien"),
        ],
        1..MAX_TEXT_LENGTH / 10,
    )
    .prop_map(|words| words.join(" "))
    .boxed()
}

/// A small pattern library covering all three alert levels.
pub fn sample_drafts() -> Vec<PatternDraft> {
    vec![
        PatternDraft::new("no funciona", "producto_no_funcional", AlertLevel::High, "Producto no funcional"),
        PatternDraft::new("roto", "producto_danado", AlertLevel::High, "Producto dañado"),
        PatternDraft::new("demora", "demora_entrega", AlertLevel::Medium, "Demora en la entrega"),
        PatternDraft::new("pesimo", "muy_malo", AlertLevel::Medium, "Experiencia muy mala"),
        PatternDraft::new("reembolso", "devolucion", AlertLevel::Low, "Solicitud de reembolso"),
    ]
}

/// A service with in-memory stores holding [`sample_drafts`].
pub fn in_memory_service() -> Arc<DetectorService> {
    let config = DetectorConfig {
        storage: StorageConfig {
            in_memory: true,
            ..StorageConfig::default()
        },
        ..DetectorConfig::default()
    };
    let service = DetectorService::from_config(&config).expect("in-memory service");
    for draft in sample_drafts() {
        service.patterns().create(draft).expect("sample pattern");
    }
    service.shared()
}

/// Temporary directory plus environment variables removed on drop.
pub struct TestFixture {
    /// Temporary directory for test files
    pub temp_dir: TempDir,
    env_vars: Vec<String>,
}

impl TestFixture {
    /// Create a new test fixture.
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            temp_dir: tempfile::tempdir()?,
            env_vars: Vec::new(),
        })
    }

    /// Path of `name` inside the fixture directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Set an environment variable for this test.
    ///
    /// The variable will be cleaned up when the fixture is dropped.
    pub fn set_env<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        let key_str = key.into();
        std::env::set_var(&key_str, value.into());
        self.env_vars.push(key_str);
    }

    /// Writes `contents` to `name` inside the fixture directory.
    pub fn create_file<C: AsRef<[u8]>>(&self, name: &str, contents: C) -> std::io::Result<PathBuf> {
        let path = self.path(name);
        std::fs::write(&path, contents)?;
        Ok(path)
    }
}

impl Drop for TestFixture {
    fn drop(&mut self) {
        for key in &self.env_vars {
            std::env::remove_var(key);
        }
    }
}
