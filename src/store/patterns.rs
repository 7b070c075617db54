// Copyright (c) 2025 Complaint Detector Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Versioned, snapshot-based pattern store.
//!
//! Readers call [`PatternStore::list`] and receive an immutable
//! [`PatternSnapshot`] they may hold for as long as they like. Writers are
//! serialized on a mutex, build a new snapshot next to the current one and
//! swap the pointer, so an in-flight analysis never observes a half-applied
//! mutation.
//!
//! Ids come from a monotonic counter and are never reused. Mutations only
//! touch memory; [`PatternStore::save`] is the explicit durability checkpoint.

use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, warn};

use super::pattern::{Pattern, PatternDraft};
use super::repository::{PatternDocument, PatternRepository};
use crate::error::{DetectorError, DetectorResult};

/// Immutable view of the store at one version.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PatternSnapshot {
    version: u64,
    patterns: Vec<Pattern>,
}

impl PatternSnapshot {
    /// Creates a snapshot from patterns in store order.
    pub fn new(version: u64, patterns: Vec<Pattern>) -> Self {
        Self { version, patterns }
    }

    /// Version of the store this snapshot was taken at.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Patterns in store order.
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Looks up a pattern by id.
    pub fn get(&self, id: u64) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.id == id)
    }

    /// Number of patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the snapshot holds no patterns.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Iterates over the patterns in store order.
    pub fn iter(&self) -> std::slice::Iter<'_, Pattern> {
        self.patterns.iter()
    }
}

/// State only writers touch.
#[derive(Debug)]
struct WriterState {
    next_id: u64,
}

/// Pattern store with CRUD and an explicit save checkpoint.
pub struct PatternStore {
    current: RwLock<Arc<PatternSnapshot>>,
    writer: Mutex<WriterState>,
    repository: Box<dyn PatternRepository>,
}

impl fmt::Debug for PatternStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternStore")
            .field("version", &self.current.read().version())
            .field("patterns", &self.current.read().len())
            .field("location", &self.repository.location())
            .finish()
    }
}

impl PatternStore {
    /// Creates an empty store backed by `repository` without reading it.
    pub fn new(repository: Box<dyn PatternRepository>) -> Self {
        Self {
            current: RwLock::new(Arc::new(PatternSnapshot::default())),
            writer: Mutex::new(WriterState { next_id: 1 }),
            repository,
        }
    }

    /// Opens a store, loading whatever the repository holds.
    ///
    /// A repository with nothing saved yields an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`DetectorError::Persistence`] if the stored document cannot
    /// be read.
    pub fn open(repository: Box<dyn PatternRepository>) -> DetectorResult<Self> {
        let store = Self::new(repository);
        match store.repository.load()? {
            Some(document) => {
                let count = store.install(document)?;
                info!(
                    location = %store.repository.location(),
                    patterns = count,
                    "Loaded pattern store"
                );
            }
            None => {
                warn!(
                    location = %store.repository.location(),
                    "No saved patterns found, starting with an empty store"
                );
            }
        }
        Ok(store)
    }

    /// Creates a store seeded with `drafts`, ids issued in order from 1.
    ///
    /// # Errors
    ///
    /// Returns [`DetectorError::Validation`] if a draft is invalid.
    pub fn with_patterns(
        repository: Box<dyn PatternRepository>,
        drafts: Vec<PatternDraft>,
    ) -> DetectorResult<Self> {
        let store = Self::new(repository);
        for draft in drafts {
            store.create(draft)?;
        }
        Ok(store)
    }

    /// Returns the current snapshot.
    pub fn list(&self) -> Arc<PatternSnapshot> {
        Arc::clone(&self.current.read())
    }

    /// Looks up a pattern by id in the current snapshot.
    pub fn get(&self, id: u64) -> Option<Pattern> {
        self.current.read().get(id).cloned()
    }

    /// Number of patterns in the current snapshot.
    pub fn len(&self) -> usize {
        self.current.read().len()
    }

    /// Whether the current snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.current.read().is_empty()
    }

    /// Appends a pattern and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`DetectorError::Validation`] if the draft is invalid.
    pub fn create(&self, draft: PatternDraft) -> DetectorResult<Pattern> {
        let draft = draft.validated()?;
        let mut writer = self.writer.lock();

        let id = writer.next_id;
        let next_id = id.checked_add(1).ok_or_else(|| {
            DetectorError::Validation("no pattern ids left to issue".to_string())
        })?;
        let pattern = Pattern::from_draft(id, draft);

        let current = self.list();
        let mut patterns = current.patterns().to_vec();
        patterns.push(pattern.clone());

        self.publish(current.version() + 1, patterns);
        writer.next_id = next_id;

        debug!(id, pattern = %pattern.text, "Created pattern");
        Ok(pattern)
    }

    /// Replaces every field of the pattern with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DetectorError::NotFound`] if no pattern has that id, or
    /// [`DetectorError::Validation`] if the draft is invalid. The store is
    /// unchanged on error.
    pub fn update(&self, id: u64, draft: PatternDraft) -> DetectorResult<Pattern> {
        let draft = draft.validated()?;
        let _writer = self.writer.lock();

        let current = self.list();
        let index = current
            .patterns()
            .iter()
            .position(|p| p.id == id)
            .ok_or(DetectorError::NotFound(id))?;

        let pattern = Pattern::from_draft(id, draft);
        let mut patterns = current.patterns().to_vec();
        patterns[index] = pattern.clone();

        self.publish(current.version() + 1, patterns);

        debug!(id, "Updated pattern");
        Ok(pattern)
    }

    /// Removes the pattern with `id` and returns it.
    ///
    /// Ids of the remaining patterns do not change.
    ///
    /// # Errors
    ///
    /// Returns [`DetectorError::NotFound`] if no pattern has that id.
    pub fn delete(&self, id: u64) -> DetectorResult<Pattern> {
        let _writer = self.writer.lock();

        let current = self.list();
        let index = current
            .patterns()
            .iter()
            .position(|p| p.id == id)
            .ok_or(DetectorError::NotFound(id))?;

        let mut patterns = current.patterns().to_vec();
        let removed = patterns.remove(index);

        self.publish(current.version() + 1, patterns);

        debug!(id, "Deleted pattern");
        Ok(removed)
    }

    /// Flushes the current patterns to the repository.
    ///
    /// # Errors
    ///
    /// Returns [`DetectorError::Persistence`] if the write fails. In-memory
    /// state is preserved and the previous durable state is retained, so the
    /// caller may retry.
    pub fn save(&self) -> DetectorResult<usize> {
        let writer = self.writer.lock();
        let current = self.list();

        let document = PatternDocument {
            next_id: writer.next_id,
            patterns: current.patterns().to_vec(),
        };

        self.repository.save(&document)?;

        info!(
            location = %self.repository.location(),
            patterns = document.patterns.len(),
            version = current.version(),
            "Saved patterns"
        );
        Ok(document.patterns.len())
    }

    /// Replaces the in-memory patterns with what the repository holds.
    ///
    /// # Errors
    ///
    /// Returns [`DetectorError::Persistence`] if nothing was saved or the
    /// document cannot be read. The in-memory state is unchanged on error.
    pub fn reload(&self) -> DetectorResult<usize> {
        let document = self.repository.load()?.ok_or_else(|| {
            DetectorError::persistence(self.repository.location(), "no saved patterns")
        })?;
        let count = self.install(document)?;
        info!(location = %self.repository.location(), patterns = count, "Reloaded patterns");
        Ok(count)
    }

    /// Installs a loaded document as a new version.
    ///
    /// Fails without touching the store when no id is left to issue after the
    /// loaded ones.
    fn install(&self, document: PatternDocument) -> DetectorResult<usize> {
        let mut writer = self.writer.lock();

        // A hand-edited file may carry a stale counter; ids must stay unique
        let max_id = document.patterns.iter().map(|p| p.id).max().unwrap_or(0);
        let after_max = max_id.checked_add(1).ok_or_else(|| {
            DetectorError::persistence(
                self.repository.location(),
                format!("pattern id {max_id} leaves no id to issue"),
            )
        })?;
        writer.next_id = writer.next_id.max(document.next_id).max(after_max);

        let count = document.patterns.len();
        let version = self.current.read().version() + 1;
        self.publish(version, document.patterns);
        Ok(count)
    }

    fn publish(&self, version: u64, patterns: Vec<Pattern>) {
        *self.current.write() = Arc::new(PatternSnapshot::new(version, patterns));
    }
}
