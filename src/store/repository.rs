// Copyright (c) 2025 Complaint Detector Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Durable storage behind the pattern store.
//!
//! Files are written atomically: the document goes to a temporary file in the
//! target directory which is then renamed over the target, so readers never
//! observe a partial write.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::pattern::Pattern;
use crate::error::{DetectorError, DetectorResult};

/// On-disk form of the pattern store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PatternDocument {
    /// Next id to issue
    pub next_id: u64,

    /// Patterns in store order
    pub patterns: Vec<Pattern>,
}

/// Storage backend for the pattern store.
#[cfg_attr(test, mockall::automock)]
pub trait PatternRepository: Send + Sync {
    /// Reads the stored document, `None` if nothing was saved yet.
    fn load(&self) -> DetectorResult<Option<PatternDocument>>;

    /// Replaces the stored document.
    fn save(&self, document: &PatternDocument) -> DetectorResult<()>;

    /// Human readable location used in logs.
    fn location(&self) -> String;
}

/// Repository storing the document as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    /// Creates a repository for `path`. Nothing is read until [`load`](PatternRepository::load).
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PatternRepository for JsonFileRepository {
    fn load(&self) -> DetectorResult<Option<PatternDocument>> {
        read_json_optional(&self.path)
    }

    fn save(&self, document: &PatternDocument) -> DetectorResult<()> {
        atomic_write_json(&self.path, document)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Repository keeping the document in memory, used when no file is configured.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    document: Mutex<Option<PatternDocument>>,
}

impl MemoryRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository that already holds `document`.
    pub fn with_document(document: PatternDocument) -> Self {
        Self {
            document: Mutex::new(Some(document)),
        }
    }
}

impl PatternRepository for MemoryRepository {
    fn load(&self) -> DetectorResult<Option<PatternDocument>> {
        Ok(self.document.lock().clone())
    }

    fn save(&self, document: &PatternDocument) -> DetectorResult<()> {
        *self.document.lock() = Some(document.clone());
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

/// Writes data to a file atomically.
///
/// # Errors
///
/// Returns [`DetectorError::Persistence`] if the directory cannot be created
/// or the write or rename fails. The previous file content is then retained.
pub fn atomic_write(path: &Path, data: &[u8]) -> DetectorResult<()> {
    let persistence = |reason: std::io::Error| DetectorError::persistence(path, reason);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(persistence)?;
        }
    }

    // Same directory as the target so the rename never crosses filesystems
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp_file = tempfile::NamedTempFile::new_in(dir).map_err(persistence)?;

    temp_file.write_all(data).map_err(persistence)?;
    temp_file.flush().map_err(persistence)?;
    temp_file.as_file().sync_all().map_err(persistence)?;

    temp_file
        .persist(path)
        .map_err(|e| DetectorError::persistence(path, e.error))?;

    Ok(())
}

/// Writes JSON data to a file atomically.
pub fn atomic_write_json<T: Serialize>(path: &Path, value: &T) -> DetectorResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    atomic_write(path, json.as_bytes())
}

/// Reads JSON from a file, returning `None` if the file doesn't exist.
///
/// # Errors
///
/// Returns [`DetectorError::Persistence`] if the file exists but cannot be
/// read or parsed.
pub fn read_json_optional<T: DeserializeOwned>(path: &Path) -> DetectorResult<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read_to_string(path).map_err(|e| DetectorError::persistence(path, e))?;
    let value = serde_json::from_str(&data).map_err(|e| DetectorError::persistence(path, e))?;
    Ok(Some(value))
}
