// Copyright (c) 2025 Complaint Detector Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Pattern and setup configuration stores.

pub mod pattern;
pub mod patterns;
pub mod repository;
pub mod setup;

pub use pattern::{AlertLevel, Category, ComplaintTier, Pattern, PatternDraft};
pub use patterns::{PatternSnapshot, PatternStore};
pub use repository::{JsonFileRepository, MemoryRepository, PatternDocument, PatternRepository};
pub use setup::{SetupConfig, SetupConfigStore};
