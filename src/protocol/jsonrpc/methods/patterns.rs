// Copyright (c) 2025 Complaint Detector Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Pattern store methods: `patterns/list`, `patterns/create`,
//! `patterns/update`, `patterns/delete`, `patterns/save` and `patterns/reload`.

use serde::{Deserialize, Serialize};

use super::{register_blocking, MethodState, NoParams};
use crate::protocol::jsonrpc::handler::JsonRpcHandler;
use crate::store::{Pattern, PatternDraft};

/// Result of `patterns/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternList {
    /// Number of patterns
    pub total_patterns: usize,

    /// Snapshot version the list was read from
    pub version: u64,

    /// Patterns in store order
    pub patterns: Vec<Pattern>,
}

/// Params of `patterns/update`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePatternParams {
    /// Pattern to replace
    pub id: u64,

    /// New values
    #[serde(flatten)]
    pub draft: PatternDraft,
}

/// Params of `patterns/delete`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternIdParams {
    /// Pattern id
    pub id: u64,
}

/// Result of `patterns/delete`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedPattern {
    /// The removed pattern
    pub deleted: Pattern,
}

/// Result of `patterns/save`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveSummary {
    /// Number of patterns written
    pub saved: usize,
}

/// Result of `patterns/reload`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReloadSummary {
    /// Number of patterns loaded
    pub loaded: usize,
}

/// Registers the pattern store methods.
pub fn register_pattern_methods(handler: &JsonRpcHandler, state: &MethodState) {
    register_blocking(handler, state, "patterns/list", |service, _: NoParams| {
        let snapshot = service.patterns().list();
        Ok(PatternList {
            total_patterns: snapshot.len(),
            version: snapshot.version(),
            patterns: snapshot.patterns().to_vec(),
        })
    });

    register_blocking(handler, state, "patterns/create", |service, draft: PatternDraft| {
        service.patterns().create(draft)
    });

    register_blocking(handler, state, "patterns/update", |service, p: UpdatePatternParams| {
        service.patterns().update(p.id, p.draft)
    });

    register_blocking(handler, state, "patterns/delete", |service, p: PatternIdParams| {
        service
            .patterns()
            .delete(p.id)
            .map(|deleted| DeletedPattern { deleted })
    });

    register_blocking(handler, state, "patterns/save", |service, _: NoParams| {
        service.patterns().save().map(|saved| SaveSummary { saved })
    });

    register_blocking(handler, state, "patterns/reload", |service, _: NoParams| {
        service.patterns().reload().map(|loaded| ReloadSummary { loaded })
    });
}
