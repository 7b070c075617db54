// Copyright (c) 2025 Complaint Detector Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! `analyze`, `analyze/batch` and `analyze/pattern`.

use serde::{Deserialize, Serialize};

use super::{register_blocking, MethodState};
use crate::protocol::jsonrpc::handler::JsonRpcHandler;

/// Params of `analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeParams {
    /// Text to analyze
    pub text: String,

    /// `kmp` or `boyer_moore`; the setup algorithm when absent
    #[serde(default)]
    pub algorithm: Option<String>,
}

/// Params of `analyze/batch`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeBatchParams {
    /// Texts to analyze, in order
    pub texts: Vec<String>,

    /// `kmp` or `boyer_moore`; the setup algorithm when absent
    #[serde(default)]
    pub algorithm: Option<String>,
}

/// Params of `analyze/pattern`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzePatternParams {
    /// Text to search
    pub text: String,

    /// Ad-hoc pattern, normalized like stored ones
    pub pattern: String,

    /// `kmp` or `boyer_moore`; the setup algorithm when absent
    #[serde(default)]
    pub algorithm: Option<String>,
}

/// Registers the analysis methods.
pub fn register_analyze_methods(handler: &JsonRpcHandler, state: &MethodState) {
    register_blocking(handler, state, "analyze", |service, p: AnalyzeParams| {
        service.analyze(&p.text, p.algorithm.as_deref())
    });

    register_blocking(handler, state, "analyze/batch", |service, p: AnalyzeBatchParams| {
        service.analyze_batch(&p.texts, p.algorithm.as_deref())
    });

    register_blocking(handler, state, "analyze/pattern", |service, p: AnalyzePatternParams| {
        service.analyze_pattern(&p.text, &p.pattern, p.algorithm.as_deref())
    });
}
