// Copyright (c) 2025 Complaint Detector Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! `compare` and `benchmark`.

use serde::{Deserialize, Serialize};

use super::{register_blocking, MethodState};
use crate::detection::benchmark::{self, BulkReport, CaseComparison};
use crate::error::{DetectorError, DetectorResult};
use crate::protocol::jsonrpc::handler::JsonRpcHandler;

/// Iterations used by `benchmark` when the caller gives none.
pub const DEFAULT_BENCHMARK_ITERATIONS: usize = 100;

/// Params of `compare`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareParams {
    /// Text to analyze with both algorithms
    pub text: String,

    /// Accepted for symmetry with `analyze`; validated, then ignored
    #[serde(default)]
    pub algorithm: Option<String>,
}

/// One `(text, pattern)` case of a bulk benchmark.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkCase {
    /// Text to search
    pub text: String,
    /// Pattern to search for
    pub pattern: String,
}

/// Params of `benchmark`: either one `text`/`pattern` pair or `cases`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkParams {
    /// Single case text
    #[serde(default)]
    pub text: Option<String>,

    /// Single case pattern
    #[serde(default)]
    pub pattern: Option<String>,

    /// Bulk cases; take precedence over `text`/`pattern`
    #[serde(default)]
    pub cases: Option<Vec<BenchmarkCase>>,

    /// Iterations averaged per case
    #[serde(default = "default_iterations")]
    pub iterations: usize,
}

fn default_iterations() -> usize {
    DEFAULT_BENCHMARK_ITERATIONS
}

/// Result of `benchmark`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum BenchmarkOutcome {
    /// One case
    Single(CaseComparison),
    /// Many cases
    Bulk(BulkReport),
}

/// Runs the benchmark the params describe.
pub fn run_benchmark(params: BenchmarkParams) -> DetectorResult<BenchmarkOutcome> {
    if let Some(cases) = params.cases {
        let cases: Vec<(String, String)> = cases.into_iter().map(|c| (c.text, c.pattern)).collect();
        return benchmark::bulk(&cases, params.iterations).map(BenchmarkOutcome::Bulk);
    }

    match (params.text, params.pattern) {
        (Some(text), Some(pattern)) => {
            benchmark::compare(&text, &pattern, params.iterations).map(BenchmarkOutcome::Single)
        }
        _ => Err(DetectorError::Validation(
            "benchmark needs either 'cases' or both 'text' and 'pattern'".to_string(),
        )),
    }
}

/// Registers the comparison methods.
pub fn register_compare_methods(handler: &JsonRpcHandler, state: &MethodState) {
    register_blocking(handler, state, "compare", |service, p: CompareParams| {
        if let Some(name) = p.algorithm.as_deref() {
            service.resolve_algorithm(Some(name))?;
        }
        service.compare(&p.text)
    });

    register_blocking(handler, state, "benchmark", |_service, p: BenchmarkParams| {
        run_benchmark(p)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(text: Option<&str>, pattern: Option<&str>) -> BenchmarkParams {
        BenchmarkParams {
            text: text.map(str::to_string),
            pattern: pattern.map(str::to_string),
            cases: None,
            iterations: 2,
        }
    }

    #[test]
    fn test_single_case() {
        let outcome = run_benchmark(params(Some("roto y roto"), Some("roto"))).unwrap();
        match outcome {
            BenchmarkOutcome::Single(case) => assert_eq!(case.kmp.match_count, 2),
            BenchmarkOutcome::Bulk(_) => panic!("expected a single case"),
        }
    }

    #[test]
    fn test_cases_take_precedence() {
        let mut p = params(Some("ignored"), None);
        p.cases = Some(vec![BenchmarkCase {
            text: "demora".to_string(),
            pattern: "demora".to_string(),
        }]);
        assert!(matches!(run_benchmark(p).unwrap(), BenchmarkOutcome::Bulk(r) if r.total_cases == 1));
    }

    #[test]
    fn test_incomplete_params_rejected() {
        let err = run_benchmark(params(Some("texto"), None)).unwrap_err();
        assert!(matches!(err, DetectorError::Validation(_)));
    }

    #[test]
    fn test_iterations_default() {
        let p: BenchmarkParams = serde_json::from_str(r#"{"text": "a", "pattern": "a"}"#).unwrap();
        assert_eq!(p.iterations, DEFAULT_BENCHMARK_ITERATIONS);
    }
}
