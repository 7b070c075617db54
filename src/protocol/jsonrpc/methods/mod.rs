// Copyright (c) 2025 Complaint Detector Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! JSON-RPC method handlers of the detector.
//!
//! Every method decodes its named params, runs the service call on the
//! blocking pool and maps [`DetectorError`]s to JSON-RPC errors. Server-side
//! failures are also sent to the configured [`ErrorReporter`](crate::error::ErrorReporter).

pub mod analyze;
pub mod compare;
pub mod health;
pub mod patterns;
pub mod setup_config;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::task::JoinError;
use tracing::error;

use super::error::JsonRpcError;
use super::handler::{JsonRpcHandler, MethodContext, MethodResult};
use crate::error::{DetectorError, DetectorResult, ErrorContext, SharedErrorReporter};
use crate::service::DetectorService;

pub use analyze::register_analyze_methods;
pub use compare::register_compare_methods;
pub use health::register_health_method;
pub use patterns::register_pattern_methods;
pub use setup_config::register_setup_methods;

/// State shared by all method handlers.
#[derive(Debug, Clone)]
pub struct MethodState {
    /// The detector service
    pub service: Arc<DetectorService>,

    /// Sink for server-side failures
    pub reporter: SharedErrorReporter,
}

impl MethodState {
    /// Creates method state around a shared service.
    pub fn new(service: Arc<DetectorService>, reporter: SharedErrorReporter) -> Self {
        Self { service, reporter }
    }

    /// Converts a detector error, reporting it when the server is at fault.
    fn rpc_error(&self, context: &MethodContext, err: DetectorError) -> JsonRpcError {
        let rpc = JsonRpcError::from(&err);
        if !err.is_client_error() {
            self.reporter.report(
                ErrorContext::new(err, format!("jsonrpc::{}", context.method)).with_span_trace(),
            );
        }
        rpc
    }

    fn finish<T: Serialize>(
        &self,
        context: &MethodContext,
        outcome: Result<DetectorResult<T>, JoinError>,
    ) -> MethodResult {
        match outcome {
            Ok(Ok(value)) => serde_json::to_value(value)
                .map_err(|e| self.rpc_error(context, DetectorError::Serialization(e))),
            Ok(Err(err)) => Err(self.rpc_error(context, err)),
            Err(join_error) => {
                error!(method = %context.method, error = %join_error, "Method task failed");
                Err(JsonRpcError::internal_error(format!(
                    "method '{}' did not complete",
                    context.method
                )))
            }
        }
    }
}

/// Params of methods that take none.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoParams {}

/// Decodes named params; absent or null params decode as an empty object.
pub(crate) fn parse_params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, JsonRpcError> {
    let value = match params {
        None | Some(Value::Null) => Value::Object(serde_json::Map::new()),
        Some(value) => value,
    };
    serde_json::from_value(value).map_err(|e| JsonRpcError::invalid_params(e.to_string()))
}

/// Registers `method`, running `work` on the blocking pool for each call.
pub(crate) fn register_blocking<P, T, F>(
    handler: &JsonRpcHandler,
    state: &MethodState,
    method: &'static str,
    work: F,
) where
    P: DeserializeOwned + Send + 'static,
    T: Serialize + Send + 'static,
    F: Fn(&DetectorService, P) -> DetectorResult<T> + Send + Sync + 'static,
{
    let state = state.clone();
    let work = Arc::new(work);

    handler.register_method(method, move |params, context| {
        let state = state.clone();
        let work = Arc::clone(&work);
        async move {
            let params: P = parse_params(params)?;
            let service = Arc::clone(&state.service);
            let outcome = tokio::task::spawn_blocking(move || work(&service, params)).await;
            state.finish(&context, outcome)
        }
    });
}
