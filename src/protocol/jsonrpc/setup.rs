// Copyright (c) 2025 Complaint Detector Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Wiring of the detector methods into a [`JsonRpcHandler`].

use std::sync::Arc;

use crate::error::{default_reporter, SharedErrorReporter};
use crate::protocol::jsonrpc::handler::JsonRpcHandler;
use crate::protocol::jsonrpc::methods::{
    register_analyze_methods, register_compare_methods, register_health_method,
    register_pattern_methods, register_setup_methods, MethodState,
};
use crate::service::DetectorService;

/// Registers every detector method with the handler.
pub fn register_standard_methods(handler: &JsonRpcHandler, state: &MethodState) {
    register_analyze_methods(handler, state);
    register_pattern_methods(handler, state);
    register_setup_methods(handler, state);
    register_compare_methods(handler, state);
    register_health_method(handler, state);
}

/// Creates a handler serving `service`, reporting failures through tracing.
pub fn create_handler(service: Arc<DetectorService>) -> JsonRpcHandler {
    create_handler_with_reporter(service, default_reporter())
}

/// Creates a handler serving `service` with a custom error reporter.
pub fn create_handler_with_reporter(
    service: Arc<DetectorService>,
    reporter: SharedErrorReporter,
) -> JsonRpcHandler {
    let handler = JsonRpcHandler::new();
    register_standard_methods(&handler, &MethodState::new(service, reporter));
    handler
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::in_memory_service;
    use crate::error::{ErrorContext, ErrorReporter};
    use crate::protocol::jsonrpc::types::{Id, Response};
    use crate::store::{JsonFileRepository, PatternStore, SetupConfigStore};
    use crate::detection::{BatchRunner, DetectionEngine};
    use parking_lot::Mutex;
    use serde_json::json;

    async fn call(handler: &JsonRpcHandler, method: &str, params: serde_json::Value) -> Response {
        let request = json!({"jsonrpc": "2.0", "method": method, "params": params, "id": 1});
        let response = handler.handle_request(request.to_string()).await.unwrap();
        serde_json::from_str(&response).unwrap()
    }

    #[derive(Debug, Default)]
    struct RecordingReporter {
        kinds: Mutex<Vec<&'static str>>,
    }

    impl ErrorReporter for RecordingReporter {
        fn report(&self, context: ErrorContext) {
            self.kinds.lock().push(context.error.kind());
        }
    }

    #[test]
    fn test_all_methods_registered() {
        let handler = create_handler(in_memory_service());
        let expected = [
            "analyze",
            "analyze/batch",
            "analyze/pattern",
            "benchmark",
            "compare",
            "health",
            "patterns/create",
            "patterns/delete",
            "patterns/list",
            "patterns/reload",
            "patterns/save",
            "patterns/update",
            "setup/get",
            "setup/set",
        ];
        assert_eq!(handler.method_names(), expected);
    }

    #[tokio::test]
    async fn test_health() {
        let handler = create_handler(in_memory_service());
        let response = call(&handler, "health", json!(null)).await;
        assert_eq!(response.id, Id::Number(1));
        assert_eq!(response.result.unwrap()["status"], "healthy");
    }

    #[tokio::test]
    async fn test_unknown_algorithm_is_invalid_params() {
        let handler = create_handler(in_memory_service());
        let response = call(&handler, "analyze", json!({"text": "hola", "algorithm": "regex"})).await;

        let error = response.error.unwrap();
        assert_eq!(error.code, -32602);
        assert_eq!(error.kind(), Some("invalid_algorithm"));
    }

    #[tokio::test]
    async fn test_missing_pattern_is_not_found() {
        let handler = create_handler(in_memory_service());
        let response = call(&handler, "patterns/delete", json!({"id": 99})).await;
        assert_eq!(response.error.unwrap().code, -32404);
    }

    #[tokio::test]
    async fn test_persistence_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let service = DetectorService::new(
            "complaint-detector".to_string(),
            DetectionEngine::default(),
            BatchRunner::new(&crate::config::BatchConfig::default()).unwrap(),
            PatternStore::new(Box::new(JsonFileRepository::new(blocker.join("patterns.json")))),
            SetupConfigStore::in_memory(),
        );
        let reporter = Arc::new(RecordingReporter::default());
        let handler = create_handler_with_reporter(service.shared(), reporter.clone());

        let response = call(&handler, "patterns/save", json!({})).await;
        let error = response.error.unwrap();
        assert_eq!(error.code, -32000);
        assert_eq!(error.kind(), Some("persistence_failure"));
        assert_eq!(*reporter.kinds.lock(), vec!["persistence_failure"]);

        // Client errors are not reported
        call(&handler, "patterns/delete", json!({"id": 1})).await;
        assert_eq!(reporter.kinds.lock().len(), 1);
    }
}
