// Copyright (c) 2025 Complaint Detector Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! JSON-RPC 2.0 handler implementation.
//!
//! This module provides the core handler for JSON-RPC 2.0 requests, supporting
//! method registration, request dispatching, and asynchronous execution.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, info_span, Instrument};

use super::error::JsonRpcError;
use super::types::{BatchResponse, Id, Request, Response};
use super::validation::{validate_request, BatchEntry, ValidatedRequest};

/// Information about the request a method handler is serving.
#[derive(Debug, Clone)]
pub struct MethodContext {
    /// Invoked method name
    pub method: String,

    /// Request id, `None` for notifications
    pub request_id: Option<Id>,
}

/// Type alias for method handler response.
pub type MethodResult = std::result::Result<Value, JsonRpcError>;

/// Type alias for method handler's future return type.
pub type MethodHandlerFuture = BoxFuture<'static, MethodResult>;

/// Type alias for shared method handlers.
pub type MethodHandlerFn = Arc<dyn MethodHandler + Send + Sync>;

/// Trait for method handlers to implement.
pub trait MethodHandler {
    /// Handle a method call asynchronously.
    fn handle(&self, params: Option<Value>, context: MethodContext) -> MethodHandlerFuture;
}

impl<F, Fut> MethodHandler for F
where
    F: Send + Sync + 'static + Fn(Option<Value>, MethodContext) -> Fut,
    Fut: Future<Output = MethodResult> + Send + 'static,
{
    fn handle(&self, params: Option<Value>, context: MethodContext) -> MethodHandlerFuture {
        Box::pin((self)(params, context))
    }
}

/// Handler for JSON-RPC 2.0 requests.
///
/// Validates incoming messages, dispatches them to registered methods and
/// formats the responses. Clones share the method table.
#[derive(Default, Clone)]
pub struct JsonRpcHandler {
    methods: Arc<RwLock<HashMap<String, MethodHandlerFn>>>,
}

impl std::fmt::Debug for JsonRpcHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonRpcHandler")
            .field("methods", &self.method_names())
            .finish()
    }
}

impl JsonRpcHandler {
    /// Creates a handler with no methods.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a method handler function, replacing any previous one.
    pub fn register_method<F, Fut>(&self, method: impl Into<String>, handler: F)
    where
        F: Send + Sync + 'static + Fn(Option<Value>, MethodContext) -> Fut,
        Fut: Future<Output = MethodResult> + Send + 'static,
    {
        let handler_fn = Arc::new(handler) as MethodHandlerFn;
        self.methods.write().insert(method.into(), handler_fn);
    }

    /// Whether `method` is registered.
    pub fn has_method(&self, method: &str) -> bool {
        self.methods.read().contains_key(method)
    }

    /// Registered method names, sorted.
    pub fn method_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.methods.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Handles one JSON-RPC message (a request or a batch).
    ///
    /// Returns the serialized response, or `None` when the message held only
    /// notifications.
    pub async fn handle_request(&self, request_str: impl AsRef<str>) -> Option<String> {
        match validate_request(request_str) {
            Ok(ValidatedRequest::Single(request)) => {
                let response = self.handle_single_request(request).await?;
                Some(serialize(&response))
            }
            Ok(ValidatedRequest::Batch(entries)) => {
                let responses = self.handle_batch_request(entries).await;
                if responses.is_empty() {
                    return None;
                }
                Some(
                    serde_json::to_string(&BatchResponse { responses })
                        .unwrap_or_else(|_| internal_error_json()),
                )
            }
            Err(err) => Some(self.framing_error(&err)),
        }
    }

    /// Serializes the response to a message that could not be parsed.
    pub fn framing_error(&self, err: &super::error::Error) -> String {
        debug!(error = %err, "Rejected malformed message");
        serialize(&Response::error(Id::Null, err.to_jsonrpc_error()))
    }

    /// Handles a single request. Notifications run but produce no response.
    async fn handle_single_request(&self, request: Request) -> Option<Response> {
        let Request {
            method, params, id, ..
        } = request;
        let context = MethodContext {
            method: method.clone(),
            request_id: id.clone(),
        };

        let result = self.process_method_call(&method, params, context).await;

        let id = id?;
        Some(match result {
            Ok(value) => Response::success(id, value),
            Err(error) => Response::error(id, error),
        })
    }

    /// Handles a batch concurrently; responses keep the request order.
    ///
    /// Rejected elements answer with an invalid request error and a null id.
    async fn handle_batch_request(&self, entries: Vec<BatchEntry>) -> Vec<Response> {
        let futures = entries.into_iter().map(|entry| async move {
            match entry {
                Ok(request) => self.handle_single_request(request).await,
                Err(err) => {
                    debug!(error = %err, "Rejected batch element");
                    Some(Response::error(Id::Null, err.to_jsonrpc_error()))
                }
            }
        });

        futures::future::join_all(futures)
            .await
            .into_iter()
            .flatten()
            .collect()
    }

    /// Processes a method call by dispatching it to the registered handler.
    async fn process_method_call(
        &self,
        method: &str,
        params: Option<Value>,
        context: MethodContext,
    ) -> MethodResult {
        // The guard must be released before awaiting
        let handler = self.methods.read().get(method).cloned();
        let Some(handler) = handler else {
            return Err(JsonRpcError::method_not_found(method));
        };

        let span = match &context.request_id {
            Some(id) => info_span!("rpc", method = %method, id = %id),
            None => info_span!("rpc", method = %method, id = "notification"),
        };
        debug!(method, "Dispatching request");
        handler.handle(params, context).instrument(span).await
    }
}

fn serialize(response: &Response) -> String {
    serde_json::to_string(response).unwrap_or_else(|_| internal_error_json())
}

fn internal_error_json() -> String {
    r#"{"jsonrpc":"2.0","error":{"code":-32603,"message":"Internal error: Error serializing response"},"id":null}"#
        .to_string()
}
