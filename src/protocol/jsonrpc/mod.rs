// Copyright (c) 2025 Complaint Detector Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! JSON-RPC 2.0 protocol handler for the complaint detector.
//!
//! This module implements the [JSON-RPC 2.0 specification](https://www.jsonrpc.org/specification):
//! request validation, dispatch to registered methods, batches and
//! notifications. The detector's methods live in [`methods`].
//!
//! | Method            | Params                                              |
//! |-------------------|-----------------------------------------------------|
//! | `analyze`         | `{text, algorithm?}`                                |
//! | `analyze/batch`   | `{texts, algorithm?}`                               |
//! | `analyze/pattern` | `{text, pattern, algorithm?}`                       |
//! | `patterns/list`   | none                                                |
//! | `patterns/create` | `{pattern, category, alert_level, alert_message}`   |
//! | `patterns/update` | `{id, pattern, category, alert_level, alert_message}` |
//! | `patterns/delete` | `{id}`                                              |
//! | `patterns/save`   | none                                                |
//! | `patterns/reload` | none                                                |
//! | `setup/get`       | none                                                |
//! | `setup/set`       | `{text_name, pattern_group, algorithm}`             |
//! | `compare`         | `{text}`                                            |
//! | `benchmark`       | `{text, pattern, iterations?}` or `{cases, iterations?}` |
//! | `health`          | none                                                |
//!
//! # Example
//!
//! ```
//! use complaint_detector_lib::protocol::jsonrpc::JsonRpcHandler;
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let handler = JsonRpcHandler::new();
//! handler.register_method("ping", |_params, _ctx| async { Ok(serde_json::json!("pong")) });
//!
//! let response = runtime
//!     .block_on(handler.handle_request(r#"{"jsonrpc":"2.0","method":"ping","id":1}"#))
//!     .unwrap();
//! assert_eq!(response, r#"{"jsonrpc":"2.0","result":"pong","id":1}"#);
//! ```

pub mod error;
pub mod handler;
pub mod methods;
pub mod setup;
pub mod types;
pub mod validation;

#[cfg(test)]
mod tests;

pub use error::{Error, ErrorCode, JsonRpcError, Result};
pub use handler::{JsonRpcHandler, MethodContext, MethodHandler, MethodResult};
pub use methods::MethodState;
pub use setup::{create_handler, create_handler_with_reporter, register_standard_methods};
pub use types::{BatchResponse, Id, Request, Response};
pub use validation::{validate_request, BatchEntry, ValidatedRequest};
