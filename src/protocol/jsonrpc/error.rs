// Copyright (c) 2025 Complaint Detector Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types for the JSON-RPC 2.0 protocol handler.
//!
//! Error codes follow the
//! [JSON-RPC 2.0 specification](https://www.jsonrpc.org/specification#error_object),
//! plus one application code for missing patterns. Errors raised by the
//! detector carry `{detail, kind, client_error}` in their `data` member.

use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::error::DetectorError;

/// JSON-RPC 2.0 error codes used by the detector.
///
/// The error codes from -32768 to -32000 are reserved for pre-defined errors.
/// The remaining codes in the reserved range are available for application-defined errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Parse error (-32700)
    /// Invalid JSON was received by the server.
    ParseError = -32700,

    /// Invalid Request (-32600)
    /// The JSON sent is not a valid Request object.
    InvalidRequest = -32600,

    /// Method not found (-32601)
    MethodNotFound = -32601,

    /// Invalid params (-32602)
    /// Malformed parameters, failed validation or an unknown algorithm.
    InvalidParams = -32602,

    /// Internal error (-32603)
    InternalError = -32603,

    /// Server error (-32000 to -32099)
    /// Used for persistence failures.
    ServerError = -32000,

    /// Not found (-32404)
    /// The referenced pattern does not exist.
    NotFound = -32404,
}

impl ErrorCode {
    /// Returns a string description of the error code.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::ParseError => "Parse error",
            ErrorCode::InvalidRequest => "Invalid Request",
            ErrorCode::MethodNotFound => "Method not found",
            ErrorCode::InvalidParams => "Invalid params",
            ErrorCode::InternalError => "Internal error",
            ErrorCode::ServerError => "Server error",
            ErrorCode::NotFound => "Not found",
        }
    }

    /// Create an ErrorCode from a raw integer value.
    ///
    /// Returns None if the code is not one used by the detector.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -32700 => Some(ErrorCode::ParseError),
            -32600 => Some(ErrorCode::InvalidRequest),
            -32601 => Some(ErrorCode::MethodNotFound),
            -32602 => Some(ErrorCode::InvalidParams),
            -32603 => Some(ErrorCode::InternalError),
            -32404 => Some(ErrorCode::NotFound),
            c if (-32099..=-32000).contains(&c) => Some(ErrorCode::ServerError),
            _ => None,
        }
    }

    /// Returns the integer error code.
    pub fn code(&self) -> i32 {
        *self as i32
    }

    /// Code used to report `error` to the caller.
    pub fn for_detector_error(error: &DetectorError) -> Self {
        match error {
            DetectorError::NotFound(_) => ErrorCode::NotFound,
            DetectorError::Persistence { .. } => ErrorCode::ServerError,
            e if e.is_client_error() => ErrorCode::InvalidParams,
            _ => ErrorCode::InternalError,
        }
    }
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> i32 {
        code as i32
    }
}

/// JSON-RPC 2.0 error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// The error code
    pub code: i32,

    /// A short description of the error
    pub message: String,

    /// Additional information about the error (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcError {
    /// Creates a new JSON-RPC error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data: None,
        }
    }

    /// Creates a new JSON-RPC error with additional data.
    pub fn with_data(code: ErrorCode, message: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Creates a standard parse error.
    pub fn parse_error() -> Self {
        Self::new(
            ErrorCode::ParseError,
            "Parse error: Invalid JSON was received",
        )
    }

    /// Creates a standard invalid request error.
    pub fn invalid_request<S: Into<String>>(msg: S) -> Self {
        Self::new(
            ErrorCode::InvalidRequest,
            format!("Invalid Request: {}", msg.into()),
        )
    }

    /// Creates a standard method not found error.
    pub fn method_not_found<S: Into<String>>(method: S) -> Self {
        Self::new(
            ErrorCode::MethodNotFound,
            format!("Method not found: {}", method.into()),
        )
    }

    /// Creates an invalid params error shaped like a detector validation error.
    pub fn invalid_params<S: Into<String>>(msg: S) -> Self {
        let detail = msg.into();
        Self::with_data(
            ErrorCode::InvalidParams,
            format!("Invalid params: {detail}"),
            json!({
                "detail": detail,
                "kind": "validation_error",
                "client_error": true,
            }),
        )
    }

    /// Creates a standard internal error.
    pub fn internal_error<S: Into<String>>(msg: S) -> Self {
        Self::new(
            ErrorCode::InternalError,
            format!("Internal error: {}", msg.into()),
        )
    }

    /// Detector error kind carried in `data`, if any.
    pub fn kind(&self) -> Option<&str> {
        self.data.as_ref()?.get("kind")?.as_str()
    }
}

impl From<&DetectorError> for JsonRpcError {
    fn from(error: &DetectorError) -> Self {
        let code = ErrorCode::for_detector_error(error);
        Self::with_data(
            code,
            code.description(),
            json!({
                "detail": error.to_string(),
                "kind": error.kind(),
                "client_error": error.is_client_error(),
            }),
        )
    }
}

impl From<DetectorError> for JsonRpcError {
    fn from(error: DetectorError) -> Self {
        Self::from(&error)
    }
}

/// Error type for JSON-RPC framing.
#[derive(Debug, Error)]
pub enum Error {
    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// JSON-RPC protocol error
    #[error("JSON-RPC error: {0}")]
    JsonRpc(String),

    /// Message larger than the configured limit
    #[error("Message of {size} bytes exceeds the limit of {max} bytes")]
    MessageTooLarge {
        /// Size of the rejected message
        size: usize,
        /// Configured limit
        max: usize,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Converts the error to a JSON-RPC error.
    pub fn to_jsonrpc_error(&self) -> JsonRpcError {
        match self {
            Error::Json(_) => JsonRpcError::parse_error(),
            Error::JsonRpc(msg) => JsonRpcError::invalid_request(msg.clone()),
            Error::MessageTooLarge { .. } => JsonRpcError::invalid_request(self.to_string()),
            Error::Io(e) => JsonRpcError::new(ErrorCode::ServerError, e.to_string()),
        }
    }
}

impl From<Error> for DetectorError {
    fn from(err: Error) -> Self {
        match err {
            Error::Io(io) => DetectorError::Io(io),
            other => DetectorError::Transport(other.to_string()),
        }
    }
}

/// Specialized Result type for JSON-RPC operations.
pub type Result<T> = std::result::Result<T, Error>;
