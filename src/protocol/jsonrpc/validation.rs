// Copyright (c) 2025 Complaint Detector Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Request validation for the JSON-RPC 2.0 handler.
//!
//! Text that is not JSON yields [`Error::Json`] (a parse error); JSON that is
//! not a well-formed request yields [`Error::JsonRpc`] (an invalid request).
//! Batch elements are checked one by one, so a bad element only costs its
//! own slot in the batch.

use super::error::{Error, Result};
use super::types::{Request, JSONRPC_VERSION};
use serde_json::Value;

/// One batch element: the request, or why it was rejected.
pub type BatchEntry = Result<Request>;

/// Validates a JSON-RPC 2.0 request string.
///
/// Returns an error if validation fails, otherwise returns the parsed request(s).
pub fn validate_request<T: AsRef<str>>(request_str: T) -> Result<ValidatedRequest> {
    let json: Value = serde_json::from_str(request_str.as_ref())?;

    match json {
        Value::Array(elements) => {
            if elements.is_empty() {
                return Err(Error::JsonRpc("Empty batch requests are invalid".to_string()));
            }

            Ok(ValidatedRequest::Batch(
                elements.into_iter().map(validate_batch_element).collect(),
            ))
        }
        json @ Value::Object(_) => Ok(ValidatedRequest::Single(parse_request(json)?)),
        _ => Err(Error::JsonRpc(
            "Invalid JSON-RPC request, must be an object or array".to_string(),
        )),
    }
}

fn validate_batch_element(element: Value) -> BatchEntry {
    if !element.is_object() {
        return Err(Error::JsonRpc("Batch element must be a request object".to_string()));
    }
    parse_request(element)
}

fn parse_request(json: Value) -> Result<Request> {
    let request: Request = serde_json::from_value(json).map_err(|e| Error::JsonRpc(e.to_string()))?;
    validate_single_request(&request)?;
    Ok(request)
}

/// Checks version, method name and params shape of one request.
fn validate_single_request(request: &Request) -> Result<()> {
    if request.jsonrpc != JSONRPC_VERSION {
        return Err(Error::JsonRpc(format!(
            "Invalid JSON-RPC version: {}, must be 2.0",
            request.jsonrpc
        )));
    }

    if request.method.is_empty() {
        return Err(Error::JsonRpc("Method cannot be empty".to_string()));
    }

    // Every detector method takes named params
    if let Some(ref params) = request.params {
        if !params.is_object() && !params.is_null() {
            return Err(Error::JsonRpc("Params must be an object or null".to_string()));
        }
    }

    Ok(())
}

/// The result of validating a JSON-RPC request.
#[derive(Debug)]
pub enum ValidatedRequest {
    /// A single, validated JSON-RPC request
    Single(Request),

    /// A non-empty batch, one entry per element in order
    Batch(Vec<BatchEntry>),
}

impl ValidatedRequest {
    /// Returns true if this is a batch request
    pub fn is_batch(&self) -> bool {
        matches!(self, ValidatedRequest::Batch(_))
    }

    /// Returns the contained single request if this is a single request
    pub fn as_single(&self) -> Option<&Request> {
        match self {
            ValidatedRequest::Single(req) => Some(req),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_valid_request() {
        let validated =
            validate_request(r#"{"jsonrpc": "2.0", "method": "analyze", "params": {"text": "x"}, "id": 1}"#)
                .unwrap();
        assert!(!validated.is_batch());
        assert_eq!(validated.as_single().unwrap().method, "analyze");
    }

    #[test]
    fn test_validate_notification() {
        let validated = validate_request(r#"{"jsonrpc": "2.0", "method": "patterns/save"}"#).unwrap();
        assert!(validated.as_single().unwrap().is_notification());
    }

    #[test]
    fn test_validate_batch() {
        let validated = validate_request(
            r#"[
                {"jsonrpc": "2.0", "method": "health", "id": "1"},
                {"jsonrpc": "2.0", "method": "patterns/list", "id": "2"}
            ]"#,
        )
        .unwrap();
        assert!(validated.is_batch());
    }

    #[test]
    fn test_validate_batch_keeps_bad_elements_separate() {
        let validated = validate_request(
            r#"[
                {"jsonrpc": "2.0", "method": "health", "id": 1},
                {"foo": 1},
                2,
                {"jsonrpc": "1.0", "method": "health", "id": 4}
            ]"#,
        )
        .unwrap();

        let ValidatedRequest::Batch(entries) = validated else {
            panic!("expected a batch");
        };
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].as_ref().unwrap().method, "health");
        assert!(matches!(entries[1], Err(Error::JsonRpc(_))));
        assert!(matches!(&entries[2], Err(Error::JsonRpc(msg)) if msg.contains("request object")));
        assert!(matches!(&entries[3], Err(Error::JsonRpc(msg)) if msg.contains("version")));
    }

    #[test]
    fn test_validate_invalid_version() {
        let err = validate_request(r#"{"jsonrpc": "1.0", "method": "health", "id": 1}"#).unwrap_err();
        match err {
            Error::JsonRpc(msg) => assert!(msg.contains("Invalid JSON-RPC version")),
            e => panic!("Expected JsonRpc error, got {:?}", e),
        }
    }

    #[test]
    fn test_validate_empty_method() {
        let err = validate_request(r#"{"jsonrpc": "2.0", "method": "", "id": 1}"#).unwrap_err();
        assert!(matches!(err, Error::JsonRpc(msg) if msg == "Method cannot be empty"));
    }

    #[test]
    fn test_validate_positional_params_rejected() {
        let err = validate_request(r#"{"jsonrpc": "2.0", "method": "analyze", "params": ["x"], "id": 1}"#)
            .unwrap_err();
        assert!(matches!(err, Error::JsonRpc(msg) if msg.contains("Params must be")));
    }

    #[test]
    fn test_validate_invalid_json() {
        let err = validate_request(r#"{"jsonrpc": "2.0", "method": "analyze", "params": [1, 2,"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_validate_missing_method_is_invalid_request() {
        let err = validate_request(r#"{"jsonrpc": "2.0", "id": 1}"#).unwrap_err();
        assert!(matches!(err, Error::JsonRpc(_)));
    }

    #[test]
    fn test_validate_empty_batch() {
        let err = validate_request("[]").unwrap_err();
        assert!(matches!(err, Error::JsonRpc(msg) if msg.contains("Empty batch requests")));
    }

    #[test]
    fn test_validate_not_object_or_array() {
        let err = validate_request("42").unwrap_err();
        assert!(matches!(err, Error::JsonRpc(msg) if msg.contains("must be an object or array")));
    }
}
