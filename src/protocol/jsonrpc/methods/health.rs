// Copyright (c) 2025 Complaint Detector Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! `health`.

use super::{register_blocking, MethodState, NoParams};
use crate::protocol::jsonrpc::handler::JsonRpcHandler;

/// Registers the liveness method.
pub fn register_health_method(handler: &JsonRpcHandler, state: &MethodState) {
    register_blocking(handler, state, "health", |service, _: NoParams| {
        Ok(service.health())
    });
}
