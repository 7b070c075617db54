// Copyright (c) 2025 Complaint Detector Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! `setup/get` and `setup/set`.

use serde::Deserialize;

use super::{register_blocking, MethodState, NoParams};
use crate::matching::Algorithm;
use crate::protocol::jsonrpc::handler::JsonRpcHandler;
use crate::store::SetupConfig;

/// Params of `setup/set`. Every field is required.
#[derive(Debug, Clone, Deserialize)]
pub struct SetSetupParams {
    /// Display name of the analyzed text
    pub text_name: String,

    /// Pattern group shown to the caller
    pub pattern_group: String,

    /// Algorithm used when a request does not name one
    pub algorithm: Algorithm,
}

impl From<SetSetupParams> for SetupConfig {
    fn from(params: SetSetupParams) -> Self {
        Self {
            text_name: params.text_name,
            pattern_group: params.pattern_group,
            algorithm: params.algorithm,
        }
    }
}

/// Registers the setup configuration methods.
pub fn register_setup_methods(handler: &JsonRpcHandler, state: &MethodState) {
    register_blocking(handler, state, "setup/get", |service, _: NoParams| {
        Ok(service.setup().get())
    });

    // Missing fields and unknown algorithm names fail while decoding the params
    register_blocking(handler, state, "setup/set", |service, params: SetSetupParams| {
        service.setup().set(params.into())
    });
}
