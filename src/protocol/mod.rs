//! Protocol module for the complaint detector.
//!
//! JSON-RPC 2.0 request handling and the line-delimited stdio transport that
//! carries it.

pub mod jsonrpc;
pub mod stdio;
