//! Crate-internal test suites.
//!
//! Unit tests live next to the code they cover. The suites here exercise
//! configuration loading, error mapping and a few cross-module flows, and
//! share the fixtures in [`test_utils`].

pub mod config_tests;
pub mod test_utils;

pub use test_utils::{
    in_memory_service, sample_drafts, spanish_text_strategy, TestFixture,
};
