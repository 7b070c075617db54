//! Complaint Detector Library
//!
//! Detects a configurable library of literal complaint markers in Spanish
//! texts, classifies every occurrence by category and alert level, and
//! reports the matches with timing information.
//!
//! # Architecture
//!
//! - [`matching`]: KMP and Boyer-Moore exact matchers over characters
//! - [`normalize`]: the normalization applied to texts and patterns
//! - [`detection`]: multi-pattern analysis, batches, algorithm comparison
//! - [`store`]: the pattern store and the setup configuration store
//! - [`service`]: the facade transports talk to
//! - [`protocol`]: JSON-RPC 2.0 over line-delimited stdio
//!
//! # Example
//!
//! ```
//! use complaint_detector_lib::detection::DetectionEngine;
//! use complaint_detector_lib::matching::Algorithm;
//! use complaint_detector_lib::store::{AlertLevel, MemoryRepository, PatternDraft, PatternStore};
//!
//! let store = PatternStore::new(Box::new(MemoryRepository::new()));
//! store.create(PatternDraft::new("no funciona", "producto_no_funcional", AlertLevel::High, "Producto no funcional"))?;
//!
//! let engine = DetectionEngine::default();
//! let result = engine.analyze("El equipo NO FUNCIONA.", store.list().patterns(), Algorithm::Kmp)?;
//! assert!(result.has_complaints);
//! assert_eq!(result.detections[0].positions, vec![10]);
//! # Ok::<(), complaint_detector_lib::error::DetectorError>(())
//! ```

pub mod config;
pub mod detection;
pub mod error;
pub mod matching;
pub mod normalize;
pub mod protocol;
pub mod service;
pub mod store;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

pub use service::{DetectorService, HealthStatus};

use config::LogConfig;
use error::config::ConfigError;
use error::DetectorResult;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Version information for the complaint detector.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Installs the global tracing subscriber.
///
/// Logs go to stderr since stdout carries protocol responses. `RUST_LOG`
/// takes precedence over the configured level. Span traces are recorded for
/// error reports.
///
/// # Errors
///
/// Returns a configuration error if a subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> DetectorResult<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let json_layer = config.json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_file(config.source_location)
            .with_line_number(config.source_location)
            .with_thread_names(true)
    });
    let text_layer = (!config.json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_file(config.source_location)
            .with_line_number(config.source_location)
            .with_thread_names(true)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .with(tracing_error::ErrorLayer::default())
        .try_init()
        .map_err(|e| {
            ConfigError::Startup {
                component: "tracing subscriber",
                reason: e.to_string(),
            }
            .into()
        })
}
