//! Error module for the complaint detector.
//!
//! Every fallible operation in the crate returns [`DetectorResult`]. Errors
//! carry a stable snake_case [`kind`](DetectorError::kind) and a client/server
//! split that the protocol layer uses when building error responses.

use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

use crate::matching::MatcherError;

pub mod config;

/// Result type alias used throughout the complaint detector.
pub type DetectorResult<T> = Result<T, DetectorError>;

/// Core error enum for the complaint detector.
#[derive(Error, Debug)]
pub enum DetectorError {
    /// An algorithm name that is not `kmp` or `boyer_moore`.
    #[error("Invalid algorithm '{0}': expected 'kmp' or 'boyer_moore'")]
    InvalidAlgorithm(String),

    /// A pattern id that does not exist in the store.
    #[error("Pattern {0} not found")]
    NotFound(u64),

    /// A malformed request or an input that fails validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A durable write or read failed. In-memory state is left untouched.
    #[error("Failed to persist {}: {reason}", path.display())]
    Persistence {
        /// File that could not be written or read
        path: PathBuf,
        /// Underlying failure
        reason: String,
    },

    /// Errors raised by the matchers.
    #[error("Matcher error: {0}")]
    Matcher(MatcherError),

    /// KMP and Boyer-Moore disagreed on the same prepared input.
    #[error("KMP and Boyer-Moore reported different detections for the same input")]
    AlgorithmMismatch,

    /// The message channel failed: oversized frame, broken framing or an
    /// unwritable response.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Errors occurring during configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// IO errors that may occur during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/Deserialization errors.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<MatcherError> for DetectorError {
    fn from(err: MatcherError) -> Self {
        match err {
            MatcherError::UnknownAlgorithm(name) => Self::InvalidAlgorithm(name),
            other => Self::Matcher(other),
        }
    }
}

impl DetectorError {
    /// Creates a persistence error for `path`.
    pub fn persistence<P: Into<PathBuf>, S: ToString>(path: P, reason: S) -> Self {
        Self::Persistence {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Stable snake_case name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidAlgorithm(_) => "invalid_algorithm",
            Self::NotFound(_) => "not_found",
            Self::Validation(_) => "validation_error",
            Self::Persistence { .. } => "persistence_failure",
            Self::Matcher(_) => "matcher_error",
            Self::AlgorithmMismatch => "algorithm_mismatch",
            Self::Transport(_) => "transport_error",
            Self::Config(_) => "config_error",
            Self::Io(_) => "io_error",
            Self::Serialization(_) => "serialization_error",
        }
    }

    /// Whether the caller caused the error (bad id, bad algorithm, bad body).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidAlgorithm(_)
                | Self::NotFound(_)
                | Self::Validation(_)
                | Self::Matcher(MatcherError::PatternTooLarge { .. })
        )
    }
}

/// Error reporting structure to provide context and debugging information.
#[derive(Debug)]
pub struct ErrorContext {
    /// The original error that occurred.
    pub error: DetectorError,

    /// The component where the error occurred.
    pub component: String,

    /// Additional context information to help with debugging.
    pub details: Option<String>,

    /// Span trace captured where the error was reported, if available.
    pub trace: Option<String>,
}

impl ErrorContext {
    /// Creates a new error context with the given error and component.
    ///
    /// # Arguments
    ///
    /// * `error` - The error that occurred
    /// * `component` - The component where the error occurred
    pub fn new<S: Into<String>>(error: DetectorError, component: S) -> Self {
        Self {
            error,
            component: component.into(),
            details: None,
            trace: None,
        }
    }

    /// Adds detail information to the error context.
    pub fn with_details<S: Into<String>>(mut self, details: S) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Adds trace information to the error context.
    pub fn with_trace<S: Into<String>>(mut self, trace: S) -> Self {
        self.trace = Some(trace.into());
        self
    }

    /// Captures the current tracing span trace into the context.
    pub fn with_span_trace(self) -> Self {
        let trace = tracing_error::SpanTrace::capture().to_string();
        if trace.is_empty() {
            self
        } else {
            self.with_trace(trace)
        }
    }
}

impl Display for ErrorContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error in {}: {}", self.component, self.error)?;
        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }
        Ok(())
    }
}

/// Error reporter trait for reporting errors to various sinks.
pub trait ErrorReporter: Send + Sync + std::fmt::Debug {
    /// Report an error with context.
    fn report(&self, context: ErrorContext);
}

/// Error reporter that logs errors using the tracing framework.
#[derive(Default, Debug)]
pub struct TracingErrorReporter;

impl ErrorReporter for TracingErrorReporter {
    fn report(&self, context: ErrorContext) {
        tracing::error!(
            error = %context.error,
            kind = context.error.kind(),
            component = %context.component,
            details = context.details.as_deref().unwrap_or("None"),
            trace = context.trace.as_deref().unwrap_or("None"),
            "Error reported"
        );
    }
}

/// Shared handle to the configured error reporter.
pub type SharedErrorReporter = Arc<dyn ErrorReporter>;

/// Returns the default reporter.
pub fn default_reporter() -> SharedErrorReporter {
    Arc::new(TracingErrorReporter)
}
