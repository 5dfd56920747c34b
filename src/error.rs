//! Error handling for the AlgoVis-RS engine
//!
//! This module defines the crate-wide error type and a Result alias used by
//! the runner, the pipeline, the sinks and every algorithm unit.
//!
//! Errors are never recovered locally: whatever an algorithm, sink or
//! factory returns is handed back to the caller of `execute` unchanged.
//! Use [`EngineError::is_cancelled`] to tell a cooperative cancellation
//! apart from an ordinary failure.

use thiserror::Error;

/// Main error type for AlgoVis-RS operations
#[derive(Error, Debug)]
pub enum EngineError {
    /// A required argument was blank or otherwise unusable
    #[error("Invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// An internal engine invariant was broken (cloner or factory produced nothing)
    #[error("Invariant violated: {0}")]
    Invariant(String),

    /// No descriptor is registered under the requested id
    #[error("Unknown algorithm id: {0}")]
    UnknownAlgorithm(String),

    /// Two descriptors share the same id
    #[error("Duplicate algorithm id: {0}")]
    DuplicateId(String),

    /// The execution was cancelled through its cancel signal
    #[error("Execution cancelled")]
    Cancelled,

    /// A state mutation addressed a slot outside the collection
    #[error("Index {index} out of range for `{name}` (length {len})")]
    IndexOutOfRange {
        name: &'static str,
        index: usize,
        len: usize,
    },

    /// A signed index was negative where only non-negative indices are allowed
    #[error("Index `{name}` must be non-negative (got {value})")]
    NegativeIndex { name: &'static str, value: i64 },

    /// Failure specific to one algorithm's domain
    #[error(transparent)]
    Algorithm(#[from] AlgorithmError),

    /// Errors related to channel communication
    #[error("Channel error: {0}")]
    Channel(String),

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failures raised by external collaborators (sinks, factories)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EngineError {
    /// True when this error is the cancellation outcome.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, EngineError::Cancelled)
    }

    /// Shorthand for [`EngineError::InvalidArgument`].
    pub fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        EngineError::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Serialization(err.to_string())
    }
}

/// Domain failures reported by individual algorithm units.
///
/// Kept separate from [`EngineError`] so callers can match on the exact
/// algorithm-level reason without string inspection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlgorithmError {
    /// Digit-based sorts only handle non-negative keys
    #[error("{algorithm} supports non-negative integers only (found {value})")]
    NegativeValue { algorithm: &'static str, value: i32 },

    /// The bucket range computed from the input cannot be allocated
    #[error("{algorithm} computed an invalid value range [{min}, {max}]")]
    InvalidRange {
        algorithm: &'static str,
        min: i64,
        max: i64,
    },

    /// The algorithm requires non-decreasing input
    #[error("{algorithm} requires input sorted in non-decreasing order")]
    UnsortedInput { algorithm: &'static str },
}

/// Result type alias for AlgoVis-RS operations
pub type Result<T> = std::result::Result<T, EngineError>;
