//! Error types for the Exascan library.
//!
//! All errors are represented by the [`ExascanError`] enum. Load-time data
//! errors are fatal to startup; every other variant is recovered at the
//! request boundary.
//!
//! # Examples
//!
//! ```
//! use exascan::error::{ExascanError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(ExascanError::invalid_parameter("limit must be positive"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Exascan operations.
#[derive(Error, Debug)]
pub enum ExascanError {
    /// I/O errors (file operations, network, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed or unnormalizable vector data at load time
    #[error("Data error: {0}")]
    Data(String),

    /// The requested collection does not exist
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    /// Query vector length does not match the collection dimension
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A request or configuration parameter is out of range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The query vector has zero norm and cannot be normalized
    #[error("Query vector has zero norm and cannot be normalized")]
    ZeroVector,

    /// The request body could not be parsed
    #[error("Malformed request body: {0}")]
    MalformedRequest(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with ExascanError.
pub type Result<T> = std::result::Result<T, ExascanError>;

impl ExascanError {
    /// Create a new data error.
    pub fn data<S: Into<String>>(msg: S) -> Self {
        ExascanError::Data(msg.into())
    }

    /// Create a new unknown-collection error.
    pub fn unknown_collection<S: Into<String>>(msg: S) -> Self {
        ExascanError::UnknownCollection(msg.into())
    }

    /// Create a new dimension-mismatch error.
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        ExascanError::DimensionMismatch { expected, actual }
    }

    /// Create a new invalid-parameter error.
    pub fn invalid_parameter<S: Into<String>>(msg: S) -> Self {
        ExascanError::InvalidParameter(msg.into())
    }

    /// Create a new malformed-request error.
    pub fn malformed_request<S: Into<String>>(msg: S) -> Self {
        ExascanError::MalformedRequest(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        ExascanError::Other(msg.into())
    }

    /// Whether this error is fatal to startup rather than recoverable
    /// at the request boundary.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ExascanError::Data(_) | ExascanError::Io(_))
    }
}
