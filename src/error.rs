//! Error types for the catnb library.
//!
//! All failures are represented by the [`CatnbError`] enum. Classification
//! either succeeds with a complete result or fails with one of these errors;
//! nothing is logged or swallowed on the way up.
//!
//! # Examples
//!
//! ```
//! use catnb::error::{CatnbError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(CatnbError::config("attribute list is empty"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for catnb operations.
#[derive(Error, Debug)]
pub enum CatnbError {
    /// A query or training row does not have the configured number of features.
    #[error("Schema mismatch in {context}: expected {expected} values, found {found}")]
    SchemaMismatch {
        context: String,
        expected: usize,
        found: usize,
    },

    /// A training row carries a label outside `[0, class_count)`.
    #[error("Invalid label {label}: labels must lie in [0, {class_count})")]
    InvalidLabel { label: i64, class_count: usize },

    /// The total evidence across all classes is zero.
    #[error("Degenerate model: total evidence across all classes is zero")]
    DegenerateModel,

    /// The classifier was used before any training data was loaded.
    #[error("Classifier is not ready: no training data loaded")]
    NotReady,

    /// A training set must contain at least one row.
    #[error("Training set is empty")]
    EmptyTrainingSet,

    /// Model configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Parse errors (labels, query text, etc.)
    #[error("Parse error: {0}")]
    Parse(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Delimited text errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with CatnbError.
pub type Result<T> = std::result::Result<T, CatnbError>;

impl CatnbError {
    /// Create a new schema mismatch error.
    pub fn schema_mismatch<S: Into<String>>(context: S, expected: usize, found: usize) -> Self {
        CatnbError::SchemaMismatch {
            context: context.into(),
            expected,
            found,
        }
    }

    /// Create a new invalid label error.
    pub fn invalid_label(label: i64, class_count: usize) -> Self {
        CatnbError::InvalidLabel { label, class_count }
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        CatnbError::Config(msg.into())
    }

    /// Create a new parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        CatnbError::Parse(msg.into())
    }
}
