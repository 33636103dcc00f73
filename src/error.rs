//! Error types for the Retort library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`RetortError`] enum.
//!
//! # Examples
//!
//! ```
//! use retort::error::{RetortError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(RetortError::missing_column("comment"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

use crate::ml::MLError;

/// The main error type for Retort operations.
///
/// It uses the `thiserror` crate for automatic `Error` trait implementation and
/// provides convenient constructor methods for creating specific error types.
#[derive(Error, Debug)]
pub enum RetortError {
    /// I/O errors (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary (model artifact) serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// A required column is absent from an input table
    #[error("Input CSV must contain a '{column}' column")]
    MissingColumn { column: String },

    /// A training row carries a label outside the known category set
    #[error("Unknown label '{label}' on row {row}")]
    InvalidLabel { label: String, row: usize },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Model training / prediction errors
    #[error(transparent)]
    Ml(#[from] MLError),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with RetortError.
pub type Result<T> = std::result::Result<T, RetortError>;

impl RetortError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        RetortError::Analysis(msg.into())
    }

    /// Create a new missing column error.
    pub fn missing_column<S: Into<String>>(column: S) -> Self {
        RetortError::MissingColumn {
            column: column.into(),
        }
    }

    /// Create a new invalid label error.
    pub fn invalid_label<S: Into<String>>(label: S, row: usize) -> Self {
        RetortError::InvalidLabel {
            label: label.into(),
            row,
        }
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        RetortError::Config(msg.into())
    }

    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        RetortError::Serialization(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        RetortError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        RetortError::Other(format!("Invalid argument: {}", msg.into()))
    }
}

impl From<bincode::Error> for RetortError {
    fn from(err: bincode::Error) -> Self {
        RetortError::Serialization(err.to_string())
    }
}
