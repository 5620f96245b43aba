//! Error types for the Kohonen map trainer.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for map training and its I/O adapters.
#[derive(Error, Debug)]
pub enum KohonenError {
    /// Invalid hyperparameters or parameter file.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A feature vector whose length differs from the map's data dimension.
    #[error("Dimension mismatch: expected {expected} features, found {found}")]
    DimensionMismatch {
        /// The map's data dimension.
        expected: usize,
        /// The length of the offending vector.
        found: usize,
    },

    /// Malformed dataset contents.
    #[error("Data error: {0}")]
    Data(String),

    /// Empty input where at least one entry is required.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading or writing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for map operations.
pub type Result<T> = std::result::Result<T, KohonenError>;

impl From<serde_json::Error> for KohonenError {
    fn from(err: serde_json::Error) -> Self {
        KohonenError::Serialization(err.to_string())
    }
}
