//! Error types for the normalizer library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for normalizer operations.
///
/// Only conditions that must stop a run live here. Statistical non-findings
/// and recoverable structural mismatches are reported as
/// [`Warning`](crate::Warning)s instead.
#[derive(Debug, Error)]
pub enum NormalizerError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Empty file or no data to analyze.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Two columns share a header name.
    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    /// Malformed configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A loaded configuration lacks a required top-level key.
    #[error("Config '{path}' missing required key: {key}")]
    MissingConfigKey { path: PathBuf, key: String },

    /// A functional dependency violates its structural invariants.
    #[error("Invalid functional dependency: {0}")]
    InvalidDependency(String),

    /// The requested target normal form is not supported.
    #[error("Unsupported target: {0}. Use 3NF or BCNF.")]
    UnsupportedTarget(String),

    /// Strict replay found columns missing from the input.
    #[error("Strict mode: input is missing columns {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    /// Error saving or loading an artifact.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl NormalizerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        NormalizerError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for normalizer operations.
pub type Result<T> = std::result::Result<T, NormalizerError>;
