//! Error types for the tagger core.
//!
//! Errors fall into three families that callers care about: something was not
//! found, a curated record on disk is corrupt, or the storage layer failed.
//! Validation errors are reported for inbound data that would break a record
//! invariant.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the tagger core.
#[derive(Debug, Error)]
pub enum TaggerError {
    // Lookup errors
    #[error("Dataset not found: {name}")]
    DatasetNotFound { name: String },

    #[error("Image not found: {}", path.display())]
    ImageNotFound { path: PathBuf },

    #[error("Invalid split: {0} (expected 'train' or 'val')")]
    InvalidSplit(String),

    // Curated record errors
    #[error("Corrupt annotation record {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Validation error for {field}: {message}")]
    Validation { field: String, message: String },

    // Image probing
    #[error("Failed to read image dimensions from {}: {message}", path.display())]
    ImageProbe { path: PathBuf, message: String },

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // Transport errors
    #[error("Invalid params: {message}")]
    InvalidParams { message: String },

    #[error("{0}")]
    Other(String),
}

/// Result type alias for tagger operations.
pub type Result<T> = std::result::Result<T, TaggerError>;

impl From<std::io::Error> for TaggerError {
    fn from(err: std::io::Error) -> Self {
        TaggerError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for TaggerError {
    fn from(err: serde_json::Error) -> Self {
        TaggerError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl TaggerError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        TaggerError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Create a validation error for a named field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        TaggerError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// True for the "does not exist" family (dataset or image).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TaggerError::DatasetNotFound { .. } | TaggerError::ImageNotFound { .. }
        )
    }

    /// Convert to a JSON-RPC error code.
    ///
    /// Custom error codes (application-defined, -32000 to -32099):
    /// - -32001: Dataset or image not found
    /// - -32002: Curated record is corrupt
    /// - -32005: Validation error (including an unknown split)
    ///
    /// Everything else maps to the standard codes -32602 (invalid params) and
    /// -32603 (internal error).
    pub fn to_rpc_error_code(&self) -> i32 {
        match self {
            TaggerError::DatasetNotFound { .. } | TaggerError::ImageNotFound { .. } => -32001,

            TaggerError::Parse { .. } => -32002,

            TaggerError::Validation { .. } | TaggerError::InvalidSplit(_) => -32005,

            TaggerError::InvalidParams { .. } => -32602,

            _ => -32603,
        }
    }
}
