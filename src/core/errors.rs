//! Custom error types for conversion operations

use thiserror::Error;

/// Conversion-related errors
#[derive(Error, Debug)]
pub enum ConversionError {
    /// Source unreadable or destination unwritable
    #[error("File error: {path} - {message}")]
    FileError {
        path: String,
        message: String,
    },

    /// The conversion capability failed
    #[error("Converter error: {message}")]
    ConverterError {
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
    },

    /// Manifest entry that cannot be resolved under a root
    #[error("Invalid document id: {id:?}")]
    InvalidDocumentId {
        id: String,
    },

    /// A worker task panicked or was cancelled
    #[error("Task error: {message}")]
    TaskError {
        message: String,
    },

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ConversionError {
    /// Build a `FileError` for `path` from an underlying I/O error
    pub fn file(path: &std::path::Path, err: std::io::Error) -> Self {
        ConversionError::FileError {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }

    /// Build a `ConfigError`
    pub fn config(message: impl Into<String>) -> Self {
        ConversionError::ConfigError {
            message: message.into(),
        }
    }
}

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, ConversionError>;
