//! Crate-level error handling.
//!
//! Sinks carry their own [`SinkError`]; this module wraps it together with
//! the ambient failure modes (configuration, I/O, serialization) behind one
//! enum and a result alias.

use crate::sink::SinkError;
use thiserror::Error;

/// Main error type for the chronica runtime.
#[derive(Error, Debug)]
pub enum ChronicaError {
    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("I/O operation failed: {operation}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization failed: {context}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("sink operation failed")]
    Sink(#[from] SinkError),

    #[error("validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("internal error: {message}")]
    Internal { message: String },
}

/// Shorthand for Result with ChronicaError.
pub type ChronicaResult<T> = Result<T, ChronicaError>;

impl ChronicaError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an I/O error
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }

    /// Create a serialization error
    pub fn serialization(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            context: context.into(),
            source,
        }
    }

    /// Create a validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Convert from figment errors
impl From<figment::Error> for ChronicaError {
    fn from(err: figment::Error) -> Self {
        ChronicaError::Config {
            message: err.to_string(),
        }
    }
}

/// Convert from std::io errors
impl From<std::io::Error> for ChronicaError {
    fn from(err: std::io::Error) -> Self {
        ChronicaError::io("io_operation", err)
    }
}

/// Convert from serde_json errors
impl From<serde_json::Error> for ChronicaError {
    fn from(err: serde_json::Error) -> Self {
        ChronicaError::serialization("json_operation", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = ChronicaError::config("missing data_dir");
        assert!(config_err.to_string().contains("configuration error"));

        let validation_err = ChronicaError::validation("sink.backend", "unknown backend");
        assert!(validation_err.to_string().contains("sink.backend"));
    }

    #[test]
    fn test_error_chaining() {
        use std::error::Error;

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = ChronicaError::io("reading events", io_err);

        assert!(err.source().is_some());
        assert!(err.to_string().contains("I/O operation failed"));
    }

    #[test]
    fn sink_errors_convert_losslessly() {
        let err: ChronicaError = SinkError::InvalidRecord("message cannot be empty".into()).into();
        assert!(matches!(err, ChronicaError::Sink(SinkError::InvalidRecord(_))));
    }
}
