//! Error handling for the Sigil logger
//!
//! Only construction and configuration surface these errors to callers.
//! Once a logger is built, dispatch swallows sink failures.

use thiserror::Error;

/// Main error type for the logging facade
#[derive(Error, Debug)]
pub enum LogError {
    #[error("Configuration error: {field} - {message}")]
    Config { field: String, message: String },

    #[error("I/O operation failed: {operation}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization failed: {context}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Sink lock poisoned: {sink}")]
    SinkPoisoned { sink: String },

    #[error("Logger already initialized")]
    AlreadyInitialized,
}

/// Shorthand for results carrying a [`LogError`].
pub type LogResult<T> = Result<T, LogError>;

impl LogError {
    /// Create a configuration error for a named setting
    pub fn config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            field: field.into(),
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

    /// Create a poisoned-lock error
    pub fn sink_poisoned(sink: impl Into<String>) -> Self {
        Self::SinkPoisoned { sink: sink.into() }
    }
}

impl From<figment::Error> for LogError {
    fn from(err: figment::Error) -> Self {
        let field = if err.path.is_empty() {
            "logs".to_string()
        } else {
            err.path.join(".")
        };
        Self::Config {
            field,
            message: err.kind.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_names_the_field() {
        let err = LogError::config("logs.output", "unknown output 'syslog'");
        assert_eq!(
            err.to_string(),
            "Configuration error: logs.output - unknown output 'syslog'"
        );
    }

    #[test]
    fn io_error_keeps_source() {
        use std::error::Error;

        let err = LogError::io(
            "opening log file",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.source().is_some());
        assert!(err.to_string().contains("opening log file"));
    }
}
