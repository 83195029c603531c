//! # Error Types
//!
//! Structured error handling for queue inventory and consumption operations.

use thiserror::Error;

/// Result type for mq-debug operations
pub type Result<T> = std::result::Result<T, MqDebugError>;

/// Errors that can occur while inspecting or consuming queues
#[derive(Error, Debug)]
pub enum MqDebugError {
    /// Database connection or query errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Output stream errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Destination name unknown to the registry
    #[error("Destination not found: {name}")]
    DestinationNotFound { name: String },

    /// Processor name unknown to the processor registry
    #[error("Processor not found: {name}")]
    ProcessorNotFound { name: String },

    /// Failure raised by the consume engine
    #[error("Consumption error: {message}")]
    Consumption { message: String },
}

impl MqDebugError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a destination not found error
    pub fn destination_not_found<S: Into<String>>(name: S) -> Self {
        Self::DestinationNotFound { name: name.into() }
    }

    /// Create a processor not found error
    pub fn processor_not_found<S: Into<String>>(name: S) -> Self {
        Self::ProcessorNotFound { name: name.into() }
    }

    /// Create a consumption error
    pub fn consumption<S: Into<String>>(message: S) -> Self {
        Self::Consumption {
            message: message.into(),
        }
    }
}

impl From<config::ConfigError> for MqDebugError {
    fn from(err: config::ConfigError) -> Self {
        Self::config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MqDebugError::destination_not_found("reports");
        assert_eq!(err.to_string(), "Destination not found: reports");

        let err = MqDebugError::config("table_name must not be empty");
        assert_eq!(
            err.to_string(),
            "Configuration error: table_name must not be empty"
        );
    }

    #[test]
    fn test_config_error_conversion() {
        let err: MqDebugError = config::ConfigError::Message("bad value".to_string()).into();
        assert!(matches!(err, MqDebugError::Configuration { .. }));
        assert!(err.to_string().contains("bad value"));
    }
}
