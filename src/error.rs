// file: src/error.rs
// version: 1.0.0
// guid: 3f1c9a52-8d4e-4b07-9e61-2a7c5d0b8e14

use thiserror::Error;

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, LogError>;

/// Error types for logger configuration and emission
#[derive(Error, Debug)]
pub enum LogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl LogError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        // Arrange
        let err = LogError::config("Unknown level: VERBOSE");

        // Act
        let rendered = err.to_string();

        // Assert
        assert_eq!(rendered, "Configuration error: Unknown level: VERBOSE");
    }

    #[test]
    fn test_io_error_conversion() {
        // Arrange
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");

        // Act
        let err: LogError = io.into();

        // Assert
        assert!(matches!(err, LogError::Io(_)));
        assert!(err.to_string().starts_with("IO error:"));
    }
}
