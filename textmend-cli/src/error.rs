//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Input file not found or inaccessible
    FileNotFound(String),
    /// Snapshot could not be parsed or has an invalid shape
    InvalidSnapshot(String),
    /// Dictionary configuration error
    ConfigError(String),
    /// Processing error from the core pipeline
    ProcessingError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::InvalidSnapshot(msg) => write!(f, "Invalid tree snapshot: {msg}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::ProcessingError(msg) => write!(f, "Processing error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_error_display() {
        let error = CliError::FileNotFound("tree.json".to_string());
        assert_eq!(error.to_string(), "File not found: tree.json");
    }

    #[test]
    fn test_invalid_snapshot_error_display() {
        let error = CliError::InvalidSnapshot("root must be an element".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid tree snapshot: root must be an element"
        );
    }

    #[test]
    fn test_config_error_display() {
        let error = CliError::ConfigError("missing field 'entries'".to_string());
        assert_eq!(
            error.to_string(),
            "Configuration error: missing field 'entries'"
        );
    }

    #[test]
    fn test_error_trait_implementation() {
        let error = CliError::ProcessingError("pipeline did not settle".to_string());
        let _: &dyn std::error::Error = &error;

        let debug_str = format!("{:?}", error);
        assert!(debug_str.contains("ProcessingError"));
    }
}
