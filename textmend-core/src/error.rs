//! Core error types

use thiserror::Error;

/// Errors produced while building the repair pipeline or its configuration
///
/// Per-item soft failures (an unparseable number next to a currency marker,
/// a date-shaped string whose fields do not resolve to a real date) are not
/// errors; they surface as a `None` classification and the item is left
/// untouched.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration error (dictionary table, embedded defaults)
    #[error("configuration error: {0}")]
    Config(String),

    /// A recognizer pattern failed to compile
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The pattern source text
        pattern: String,
        /// The compilation failure reported by the regex engine
        message: String,
    },

    /// I/O error while reading an external dictionary file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
