//! Error types for body extraction

use thiserror::Error;

/// Errors that can occur while extracting a message body
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No `\r\n\r\n` between the header block and the body
    #[error("Missing header/body separator")]
    MissingSeparator,

    /// A multipart content type without a `boundary=` parameter
    #[error("Missing boundary for {content_type}")]
    MissingBoundary { content_type: String },

    /// Failed to decode attachment content
    #[error("Failed to decode content: {0}")]
    Decode(String),

    /// Invalid extractor configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type for extraction operations
pub type Result<T> = std::result::Result<T, ParseError>;
