//! Error types for offset resolution.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while classifying, parsing or resolving offsets.
#[derive(Error, Debug)]
pub enum SemanticError {
    /// Offset lies past the end of the document
    #[error("Offset {offset} is outside of the document (length {length})")]
    InvalidOffset { offset: u32, length: u32 },

    /// The symbol classifier could not analyze the document
    #[error("Failed to classify offset {offset} in '{path}': {message}")]
    Classification {
        path: PathBuf,
        offset: u32,
        message: String,
    },

    /// File could not be parsed
    #[error("Failed to parse file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    /// File could not be read
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// Language not supported
    #[error("Language '{language}' is not supported by this provider")]
    UnsupportedLanguage { language: String },

    /// Document is longer than a `u32` byte offset can address
    #[error("Document of {length} bytes is too large to address")]
    DocumentTooLarge { length: usize },
}

/// Result type for semantic operations.
pub type SemanticResult<T> = Result<T, SemanticError>;
