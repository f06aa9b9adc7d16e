//! Error types specific to PHP analysis.

use language_core::SemanticError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors specific to PHP parsing and classification.
#[derive(Error, Debug)]
pub enum PhpSemanticError {
    /// The tree-sitter tree contains syntax errors (strict mode only)
    #[error("Parse error in '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    /// Classification could not be completed
    #[error("Cannot classify offset {offset} in '{path}': {message}")]
    Classification {
        path: PathBuf,
        offset: u32,
        message: String,
    },

    /// The document does not fit the `u32` offset space
    #[error("Document of {length} bytes is too large to parse")]
    DocumentTooLarge { length: usize },
}

impl From<PhpSemanticError> for SemanticError {
    fn from(err: PhpSemanticError) -> Self {
        match err {
            PhpSemanticError::ParseError { path, message } => {
                SemanticError::ParseError { path, message }
            }
            PhpSemanticError::Classification {
                path,
                offset,
                message,
            } => SemanticError::Classification {
                path,
                offset,
                message,
            },
            PhpSemanticError::DocumentTooLarge { length } => {
                SemanticError::DocumentTooLarge { length }
            }
        }
    }
}
