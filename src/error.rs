//! Error types for the undocx library.

use std::io;
use thiserror::Error;

/// Result type alias for undocx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document processing.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input buffer was empty.
    #[error("Input buffer is empty")]
    EmptyInput,

    /// The file extension is not handled by any parser.
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    /// Error parsing the OOXML document structure.
    #[error("Document parsing error: {0}")]
    DocxParse(String),

    /// The container is damaged or not a valid zip archive.
    #[error("Corrupted document container: {0}")]
    Corrupted(String),

    /// A required package part is missing from the container.
    #[error("Missing document part: {0}")]
    MissingPart(String),

    /// Byte content could not be decoded as text.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The extracted text exceeds the model's token budget.
    ///
    /// Carries both numbers so callers can offer remediation (truncate,
    /// split, warn) instead of treating this like a malformed document.
    #[error("Text exceeds token budget: {token_count} tokens, model limit is {model_limit}")]
    BudgetExceeded {
        /// Tokens counted in the extracted text
        token_count: u32,
        /// Configured ceiling for the model
        model_limit: u32,
    },

    /// The token-counting collaborator failed.
    #[error("Token counting error: {0}")]
    TokenCount(String),

    /// The sanitized output failed its JSON round-trip self-check.
    ///
    /// This is a defect in the pipeline itself, not a problem with the
    /// input document, and should be reported as a bug.
    #[error("Sanitization self-check failed: {0}")]
    Sanitize(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            zip::result::ZipError::FileNotFound => {
                Error::MissingPart("file not found in archive".to_string())
            }
            _ => Error::Corrupted(err.to_string()),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::DocxParse(err.to_string())
    }
}
