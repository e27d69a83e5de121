//! Error types for project document loading and saving.

use thiserror::Error;

/// Errors that can occur when reading or writing a project document.
#[derive(Debug, Error)]
pub enum Error {
    /// Common library error (file access).
    #[error("{0}")]
    Common(#[from] ncpgen_common::Error),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// XML parsing or writing error.
    #[error("XML error: {0}")]
    Xml(String),

    /// The document contains no root element.
    #[error("no root element found in XML")]
    NoRoot,

    /// A required element is absent.
    #[error("missing element <{0}>")]
    MissingElement(String),
}

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, Error>;
