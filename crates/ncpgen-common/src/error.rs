//! Error types for ncpgen-common.

use std::path::PathBuf;

use thiserror::Error;

/// Common error type for ncpgen operations.
#[derive(Debug, Error)]
pub enum Error {
    /// End of buffer reached while reading.
    #[error("unexpected end of buffer: needed {needed} bytes but only {available} available")]
    UnexpectedEof { needed: usize, available: usize },

    /// A buffer did not have the size its record layout requires.
    #[error("size mismatch in {what}: {actual} bytes is not {expected}")]
    SizeMismatch {
        what: String,
        expected: String,
        actual: usize,
    },

    /// I/O error on a specific file.
    #[error("failed to {action} \"{}\": {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
