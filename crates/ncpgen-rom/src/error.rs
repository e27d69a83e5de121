//! Error types for header and overlay table transcoding.

use std::path::PathBuf;

use thiserror::Error;

use crate::FieldParseError;

/// Errors that can occur while transcoding a ROM project.
#[derive(Debug, Error)]
pub enum Error {
    /// Artifact file or record layout error.
    #[error("{0}")]
    Common(#[from] ncpgen_common::Error),

    /// Project document error.
    #[error("{0}")]
    Xml(#[from] ncpgen_xml::Error),

    /// A numeric field of the project could not be parsed.
    #[error("{0}")]
    FieldParse(#[from] FieldParseError),

    /// Creating an overlay symbolic link failed.
    #[error(
        "failed to create symbolic link \"{}\": {source} (are you perhaps missing elevated privileges?)",
        path.display()
    )]
    Symlink {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for transcoding operations.
pub type Result<T> = std::result::Result<T, Error>;
