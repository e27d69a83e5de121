//! Build artifact file handling.
//!
//! Thin wrappers over `std::fs` whose errors carry the offending path, so
//! every failure can be reported as a single line naming the file.

use std::fs;
use std::io;
use std::path::Path;

use crate::{Error, Result};

/// Read a whole artifact into memory.
pub fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| Error::Io {
        action: "load",
        path: path.to_path_buf(),
        source,
    })
}

/// Write `bytes` to `path`, replacing any existing file.
pub fn write(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(|source| Error::Io {
        action: "save",
        path: path.to_path_buf(),
        source,
    })
}

/// Remove a file if it exists.
///
/// Returns `Ok(true)` if a file was removed.
pub fn remove_file(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(Error::Io {
            action: "remove",
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Recursively remove a directory if it exists.
///
/// Returns `Ok(true)` if a directory was removed.
pub fn remove_dir(path: &Path) -> Result<bool> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(Error::Io {
            action: "remove",
            path: path.to_path_buf(),
            source,
        }),
    }
}
