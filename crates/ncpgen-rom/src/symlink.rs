//! Overlay link farm.
//!
//! The compiler emits overlay blobs as `overlay/main_<id>...` and
//! `overlay/sub_<id>...`; the packager expects `overlay9/overlay9_<id>.bin`
//! and `overlay7/overlay7_<id>.bin`. Rather than copying, each expected name
//! is a symbolic link to the compiled blob.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{CpuTarget, Error, Result};

/// Populate `arm9_dir` and `arm7_dir` with links to the overlay blobs in
/// `source_dir`.
///
/// Both destination directories are created if needed. Files whose names do
/// not start with a target prefix are ignored, as are prefixed names without a
/// numeric id. An existing link at a destination path is replaced. Returns the
/// number of links created.
pub fn link_overlays(source_dir: &Path, arm9_dir: &Path, arm7_dir: &Path) -> Result<usize> {
    for dir in [arm9_dir, arm7_dir] {
        fs::create_dir_all(dir).map_err(|source| ncpgen_common::Error::Io {
            action: "create",
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let scan_error = |source: io::Error| ncpgen_common::Error::Io {
        action: "scan",
        path: source_dir.to_path_buf(),
        source,
    };

    let mut linked = 0;
    for entry in fs::read_dir(source_dir).map_err(scan_error)? {
        let path = entry.map_err(scan_error)?.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some((target, rest)) = CpuTarget::ALL
            .into_iter()
            .find_map(|t| name.strip_prefix(t.blob_prefix()).map(|rest| (t, rest)))
        else {
            continue;
        };
        let Some(file_id) = leading_number(rest) else {
            warn!(file = name, "overlay blob has no numeric id, skipping");
            continue;
        };

        let link_dir = match target {
            CpuTarget::Arm9 => arm9_dir,
            CpuTarget::Arm7 => arm7_dir,
        };
        let link = link_dir.join(target.link_name(file_id));
        let original = absolute(&path).map_err(scan_error)?;

        replace_symlink(&original, &link).map_err(|source| Error::Symlink {
            path: link.clone(),
            source,
        })?;
        debug!(link = %link.display(), original = %original.display(), "linked overlay");
        linked += 1;
    }

    Ok(linked)
}

/// Parse the decimal digits at the start of `text`.
fn leading_number(text: &str) -> Option<u32> {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text[..end].parse().ok()
}

fn absolute(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Create a file symlink at `link`, removing whatever link is already there.
fn replace_symlink(original: &Path, link: &Path) -> io::Result<()> {
    if fs::symlink_metadata(link).is_ok() {
        fs::remove_file(link)?;
    }
    create_symlink(original, link)
}

#[cfg(unix)]
fn create_symlink(original: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(original, link)
}

#[cfg(windows)]
fn create_symlink(original: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(original, link)
}

#[cfg(not(any(unix, windows)))]
fn create_symlink(_original: &Path, _link: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "symbolic links are not supported on this platform",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("12.bin"), Some(12));
        assert_eq!(leading_number("0"), Some(0));
        assert_eq!(leading_number("abc"), None);
        assert_eq!(leading_number(""), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_link_overlays() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("overlay");
        let arm9 = dir.path().join("overlay9");
        let arm7 = dir.path().join("overlay7");
        fs::create_dir_all(source.join("main_99")).unwrap();
        fs::write(source.join("main_0.bin"), b"nine").unwrap();
        fs::write(source.join("main_12"), b"nine again").unwrap();
        fs::write(source.join("sub_3.bin"), b"seven").unwrap();
        fs::write(source.join("readme.txt"), b"ignored").unwrap();
        fs::write(source.join("main_x.bin"), b"no id").unwrap();

        assert_eq!(link_overlays(&source, &arm9, &arm7).unwrap(), 3);

        assert_eq!(fs::read(arm9.join("overlay9_0.bin")).unwrap(), b"nine");
        assert_eq!(fs::read(arm9.join("overlay9_12.bin")).unwrap(), b"nine again");
        assert_eq!(fs::read(arm7.join("overlay7_3.bin")).unwrap(), b"seven");
        assert!(fs::symlink_metadata(arm7.join("overlay7_3.bin"))
            .unwrap()
            .file_type()
            .is_symlink());
        assert_eq!(fs::read_dir(&arm9).unwrap().count(), 2);
        assert_eq!(fs::read_dir(&arm7).unwrap().count(), 1);

        // A second run replaces the links instead of failing.
        assert_eq!(link_overlays(&source, &arm9, &arm7).unwrap(), 3);
    }

    #[cfg(unix)]
    #[test]
    fn test_link_failure_reports_privilege_hint() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("overlay");
        let arm9 = dir.path().join("overlay9");
        let arm7 = dir.path().join("overlay7");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("main_0.bin"), b"nine").unwrap();
        // A non-empty directory where the link should go cannot be replaced.
        fs::create_dir_all(arm9.join("overlay9_0.bin")).unwrap();
        fs::write(arm9.join("overlay9_0.bin").join("x"), b"in the way").unwrap();

        let err = link_overlays(&source, &arm9, &arm7).unwrap_err();
        match &err {
            Error::Symlink { path, .. } => assert_eq!(path, &arm9.join("overlay9_0.bin")),
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("elevated privileges"));
    }

    #[test]
    fn test_missing_source_dir() {
        let dir = tempfile::tempdir().unwrap();
        let result = link_overlays(
            &dir.path().join("overlay"),
            &dir.path().join("overlay9"),
            &dir.path().join("overlay7"),
        );
        assert!(matches!(
            result,
            Err(Error::Common(ncpgen_common::Error::Io { action: "scan", .. }))
        ));
    }
}
