//! Artifact locations relative to a project file.

use std::io;
use std::path::{Path, PathBuf};

use ncpgen_rom::CpuTarget;

/// Paths of a project file and the build artifacts placed next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    /// Absolute path of the project file.
    pub project: PathBuf,
    /// Directory containing the project file.
    pub root: PathBuf,
}

impl ProjectLayout {
    /// Name of the header record file.
    pub const HEADER_FILE: &'static str = "header.bin";

    /// Name of the directory holding the compiled overlay blobs.
    pub const OVERLAY_DIR: &'static str = "overlay";

    /// Derive the layout for a project file, resolving it against the current
    /// directory if relative.
    pub fn new<P: AsRef<Path>>(project: P) -> io::Result<Self> {
        let project = project.as_ref();
        let project = if project.is_absolute() {
            project.to_path_buf()
        } else {
            std::env::current_dir()?.join(project)
        };
        let root = project
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(Self { project, root })
    }

    /// Path of `header.bin`.
    pub fn header(&self) -> PathBuf {
        self.root.join(Self::HEADER_FILE)
    }

    /// Path of a target's overlay table binary.
    pub fn overlay_table(&self, target: CpuTarget) -> PathBuf {
        self.root.join(target.table_file_name())
    }

    /// Directory of compiled overlay blobs.
    pub fn overlay_dir(&self) -> PathBuf {
        self.root.join(Self::OVERLAY_DIR)
    }

    /// Directory of a target's overlay links.
    pub fn link_dir(&self, target: CpuTarget) -> PathBuf {
        self.root.join(target.overlay_dir_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sibling_paths() {
        let root = std::env::temp_dir().join("rom");
        let layout = ProjectLayout::new(root.join("project.xml")).unwrap();

        assert_eq!(layout.root, root);
        assert_eq!(layout.header(), root.join("header.bin"));
        assert_eq!(layout.overlay_table(CpuTarget::Arm9), root.join("arm9ovt.bin"));
        assert_eq!(layout.overlay_table(CpuTarget::Arm7), root.join("arm7ovt.bin"));
        assert_eq!(layout.overlay_dir(), root.join("overlay"));
        assert_eq!(layout.link_dir(CpuTarget::Arm9), root.join("overlay9"));
        assert_eq!(layout.link_dir(CpuTarget::Arm7), root.join("overlay7"));
    }

    #[test]
    fn test_relative_path_is_resolved() {
        let layout = ProjectLayout::new("project.xml").unwrap();
        assert!(layout.project.is_absolute());
        assert_eq!(layout.root, std::env::current_dir().unwrap());
    }
}
