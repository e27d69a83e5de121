//! CPU targets.

use std::fmt;

/// One of the two CPUs of the ROM, each with its own overlay table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CpuTarget {
    /// The main CPU.
    Arm9,
    /// The sub CPU.
    Arm7,
}

impl CpuTarget {
    /// Both targets, in processing order.
    pub const ALL: [CpuTarget; 2] = [CpuTarget::Arm9, CpuTarget::Arm7];

    /// Name of the element under `RomInfo` holding this target's overlays.
    pub const fn container(self) -> &'static str {
        match self {
            Self::Arm9 => "ARM9Ovt",
            Self::Arm7 => "ARM7Ovt",
        }
    }

    /// File name of this target's binary overlay table.
    pub const fn table_file_name(self) -> &'static str {
        match self {
            Self::Arm9 => "arm9ovt.bin",
            Self::Arm7 => "arm7ovt.bin",
        }
    }

    /// Name of the directory holding this target's overlay links.
    pub const fn overlay_dir_name(self) -> &'static str {
        match self {
            Self::Arm9 => "overlay9",
            Self::Arm7 => "overlay7",
        }
    }

    /// File name prefix of compiled overlay blobs built for this target.
    pub const fn blob_prefix(self) -> &'static str {
        match self {
            Self::Arm9 => "main_",
            Self::Arm7 => "sub_",
        }
    }

    /// Name of the link pointing at the compiled blob of `file_id`.
    pub fn link_name(self, file_id: u32) -> String {
        match self {
            Self::Arm9 => format!("overlay9_{}.bin", file_id),
            Self::Arm7 => format!("overlay7_{}.bin", file_id),
        }
    }
}

impl fmt::Display for CpuTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arm9 => write!(f, "ARM9"),
            Self::Arm7 => write!(f, "ARM7"),
        }
    }
}
