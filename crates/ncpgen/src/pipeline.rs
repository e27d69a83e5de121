//! Pre-build and post-build passes over a project.

use ncpgen_common::artifact;
use ncpgen_rom::{
    decode_header, decode_overlay_table, encode_header, encode_overlay_table, link_overlays,
    read_overlay_table, write_overlay_table, CpuTarget, Result, ROM_INFO_PATH,
};
use ncpgen_xml::Document;
use tracing::{debug, info};

use crate::ProjectLayout;

/// Which way to transcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Project to binaries, before linking.
    PreBuild,
    /// Binaries back into the project, after linking.
    PostBuild,
}

impl Direction {
    /// Interpret a command-line mode: `0...` is pre-build, anything else post-build.
    pub fn from_mode(mode: &str) -> Self {
        if mode.starts_with('0') {
            Self::PreBuild
        } else {
            Self::PostBuild
        }
    }
}

/// Run one pass over the project at `layout`.
pub fn run(direction: Direction, layout: &ProjectLayout) -> Result<()> {
    match direction {
        Direction::PreBuild => prebuild(layout),
        Direction::PostBuild => postbuild(layout),
    }
}

/// Write `header.bin`, both overlay tables and the overlay link directories.
///
/// The project file is only read.
pub fn prebuild(layout: &ProjectLayout) -> Result<()> {
    let doc = Document::load(&layout.project)?;
    let rom_info = doc.require(ROM_INFO_PATH)?;

    encode_header(rom_info, &layout.header())?;

    for target in CpuTarget::ALL {
        let records = encode_overlay_table(rom_info, target)?;
        let path = layout.overlay_table(target);
        write_overlay_table(&path, &records)?;
        info!(%target, count = records.len(), path = %path.display(), "wrote overlay table");
    }

    let linked = link_overlays(
        &layout.overlay_dir(),
        &layout.link_dir(CpuTarget::Arm9),
        &layout.link_dir(CpuTarget::Arm7),
    )?;
    info!(linked, "linked overlay blobs");

    Ok(())
}

/// Restore both overlay tables into the project, save it, and remove the
/// pre-build artifacts.
///
/// Every artifact is read and validated before the project is touched. The
/// header record is validated but not written back; the project never lost
/// its header fields.
pub fn postbuild(layout: &ProjectLayout) -> Result<()> {
    let mut doc = Document::load(&layout.project)?;

    let header = decode_header(&layout.header())?;
    debug!(?header, "header record is intact");

    let mut tables = Vec::with_capacity(CpuTarget::ALL.len());
    for target in CpuTarget::ALL {
        tables.push((target, read_overlay_table(&layout.overlay_table(target))?));
    }

    let rom_info = doc.require_mut(ROM_INFO_PATH)?;
    for (target, records) in tables {
        let count = decode_overlay_table(rom_info, target, &records);
        info!(%target, count, "restored overlay descriptions");
    }

    doc.save(&layout.project)?;

    artifact::remove_file(&layout.header())?;
    for target in CpuTarget::ALL {
        artifact::remove_file(&layout.overlay_table(target))?;
    }
    for target in CpuTarget::ALL {
        if artifact::remove_dir(&layout.link_dir(target))? {
            debug!(%target, "removed overlay link directory");
        }
    }

    Ok(())
}
