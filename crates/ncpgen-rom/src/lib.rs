//! Header and overlay table transcoding for dual-CPU ROM projects.
//!
//! A ROM project file describes, under `NDSProjectFile/RomInfo`, the entry and
//! load addresses of both CPUs and one overlay table per CPU. The linker does
//! not read the project file; it reads three fixed-layout binaries instead:
//!
//! - `header.bin` - a [`HeaderRecord`]
//! - `arm9ovt.bin` / `arm7ovt.bin` - arrays of [`OverlayTableRecord`] sorted by
//!   overlay id
//!
//! This crate converts the project elements into those records and back.
//! Records are stored in host byte order with no version tag.
//!
//! # Example
//!
//! ```no_run
//! use ncpgen_rom::{encode_overlay_table, CpuTarget, ROM_INFO_PATH};
//! use ncpgen_xml::Document;
//!
//! let doc = Document::load("rom/project.xml")?;
//! let rom_info = doc.require(ROM_INFO_PATH)?;
//! let records = encode_overlay_table(rom_info, CpuTarget::Arm9)?;
//! println!("{} ARM9 overlays", records.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod field;
mod header;
mod overlay;
mod ovt;
mod symlink;
mod target;

pub use error::{Error, Result};
pub use field::{parse_u32, FieldParseError, FieldProblem};
pub use header::{decode_header, encode_header, HeaderRecord};
pub use overlay::{OverlayDescription, OverlayFlags, OverlayTableRecord};
pub use ovt::{
    decode_overlay_table, encode_overlay_table, parse_overlay_table, read_overlay_table,
    write_overlay_table,
};
pub use symlink::link_overlays;
pub use target::CpuTarget;

/// Element path of the `RomInfo` node all codecs operate on.
pub const ROM_INFO_PATH: &[&str] = &["NDSProjectFile", "RomInfo"];
