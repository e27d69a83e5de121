//! ncpgen - ROM project pre-build and post-build transcoding.
//!
//! Before a build, the header fields and overlay tables of a ROM project file
//! are written out as the binaries the linker reads. After the build, the
//! overlay tables are read back into the project and the binaries removed.
//!
//! # Crates
//!
//! - [`ncpgen_common`] - Common utilities (record reading, artifact I/O)
//! - [`ncpgen_xml`] - Project document model
//! - [`ncpgen_rom`] - Header and overlay table records and codecs
//!
//! # Example
//!
//! ```no_run
//! use ncpgen::prelude::*;
//!
//! let layout = ProjectLayout::new("rom/project.xml")?;
//! run(Direction::PreBuild, &layout)?;
//! // ... link ...
//! run(Direction::PostBuild, &layout)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod layout;
mod pipeline;

// Re-export all sub-crates
pub use ncpgen_common as common;
pub use ncpgen_rom as rom;
pub use ncpgen_xml as xml;

pub use layout::ProjectLayout;
pub use pipeline::{postbuild, prebuild, run, Direction};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{postbuild, prebuild, run, Direction, ProjectLayout};
    pub use ncpgen_rom::{
        CpuTarget, HeaderRecord, OverlayDescription, OverlayFlags, OverlayTableRecord,
    };
    pub use ncpgen_xml::{Document, Element};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
