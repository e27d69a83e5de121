//! Overlay table transcoding.
//!
//! The project lists overlays in whatever order the user wrote them; the
//! binary table is always sorted by overlay id. Encoding therefore depends
//! only on the set of overlays, and decoding yields them in id order.

use std::path::Path;

use ncpgen_common::{artifact, BinaryReader};
use ncpgen_xml::Element;
use tracing::debug;
use zerocopy::IntoBytes;

use crate::{CpuTarget, OverlayDescription, OverlayTableRecord, Result};

/// Encode the overlay descriptions of `target` into table records sorted by id.
///
/// A missing container element yields an empty table.
pub fn encode_overlay_table(rom_info: &Element, target: CpuTarget) -> Result<Vec<OverlayTableRecord>> {
    let Some(container) = rom_info.find_child(target.container()) else {
        debug!(%target, "no overlay container, table is empty");
        return Ok(Vec::new());
    };

    let mut records = container
        .children_named(OverlayDescription::ELEMENT)
        .enumerate()
        .map(|(index, element)| {
            let scope = format!("{}/{}[{}]", target.container(), OverlayDescription::ELEMENT, index);
            OverlayDescription::from_element(element, &scope).map(|desc| desc.to_record())
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    records.sort_by_key(|record| record.overlay_id);
    debug!(%target, count = records.len(), "encoded overlay table");
    Ok(records)
}

/// Write table records to `path` as one contiguous blob, replacing any existing file.
pub fn write_overlay_table(path: &Path, records: &[OverlayTableRecord]) -> Result<()> {
    artifact::write(path, records.as_bytes())?;
    Ok(())
}

/// Parse a binary overlay table.
///
/// The length must be a whole multiple of [`OverlayTableRecord::SIZE`].
pub fn parse_overlay_table(data: &[u8], what: &str) -> Result<Vec<OverlayTableRecord>> {
    Ok(BinaryReader::new(data).read_array(what)?)
}

/// Read the binary overlay table at `path`.
pub fn read_overlay_table(path: &Path) -> Result<Vec<OverlayTableRecord>> {
    let data = artifact::read(path)?;
    parse_overlay_table(&data, &path.display().to_string())
}

/// Replace the overlay descriptions of `target` with the given records.
///
/// One `RomOVT` element is built per record, in record order, and all existing
/// `RomOVT` children of the container are swapped out for them in one step.
/// The container is created if the project lacks it and there is at least one
/// record. Returns the number of descriptions written.
pub fn decode_overlay_table(
    rom_info: &mut Element,
    target: CpuTarget,
    records: &[OverlayTableRecord],
) -> usize {
    let elements: Vec<Element> = records
        .iter()
        .map(|record| OverlayDescription::from_record(record).to_element())
        .collect();
    let count = elements.len();

    let container = if elements.is_empty() {
        match rom_info.find_child_mut(target.container()) {
            Some(container) => container,
            None => {
                debug!(%target, "empty table and no overlay container, nothing to restore");
                return 0;
            }
        }
    } else {
        rom_info.child_or_insert(target.container())
    };

    let removed = container.replace_children_named(OverlayDescription::ELEMENT, elements);
    debug!(%target, removed, count, "restored overlay table");
    count
}
