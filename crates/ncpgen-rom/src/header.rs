//! Minimal ROM header record.
//!
//! The linker only needs the entry points, load addresses and autoload hook
//! offsets of both CPUs, so `header.bin` holds just those six words.

use std::path::Path;

use ncpgen_common::{artifact, BinaryReader};
use ncpgen_xml::Element;
use tracing::debug;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::field::{parse_u32, FieldParseError};
use crate::Result;

/// Binary header record, stored in host byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct HeaderRecord {
    /// ARM9 entry address.
    pub arm9_entry_address: u32,
    /// ARM9 load address.
    pub arm9_ram_address: u32,
    /// ARM7 entry address.
    pub arm7_entry_address: u32,
    /// ARM7 load address.
    pub arm7_ram_address: u32,
    /// Offset of the ARM9 autoload-done hook.
    pub arm9_autoload_hook_offset: u32,
    /// Offset of the ARM7 autoload-done hook.
    pub arm7_autoload_hook_offset: u32,
}

impl HeaderRecord {
    /// Size of the record in bytes.
    pub const SIZE: usize = 24;

    /// Name of the header element under `RomInfo`.
    pub const ELEMENT: &'static str = "Header";

    /// Read the six header fields from a `RomInfo` element.
    ///
    /// The document is not modified.
    pub fn from_rom_info(rom_info: &Element) -> Result<Self> {
        let header = rom_info
            .find_child(Self::ELEMENT)
            .ok_or_else(|| ncpgen_xml::Error::MissingElement(Self::ELEMENT.to_string()))?;

        let field = |name: &'static str| {
            parse_u32(header.child_text(name))
                .map_err(|problem| FieldParseError::new(Self::ELEMENT, name, problem))
        };

        Ok(Self {
            arm9_entry_address: field("MainEntryAddress")?,
            arm9_ram_address: field("MainRamAddress")?,
            arm7_entry_address: field("SubEntryAddress")?,
            arm7_ram_address: field("SubRamAddress")?,
            arm9_autoload_hook_offset: field("MainAutoloadDone")?,
            arm7_autoload_hook_offset: field("SubAutoloadDone")?,
        })
    }

    /// Parse a header record, rejecting any length other than [`Self::SIZE`].
    pub fn parse(data: &[u8]) -> Result<Self> {
        Ok(BinaryReader::new(data).read_exact_struct("header record")?)
    }

    /// Get the raw bytes of this record.
    pub fn to_bytes(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Encode the header fields of `rom_info` and write them to `path`.
pub fn encode_header(rom_info: &Element, path: &Path) -> Result<HeaderRecord> {
    let header = HeaderRecord::from_rom_info(rom_info)?;
    artifact::write(path, header.to_bytes())?;
    debug!(path = %path.display(), ?header, "wrote header record");
    Ok(header)
}

/// Read and validate the header record at `path`.
///
/// The decoded fields are returned but not restored into the project; the
/// header element is never cleared by [`encode_header`], so the document
/// still holds them.
pub fn decode_header(path: &Path) -> Result<HeaderRecord> {
    let data = artifact::read(path)?;
    let header = HeaderRecord::parse(&data)?;
    debug!(path = %path.display(), ?header, "read header record");
    Ok(header)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, FieldProblem};

    fn rom_info(values: [&str; 6]) -> Element {
        let names = [
            "MainEntryAddress",
            "MainRamAddress",
            "SubEntryAddress",
            "SubRamAddress",
            "MainAutoloadDone",
            "SubAutoloadDone",
        ];
        let header = Element::new("Header").children(
            names
                .iter()
                .zip(values)
                .map(|(name, value)| Element::new(*name).text(value)),
        );
        Element::new("RomInfo").child(header)
    }

    #[test]
    fn test_record_size() {
        assert_eq!(std::mem::size_of::<HeaderRecord>(), HeaderRecord::SIZE);
    }

    #[test]
    fn test_field_order() {
        let info = rom_info(["1", "2", "3", "4", "5", "6"]);
        let header = HeaderRecord::from_rom_info(&info).unwrap();

        let words: Vec<u32> = header
            .to_bytes()
            .chunks_exact(4)
            .map(|c| u32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        assert_eq!(words, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_invalid_field_is_named() {
        let info = rom_info(["1", "2", "3", "oops", "5", "6"]);
        let err = HeaderRecord::from_rom_info(&info).unwrap_err();
        match err {
            Error::FieldParse(e) => {
                assert_eq!(e.scope, "Header");
                assert_eq!(e.field, "SubRamAddress");
                assert_eq!(e.problem, FieldProblem::Invalid("oops".into()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_header_element() {
        let err = HeaderRecord::from_rom_info(&Element::new("RomInfo")).unwrap_err();
        assert!(matches!(err, Error::Xml(ncpgen_xml::Error::MissingElement(_))));
    }

    #[test]
    fn test_encode_decode_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("header.bin");
        let info = rom_info(["33556480", "33554432", "58720256", "58720256", "33556756", "4294967295"]);

        let written = encode_header(&info, &path).unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len(), HeaderRecord::SIZE as u64);
        assert_eq!(decode_header(&path).unwrap(), written);
        assert_eq!(written.arm7_autoload_hook_offset, u32::MAX);
    }

    #[test]
    fn test_parse_rejects_wrong_size() {
        for len in [0, 20, 25, 512] {
            let data = vec![0u8; len];
            assert!(
                matches!(
                    HeaderRecord::parse(&data),
                    Err(Error::Common(ncpgen_common::Error::SizeMismatch { .. }))
                ),
                "length {len}"
            );
        }
    }
}
