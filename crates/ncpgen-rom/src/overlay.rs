//! Overlay descriptions and overlay table records.

use std::fmt;
use std::ops::BitOr;

use ncpgen_xml::Element;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::field::{check_width, parse_u32, FieldParseError};

/// Overlay flags, packed into the top byte of the last record word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OverlayFlags(u8);

impl OverlayFlags {
    /// The overlay payload is compressed.
    pub const COMPRESSED: Self = Self(1 << 0);
    /// The overlay carries an authentication code.
    pub const AUTHENTICATION_CODE: Self = Self(1 << 1);

    const ALL_BITS: u8 = Self::COMPRESSED.0 | Self::AUTHENTICATION_CODE.0;

    /// No flags set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// The raw flag byte.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Build from a raw flag byte, dropping unknown bits.
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::ALL_BITS)
    }

    /// Check whether all flags in `other` are set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Parse the `Flag` attribute of an overlay description.
    ///
    /// Each flag is set if its name occurs anywhere in the text.
    pub fn from_attribute(text: &str) -> Self {
        let mut flags = Self::empty();
        if text.contains("Compressed") {
            flags = flags | Self::COMPRESSED;
        }
        if text.contains("AuthenticationCode") {
            flags = flags | Self::AUTHENTICATION_CODE;
        }
        flags
    }
}

impl BitOr for OverlayFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Canonical `Flag` attribute text: space-separated names, `Compressed` first.
impl fmt::Display for OverlayFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = Vec::with_capacity(2);
        if self.contains(Self::COMPRESSED) {
            names.push("Compressed");
        }
        if self.contains(Self::AUTHENTICATION_CODE) {
            names.push("AuthenticationCode");
        }
        f.write_str(&names.join(" "))
    }
}

/// One entry of a binary overlay table, stored in host byte order.
///
/// The last word packs the compressed size into bits 0-23 and the
/// [`OverlayFlags`] into bits 24-31.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct OverlayTableRecord {
    /// Overlay id, unique within a table.
    pub overlay_id: u32,
    /// Load address.
    pub ram_address: u32,
    /// Size of the loaded code and data.
    pub ram_size: u32,
    /// Size of the zero-initialized area following the loaded data.
    pub bss_size: u32,
    /// Start of the static initializer table.
    pub static_init_start: u32,
    /// End of the static initializer table.
    pub static_init_end: u32,
    /// ROM file id; always zero, assigned by the packager.
    pub file_id: u32,
    /// Packed compressed size and flags.
    pub size_and_flags: u32,
}

impl OverlayTableRecord {
    /// Size of one record in bytes.
    pub const SIZE: usize = 32;

    /// Width of the compressed size field in bits.
    pub const COMPRESSED_SIZE_BITS: u32 = 24;

    const COMPRESSED_SIZE_MASK: u32 = (1 << Self::COMPRESSED_SIZE_BITS) - 1;

    /// Pack a compressed size and flags into the last record word.
    ///
    /// Bits of `compressed_size` above [`Self::COMPRESSED_SIZE_BITS`] are dropped.
    pub const fn pack_size_and_flags(compressed_size: u32, flags: OverlayFlags) -> u32 {
        (compressed_size & Self::COMPRESSED_SIZE_MASK)
            | ((flags.bits() as u32) << Self::COMPRESSED_SIZE_BITS)
    }

    /// Compressed size of the overlay payload.
    pub const fn compressed_size(&self) -> u32 {
        self.size_and_flags & Self::COMPRESSED_SIZE_MASK
    }

    /// Overlay flags.
    pub const fn flags(&self) -> OverlayFlags {
        OverlayFlags::from_bits_truncate((self.size_and_flags >> Self::COMPRESSED_SIZE_BITS) as u8)
    }
}

/// An overlay as described by a `RomOVT` element of the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OverlayDescription {
    /// Overlay id (`Id` attribute).
    pub id: u32,
    /// Flags (`Flag` attribute).
    pub flags: OverlayFlags,
    /// `RamAddress`
    pub ram_address: u32,
    /// `RamSize`
    pub ram_size: u32,
    /// `BssSize`
    pub bss_size: u32,
    /// `SinitInit`
    pub static_init_start: u32,
    /// `SinitInitEnd`
    pub static_init_end: u32,
    /// `Compressed`; must fit in 24 bits.
    pub compressed_size: u32,
}

impl OverlayDescription {
    /// Name of an overlay description element.
    pub const ELEMENT: &'static str = "RomOVT";

    /// Read an overlay description element.
    ///
    /// `scope` names the element in error messages.
    pub fn from_element(element: &Element, scope: &str) -> Result<Self, FieldParseError> {
        let attribute = |name: &'static str| {
            parse_u32(element.attribute(name))
                .map_err(|problem| FieldParseError::new(scope, name, problem))
        };
        let field = |name: &'static str| {
            parse_u32(element.child_text(name))
                .map_err(|problem| FieldParseError::new(scope, name, problem))
        };

        Ok(Self {
            id: attribute("Id")?,
            flags: OverlayFlags::from_attribute(element.attribute("Flag").unwrap_or_default()),
            ram_address: field("RamAddress")?,
            ram_size: field("RamSize")?,
            bss_size: field("BssSize")?,
            static_init_start: field("SinitInit")?,
            static_init_end: field("SinitInitEnd")?,
            compressed_size: check_width(
                field("Compressed")?,
                OverlayTableRecord::COMPRESSED_SIZE_BITS,
            )
            .map_err(|problem| FieldParseError::new(scope, "Compressed", problem))?,
        })
    }

    /// Build a `RomOVT` element: `Id` and `Flag` attributes followed by the six
    /// numeric child elements.
    pub fn to_element(&self) -> Element {
        let fields = [
            ("RamAddress", self.ram_address),
            ("RamSize", self.ram_size),
            ("BssSize", self.bss_size),
            ("SinitInit", self.static_init_start),
            ("SinitInitEnd", self.static_init_end),
            ("Compressed", self.compressed_size),
        ];

        Element::new(Self::ELEMENT)
            .attr("Id", self.id.to_string())
            .attr("Flag", self.flags.to_string())
            .children(
                fields
                    .into_iter()
                    .map(|(name, value)| Element::new(name).text(value.to_string())),
            )
    }

    /// Convert to a table record with a zero file id.
    pub fn to_record(&self) -> OverlayTableRecord {
        OverlayTableRecord {
            overlay_id: self.id,
            ram_address: self.ram_address,
            ram_size: self.ram_size,
            bss_size: self.bss_size,
            static_init_start: self.static_init_start,
            static_init_end: self.static_init_end,
            file_id: 0,
            size_and_flags: OverlayTableRecord::pack_size_and_flags(self.compressed_size, self.flags),
        }
    }

    /// Convert from a table record. The file id is not carried over.
    pub fn from_record(record: &OverlayTableRecord) -> Self {
        Self {
            id: record.overlay_id,
            flags: record.flags(),
            ram_address: record.ram_address,
            ram_size: record.ram_size,
            bss_size: record.bss_size,
            static_init_start: record.static_init_start,
            static_init_end: record.static_init_end,
            compressed_size: record.compressed_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldProblem;

    const ALL_FLAGS: [(OverlayFlags, &str); 4] = [
        (OverlayFlags::empty(), ""),
        (OverlayFlags::COMPRESSED, "Compressed"),
        (OverlayFlags::AUTHENTICATION_CODE, "AuthenticationCode"),
        (
            OverlayFlags(OverlayFlags::COMPRESSED.0 | OverlayFlags::AUTHENTICATION_CODE.0),
            "Compressed AuthenticationCode",
        ),
    ];

    fn description() -> OverlayDescription {
        OverlayDescription {
            id: 5,
            flags: OverlayFlags::COMPRESSED,
            ram_address: 0x0207_0000,
            ram_size: 0x2000,
            bss_size: 0x40,
            static_init_start: 0x0207_1FF0,
            static_init_end: 0x0207_1FF4,
            compressed_size: 0x00AB_CDEF,
        }
    }

    #[test]
    fn test_record_size() {
        assert_eq!(std::mem::size_of::<OverlayTableRecord>(), OverlayTableRecord::SIZE);
    }

    #[test]
    fn test_flag_rendering() {
        for (flags, text) in ALL_FLAGS {
            assert_eq!(flags.to_string(), text);
            assert_eq!(OverlayFlags::from_attribute(text), flags);
        }
    }

    #[test]
    fn test_flag_attribute_is_substring_match() {
        assert_eq!(
            OverlayFlags::from_attribute("AuthenticationCode,Compressed"),
            ALL_FLAGS[3].0
        );
        assert_eq!(OverlayFlags::from_attribute("compressed"), OverlayFlags::empty());
    }

    #[test]
    fn test_flag_packing() {
        for (flags, _) in ALL_FLAGS {
            let word = OverlayTableRecord::pack_size_and_flags(0x00FF_FFFF, flags);
            assert_eq!(word >> 24, flags.bits() as u32);

            let record = OverlayTableRecord {
                size_and_flags: word,
                ..Default::default()
            };
            assert_eq!(record.flags(), flags);
            assert_eq!(record.compressed_size(), 0x00FF_FFFF);
        }

        let record = OverlayTableRecord {
            size_and_flags: 0xFC00_0010,
            ..Default::default()
        };
        assert_eq!(record.flags(), OverlayFlags::empty());
        assert_eq!(record.compressed_size(), 0x10);
    }

    #[test]
    fn test_record_layout() {
        let record = description().to_record();
        let words: Vec<u32> = record
            .as_bytes()
            .chunks_exact(4)
            .map(|c| u32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        assert_eq!(
            words,
            [5, 0x0207_0000, 0x2000, 0x40, 0x0207_1FF0, 0x0207_1FF4, 0, 0x01AB_CDEF]
        );
    }

    #[test]
    fn test_record_conversion() {
        let desc = description();
        let mut record = desc.to_record();
        record.file_id = 99;
        assert_eq!(OverlayDescription::from_record(&record), desc);
    }

    #[test]
    fn test_element_conversion() {
        let desc = description();
        let element = desc.to_element();

        assert_eq!(element.attribute("Id"), Some("5"));
        assert_eq!(element.attribute("Flag"), Some("Compressed"));
        let names: Vec<_> = element.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            ["RamAddress", "RamSize", "BssSize", "SinitInit", "SinitInitEnd", "Compressed"]
        );
        assert_eq!(element.child_text("RamAddress"), Some("34013184"));

        assert_eq!(OverlayDescription::from_element(&element, "test").unwrap(), desc);
    }

    #[test]
    fn test_missing_flag_attribute_means_no_flags() {
        let mut element = description().to_element();
        element.attributes.retain(|(k, _)| k != "Flag");
        let desc = OverlayDescription::from_element(&element, "test").unwrap();
        assert_eq!(desc.flags, OverlayFlags::empty());
    }

    #[test]
    fn test_compressed_size_too_wide() {
        let mut element = description().to_element();
        element.set_child_text("Compressed", "16777216");

        let err = OverlayDescription::from_element(&element, "ARM9Ovt/RomOVT[0]").unwrap_err();
        assert_eq!(err.field, "Compressed");
        assert_eq!(err.scope, "ARM9Ovt/RomOVT[0]");
        assert_eq!(err.problem, FieldProblem::TooWide { value: 16_777_216, bits: 24 });
    }

    #[test]
    fn test_missing_id() {
        let mut element = description().to_element();
        element.attributes.retain(|(k, _)| k != "Id");

        let err = OverlayDescription::from_element(&element, "test").unwrap_err();
        assert_eq!(err.field, "Id");
        assert_eq!(err.problem, FieldProblem::Missing);
    }
}
