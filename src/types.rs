// src/types.rs
use std::fmt;

use crate::error::{NitfError, Result};

/// NITF file format version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Version {
    /// NITF 2.0 (MIL-STD-2500A)
    V20,
    /// NITF 2.1 / NSIF 1.0 (MIL-STD-2500C)
    V21,
}

impl Version {
    /// Resolve the version from the raw FHDR and FVER header values
    pub fn from_header(fhdr: &str, fver: &str) -> Result<Self> {
        match (fhdr.trim(), fver.trim()) {
            ("NITF", "02.10") | ("NSIF", "01.00") => Ok(Version::V21),
            ("NITF", "02.00") => Ok(Version::V20),
            _ => Err(NitfError::UnsupportedVersion {
                fhdr: fhdr.to_string(),
                fver: fver.to_string(),
            }),
        }
    }

    /// The (FHDR, FVER) pair written for this version
    pub fn header_values(&self) -> (&'static str, &'static str) {
        match self {
            Version::V20 => ("NITF", "02.00"),
            Version::V21 => ("NITF", "02.10"),
        }
    }

    pub fn is_v20(&self) -> bool {
        matches!(self, Version::V20)
    }

    pub fn is_v21(&self) -> bool {
        matches!(self, Version::V21)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Version::V20 => write!(f, "NITF 2.0"),
            Version::V21 => write!(f, "NITF 2.1"),
        }
    }
}

/// Which side of a fixed-width field receives the fill characters.
///
/// `FillLeft` right-aligns the content behind leading fill, `FillRight`
/// left-aligns it ahead of trailing fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillDirection {
    FillLeft,
    FillRight,
}

/// Space fill character used by alphanumeric (BCS-A) fields
pub const SPACE: u8 = b' ';

/// Zero fill character used by numeric (BCS-N) fields
pub const ZERO: u8 = b'0';

/// Byte order applied to binary fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BinaryByteOrder {
    /// Swap 2- and 4-byte fields to big-endian; every other width is
    /// copied as it sits in memory.
    #[default]
    Legacy,
    /// Big-endian for every integer width (1, 2, 4 and 8 bytes).
    Network,
}

/// The segment kinds a NITF file can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Image,
    Graphic,
    Label,
    Text,
    DataExtension,
    ReservedExtension,
}

impl SegmentKind {
    pub fn name(&self) -> &'static str {
        match self {
            SegmentKind::Image => "image",
            SegmentKind::Graphic => "graphic",
            SegmentKind::Label => "label",
            SegmentKind::Text => "text",
            SegmentKind::DataExtension => "data extension",
            SegmentKind::ReservedExtension => "reserved extension",
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value headed for a fixed-width field.
///
/// Text is packed as ASCII and padded; binary content holds the value's
/// in-memory bytes and is byte-swapped according to [`BinaryByteOrder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field<'a> {
    Text(&'a str),
    Binary(&'a [u8]),
}

impl<'a> Field<'a> {
    pub fn len(&self) -> usize {
        match self {
            Field::Text(s) => s.len(),
            Field::Binary(b) => b.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> From<&'a str> for Field<'a> {
    fn from(value: &'a str) -> Self {
        Field::Text(value)
    }
}

impl<'a> From<&'a String> for Field<'a> {
    fn from(value: &'a String) -> Self {
        Field::Text(value.as_str())
    }
}

impl<'a> From<&'a [u8]> for Field<'a> {
    fn from(value: &'a [u8]) -> Self {
        Field::Binary(value)
    }
}
