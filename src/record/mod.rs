//! In-memory description of a NITF file.
//!
//! A [`Record`] is fully populated before writing. The writer reads it and
//! never mutates it; only [`Record::unmerge_tres`] reshapes TRE placement, and
//! it runs before the write.

mod des;
mod graphic;
mod header;
mod image;
mod label;
mod overflow;
mod res;
mod text;

pub use des::{DataExtensionSubheader, TRE_OVERFLOW, TRE_PAYLOAD_TAGS};
pub use graphic::GraphicSubheader;
pub use header::FileHeader;
pub use image::{BandInfo, ImageSubheader};
pub use label::LabelSubheader;
pub use overflow::OverflowSource;
pub use res::ReservedExtensionSubheader;
pub use text::TextSubheader;

use crate::error::{NitfError, Result};
use crate::field::widths::{NUMDES, NUMI, NUMRES, NUMS, NUMT, NUMX};
use crate::types::Version;

/// Root value serialized by the writer
#[derive(Debug, Default)]
pub struct Record {
    pub header: FileHeader,
    pub images: Vec<ImageSubheader>,
    pub graphics: Vec<GraphicSubheader>,
    pub labels: Vec<LabelSubheader>,
    pub texts: Vec<TextSubheader>,
    pub data_extensions: Vec<DataExtensionSubheader>,
    pub reserved_extensions: Vec<ReservedExtensionSubheader>,
}

impl Record {
    pub fn new(version: Version) -> Self {
        Record { header: FileHeader::new(version), ..Record::default() }
    }

    /// Version declared by FHDR/FVER
    pub fn version(&self) -> Result<Version> {
        self.header.version()
    }

    /// Check every "number of" count against its three-digit field
    pub fn validate_counts(&self) -> Result<()> {
        let counts = [
            (NUMI, self.images.len()),
            (NUMS, self.graphics.len()),
            (NUMX, self.labels.len()),
            (NUMT, self.texts.len()),
            (NUMDES, self.data_extensions.len()),
            (NUMRES, self.reserved_extensions.len()),
        ];
        for (def, value) in counts {
            if value as u64 > def.max_value() {
                return Err(NitfError::CountOutOfRange { field: def.name, value });
            }
        }
        Ok(())
    }

    pub fn add_image(&mut self, subheader: ImageSubheader) -> usize {
        self.images.push(subheader);
        self.images.len() - 1
    }

    pub fn add_graphic(&mut self, subheader: GraphicSubheader) -> usize {
        self.graphics.push(subheader);
        self.graphics.len() - 1
    }

    pub fn add_text(&mut self, subheader: TextSubheader) -> usize {
        self.texts.push(subheader);
        self.texts.len() - 1
    }

    pub fn add_data_extension(&mut self, subheader: DataExtensionSubheader) -> usize {
        self.data_extensions.push(subheader);
        self.data_extensions.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_are_bounded_by_three_digits() {
        let mut record = Record::new(Version::V21);
        record.texts.extend((0..999).map(|_| TextSubheader::default()));
        assert!(record.validate_counts().is_ok());

        record.add_text(TextSubheader::default());
        match record.validate_counts().unwrap_err() {
            NitfError::CountOutOfRange { field, value } => {
                assert_eq!(field, "NUMT");
                assert_eq!(value, 1000);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn version_follows_header() {
        let mut record = Record::new(Version::V20);
        assert_eq!(record.version().unwrap(), Version::V20);
        record.header.fhdr = "NSIF".into();
        record.header.fver = "01.00".into();
        assert_eq!(record.version().unwrap(), Version::V21);
        record.header.fver = "03.00".into();
        assert!(matches!(record.version(), Err(NitfError::UnsupportedVersion { .. })));
    }
}
