// src/lib.rs
//! # nitf-rs
//!
//! A byte-exact writer for NITF (National Imagery Transmission Format) files,
//! versions 2.0 and 2.1 (NSIF 1.0), with a companion reader.
//!
//! ## Features
//!
//! - **Two-pass writing**: the file header goes out with placeholder lengths
//!   which are patched once every segment has been measured
//! - **Version aware**: NITF 2.0 and 2.1 security groups and subheader rules
//! - **Pluggable payloads**: image and segment data come from caller-supplied
//!   writers; TREs are encoded by caller-supplied handlers
//! - **TRE overflow**: oversized TRE sections move into `TRE_OVERFLOW` data
//!   extension segments
//!
//! ## Quick Start
//!
//! ### Writing NITF Files
//!
//! ```rust,no_run
//! use nitf_rs::*;
//!
//! fn main() -> Result<()> {
//!     let mut record = Record::new(Version::V21);
//!     record.header.file_title = "Example".into();
//!     let image = record.add_image(ImageSubheader::mono(100, 100, 8));
//!
//!     let mut writer = NitfWriter::create("output.ntf", record)?;
//!     writer.attach_image_writer(image, Box::new(BufferImageWriter::new(vec![0u8; 10_000])))?;
//!
//!     let report = writer.write()?;
//!     println!("wrote {} bytes", report.file_length);
//!     Ok(())
//! }
//! ```
//!
//! ### Reading NITF Files
//!
//! ```rust,no_run
//! use nitf_rs::*;
//!
//! fn main() -> Result<()> {
//!     let mut reader = NitfReader::open("input.ntf")?;
//!     println!("{} image segment(s)", reader.record().images.len());
//!
//!     let pixels = reader.read_payload(SegmentKind::Image, 0)?;
//!     println!("first image holds {} bytes", pixels.len());
//!     Ok(())
//! }
//! ```

// Modules
pub mod config;
pub mod error;
pub mod field;
pub mod reader;
pub mod record;
pub mod security;
pub mod segment;
pub mod tre;
pub mod types;
pub mod writer;

mod utils;

// Re-export commonly used types at the crate root for convenience
pub use error::{NitfError, Result};

pub use config::WriterOptions;

pub use types::{BinaryByteOrder, Field, FillDirection, SegmentKind, Version, SPACE, ZERO};

pub use field::{pad, FieldDef, FieldReader, FieldWriter};

pub use security::SecurityGroup;

pub use tre::{Extensions, RawTre, Tre, TreHandler};

pub use record::{
    BandInfo, DataExtensionSubheader, FileHeader, GraphicSubheader, ImageSubheader, LabelSubheader,
    OverflowSource, Record, ReservedExtensionSubheader, TextSubheader, TRE_OVERFLOW,
};

pub use segment::ComponentInfo;

// Writer exports
pub use writer::{
    BufferImageWriter, BufferSegmentWriter, ImagePayloadWriter, ImageWriteParams, NitfWriter,
    SegmentPayloadWriter, WriteReport, WriteState,
};

// Reader exports
pub use reader::{NitfReader, SegmentLocation};

// Prelude module for glob imports
pub mod prelude {
    //! Convenient imports for common use cases.
    //!
    //! ```rust
    //! use nitf_rs::prelude::*;
    //! ```

    pub use crate::error::{NitfError, Result};
    pub use crate::reader::NitfReader;
    pub use crate::record::{DataExtensionSubheader, ImageSubheader, Record, TextSubheader};
    pub use crate::tre::Tre;
    pub use crate::types::{SegmentKind, Version};
    pub use crate::writer::{BufferImageWriter, BufferSegmentWriter, NitfWriter};
}

/// The library version
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_version_constants() {
        assert!(!LIBRARY_VERSION.is_empty());
        assert_eq!(Version::V21.header_values(), ("NITF", "02.10"));
        assert_eq!(Version::V20.to_string(), "NITF 2.0");
    }

    #[test]
    fn test_empty_record_header_length() {
        let mut writer = NitfWriter::prepare(Cursor::new(Vec::new()), Record::new(Version::V21)).unwrap();
        let report = writer.write().unwrap();
        assert_eq!(report.header_length, 389);
        assert_eq!(report.file_length, 389);
        assert_eq!(writer.state(), WriteState::Done);
    }

    #[test]
    fn test_v20_header_is_one_byte_shorter() {
        let mut writer = NitfWriter::prepare(Cursor::new(Vec::new()), Record::new(Version::V20)).unwrap();
        assert_eq!(writer.write().unwrap().header_length, 388);
    }

    #[test]
    fn test_second_write_is_rejected() {
        let mut writer = NitfWriter::prepare(Cursor::new(Vec::new()), Record::new(Version::V21)).unwrap();
        writer.write().unwrap();
        assert!(matches!(writer.write(), Err(NitfError::InvalidState { .. })));
    }

    #[test]
    fn test_unsupported_version_fails_before_writing() {
        let mut record = Record::new(Version::V21);
        record.header.fver = "09.99".into();
        let result = NitfWriter::prepare(Cursor::new(Vec::new()), record);
        assert!(matches!(result, Err(NitfError::UnsupportedVersion { .. })));
    }
}
