// src/record/header.rs
use crate::error::Result;
use crate::security::SecurityGroup;
use crate::tre::Extensions;
use crate::types::Version;

/// File header values owned by the caller.
///
/// The length fields (FL, HL) and the component-info tables are not part of
/// this struct: they are produced by the writer.
#[derive(Debug)]
pub struct FileHeader {
    pub fhdr: String,
    pub fver: String,
    pub complexity_level: u32,
    pub standard_type: String,
    pub originating_station: String,
    pub file_datetime: String,
    pub file_title: String,
    pub classification: String,
    pub security: SecurityGroup,
    pub copy_number: u32,
    pub number_of_copies: u32,
    pub encrypted: u32,
    /// FBKGC, three raw bytes. NITF 2.0 files do not carry it.
    pub background_color: [u8; 3],
    /// ONAME, 24 characters on 2.1 and 27 on 2.0
    pub originator_name: String,
    pub originator_phone: String,
    pub user_defined: Extensions,
    pub extended: Extensions,
}

impl FileHeader {
    pub fn new(version: Version) -> Self {
        let (fhdr, fver) = version.header_values();
        FileHeader {
            fhdr: fhdr.to_string(),
            fver: fver.to_string(),
            complexity_level: 3,
            standard_type: "BF01".to_string(),
            originating_station: String::new(),
            file_datetime: "00000000000000".to_string(),
            file_title: String::new(),
            classification: "U".to_string(),
            security: SecurityGroup::new(),
            copy_number: 0,
            number_of_copies: 0,
            encrypted: 0,
            background_color: [0; 3],
            originator_name: String::new(),
            originator_phone: String::new(),
            user_defined: Extensions::new(),
            extended: Extensions::new(),
        }
    }

    pub fn version(&self) -> Result<Version> {
        Version::from_header(&self.fhdr, &self.fver)
    }
}

impl Default for FileHeader {
    fn default() -> Self {
        Self::new(Version::V21)
    }
}
