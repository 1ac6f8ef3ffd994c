// src/record/label.rs
use crate::security::SecurityGroup;
use crate::tre::Extensions;

/// Label subheader, a NITF 2.0 construct.
///
/// Records may hold labels, but the writer never emits label segments: the
/// header always declares zero of them.
#[derive(Debug)]
pub struct LabelSubheader {
    pub label_id: String,
    pub classification: String,
    pub security: SecurityGroup,
    pub encrypted: u32,
    pub font_style: String,
    pub cell_width: u32,
    pub cell_height: u32,
    pub display_level: u32,
    pub attachment_level: u32,
    pub location_row: u32,
    pub location_col: u32,
    /// LTC, raw RGB bytes
    pub text_color: [u8; 3],
    /// LBC, raw RGB bytes
    pub background_color: [u8; 3],
    pub extended: Extensions,
}

impl Default for LabelSubheader {
    fn default() -> Self {
        LabelSubheader {
            label_id: String::new(),
            classification: "U".to_string(),
            security: SecurityGroup::new(),
            encrypted: 0,
            font_style: String::new(),
            cell_width: 0,
            cell_height: 0,
            display_level: 1,
            attachment_level: 0,
            location_row: 0,
            location_col: 0,
            text_color: [0; 3],
            background_color: [0xff; 3],
            extended: Extensions::new(),
        }
    }
}
