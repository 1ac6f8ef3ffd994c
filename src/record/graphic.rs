// src/record/graphic.rs
use crate::security::SecurityGroup;
use crate::tre::Extensions;

/// Graphic (CGM symbol) subheader
#[derive(Debug)]
pub struct GraphicSubheader {
    pub graphic_id: String,
    pub name: String,
    pub classification: String,
    pub security: SecurityGroup,
    pub encrypted: u32,
    pub format: String,
    /// SSTRUCT, reserved for future use
    pub structure: u64,
    pub display_level: u32,
    pub attachment_level: u32,
    pub location: String,
    pub first_bound: String,
    pub color: String,
    pub second_bound: String,
    /// SRES2, reserved for future use
    pub reserved: u32,
    pub extended: Extensions,
}

impl Default for GraphicSubheader {
    fn default() -> Self {
        GraphicSubheader {
            graphic_id: String::new(),
            name: String::new(),
            classification: "U".to_string(),
            security: SecurityGroup::new(),
            encrypted: 0,
            format: "C".to_string(),
            structure: 0,
            display_level: 1,
            attachment_level: 0,
            location: "0000000000".to_string(),
            first_bound: "0000000000".to_string(),
            color: "C".to_string(),
            second_bound: "0000000000".to_string(),
            reserved: 0,
            extended: Extensions::new(),
        }
    }
}
