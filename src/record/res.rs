// src/record/res.rs
use bytes::Bytes;

use crate::security::SecurityGroup;

/// Reserved extension subheader. Parsed by the reader; the writer rejects it.
#[derive(Debug, Clone)]
pub struct ReservedExtensionSubheader {
    pub type_id: String,
    pub version: u32,
    pub classification: String,
    pub security: SecurityGroup,
    pub subheader_fields: Bytes,
}

impl ReservedExtensionSubheader {
    pub fn new(type_id: impl Into<String>) -> Self {
        ReservedExtensionSubheader {
            type_id: type_id.into(),
            version: 1,
            classification: "U".to_string(),
            security: SecurityGroup::new(),
            subheader_fields: Bytes::new(),
        }
    }
}
