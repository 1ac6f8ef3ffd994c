// src/record/des.rs
use crate::security::SecurityGroup;
use crate::tre::{Extensions, Tre};

/// DESTAG of a segment holding TREs redirected out of another section
pub const TRE_OVERFLOW: &str = "TRE_OVERFLOW";

/// DESTAG values whose payload is the segment's own TRE list
pub const TRE_PAYLOAD_TAGS: [&str; 3] = [TRE_OVERFLOW, "Registered Extensions", "Controlled Extensions"];

/// Data extension subheader
#[derive(Debug)]
pub struct DataExtensionSubheader {
    pub type_id: String,
    pub version: u32,
    pub classification: String,
    pub security: SecurityGroup,
    /// DESOFLW, written only for `TRE_OVERFLOW` segments
    pub overflowed_header_type: String,
    /// DESITEM, written only for `TRE_OVERFLOW` segments
    pub data_item_overflowed: u32,
    /// User-defined subheader fields. Only the handler is used; its size
    /// becomes DESSHL.
    pub subheader_fields: Option<Tre>,
    /// TREs carried as payload by overflow segments
    pub user_defined: Extensions,
}

impl DataExtensionSubheader {
    pub fn new(type_id: impl Into<String>) -> Self {
        DataExtensionSubheader {
            type_id: type_id.into(),
            version: 1,
            classification: "U".to_string(),
            security: SecurityGroup::new(),
            overflowed_header_type: String::new(),
            data_item_overflowed: 0,
            subheader_fields: None,
            user_defined: Extensions::new(),
        }
    }

    /// Empty overflow segment for the given origin section
    pub fn overflow(
        header_type: &str,
        item: u32,
        classification: &str,
        security: SecurityGroup,
    ) -> Self {
        DataExtensionSubheader {
            classification: classification.to_string(),
            security,
            overflowed_header_type: header_type.to_string(),
            data_item_overflowed: item,
            ..Self::new(TRE_OVERFLOW)
        }
    }

    pub fn is_overflow(&self) -> bool {
        self.type_id.trim_end() == TRE_OVERFLOW
    }

    /// Whether the payload is `user_defined` rather than caller-supplied bytes
    pub fn has_tre_payload(&self) -> bool {
        TRE_PAYLOAD_TAGS.contains(&self.type_id.trim_end())
    }
}
