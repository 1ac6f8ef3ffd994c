// src/record/text.rs
use crate::security::SecurityGroup;
use crate::tre::Extensions;

#[derive(Debug)]
pub struct TextSubheader {
    pub text_id: String,
    pub attachment_level: u32,
    pub text_datetime: String,
    pub title: String,
    pub classification: String,
    pub security: SecurityGroup,
    pub encrypted: u32,
    pub format: String,
    pub extended: Extensions,
}

impl Default for TextSubheader {
    fn default() -> Self {
        TextSubheader {
            text_id: String::new(),
            attachment_level: 0,
            text_datetime: "00000000000000".to_string(),
            title: String::new(),
            classification: "U".to_string(),
            security: SecurityGroup::new(),
            encrypted: 0,
            format: "STA".to_string(),
            extended: Extensions::new(),
        }
    }
}
