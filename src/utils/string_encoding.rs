// src/utils/string_encoding.rs
use crate::error::{NitfError, Result};

/// Decode a BCS field, keeping trailing fill
pub fn decode_field(field: &'static str, bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec()).map_err(|_| NitfError::Parse {
        field,
        value: String::from_utf8_lossy(bytes).to_string(),
    })
}

/// Decode a BCS-A field with trailing spaces stripped
pub fn decode_text(field: &'static str, bytes: &[u8]) -> Result<String> {
    Ok(decode_field(field, bytes)?.trim_end_matches(' ').to_string())
}

/// Decode a zero-filled BCS-N field as an unsigned integer
pub fn decode_number(field: &'static str, bytes: &[u8]) -> Result<u64> {
    let text = decode_field(field, bytes)?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse::<u64>().map_err(|_| NitfError::Parse { field, value: text })
}
