// src/segment/info.rs

/// Byte accounting for one segment instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComponentInfo {
    pub subheader_length: u64,
    pub data_length: u64,
}

impl ComponentInfo {
    pub fn new(subheader_length: u64, data_length: u64) -> Self {
        ComponentInfo { subheader_length, data_length }
    }

    /// Subheader plus payload
    pub fn total_length(&self) -> u64 {
        self.subheader_length + self.data_length
    }
}
