// src/writer/report.rs
use crate::segment::ComponentInfo;

/// Outcome of a successful write
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    /// FL as patched
    pub file_length: u64,
    /// HL as patched
    pub header_length: u64,
    pub images: Vec<ComponentInfo>,
    pub graphics: Vec<ComponentInfo>,
    pub texts: Vec<ComponentInfo>,
    pub data_extensions: Vec<ComponentInfo>,
    /// Non-fatal anomalies found in the record
    pub warnings: Vec<String>,
}

impl WriteReport {
    /// Sum of every measured segment, header excluded
    pub fn segments_length(&self) -> u64 {
        [&self.images, &self.graphics, &self.texts, &self.data_extensions]
            .into_iter()
            .flatten()
            .map(ComponentInfo::total_length)
            .sum()
    }
}
