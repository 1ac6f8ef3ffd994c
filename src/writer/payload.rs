// src/writer/payload.rs
//! Segment payload writers.
//!
//! The orchestrator never encodes payload bytes. It hands the output stream to
//! the writer attached for a segment and measures what comes out.

use std::io::Write;

use bytes::Bytes;

use crate::error::{NitfError, Result};
use crate::record::ImageSubheader;

/// Image parameters taken unchanged from the subheader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageWriteParams {
    pub bits_per_pixel: u32,
    pub num_bands: u32,
    pub extended_bands: u32,
    pub num_rows: u32,
    pub num_cols: u32,
}

impl ImageWriteParams {
    pub fn from_subheader(subheader: &ImageSubheader) -> Self {
        ImageWriteParams {
            bits_per_pixel: subheader.bits_per_pixel,
            num_bands: subheader.num_bands,
            extended_bands: subheader.num_multispectral_bands,
            num_rows: subheader.num_rows,
            num_cols: subheader.num_cols,
        }
    }

    /// NBANDS, or XBANDS when NBANDS is zero
    pub fn band_count(&self) -> u32 {
        if self.num_bands == 0 {
            self.extended_bands
        } else {
            self.num_bands
        }
    }

    /// Uncompressed size in bytes, one whole byte per sample or more
    pub fn expected_len(&self) -> u64 {
        let bytes_per_sample = (self.bits_per_pixel as u64).div_ceil(8);
        self.num_rows as u64 * self.num_cols as u64 * self.band_count() as u64 * bytes_per_sample
    }
}

/// Emits the pixel data of one image segment
pub trait ImagePayloadWriter {
    fn write(&mut self, out: &mut dyn Write, params: &ImageWriteParams) -> Result<()>;
}

/// Emits the payload of a graphic, text or data extension segment
pub trait SegmentPayloadWriter {
    fn write(&mut self, out: &mut dyn Write) -> Result<()>;
}

/// Image payload already blocked and encoded in memory
#[derive(Debug, Clone)]
pub struct BufferImageWriter {
    data: Bytes,
    check_length: bool,
}

impl BufferImageWriter {
    /// Uncompressed pixels; their length is checked against the subheader
    pub fn new(data: impl Into<Bytes>) -> Self {
        BufferImageWriter { data: data.into(), check_length: true }
    }

    /// Compressed or otherwise opaque bytes, written without checks
    pub fn opaque(data: impl Into<Bytes>) -> Self {
        BufferImageWriter { data: data.into(), check_length: false }
    }
}

impl ImagePayloadWriter for BufferImageWriter {
    fn write(&mut self, out: &mut dyn Write, params: &ImageWriteParams) -> Result<()> {
        if self.check_length && self.data.len() as u64 != params.expected_len() {
            return Err(NitfError::InvalidParameter(format!(
                "image holds {} bytes, {}x{}x{} at {} bits needs {}",
                self.data.len(),
                params.num_rows,
                params.num_cols,
                params.band_count(),
                params.bits_per_pixel,
                params.expected_len()
            )));
        }
        out.write_all(&self.data)?;
        Ok(())
    }
}

/// Arbitrary in-memory segment payload
#[derive(Debug, Clone)]
pub struct BufferSegmentWriter {
    data: Bytes,
}

impl BufferSegmentWriter {
    pub fn new(data: impl Into<Bytes>) -> Self {
        BufferSegmentWriter { data: data.into() }
    }
}

impl SegmentPayloadWriter for BufferSegmentWriter {
    fn write(&mut self, out: &mut dyn Write) -> Result<()> {
        out.write_all(&self.data)?;
        Ok(())
    }
}
