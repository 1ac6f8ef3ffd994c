// src/field/reader.rs
use std::io::Read;

use crate::error::Result;
use crate::field::widths::FieldDef;
use crate::types::BinaryByteOrder;
use crate::utils::{decode_field, decode_number, decode_text, from_disk_order};

/// Reads fixed-width fields back from a stream
pub struct FieldReader<'a, R: Read + ?Sized> {
    input: &'a mut R,
    byte_order: BinaryByteOrder,
}

impl<'a, R: Read + ?Sized> FieldReader<'a, R> {
    pub fn new(input: &'a mut R) -> Self {
        Self::with_byte_order(input, BinaryByteOrder::Legacy)
    }

    pub fn with_byte_order(input: &'a mut R, byte_order: BinaryByteOrder) -> Self {
        FieldReader { input, byte_order }
    }

    pub fn raw(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        self.input.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Alphanumeric field, trailing fill removed
    pub fn text(&mut self, def: FieldDef) -> Result<String> {
        let bytes = self.raw(def.width)?;
        decode_text(def.name, &bytes)
    }

    /// Field content exactly as stored
    pub fn verbatim(&mut self, def: FieldDef) -> Result<String> {
        let bytes = self.raw(def.width)?;
        decode_field(def.name, &bytes)
    }

    pub fn number(&mut self, def: FieldDef) -> Result<u64> {
        let bytes = self.raw(def.width)?;
        decode_number(def.name, &bytes)
    }

    pub fn number_u32(&mut self, def: FieldDef) -> Result<u32> {
        Ok(self.number(def)? as u32)
    }

    pub fn binary(&mut self, def: FieldDef) -> Result<Vec<u8>> {
        let bytes = self.raw(def.width)?;
        Ok(from_disk_order(&bytes, self.byte_order))
    }
}
