// src/field/packer.rs
use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

use crate::error::{NitfError, Result};
use crate::field::widths::FieldDef;
use crate::types::{BinaryByteOrder, Field, FillDirection, SPACE, ZERO};
use crate::utils::to_disk_order;

/// Pad `value` to exactly `width` bytes.
///
/// Content is never truncated: a value longer than `width` is a caller
/// error and reported as [`NitfError::FieldOverflow`].
pub fn pad(value: &[u8], width: usize, fill: u8, direction: FillDirection) -> Result<Vec<u8>> {
    pad_field("value", value, width, fill, direction)
}

fn pad_field(
    field: &'static str,
    value: &[u8],
    width: usize,
    fill: u8,
    direction: FillDirection,
) -> Result<Vec<u8>> {
    if value.len() > width {
        return Err(NitfError::FieldOverflow { field, width, len: value.len() });
    }

    let mut out = Vec::with_capacity(width);
    match direction {
        FillDirection::FillLeft => {
            out.resize(width - value.len(), fill);
            out.extend_from_slice(value);
        }
        FillDirection::FillRight => {
            out.extend_from_slice(value);
            out.resize(width, fill);
        }
    }
    Ok(out)
}

/// Packs values into fixed-width fields on an output stream
pub struct FieldWriter<'a, W: Write + ?Sized> {
    out: &'a mut W,
    byte_order: BinaryByteOrder,
}

impl<'a, W: Write + ?Sized> FieldWriter<'a, W> {
    pub fn new(out: &'a mut W) -> Self {
        Self::with_byte_order(out, BinaryByteOrder::Legacy)
    }

    pub fn with_byte_order(out: &'a mut W, byte_order: BinaryByteOrder) -> Self {
        FieldWriter { out, byte_order }
    }

    /// Underlying stream, for collaborators that emit opaque bytes
    pub fn inner(&mut self) -> &mut W {
        &mut *self.out
    }

    pub fn byte_order(&self) -> BinaryByteOrder {
        self.byte_order
    }

    /// Pad and write one field
    pub fn write_field(
        &mut self,
        def: FieldDef,
        field: Field<'_>,
        fill: u8,
        direction: FillDirection,
    ) -> Result<()> {
        let bytes = match field {
            Field::Text(text) => pad_field(def.name, text.as_bytes(), def.width, fill, direction)?,
            Field::Binary(raw) => {
                let ordered = to_disk_order(raw, self.byte_order);
                pad_field(def.name, &ordered, def.width, fill, direction)?
            }
        };
        self.raw(&bytes)
    }

    /// Alphanumeric field: left-aligned, space filled
    pub fn text(&mut self, def: FieldDef, value: &str) -> Result<()> {
        self.write_field(def, Field::Text(value), SPACE, FillDirection::FillRight)
    }

    /// Numeric field: decimal, right-aligned, zero filled
    pub fn number(&mut self, def: FieldDef, value: u64) -> Result<()> {
        let digits = value.to_string();
        self.write_field(def, Field::Text(&digits), ZERO, FillDirection::FillLeft)
    }

    /// Binary field holding in-memory bytes; swapped per the byte order
    pub fn binary(&mut self, def: FieldDef, raw: &[u8]) -> Result<()> {
        self.write_field(def, Field::Binary(raw), 0, FillDirection::FillLeft)
    }

    /// Binary integer always emitted big-endian, whatever the configured order
    pub fn binary_network(&mut self, def: FieldDef, value: u64) -> Result<()> {
        match def.width {
            1 => self.out.write_u8(value as u8)?,
            2 => self.out.write_u16::<BigEndian>(value as u16)?,
            4 => self.out.write_u32::<BigEndian>(value as u32)?,
            8 => self.out.write_u64::<BigEndian>(value)?,
            width => {
                return Err(NitfError::InvalidParameter(format!(
                    "{} has no integer encoding for width {}",
                    def.name, width
                )))
            }
        }
        Ok(())
    }

    /// Write bytes verbatim; a short write is an I/O error
    pub fn raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.out.write_all(bytes)?;
        Ok(())
    }
}
