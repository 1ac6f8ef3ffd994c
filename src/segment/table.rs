// src/segment/table.rs
use std::io::{Read, Write};

use crate::error::Result;
use crate::field::widths::{
    FieldDef, LD, LDSH, LI, LISH, LL, LLSH, LRE, LRESH, LS, LSSH, LT, LTSH, NUMDES, NUMI, NUMRES, NUMS,
    NUMT, NUMX,
};
use crate::field::{FieldReader, FieldWriter};
use crate::segment::ComponentInfo;

/// Layout of one component-info table in the file header: a count followed
/// by a (subheader length, data length) pair per segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentTable {
    pub count: FieldDef,
    pub subheader_length: FieldDef,
    pub data_length: FieldDef,
}

pub const IMAGE_TABLE: ComponentTable = ComponentTable::new(NUMI, LISH, LI);
pub const GRAPHIC_TABLE: ComponentTable = ComponentTable::new(NUMS, LSSH, LS);
/// Label table; the writer always declares zero labels
pub const LABEL_TABLE: ComponentTable = ComponentTable::new(NUMX, LLSH, LL);
pub const TEXT_TABLE: ComponentTable = ComponentTable::new(NUMT, LTSH, LT);
pub const DATA_EXTENSION_TABLE: ComponentTable = ComponentTable::new(NUMDES, LDSH, LD);
pub const RESERVED_EXTENSION_TABLE: ComponentTable = ComponentTable::new(NUMRES, LRESH, LRE);

impl ComponentTable {
    pub const fn new(count: FieldDef, subheader_length: FieldDef, data_length: FieldDef) -> Self {
        ComponentTable { count, subheader_length, data_length }
    }

    /// Bytes occupied by a table of `count` entries
    pub fn encoded_len(&self, count: usize) -> usize {
        self.count.width + count * (self.subheader_length.width + self.data_length.width)
    }

    /// First pass: the count and zero-filled placeholder pairs
    pub fn write_placeholders<W: Write + ?Sized>(&self, w: &mut FieldWriter<'_, W>, count: usize) -> Result<()> {
        w.number(self.count, count as u64)?;
        for _ in 0..count {
            w.number(self.subheader_length, 0)?;
            w.number(self.data_length, 0)?;
        }
        Ok(())
    }

    /// Second pass: the count and the measured pairs
    pub fn write_entries<W: Write + ?Sized>(&self, w: &mut FieldWriter<'_, W>, entries: &[ComponentInfo]) -> Result<()> {
        w.number(self.count, entries.len() as u64)?;
        for info in entries {
            w.number(self.subheader_length, info.subheader_length)?;
            w.number(self.data_length, info.data_length)?;
        }
        Ok(())
    }

    pub fn read_entries<R: Read + ?Sized>(&self, r: &mut FieldReader<'_, R>) -> Result<Vec<ComponentInfo>> {
        let count = r.number(self.count)? as usize;
        let mut entries = Vec::with_capacity(count);
        for _ in 0..count {
            let subheader_length = r.number(self.subheader_length)?;
            let data_length = r.number(self.data_length)?;
            entries.push(ComponentInfo::new(subheader_length, data_length));
        }
        Ok(entries)
    }
}
