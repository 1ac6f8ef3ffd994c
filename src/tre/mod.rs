//! Tagged Record Extensions.
//!
//! A TRE is a short tag plus an opaque body. The body is only reachable
//! through a [`TreHandler`], which reports its encoded size and writes it.
//! [`Extensions`] is the ordered TRE collection embedded in the file header
//! and in subheaders.

use std::fmt;
use std::io::Write;

use bytes::Bytes;

use crate::error::{NitfError, Result};
use crate::field::widths::tre::{CEL, CETAG};
use crate::record::Record;

/// Encoder for one TRE body
pub trait TreHandler: fmt::Debug {
    /// Number of body bytes `write` will emit
    fn current_size(&self) -> Result<u32>;

    /// Emit the body. `record` is the record being written, for handlers
    /// whose encoding depends on it.
    fn write(&self, out: &mut dyn Write, record: &Record) -> Result<()>;

    /// The encoded body when the handler holds it verbatim
    fn raw_bytes(&self) -> Option<&[u8]> {
        None
    }
}

/// Handler over an already-encoded body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTre {
    data: Bytes,
}

impl RawTre {
    pub fn new(data: impl Into<Bytes>) -> Self {
        RawTre { data: data.into() }
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }
}

impl TreHandler for RawTre {
    fn current_size(&self) -> Result<u32> {
        u32::try_from(self.data.len())
            .map_err(|_| NitfError::InvalidParameter(format!("TRE body of {} bytes", self.data.len())))
    }

    fn write(&self, out: &mut dyn Write, _record: &Record) -> Result<()> {
        out.write_all(&self.data)?;
        Ok(())
    }

    fn raw_bytes(&self) -> Option<&[u8]> {
        Some(&self.data)
    }
}

/// A tag and the handler that encodes its body
#[derive(Debug)]
pub struct Tre {
    tag: String,
    handler: Box<dyn TreHandler>,
}

impl Tre {
    pub fn new(tag: impl Into<String>, handler: Box<dyn TreHandler>) -> Self {
        Tre { tag: tag.into(), handler }
    }

    /// TRE with a verbatim body
    pub fn raw(tag: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self::new(tag, Box::new(RawTre::new(data)))
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn handler(&self) -> &dyn TreHandler {
        self.handler.as_ref()
    }

    /// Body size reported by the handler
    pub fn current_size(&self) -> Result<u32> {
        self.handler.current_size().map_err(|e| self.wrap(e))
    }

    /// Size including the tag and length framing
    pub fn encoded_len(&self) -> Result<u64> {
        Ok(self.current_size()? as u64 + (CETAG.width + CEL.width) as u64)
    }

    /// Write the body through the handler
    pub fn write_body(&self, out: &mut dyn Write, record: &Record) -> Result<()> {
        self.handler.write(out, record).map_err(|e| self.wrap(e))
    }

    fn wrap(&self, error: NitfError) -> NitfError {
        match error {
            NitfError::Tre { .. } => error,
            other => NitfError::Tre { tag: self.tag.clone(), message: other.to_string() },
        }
    }
}

/// Ordered TRE collection
#[derive(Debug, Default)]
pub struct Extensions {
    tres: Vec<Tre>,
}

impl Extensions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tre: Tre) {
        self.tres.push(tre);
    }

    pub fn len(&self) -> usize {
        self.tres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tres.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tre> {
        self.tres.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Tre> {
        self.tres.get(index)
    }

    /// First TRE carrying `tag`
    pub fn find(&self, tag: &str) -> Option<&Tre> {
        self.tres.iter().find(|tre| tre.tag() == tag)
    }

    pub fn remove(&mut self, index: usize) -> Tre {
        self.tres.remove(index)
    }

    /// Remove and return every TRE from `index` onwards
    pub fn split_off(&mut self, index: usize) -> Vec<Tre> {
        self.tres.split_off(index)
    }

    pub fn extend(&mut self, tres: impl IntoIterator<Item = Tre>) {
        self.tres.extend(tres);
    }

    /// Total encoded size of every TRE, framing included
    pub fn compute_length(&self) -> Result<u64> {
        self.tres.iter().map(Tre::encoded_len).sum()
    }
}

impl<'a> IntoIterator for &'a Extensions {
    type Item = &'a Tre;
    type IntoIter = std::slice::Iter<'a, Tre>;

    fn into_iter(self) -> Self::IntoIter {
        self.tres.iter()
    }
}

impl FromIterator<Tre> for Extensions {
    fn from_iter<I: IntoIterator<Item = Tre>>(iter: I) -> Self {
        Extensions { tres: iter.into_iter().collect() }
    }
}
