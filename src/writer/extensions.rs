// src/writer/extensions.rs
use std::io::{self, Write};

use tracing::trace;

use crate::error::{NitfError, Result};
use crate::field::widths::tre::{CEL, CETAG};
use crate::field::widths::FieldDef;
use crate::field::FieldWriter;
use crate::record::Record;
use crate::tre::{Extensions, Tre};

/// Write an embedded TRE block: the length field, the overflow field when
/// the length is non-zero, then every TRE.
///
/// The overflow field is always zero; redirected TREs live in their own
/// segment and are located by its DESOFLW/DESITEM fields.
pub fn write_extensions<W: Write + ?Sized>(
    w: &mut FieldWriter<'_, W>,
    extensions: &Extensions,
    length: FieldDef,
    overflow: FieldDef,
    record: &Record,
) -> Result<()> {
    let total = extensions.compute_length()?;
    let data_length = if total > 0 { total + overflow.width as u64 } else { 0 };

    w.number(length, data_length)?;
    if data_length > 0 {
        w.number(overflow, 0)?;
        write_tres(w, extensions, record)?;
    }
    Ok(())
}

/// Write each TRE as tag, body length and body
pub fn write_tres<W: Write + ?Sized>(w: &mut FieldWriter<'_, W>, extensions: &Extensions, record: &Record) -> Result<()> {
    for tre in extensions {
        write_tre(w, tre, record)?;
    }
    Ok(())
}

fn write_tre<W: Write + ?Sized>(w: &mut FieldWriter<'_, W>, tre: &Tre, record: &Record) -> Result<()> {
    let size = tre.current_size()?;
    trace!(tag = tre.tag(), size, "writing TRE");

    w.text(CETAG, tre.tag())?;
    w.number(CEL, size as u64)?;

    let mut counter = CountingWriter { inner: w.inner(), written: 0 };
    tre.write_body(&mut counter, record)?;
    if counter.written != size as u64 {
        return Err(NitfError::Tre {
            tag: tre.tag().to_string(),
            message: format!("handler reported {} bytes but wrote {}", size, counter.written),
        });
    }
    Ok(())
}

/// Pass-through writer that counts what a handler emits
struct CountingWriter<'a, W: Write + ?Sized> {
    inner: &'a mut W,
    written: u64,
}

impl<W: Write + ?Sized> Write for CountingWriter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::widths::image::{UDIDL, UDOFL};
    use crate::tre::TreHandler;
    use crate::types::Version;

    #[derive(Debug)]
    struct Liar;

    impl TreHandler for Liar {
        fn current_size(&self) -> Result<u32> {
            Ok(10)
        }

        fn write(&self, out: &mut dyn Write, _record: &Record) -> Result<()> {
            out.write_all(b"short")?;
            Ok(())
        }
    }

    fn encode(extensions: &Extensions) -> Result<Vec<u8>> {
        let record = Record::new(Version::V21);
        let mut out = Vec::new();
        write_extensions(&mut FieldWriter::new(&mut out), extensions, UDIDL, UDOFL, &record)?;
        Ok(out)
    }

    #[test]
    fn empty_block_is_just_a_zero_length() {
        assert_eq!(encode(&Extensions::new()).unwrap(), b"00000");
    }

    #[test]
    fn block_layout() {
        let mut ext = Extensions::new();
        ext.push(Tre::raw("ABC", b"hello".to_vec()));
        let out = encode(&ext).unwrap();
        // 6 + 5 + 5 body bytes, plus the 3-byte overflow field
        assert_eq!(out, b"00019000ABC   00005hello");
    }

    #[test]
    fn handler_size_mismatch_fails() {
        let mut ext = Extensions::new();
        ext.push(Tre::new("LIAR", Box::new(Liar)));
        assert!(matches!(encode(&ext), Err(NitfError::Tre { ref tag, .. }) if tag == "LIAR"));
    }
}
