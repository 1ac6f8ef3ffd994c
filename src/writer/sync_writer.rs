// src/writer/sync_writer.rs
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::config::WriterOptions;
use crate::error::{NitfError, Result};
use crate::field::widths::{
    CLEVEL, ENCRYP, FBKGC, FDT, FHDR, FL, FSCLAS, FSCOP, FSCPYS, FTITLE, FVER, HL, NUMX, ONAME,
    ONAME20, OPHONE, OSTAID, STYPE, UDHDL, UDHOFL, XHDL, XHDLOFL,
};
use crate::field::FieldWriter;
use crate::record::Record;
use crate::segment::{
    ComponentInfo, DATA_EXTENSION_TABLE, GRAPHIC_TABLE, IMAGE_TABLE, RESERVED_EXTENSION_TABLE,
    TEXT_TABLE,
};
use crate::types::{SegmentKind, Version};
use crate::writer::extensions::{write_extensions, write_tres};
use crate::writer::payload::{ImagePayloadWriter, ImageWriteParams, SegmentPayloadWriter};
use crate::writer::report::WriteReport;
use crate::writer::subheaders::{
    write_des_subheader, write_graphic_subheader, write_image_subheader, write_res_subheader,
    write_text_subheader,
};

/// Progress of a write session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteState {
    Idle,
    HeaderWritten,
    WritingSegments { kind: SegmentKind, index: usize },
    AllSegmentsWritten,
    Patched,
    Done,
    Failed,
}

impl fmt::Display for WriteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteState::WritingSegments { kind, index } => write!(f, "writing {} segment {}", kind, index),
            other => write!(f, "{:?}", other),
        }
    }
}

/// Offsets recorded while writing the file header
#[derive(Debug, Clone, Copy)]
struct HeaderLayout {
    start: u64,
    length_offset: u64,
    header_length: u64,
}

/// Byte counts measured during the forward pass
#[derive(Debug, Default)]
struct LengthTables {
    images: Vec<ComponentInfo>,
    graphics: Vec<ComponentInfo>,
    texts: Vec<ComponentInfo>,
    data_extensions: Vec<ComponentInfo>,
}

/// Writes a [`Record`] as a NITF file.
///
/// The file header goes out first with zeroed length fields, then every
/// segment's subheader and payload. Once the whole file is on the stream the
/// writer seeks back and patches the file length, the header length and the
/// component-info tables with the measured byte counts.
pub struct NitfWriter<W: Write + Seek> {
    output: W,
    record: Record,
    version: Version,
    options: WriterOptions,

    image_writers: Vec<Option<Box<dyn ImagePayloadWriter>>>,
    graphic_writers: Vec<Option<Box<dyn SegmentPayloadWriter>>>,
    text_writers: Vec<Option<Box<dyn SegmentPayloadWriter>>>,
    data_extension_writers: Vec<Option<Box<dyn SegmentPayloadWriter>>>,

    state: WriteState,
    warnings: Vec<String>,
}

impl NitfWriter<BufWriter<File>> {
    pub fn create(path: impl AsRef<Path>, record: Record) -> Result<Self> {
        Self::create_with_options(path, record, WriterOptions::default())
    }

    pub fn create_with_options(path: impl AsRef<Path>, record: Record, options: WriterOptions) -> Result<Self> {
        let file = File::create(path)?;
        let output = BufWriter::with_capacity(options.buffer_capacity, file);
        Self::with_options(output, record, options)
    }
}

impl<W: Write + Seek> NitfWriter<W> {
    /// Bind `output` and `record`. The version and every segment count are
    /// validated here, before any byte is written.
    pub fn prepare(output: W, record: Record) -> Result<Self> {
        Self::with_options(output, record, WriterOptions::default())
    }

    pub fn with_options(output: W, record: Record, options: WriterOptions) -> Result<Self> {
        let version = record.version()?;
        record.validate_counts()?;
        let warnings = inspect(&record, version);
        for message in &warnings {
            warn!("{}", message);
        }

        Ok(NitfWriter {
            image_writers: empty_slots(record.images.len()),
            graphic_writers: empty_slots(record.graphics.len()),
            text_writers: empty_slots(record.texts.len()),
            data_extension_writers: empty_slots(record.data_extensions.len()),
            output,
            record,
            version,
            options,
            state: WriteState::Idle,
            warnings,
        })
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn state(&self) -> WriteState {
        self.state
    }

    /// Warnings collected so far
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn attach_image_writer(&mut self, index: usize, writer: Box<dyn ImagePayloadWriter>) -> Result<()> {
        self.ensure_idle()?;
        attach(&mut self.image_writers, SegmentKind::Image, index, writer)
    }

    pub fn attach_graphic_writer(&mut self, index: usize, writer: Box<dyn SegmentPayloadWriter>) -> Result<()> {
        self.ensure_idle()?;
        attach(&mut self.graphic_writers, SegmentKind::Graphic, index, writer)
    }

    pub fn attach_text_writer(&mut self, index: usize, writer: Box<dyn SegmentPayloadWriter>) -> Result<()> {
        self.ensure_idle()?;
        attach(&mut self.text_writers, SegmentKind::Text, index, writer)
    }

    pub fn attach_data_extension_writer(
        &mut self,
        index: usize,
        writer: Box<dyn SegmentPayloadWriter>,
    ) -> Result<()> {
        self.ensure_idle()?;
        attach(&mut self.data_extension_writers, SegmentKind::DataExtension, index, writer)
    }

    /// Whether a payload writer is attached for the given segment
    pub fn has_payload_writer(&self, kind: SegmentKind, index: usize) -> bool {
        match kind {
            SegmentKind::Image => is_attached(&self.image_writers, index),
            SegmentKind::Graphic => is_attached(&self.graphic_writers, index),
            SegmentKind::Text => is_attached(&self.text_writers, index),
            SegmentKind::DataExtension => is_attached(&self.data_extension_writers, index),
            SegmentKind::Label | SegmentKind::ReservedExtension => false,
        }
    }

    /// Run the full write: header, segments, then the length patch-up.
    ///
    /// A writer performs one session. On failure every payload writer is
    /// released and the stream is left as it is, without patching.
    pub fn write(&mut self) -> Result<WriteReport> {
        self.ensure_idle()?;

        match self.write_session() {
            Ok(report) => {
                self.state = WriteState::Done;
                Ok(report)
            }
            Err(e) => {
                warn!(state = %self.state, error = %e, "NITF write failed");
                self.state = WriteState::Failed;
                self.release_payload_writers();
                Err(e)
            }
        }
    }

    /// Flush and return the underlying stream
    pub fn into_inner(mut self) -> Result<W> {
        self.output.flush()?;
        Ok(self.output)
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.state != WriteState::Idle {
            return Err(NitfError::InvalidState {
                expected: "Idle",
                found: self.state.to_string(),
            });
        }
        Ok(())
    }

    fn release_payload_writers(&mut self) {
        self.image_writers.clear();
        self.graphic_writers.clear();
        self.text_writers.clear();
        self.data_extension_writers.clear();
    }

    fn write_session(&mut self) -> Result<WriteReport> {
        let layout = self.write_header()?;
        self.state = WriteState::HeaderWritten;
        debug!(version = %self.version, header_length = layout.header_length, "wrote file header");

        let mut tables = LengthTables::default();
        for index in 0..self.record.images.len() {
            tables.images.push(self.write_image(index)?);
        }
        for index in 0..self.record.graphics.len() {
            tables.graphics.push(self.write_graphic(index)?);
        }
        for index in 0..self.record.texts.len() {
            tables.texts.push(self.write_text(index)?);
        }
        for index in 0..self.record.data_extensions.len() {
            tables.data_extensions.push(self.write_data_extension(index)?);
        }
        for index in 0..self.record.reserved_extensions.len() {
            self.state = WriteState::WritingSegments { kind: SegmentKind::ReservedExtension, index };
            let mut w = FieldWriter::with_byte_order(&mut self.output, self.options.binary_byte_order);
            write_res_subheader(&mut w, &self.record.reserved_extensions[index], self.version, &self.record)?;
        }
        self.state = WriteState::AllSegmentsWritten;

        let end = self.output.seek(SeekFrom::End(0))?;
        let file_length = end - layout.start;
        self.patch(&layout, file_length, &tables)?;
        self.state = WriteState::Patched;
        self.output.flush()?;

        debug!(file_length, "patched length fields");
        Ok(WriteReport {
            file_length,
            header_length: layout.header_length,
            images: tables.images,
            graphics: tables.graphics,
            texts: tables.texts,
            data_extensions: tables.data_extensions,
            warnings: self.warnings.clone(),
        })
    }

    fn write_header(&mut self) -> Result<HeaderLayout> {
        let start = self.output.stream_position()?;
        let header = &self.record.header;
        let mut w = FieldWriter::with_byte_order(&mut self.output, self.options.binary_byte_order);

        w.text(FHDR, &header.fhdr)?;
        w.text(FVER, &header.fver)?;
        w.number(CLEVEL, header.complexity_level as u64)?;
        w.text(STYPE, &header.standard_type)?;
        w.text(OSTAID, &header.originating_station)?;
        w.text(FDT, &header.file_datetime)?;
        w.text(FTITLE, &header.file_title)?;
        w.text(FSCLAS, &header.classification)?;
        header.security.write_to(&mut w, self.version)?;
        w.number(FSCOP, header.copy_number as u64)?;
        w.number(FSCPYS, header.number_of_copies as u64)?;
        w.number(ENCRYP, header.encrypted as u64)?;
        match self.version {
            Version::V21 => {
                w.binary(FBKGC, &header.background_color)?;
                w.text(ONAME, &header.originator_name)?;
            }
            Version::V20 => w.text(ONAME20, &header.originator_name)?,
        }
        w.text(OPHONE, &header.originator_phone)?;

        let length_offset = w.inner().stream_position()?;
        w.number(FL, 0)?;
        w.number(HL, 0)?;

        IMAGE_TABLE.write_placeholders(&mut w, self.record.images.len())?;
        GRAPHIC_TABLE.write_placeholders(&mut w, self.record.graphics.len())?;
        w.number(NUMX, 0)?;
        TEXT_TABLE.write_placeholders(&mut w, self.record.texts.len())?;
        DATA_EXTENSION_TABLE.write_placeholders(&mut w, self.record.data_extensions.len())?;
        RESERVED_EXTENSION_TABLE.write_placeholders(&mut w, 0)?;

        write_extensions(&mut w, &header.user_defined, UDHDL, UDHOFL, &self.record)?;
        write_extensions(&mut w, &header.extended, XHDL, XHDLOFL, &self.record)?;

        let end = self.output.stream_position()?;
        Ok(HeaderLayout { start, length_offset, header_length: end - start })
    }

    fn write_image(&mut self, index: usize) -> Result<ComponentInfo> {
        self.state = WriteState::WritingSegments { kind: SegmentKind::Image, index };
        let subheader = &self.record.images[index];
        let payload = self.image_writers[index]
            .as_mut()
            .ok_or(NitfError::MissingPayloadWriter { kind: SegmentKind::Image, index })?;

        let start = self.output.stream_position()?;
        let mut w = FieldWriter::with_byte_order(&mut self.output, self.options.binary_byte_order);
        write_image_subheader(&mut w, subheader, self.version, &self.record)?;
        let data_start = self.output.stream_position()?;

        payload.write(&mut self.output, &ImageWriteParams::from_subheader(subheader))?;
        let end = self.output.stream_position()?;

        let info = ComponentInfo::new(data_start - start, end - data_start);
        debug!(index, subheader_length = info.subheader_length, data_length = info.data_length, "wrote image segment");
        Ok(info)
    }

    fn write_graphic(&mut self, index: usize) -> Result<ComponentInfo> {
        self.state = WriteState::WritingSegments { kind: SegmentKind::Graphic, index };
        let subheader = &self.record.graphics[index];
        let payload = self.graphic_writers[index]
            .as_mut()
            .ok_or(NitfError::MissingPayloadWriter { kind: SegmentKind::Graphic, index })?;

        let start = self.output.stream_position()?;
        let mut w = FieldWriter::with_byte_order(&mut self.output, self.options.binary_byte_order);
        write_graphic_subheader(&mut w, subheader, self.version, &self.record)?;
        let data_start = self.output.stream_position()?;

        payload.write(&mut self.output)?;
        let end = self.output.stream_position()?;

        let info = ComponentInfo::new(data_start - start, end - data_start);
        debug!(index, subheader_length = info.subheader_length, data_length = info.data_length, "wrote graphic segment");
        Ok(info)
    }

    fn write_text(&mut self, index: usize) -> Result<ComponentInfo> {
        self.state = WriteState::WritingSegments { kind: SegmentKind::Text, index };
        let subheader = &self.record.texts[index];
        let payload = self.text_writers[index]
            .as_mut()
            .ok_or(NitfError::MissingPayloadWriter { kind: SegmentKind::Text, index })?;

        let start = self.output.stream_position()?;
        let mut w = FieldWriter::with_byte_order(&mut self.output, self.options.binary_byte_order);
        write_text_subheader(&mut w, subheader, self.version, &self.record)?;
        let data_start = self.output.stream_position()?;

        payload.write(&mut self.output)?;
        let end = self.output.stream_position()?;

        let info = ComponentInfo::new(data_start - start, end - data_start);
        debug!(index, subheader_length = info.subheader_length, data_length = info.data_length, "wrote text segment");
        Ok(info)
    }

    fn write_data_extension(&mut self, index: usize) -> Result<ComponentInfo> {
        self.state = WriteState::WritingSegments { kind: SegmentKind::DataExtension, index };
        let subheader = &self.record.data_extensions[index];
        // TRE-carrying segments serialize their own payload
        let payload = if subheader.has_tre_payload() {
            None
        } else {
            let writer = self.data_extension_writers[index]
                .as_mut()
                .ok_or(NitfError::MissingPayloadWriter { kind: SegmentKind::DataExtension, index })?;
            Some(writer)
        };

        let start = self.output.stream_position()?;
        let mut w = FieldWriter::with_byte_order(&mut self.output, self.options.binary_byte_order);
        write_des_subheader(&mut w, subheader, self.version, &self.record)?;
        let data_start = w.inner().stream_position()?;

        match payload {
            Some(writer) => writer.write(w.inner())?,
            None => write_tres(&mut w, &subheader.user_defined, &self.record)?,
        }
        let end = self.output.stream_position()?;

        let info = ComponentInfo::new(data_start - start, end - data_start);
        debug!(
            index,
            tag = subheader.type_id.as_str(),
            subheader_length = info.subheader_length,
            data_length = info.data_length,
            "wrote data extension segment"
        );
        Ok(info)
    }

    /// Second pass. Field order and widths mirror `write_header` exactly.
    fn patch(&mut self, layout: &HeaderLayout, file_length: u64, tables: &LengthTables) -> Result<()> {
        self.output.seek(SeekFrom::Start(layout.length_offset))?;
        let mut w = FieldWriter::with_byte_order(&mut self.output, self.options.binary_byte_order);

        w.number(FL, file_length)?;
        w.number(HL, layout.header_length)?;
        IMAGE_TABLE.write_entries(&mut w, &tables.images)?;
        GRAPHIC_TABLE.write_entries(&mut w, &tables.graphics)?;
        // NUMX stays as written
        w.inner().seek(SeekFrom::Current(NUMX.width as i64))?;
        TEXT_TABLE.write_entries(&mut w, &tables.texts)?;
        DATA_EXTENSION_TABLE.write_entries(&mut w, &tables.data_extensions)?;

        self.output.seek(SeekFrom::End(0))?;
        Ok(())
    }
}

fn empty_slots<T>(count: usize) -> Vec<Option<T>> {
    std::iter::repeat_with(|| None).take(count).collect()
}

fn is_attached<T>(slots: &[Option<T>], index: usize) -> bool {
    matches!(slots.get(index), Some(Some(_)))
}

fn attach<T>(slots: &mut [Option<T>], kind: SegmentKind, index: usize, writer: T) -> Result<()> {
    let count = slots.len();
    let slot = slots
        .get_mut(index)
        .ok_or(NitfError::SegmentIndexOutOfRange { kind, index, count })?;
    *slot = Some(writer);
    Ok(())
}

/// Non-fatal anomalies of a record about to be written
fn inspect(record: &Record, version: Version) -> Vec<String> {
    let mut warnings = Vec::new();
    if !record.labels.is_empty() {
        warnings.push(format!(
            "{} label segment(s) are not written; NUMX is always zero",
            record.labels.len()
        ));
    }
    for (index, image) in record.images.iter().enumerate() {
        if image.comments.len() > image.num_comments as usize {
            warnings.push(format!(
                "image {}: {} comments present, NICOM declares {}; the rest are dropped",
                index,
                image.comments.len(),
                image.num_comments
            ));
        }
        let declared = image.band_count(version) as usize;
        if image.bands.len() > declared {
            warnings.push(format!(
                "image {}: {} band info blocks present, {} declared; the rest are dropped",
                index,
                image.bands.len(),
                declared
            ));
        }
    }
    warnings
}
