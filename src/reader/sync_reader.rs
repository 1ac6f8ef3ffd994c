// src/reader/sync_reader.rs
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

#[cfg(feature = "mmap")]
use memmap2::Mmap;
#[cfg(feature = "mmap")]
use std::io::Cursor;

use tracing::debug;

use crate::error::{NitfError, Result};
use crate::field::widths::{
    CLEVEL, ENCRYP, FBKGC, FDT, FHDR, FL, FSCLAS, FSCOP, FSCPYS, FTITLE, FVER, HL, ONAME, ONAME20,
    OPHONE, OSTAID, STYPE, UDHDL, UDHOFL, XHDL, XHDLOFL,
};
use crate::field::FieldReader;
use crate::reader::subheaders::{
    read_des_subheader, read_extensions, read_graphic_subheader, read_image_subheader,
    read_label_subheader, read_res_subheader, read_text_subheader, read_tres,
};
use crate::record::{FileHeader, Record};
use crate::security::SecurityGroup;
use crate::segment::{
    ComponentInfo, DATA_EXTENSION_TABLE, GRAPHIC_TABLE, IMAGE_TABLE, LABEL_TABLE,
    RESERVED_EXTENSION_TABLE, TEXT_TABLE,
};
use crate::types::{SegmentKind, Version};

/// Trait alias for Read + Seek
pub trait ReadSeek: Read + Seek {}
impl<T: Read + Seek> ReadSeek for T {}

/// Where one segment sits in the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentLocation {
    /// Offset of the subheader's first byte
    pub offset: u64,
    pub info: ComponentInfo,
}

impl SegmentLocation {
    pub fn data_offset(&self) -> u64 {
        self.offset + self.info.subheader_length
    }
}

/// Component tables as declared by the file header
#[derive(Debug, Default)]
struct Tables {
    images: Vec<ComponentInfo>,
    graphics: Vec<ComponentInfo>,
    labels: Vec<ComponentInfo>,
    texts: Vec<ComponentInfo>,
    data_extensions: Vec<ComponentInfo>,
    reserved_extensions: Vec<ComponentInfo>,
}

/// Synchronous NITF file reader.
///
/// Parses the file header and every subheader up front; payloads are read on
/// demand.
pub struct NitfReader<R: ReadSeek> {
    file: R,
    record: Record,
    version: Version,
    file_length: u64,
    header_length: u64,
    images: Vec<SegmentLocation>,
    graphics: Vec<SegmentLocation>,
    labels: Vec<SegmentLocation>,
    texts: Vec<SegmentLocation>,
    data_extensions: Vec<SegmentLocation>,
    reserved_extensions: Vec<SegmentLocation>,
}

/// Constructor for standard file I/O
impl NitfReader<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::new(BufReader::with_capacity(65536, file))
    }
}

/// Constructor for memory-mapped file I/O (requires "mmap" feature)
#[cfg(feature = "mmap")]
impl NitfReader<Cursor<Mmap>> {
    pub fn open_mmap(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        Self::new(Cursor::new(mmap))
    }
}

impl<R: ReadSeek> NitfReader<R> {
    pub fn new(mut file: R) -> Result<Self> {
        file.seek(SeekFrom::Start(0))?;
        let (header, version, file_length, header_length, tables) = parse_header(&mut file)?;

        let mut reader = NitfReader {
            file,
            record: Record { header, ..Record::default() },
            version,
            file_length,
            header_length,
            images: Vec::new(),
            graphics: Vec::new(),
            labels: Vec::new(),
            texts: Vec::new(),
            data_extensions: Vec::new(),
            reserved_extensions: Vec::new(),
        };
        reader.parse_segments(&tables)?;
        Ok(reader)
    }

    fn parse_segments(&mut self, tables: &Tables) -> Result<()> {
        let version = self.version;
        let mut offset = self.header_length;

        self.images = locate(offset, &tables.images);
        for location in self.images.clone() {
            let image = self.parse_subheader(&location, |r| read_image_subheader(r, version))?;
            self.record.images.push(image);
        }
        offset = next_offset(offset, &tables.images);

        self.graphics = locate(offset, &tables.graphics);
        for location in self.graphics.clone() {
            let graphic = self.parse_subheader(&location, |r| read_graphic_subheader(r, version))?;
            self.record.graphics.push(graphic);
        }
        offset = next_offset(offset, &tables.graphics);

        self.labels = locate(offset, &tables.labels);
        for location in self.labels.clone() {
            let label = self.parse_subheader(&location, |r| read_label_subheader(r, version))?;
            self.record.labels.push(label);
        }
        offset = next_offset(offset, &tables.labels);

        self.texts = locate(offset, &tables.texts);
        for location in self.texts.clone() {
            let text = self.parse_subheader(&location, |r| read_text_subheader(r, version))?;
            self.record.texts.push(text);
        }
        offset = next_offset(offset, &tables.texts);

        self.data_extensions = locate(offset, &tables.data_extensions);
        for location in self.data_extensions.clone() {
            let mut des = self.parse_subheader(&location, |r| read_des_subheader(r, version))?;
            if des.has_tre_payload() {
                self.file.seek(SeekFrom::Start(location.data_offset()))?;
                des.user_defined = read_tres(&mut FieldReader::new(&mut self.file), location.info.data_length)?;
            }
            self.record.data_extensions.push(des);
        }
        offset = next_offset(offset, &tables.data_extensions);

        self.reserved_extensions = locate(offset, &tables.reserved_extensions);
        for location in self.reserved_extensions.clone() {
            let res = self.parse_subheader(&location, |r| read_res_subheader(r, version))?;
            self.record.reserved_extensions.push(res);
        }
        offset = next_offset(offset, &tables.reserved_extensions);

        if offset != self.file_length {
            return Err(NitfError::InvalidHeader(format!(
                "segments end at {} but FL is {}",
                offset, self.file_length
            )));
        }
        debug!(
            images = self.images.len(),
            graphics = self.graphics.len(),
            texts = self.texts.len(),
            data_extensions = self.data_extensions.len(),
            "parsed NITF segments"
        );
        Ok(())
    }

    /// Parse one subheader and check it spans exactly its declared length
    fn parse_subheader<T>(
        &mut self,
        location: &SegmentLocation,
        parse: impl FnOnce(&mut FieldReader<'_, R>) -> Result<T>,
    ) -> Result<T> {
        self.file.seek(SeekFrom::Start(location.offset))?;
        let value = parse(&mut FieldReader::new(&mut self.file))?;
        let consumed = self.file.stream_position()? - location.offset;
        if consumed != location.info.subheader_length {
            return Err(NitfError::InvalidHeader(format!(
                "subheader at {} spans {} bytes, header declares {}",
                location.offset, consumed, location.info.subheader_length
            )));
        }
        Ok(value)
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn into_record(self) -> Record {
        self.record
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// FL as stored
    pub fn file_length(&self) -> u64 {
        self.file_length
    }

    /// HL as stored
    pub fn header_length(&self) -> u64 {
        self.header_length
    }

    pub fn segment_locations(&self, kind: SegmentKind) -> &[SegmentLocation] {
        match kind {
            SegmentKind::Image => &self.images,
            SegmentKind::Graphic => &self.graphics,
            SegmentKind::Label => &self.labels,
            SegmentKind::Text => &self.texts,
            SegmentKind::DataExtension => &self.data_extensions,
            SegmentKind::ReservedExtension => &self.reserved_extensions,
        }
    }

    /// Component info table for one segment kind
    pub fn component_info(&self, kind: SegmentKind) -> Vec<ComponentInfo> {
        self.segment_locations(kind).iter().map(|location| location.info).collect()
    }

    /// Payload bytes of one segment
    pub fn read_payload(&mut self, kind: SegmentKind, index: usize) -> Result<Vec<u8>> {
        let locations = self.segment_locations(kind);
        let count = locations.len();
        let location = *locations
            .get(index)
            .ok_or(NitfError::SegmentIndexOutOfRange { kind, index, count })?;

        // The buffer grows with what the stream holds, not with what LI/LD claims
        self.file.seek(SeekFrom::Start(location.data_offset()))?;
        let expected = location.info.data_length;
        let mut data = Vec::new();
        (&mut self.file).take(expected).read_to_end(&mut data)?;
        if data.len() as u64 != expected {
            return Err(NitfError::InvalidHeader(format!(
                "{} segment {} declares {} data bytes, stream holds {}",
                kind,
                index,
                expected,
                data.len()
            )));
        }
        Ok(data)
    }
}

fn locate(start: u64, infos: &[ComponentInfo]) -> Vec<SegmentLocation> {
    let mut offset = start;
    infos
        .iter()
        .map(|&info| {
            let location = SegmentLocation { offset, info };
            offset += info.total_length();
            location
        })
        .collect()
}

fn next_offset(start: u64, infos: &[ComponentInfo]) -> u64 {
    start + infos.iter().map(ComponentInfo::total_length).sum::<u64>()
}

fn parse_header<R: ReadSeek>(file: &mut R) -> Result<(FileHeader, Version, u64, u64, Tables)> {
    let mut r = FieldReader::new(file);

    let fhdr = r.text(FHDR)?;
    let fver = r.text(FVER)?;
    let version = Version::from_header(&fhdr, &fver)?;

    let mut header = FileHeader::new(version);
    header.fhdr = fhdr;
    header.fver = fver;
    header.complexity_level = r.number_u32(CLEVEL)?;
    header.standard_type = r.text(STYPE)?;
    header.originating_station = r.text(OSTAID)?;
    header.file_datetime = r.text(FDT)?;
    header.file_title = r.text(FTITLE)?;
    header.classification = r.text(FSCLAS)?;
    header.security = SecurityGroup::read_from(&mut r, version)?;
    header.copy_number = r.number_u32(FSCOP)?;
    header.number_of_copies = r.number_u32(FSCPYS)?;
    header.encrypted = r.number_u32(ENCRYP)?;
    match version {
        Version::V21 => {
            let background = r.binary(FBKGC)?;
            header.background_color = <[u8; 3]>::try_from(background.as_slice())
                .map_err(|_| NitfError::Parse { field: FBKGC.name, value: format!("{:?}", background) })?;
            header.originator_name = r.text(ONAME)?;
        }
        Version::V20 => header.originator_name = r.text(ONAME20)?,
    }
    header.originator_phone = r.text(OPHONE)?;

    let file_length = r.number(FL)?;
    let header_length = r.number(HL)?;

    let tables = Tables {
        images: IMAGE_TABLE.read_entries(&mut r)?,
        graphics: GRAPHIC_TABLE.read_entries(&mut r)?,
        labels: LABEL_TABLE.read_entries(&mut r)?,
        texts: TEXT_TABLE.read_entries(&mut r)?,
        data_extensions: DATA_EXTENSION_TABLE.read_entries(&mut r)?,
        reserved_extensions: RESERVED_EXTENSION_TABLE.read_entries(&mut r)?,
    };

    header.user_defined = read_extensions(&mut r, UDHDL, UDHOFL)?;
    header.extended = read_extensions(&mut r, XHDL, XHDLOFL)?;

    let end = file.stream_position()?;
    if end != header_length {
        return Err(NitfError::InvalidHeader(format!(
            "header spans {} bytes, HL declares {}",
            end, header_length
        )));
    }
    Ok((header, version, file_length, header_length, tables))
}
