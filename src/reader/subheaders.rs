// src/reader/subheaders.rs
use std::io::Read;

use bytes::Bytes;

use crate::error::{NitfError, Result};
use crate::field::widths::tre::{CEL, CETAG};
use crate::field::widths::{des, graphic, image, label, res, text, FieldDef};
use crate::field::FieldReader;
use crate::record::{
    BandInfo, DataExtensionSubheader, GraphicSubheader, ImageSubheader, LabelSubheader,
    ReservedExtensionSubheader, TextSubheader,
};
use crate::security::SecurityGroup;
use crate::tre::{Extensions, Tre};
use crate::types::Version;

fn expect_part_type<R: Read + ?Sized>(r: &mut FieldReader<'_, R>, def: FieldDef, expected: &str) -> Result<()> {
    let found = r.verbatim(def)?;
    if found != expected {
        return Err(NitfError::InvalidHeader(format!(
            "expected segment type {:?}, found {:?}",
            expected, found
        )));
    }
    Ok(())
}

fn raw3<R: Read + ?Sized>(r: &mut FieldReader<'_, R>, def: FieldDef) -> Result<[u8; 3]> {
    let bytes = r.binary(def)?;
    <[u8; 3]>::try_from(bytes.as_slice())
        .map_err(|_| NitfError::Parse { field: def.name, value: format!("{:?}", bytes) })
}

/// Read `length` bytes of tag/length/body TREs
pub fn read_tres<R: Read + ?Sized>(r: &mut FieldReader<'_, R>, length: u64) -> Result<Extensions> {
    let mut extensions = Extensions::new();
    let mut consumed = 0u64;
    while consumed < length {
        let tag = r.text(CETAG)?;
        let size = r.number(CEL)?;
        consumed += (CETAG.width + CEL.width) as u64 + size;
        if consumed > length {
            return Err(NitfError::InvalidHeader(format!(
                "TRE {} runs past its section ({} > {} bytes)",
                tag, consumed, length
            )));
        }
        let body = r.raw(size as usize)?;
        extensions.push(Tre::raw(tag, body));
    }
    Ok(extensions)
}

/// Read a length field and, when non-zero, the overflow field and TREs
pub fn read_extensions<R: Read + ?Sized>(
    r: &mut FieldReader<'_, R>,
    length: FieldDef,
    overflow: FieldDef,
) -> Result<Extensions> {
    let data_length = r.number(length)?;
    if data_length == 0 {
        return Ok(Extensions::new());
    }
    let overflow_width = overflow.width as u64;
    if data_length < overflow_width {
        return Err(NitfError::InvalidHeader(format!(
            "{} of {} cannot hold {}",
            length.name, data_length, overflow.name
        )));
    }
    let _overflow_index = r.number(overflow)?;
    read_tres(r, data_length - overflow_width)
}

pub fn read_image_subheader<R: Read + ?Sized>(r: &mut FieldReader<'_, R>, version: Version) -> Result<ImageSubheader> {
    use image::*;

    expect_part_type(r, IM, "IM")?;
    let mut s = ImageSubheader {
        image_id: r.text(IID1)?,
        image_datetime: r.text(IDATIM)?,
        target_id: r.text(TGTID)?,
        title: r.text(IID2)?,
        classification: r.text(ISCLAS)?,
        ..ImageSubheader::default()
    };
    s.security = SecurityGroup::read_from(r, version)?;
    s.encrypted = r.number_u32(ENCRYP)?;
    s.source = r.text(ISORCE)?;
    s.num_rows = r.number_u32(NROWS)?;
    s.num_cols = r.number_u32(NCOLS)?;
    s.pixel_value_type = r.text(PVTYPE)?;
    s.representation = r.text(IREP)?;
    s.category = r.text(ICAT)?;
    s.actual_bits_per_pixel = r.number_u32(ABPP)?;
    s.justification = r.text(PJUST)?;
    s.coordinate_system = r.text(ICORDS)?;
    s.corner_coordinates = if s.has_corner_coordinates(version) { r.text(IGEOLO)? } else { String::new() };

    s.num_comments = r.number_u32(NICOM)?;
    s.comments = (0..s.num_comments).map(|_| r.text(ICOM)).collect::<Result<_>>()?;

    s.compression = r.text(IC)?;
    s.compression_rate = if s.has_compression_rate() { r.text(COMRAT)? } else { String::new() };

    s.num_bands = r.number_u32(NBANDS)?;
    if s.num_bands == 0 && version.is_v21() {
        s.num_multispectral_bands = r.number_u32(XBANDS)?;
    }
    let band_count = s.band_count(version);
    s.bands = (0..band_count).map(|_| read_band_info(r)).collect::<Result<_>>()?;

    s.sync_code = r.number_u32(ISYNC)?;
    s.mode = r.text(IMODE)?;
    s.blocks_per_row = r.number_u32(NBPR)?;
    s.blocks_per_col = r.number_u32(NBPC)?;
    s.pixels_per_block_horizontal = r.number_u32(NPPBH)?;
    s.pixels_per_block_vertical = r.number_u32(NPPBV)?;
    s.bits_per_pixel = r.number_u32(NBPP)?;
    s.display_level = r.number_u32(IDLVL)?;
    s.attachment_level = r.number_u32(IALVL)?;
    s.location = r.text(ILOC)?;
    s.magnification = r.text(IMAG)?;

    s.user_defined = read_extensions(r, UDIDL, UDOFL)?;
    s.extended = read_extensions(r, IXSHDL, IXSOFL)?;
    Ok(s)
}

fn read_band_info<R: Read + ?Sized>(r: &mut FieldReader<'_, R>) -> Result<BandInfo> {
    use image::*;

    let mut band = BandInfo::new(r.text(IREPBAND)?);
    band.subcategory = r.text(ISUBCAT)?;
    band.filter_condition = r.text(IFC)?;
    band.filter_code = r.text(IMFLT)?;
    band.num_luts = r.number_u32(NLUTS)?;
    if band.num_luts > 0 {
        band.lut_entries = r.number_u32(NELUT)?;
        band.lut = Bytes::from(r.raw(band.lut_len())?);
    }
    Ok(band)
}

pub fn read_graphic_subheader<R: Read + ?Sized>(r: &mut FieldReader<'_, R>, version: Version) -> Result<GraphicSubheader> {
    use graphic::*;

    expect_part_type(r, SY, "SY")?;
    let graphic_id = r.text(SID)?;
    let name = r.text(SNAME)?;
    let classification = r.text(SSCLAS)?;
    let security = SecurityGroup::read_from(r, version)?;
    let encrypted = r.number_u32(ENCRYP)?;
    let format = r.text(SFMT)?;
    let structure = r.number(SSTRUCT)?;
    let display_level = r.number_u32(SDLVL)?;
    let attachment_level = r.number_u32(SALVL)?;
    let location = r.text(SLOC)?;
    let first_bound = r.text(SBND1)?;
    let color = r.text(SCOLOR)?;
    let second_bound = r.text(SBND2)?;
    let reserved = r.number_u32(SRES2)?;
    let extended = read_extensions(r, SXSHDL, SXSOFL)?;

    Ok(GraphicSubheader {
        graphic_id,
        name,
        classification,
        security,
        encrypted,
        format,
        structure,
        display_level,
        attachment_level,
        location,
        first_bound,
        color,
        second_bound,
        reserved,
        extended,
    })
}

pub fn read_label_subheader<R: Read + ?Sized>(r: &mut FieldReader<'_, R>, version: Version) -> Result<LabelSubheader> {
    use label::*;

    expect_part_type(r, LA, "LA")?;
    Ok(LabelSubheader {
        label_id: r.text(LID)?,
        classification: r.text(LSCLAS)?,
        security: SecurityGroup::read_from(r, version)?,
        encrypted: r.number_u32(ENCRYP)?,
        font_style: r.text(LFS)?,
        cell_width: r.number_u32(LCW)?,
        cell_height: r.number_u32(LCH)?,
        display_level: r.number_u32(LDLVL)?,
        attachment_level: r.number_u32(LALVL)?,
        location_row: r.number_u32(LLOCR)?,
        location_col: r.number_u32(LLOCC)?,
        text_color: raw3(r, LTC)?,
        background_color: raw3(r, LBC)?,
        extended: read_extensions(r, LXSHDL, LXSOFL)?,
    })
}

pub fn read_text_subheader<R: Read + ?Sized>(r: &mut FieldReader<'_, R>, version: Version) -> Result<TextSubheader> {
    use text::*;

    expect_part_type(r, TE, "TE")?;
    Ok(TextSubheader {
        text_id: r.text(TEXTID)?,
        attachment_level: r.number_u32(TXTALVL)?,
        text_datetime: r.text(TXTDT)?,
        title: r.text(TXTITL)?,
        classification: r.text(TSCLAS)?,
        security: SecurityGroup::read_from(r, version)?,
        encrypted: r.number_u32(ENCRYP)?,
        format: r.text(TXTFMT)?,
        extended: read_extensions(r, TXSHDL, TXSOFL)?,
    })
}

/// Data extension subheader. TRE payloads are read separately, once the
/// data length is known.
pub fn read_des_subheader<R: Read + ?Sized>(
    r: &mut FieldReader<'_, R>,
    version: Version,
) -> Result<DataExtensionSubheader> {
    use des::*;

    expect_part_type(r, DE, "DE")?;
    let mut s = DataExtensionSubheader::new(r.text(DESTAG)?);
    s.version = r.number_u32(DESVER)?;
    s.classification = r.text(DESCLAS)?;
    s.security = SecurityGroup::read_from(r, version)?;
    if s.is_overflow() {
        s.overflowed_header_type = r.text(DESOFLW)?;
        s.data_item_overflowed = r.number_u32(DESITEM)?;
    }
    let length = r.number(DESSHL)? as usize;
    if length > 0 {
        let fields = r.raw(length)?;
        s.subheader_fields = Some(Tre::raw(s.type_id.clone(), fields));
    }
    Ok(s)
}

pub fn read_res_subheader<R: Read + ?Sized>(
    r: &mut FieldReader<'_, R>,
    version: Version,
) -> Result<ReservedExtensionSubheader> {
    use res::*;

    expect_part_type(r, RE, "RE")?;
    let mut s = ReservedExtensionSubheader::new(r.text(RESTAG)?);
    s.version = r.number_u32(RESVER)?;
    s.classification = r.text(RESCLAS)?;
    s.security = SecurityGroup::read_from(r, version)?;
    let length = r.number(RESSHL)? as usize;
    s.subheader_fields = Bytes::from(r.raw(length)?);
    Ok(s)
}
