// src/writer/subheaders.rs
//! Per-segment subheader writers.
//!
//! Each writer emits the fixed fields of its segment kind, the security group
//! for the file's version, the kind-specific fields and finally the embedded
//! extension blocks.

use std::io::Write;

use crate::error::{NitfError, Result};
use crate::field::widths::{des, graphic, image, label, text};
use crate::field::FieldWriter;
use crate::record::{
    BandInfo, DataExtensionSubheader, GraphicSubheader, ImageSubheader, LabelSubheader, Record,
    ReservedExtensionSubheader, TextSubheader,
};
use crate::types::Version;
use crate::writer::extensions::write_extensions;

pub fn write_image_subheader<W: Write + ?Sized>(
    w: &mut FieldWriter<'_, W>,
    subheader: &ImageSubheader,
    version: Version,
    record: &Record,
) -> Result<()> {
    use image::*;

    w.text(IM, "IM")?;
    w.text(IID1, &subheader.image_id)?;
    w.text(IDATIM, &subheader.image_datetime)?;
    w.text(TGTID, &subheader.target_id)?;
    w.text(IID2, &subheader.title)?;
    w.text(ISCLAS, &subheader.classification)?;
    subheader.security.write_to(w, version)?;
    w.number(ENCRYP, subheader.encrypted as u64)?;
    w.text(ISORCE, &subheader.source)?;
    w.number(NROWS, subheader.num_rows as u64)?;
    w.number(NCOLS, subheader.num_cols as u64)?;
    w.text(PVTYPE, &subheader.pixel_value_type)?;
    w.text(IREP, &subheader.representation)?;
    w.text(ICAT, &subheader.category)?;
    w.number(ABPP, subheader.actual_bits_per_pixel as u64)?;
    w.text(PJUST, &subheader.justification)?;
    w.text(ICORDS, &subheader.coordinate_system)?;
    if subheader.has_corner_coordinates(version) {
        w.text(IGEOLO, &subheader.corner_coordinates)?;
    }

    let num_comments = subheader.num_comments as usize;
    if subheader.comments.len() < num_comments {
        return Err(NitfError::InvalidParameter(format!(
            "NICOM declares {} comments but {} are present",
            num_comments,
            subheader.comments.len()
        )));
    }
    w.number(NICOM, num_comments as u64)?;
    for comment in &subheader.comments[..num_comments] {
        w.text(ICOM, comment)?;
    }

    w.text(IC, &subheader.compression)?;
    if subheader.has_compression_rate() {
        w.text(COMRAT, &subheader.compression_rate)?;
    }

    w.number(NBANDS, subheader.num_bands as u64)?;
    if subheader.num_bands == 0 && version.is_v21() {
        w.number(XBANDS, subheader.num_multispectral_bands as u64)?;
    }
    let band_count = subheader.band_count(version) as usize;
    let bands = subheader.bands.get(..band_count).ok_or_else(|| {
        NitfError::InvalidParameter(format!(
            "{} bands declared but {} band info blocks are present",
            band_count,
            subheader.bands.len()
        ))
    })?;
    for band in bands {
        write_band_info(w, band)?;
    }

    w.number(ISYNC, subheader.sync_code as u64)?;
    w.text(IMODE, &subheader.mode)?;
    w.number(NBPR, subheader.blocks_per_row as u64)?;
    w.number(NBPC, subheader.blocks_per_col as u64)?;
    w.number(NPPBH, subheader.pixels_per_block_horizontal as u64)?;
    w.number(NPPBV, subheader.pixels_per_block_vertical as u64)?;
    w.number(NBPP, subheader.bits_per_pixel as u64)?;
    w.number(IDLVL, subheader.display_level as u64)?;
    w.number(IALVL, subheader.attachment_level as u64)?;
    w.text(ILOC, &subheader.location)?;
    w.text(IMAG, &subheader.magnification)?;

    write_extensions(w, &subheader.user_defined, UDIDL, UDOFL, record)?;
    write_extensions(w, &subheader.extended, IXSHDL, IXSOFL, record)?;
    Ok(())
}

fn write_band_info<W: Write + ?Sized>(w: &mut FieldWriter<'_, W>, band: &BandInfo) -> Result<()> {
    use image::*;

    w.text(IREPBAND, &band.representation)?;
    w.text(ISUBCAT, &band.subcategory)?;
    w.text(IFC, &band.filter_condition)?;
    w.text(IMFLT, &band.filter_code)?;
    w.number(NLUTS, band.num_luts as u64)?;
    if band.num_luts > 0 {
        w.number(NELUT, band.lut_entries as u64)?;
        if band.lut.len() != band.lut_len() {
            return Err(NitfError::InvalidParameter(format!(
                "lookup tables hold {} bytes, NLUTS x NELUT is {}",
                band.lut.len(),
                band.lut_len()
            )));
        }
        w.raw(&band.lut)?;
    }
    Ok(())
}

pub fn write_graphic_subheader<W: Write + ?Sized>(
    w: &mut FieldWriter<'_, W>,
    subheader: &GraphicSubheader,
    version: Version,
    record: &Record,
) -> Result<()> {
    use graphic::*;

    w.text(SY, "SY")?;
    w.text(SID, &subheader.graphic_id)?;
    w.text(SNAME, &subheader.name)?;
    w.text(SSCLAS, &subheader.classification)?;
    subheader.security.write_to(w, version)?;
    w.number(ENCRYP, subheader.encrypted as u64)?;
    w.text(SFMT, &subheader.format)?;
    w.number(SSTRUCT, subheader.structure)?;
    w.number(SDLVL, subheader.display_level as u64)?;
    w.number(SALVL, subheader.attachment_level as u64)?;
    w.text(SLOC, &subheader.location)?;
    w.text(SBND1, &subheader.first_bound)?;
    w.text(SCOLOR, &subheader.color)?;
    w.text(SBND2, &subheader.second_bound)?;
    w.number(SRES2, subheader.reserved as u64)?;

    write_extensions(w, &subheader.extended, SXSHDL, SXSOFL, record)
}

/// Label subheader. Labels are never emitted as segments of a file; the
/// writer is kept for callers that need the encoding on its own.
pub fn write_label_subheader<W: Write + ?Sized>(
    w: &mut FieldWriter<'_, W>,
    subheader: &LabelSubheader,
    version: Version,
    record: &Record,
) -> Result<()> {
    use label::*;

    w.text(LA, "LA")?;
    w.text(LID, &subheader.label_id)?;
    w.text(LSCLAS, &subheader.classification)?;
    subheader.security.write_to(w, version)?;
    w.number(ENCRYP, subheader.encrypted as u64)?;
    w.text(LFS, &subheader.font_style)?;
    w.number(LCW, subheader.cell_width as u64)?;
    w.number(LCH, subheader.cell_height as u64)?;
    w.number(LDLVL, subheader.display_level as u64)?;
    w.number(LALVL, subheader.attachment_level as u64)?;
    w.number(LLOCR, subheader.location_row as u64)?;
    w.number(LLOCC, subheader.location_col as u64)?;
    w.binary(LTC, &subheader.text_color)?;
    w.binary(LBC, &subheader.background_color)?;

    write_extensions(w, &subheader.extended, LXSHDL, LXSOFL, record)
}

pub fn write_text_subheader<W: Write + ?Sized>(
    w: &mut FieldWriter<'_, W>,
    subheader: &TextSubheader,
    version: Version,
    record: &Record,
) -> Result<()> {
    use text::*;

    w.text(TE, "TE")?;
    w.text(TEXTID, &subheader.text_id)?;
    w.number(TXTALVL, subheader.attachment_level as u64)?;
    w.text(TXTDT, &subheader.text_datetime)?;
    w.text(TXTITL, &subheader.title)?;
    w.text(TSCLAS, &subheader.classification)?;
    subheader.security.write_to(w, version)?;
    w.number(ENCRYP, subheader.encrypted as u64)?;
    w.text(TXTFMT, &subheader.format)?;

    write_extensions(w, &subheader.extended, TXSHDL, TXSOFL, record)
}

pub fn write_des_subheader<W: Write + ?Sized>(
    w: &mut FieldWriter<'_, W>,
    subheader: &DataExtensionSubheader,
    version: Version,
    record: &Record,
) -> Result<()> {
    use des::*;

    w.text(DE, "DE")?;
    w.text(DESTAG, &subheader.type_id)?;
    w.number(DESVER, subheader.version as u64)?;
    w.text(DESCLAS, &subheader.classification)?;
    subheader.security.write_to(w, version)?;

    if subheader.is_overflow() {
        w.text(DESOFLW, &subheader.overflowed_header_type)?;
        w.number(DESITEM, subheader.data_item_overflowed as u64)?;
    }

    let fields = subheader.subheader_fields.as_ref();
    let length = match fields {
        Some(tre) => tre.current_size()?,
        None => 0,
    };
    w.number(DESSHL, length as u64)?;
    if let Some(tre) = fields.filter(|_| length > 0) {
        let mut sink = w.inner();
        tre.write_body(&mut sink, record)?;
    }
    Ok(())
}

/// Reserved extension segments cannot be written. Fails before emitting
/// anything.
pub fn write_res_subheader<W: Write + ?Sized>(
    _w: &mut FieldWriter<'_, W>,
    subheader: &ReservedExtensionSubheader,
    _version: Version,
    _record: &Record,
) -> Result<()> {
    Err(NitfError::NotImplemented(format!(
        "writing reserved extension segment {:?}",
        subheader.type_id
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tre::Tre;

    fn image_bytes(subheader: &ImageSubheader, version: Version) -> Vec<u8> {
        let record = Record::new(version);
        let mut out = Vec::new();
        write_image_subheader(&mut FieldWriter::new(&mut out), subheader, version, &record).unwrap();
        out
    }

    #[test]
    fn minimal_image_subheader_size() {
        let mut subheader = ImageSubheader::mono(100, 100, 8);
        subheader.coordinate_system = "N".into();
        // ICORDS N on 2.1 means UTM north and carries IGEOLO
        assert_eq!(image_bytes(&subheader, Version::V21).len(), 500);

        subheader.coordinate_system = String::new();
        let out = image_bytes(&subheader, Version::V21);
        assert_eq!(out.len(), 440);
        assert_eq!(&out[..2], b"IM");
    }

    #[test]
    fn comments_and_compression_rate() {
        let mut subheader = ImageSubheader::mono(10, 10, 8);
        subheader.add_comment("first");
        subheader.add_comment("second");
        let base = image_bytes(&ImageSubheader::mono(10, 10, 8), Version::V21).len();
        assert_eq!(image_bytes(&subheader, Version::V21).len(), base + 160);

        subheader.compression = "C3".into();
        subheader.compression_rate = "00.5".into();
        assert_eq!(image_bytes(&subheader, Version::V21).len(), base + 164);
    }

    #[test]
    fn missing_comment_is_an_error() {
        let mut subheader = ImageSubheader::mono(10, 10, 8);
        subheader.num_comments = 1;
        let record = Record::new(Version::V21);
        let mut out = Vec::new();
        let err = write_image_subheader(&mut FieldWriter::new(&mut out), &subheader, Version::V21, &record);
        assert!(matches!(err, Err(NitfError::InvalidParameter(_))));
    }

    #[test]
    fn lut_bytes_follow_band_info() {
        let mut subheader = ImageSubheader::mono(10, 10, 8);
        subheader.set_bands(vec![BandInfo::new("LU").with_lut(3, 4, vec![7u8; 12])]);
        let plain = image_bytes(&ImageSubheader::mono(10, 10, 8), Version::V21).len();
        // NELUT plus 12 LUT bytes
        assert_eq!(image_bytes(&subheader, Version::V21).len(), plain + 5 + 12);

        subheader.bands[0].lut = vec![7u8; 5].into();
        let record = Record::new(Version::V21);
        let mut out = Vec::new();
        assert!(write_image_subheader(&mut FieldWriter::new(&mut out), &subheader, Version::V21, &record).is_err());
    }

    #[test]
    fn extended_band_count_on_v21() {
        let mut subheader = ImageSubheader::mono(10, 10, 8);
        subheader.set_bands((0..10).map(|_| BandInfo::new("M")).collect());
        let out = image_bytes(&subheader, Version::V21);
        let single = image_bytes(&ImageSubheader::mono(10, 10, 8), Version::V21).len();
        // XBANDS plus nine more 13-byte band blocks
        assert_eq!(out.len(), single + 5 + 9 * 13);
    }

    #[test]
    fn des_overflow_fields_only_for_overflow_tag() {
        let record = Record::new(Version::V21);
        let mut plain = Vec::new();
        let des = DataExtensionSubheader::new("XML_DATA_CONTENT");
        write_des_subheader(&mut FieldWriter::new(&mut plain), &des, Version::V21, &record).unwrap();
        assert_eq!(plain.len(), 2 + 25 + 2 + 1 + 167 + 4);

        let mut overflow = Vec::new();
        let des = DataExtensionSubheader::overflow("UDID", 1, "U", Default::default());
        write_des_subheader(&mut FieldWriter::new(&mut overflow), &des, Version::V21, &record).unwrap();
        assert_eq!(overflow.len(), plain.len() + 9);
        assert_eq!(&overflow[197..206], b"UDID  001");
    }

    #[test]
    fn des_user_fields_follow_their_length() {
        let record = Record::new(Version::V21);
        let mut des = DataExtensionSubheader::new("CSSHPA DES");
        des.subheader_fields = Some(Tre::raw("CSSHPA DES", b"FIELDS".to_vec()));
        let mut out = Vec::new();
        write_des_subheader(&mut FieldWriter::new(&mut out), &des, Version::V21, &record).unwrap();
        assert!(out.ends_with(b"0006FIELDS"));
    }

    #[test]
    fn res_is_not_implemented_and_writes_nothing() {
        let record = Record::new(Version::V21);
        let mut out = Vec::new();
        let res = ReservedExtensionSubheader::new("RES");
        let err = write_res_subheader(&mut FieldWriter::new(&mut out), &res, Version::V21, &record);
        assert!(matches!(err, Err(NitfError::NotImplemented(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn label_colors_are_raw() {
        let record = Record::new(Version::V20);
        let mut label = LabelSubheader::default();
        label.text_color = [1, 2, 3];
        let mut out = Vec::new();
        write_label_subheader(&mut FieldWriter::new(&mut out), &label, Version::V20, &record).unwrap();
        // LA LID LSCLAS + 166 security + ENCRYP LFS LCW LCH LDLVL LALVL LLOCR LLOCC
        let ltc = 2 + 10 + 1 + 166 + 1 + 1 + 2 + 2 + 3 + 3 + 5 + 5;
        assert_eq!(&out[ltc..ltc + 6], &[1, 2, 3, 0xff, 0xff, 0xff]);
        assert_eq!(out.len(), ltc + 6 + 5);
    }

    #[test]
    fn graphic_reserved_fields_are_written() {
        let record = Record::new(Version::V21);
        let graphic = GraphicSubheader { structure: 42, reserved: 7, ..GraphicSubheader::default() };
        let mut out = Vec::new();
        write_graphic_subheader(&mut FieldWriter::new(&mut out), &graphic, Version::V21, &record).unwrap();
        // SY SID SNAME SSCLAS + 167 security + ENCRYP SFMT
        let sstruct = 2 + 10 + 20 + 1 + 167 + 1 + 1;
        assert_eq!(&out[sstruct..sstruct + 13], b"0000000000042");
        // SDLVL SALVL SLOC SBND1 SCOLOR SBND2
        let sres2 = sstruct + 13 + 3 + 3 + 10 + 10 + 1 + 10;
        assert_eq!(&out[sres2..sres2 + 2], b"07");
        assert_eq!(out.len(), sres2 + 2 + 5);
    }
}
