// tests/writer_tests.rs
use std::io::{Cursor, Write};

use nitf_rs::*;

fn write_to_vec(mut writer: NitfWriter<Cursor<Vec<u8>>>) -> (WriteReport, Vec<u8>) {
    let report = writer.write().unwrap();
    let bytes = writer.into_inner().unwrap().into_inner();
    (report, bytes)
}

#[derive(Debug)]
struct FailingTre;

impl TreHandler for FailingTre {
    fn current_size(&self) -> Result<u32> {
        Ok(4)
    }

    fn write(&self, _out: &mut dyn Write, _record: &Record) -> Result<()> {
        Err(NitfError::InvalidParameter("encoder exploded".into()))
    }
}

#[test]
fn test_single_image_and_tre_extension_scenario() {
    let mut record = Record::new(Version::V21);
    let mut image = ImageSubheader::mono(100, 100, 8);
    image.coordinate_system = "N".into();
    image.corner_coordinates = "0".repeat(60);
    record.add_image(image);

    let mut des = DataExtensionSubheader::new("Registered Extensions");
    des.user_defined.push(Tre::raw("SIXTY", vec![b'6'; 49]));
    record.add_data_extension(des);

    let mut writer = NitfWriter::prepare(Cursor::new(Vec::new()), record).unwrap();
    writer.attach_image_writer(0, Box::new(BufferImageWriter::new(vec![7u8; 10_000]))).unwrap();
    let (report, bytes) = write_to_vec(writer);

    assert_eq!(report.header_length, 418);
    assert_eq!(report.images, vec![ComponentInfo::new(500, 10_000)]);
    assert_eq!(report.data_extensions, vec![ComponentInfo::new(201, 60)]);
    assert_eq!(report.file_length, 418 + 500 + 10_000 + 201 + 60);
    assert_eq!(bytes.len() as u64, report.file_length);
    assert!(report.warnings.is_empty());

    // FL HL NUMI LISH LI NUMS NUMX NUMT NUMDES LDSH LD NUMRES UDHDL XHDL
    let tables = std::str::from_utf8(&bytes[343..418]).unwrap();
    assert_eq!(
        tables,
        "000000011179000418001000500000001000000000000000102010000000600000000000000"
    );
    assert_eq!(&bytes[418..420], b"IM");
    assert_eq!(&bytes[418 + 500 + 10_000..418 + 500 + 10_002], b"DE");
    assert_eq!(&bytes[bytes.len() - 60..bytes.len() - 49], b"SIXTY 00049");
}

#[test]
fn test_component_info_matches_emitted_bytes() {
    let mut record = Record::new(Version::V21);
    record.add_image(ImageSubheader::mono(10, 20, 8));
    let mut tagged = ImageSubheader::mono(4, 4, 16);
    tagged.extended.push(Tre::raw("ACFTB", vec![b'A'; 207]));
    tagged.add_comment("with comment");
    record.add_image(tagged);
    record.add_graphic(GraphicSubheader::default());
    record.add_text(TextSubheader::default());
    let mut text = TextSubheader::default();
    text.extended.push(Tre::raw("STDIDC", vec![b'S'; 89]));
    record.add_text(text);
    record.add_data_extension(DataExtensionSubheader::new("XML_DATA_CONTENT"));

    let mut writer = NitfWriter::prepare(Cursor::new(Vec::new()), record).unwrap();
    writer.attach_image_writer(0, Box::new(BufferImageWriter::new(vec![1u8; 200]))).unwrap();
    writer.attach_image_writer(1, Box::new(BufferImageWriter::new(vec![2u8; 32]))).unwrap();
    writer.attach_graphic_writer(0, Box::new(BufferSegmentWriter::new(b"CGM".to_vec()))).unwrap();
    writer.attach_text_writer(0, Box::new(BufferSegmentWriter::new(b"hello".to_vec()))).unwrap();
    writer.attach_text_writer(1, Box::new(BufferSegmentWriter::new(Vec::new()))).unwrap();
    writer.attach_data_extension_writer(0, Box::new(BufferSegmentWriter::new(b"<xml/>".to_vec()))).unwrap();
    let (report, bytes) = write_to_vec(writer);

    assert_eq!(report.file_length, bytes.len() as u64);
    assert_eq!(report.file_length, report.header_length + report.segments_length());
    assert_eq!(report.images[0].data_length, 200);
    assert_eq!(report.images[1].data_length, 32);
    assert_eq!(report.images[1].subheader_length, 440 + 80 + 207 + 11 + 3);
    assert_eq!(report.graphics[0].data_length, 3);
    assert_eq!(report.texts[0].data_length, 5);
    assert_eq!(report.texts[1].data_length, 0);
    assert_eq!(report.data_extensions[0].data_length, 6);

    let reader = NitfReader::new(Cursor::new(bytes)).unwrap();
    assert_eq!(reader.file_length(), report.file_length);
    assert_eq!(reader.header_length(), report.header_length);
    assert_eq!(reader.component_info(SegmentKind::Image), report.images);
    assert_eq!(reader.component_info(SegmentKind::Graphic), report.graphics);
    assert_eq!(reader.component_info(SegmentKind::Text), report.texts);
    assert_eq!(reader.component_info(SegmentKind::DataExtension), report.data_extensions);
}

#[test]
fn test_reserved_extension_fails_without_emitting_bytes() {
    let mut record = Record::new(Version::V21);
    record.reserved_extensions.push(ReservedExtensionSubheader::new("RES_TAG"));

    let mut writer = NitfWriter::prepare(Cursor::new(Vec::new()), record).unwrap();
    let err = writer.write().unwrap_err();
    assert!(matches!(err, NitfError::NotImplemented(_)));
    assert_eq!(writer.state(), WriteState::Failed);

    let bytes = writer.into_inner().unwrap().into_inner();
    // Only the header went out, and it was never patched
    assert_eq!(bytes.len(), 389);
    assert_eq!(&bytes[343..355], b"000000000000");
    assert_eq!(&bytes[376..379], b"000");
}

#[test]
fn test_missing_payload_writer_releases_the_others() {
    let mut record = Record::new(Version::V21);
    record.add_image(ImageSubheader::mono(2, 2, 8));
    record.add_text(TextSubheader::default());

    let mut writer = NitfWriter::prepare(Cursor::new(Vec::new()), record).unwrap();
    writer.attach_image_writer(0, Box::new(BufferImageWriter::new(vec![0u8; 4]))).unwrap();
    assert!(writer.has_payload_writer(SegmentKind::Image, 0));
    assert!(!writer.has_payload_writer(SegmentKind::Text, 0));

    match writer.write().unwrap_err() {
        NitfError::MissingPayloadWriter { kind, index } => {
            assert_eq!(kind, SegmentKind::Text);
            assert_eq!(index, 0);
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(writer.state(), WriteState::Failed);
    assert!(!writer.has_payload_writer(SegmentKind::Image, 0));
}

#[test]
fn test_attach_out_of_range() {
    let mut record = Record::new(Version::V21);
    record.add_graphic(GraphicSubheader::default());
    let mut writer = NitfWriter::prepare(Cursor::new(Vec::new()), record).unwrap();

    let err = writer
        .attach_graphic_writer(1, Box::new(BufferSegmentWriter::new(Vec::new())))
        .unwrap_err();
    assert!(matches!(
        err,
        NitfError::SegmentIndexOutOfRange { kind: SegmentKind::Graphic, index: 1, count: 1 }
    ));
}

#[test]
fn test_tre_handler_failure_aborts_the_write() {
    let mut record = Record::new(Version::V21);
    record.header.user_defined.push(Tre::new("BROKEN", Box::new(FailingTre)));

    let mut writer = NitfWriter::prepare(Cursor::new(Vec::new()), record).unwrap();
    match writer.write().unwrap_err() {
        NitfError::Tre { tag, message } => {
            assert_eq!(tag, "BROKEN");
            assert!(message.contains("encoder exploded"));
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(writer.state(), WriteState::Failed);
}

#[test]
fn test_labels_are_dropped_with_a_warning() {
    let mut record = Record::new(Version::V20);
    record.labels.push(LabelSubheader::default());

    let writer = NitfWriter::prepare(Cursor::new(Vec::new()), record).unwrap();
    assert_eq!(writer.warnings().len(), 1);
    let (report, bytes) = write_to_vec(writer);

    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("label"));
    // NUMX follows FL HL NUMI NUMS on a 2.0 header
    assert_eq!(&bytes[342 + 18 + 3 + 3..342 + 18 + 3 + 3 + 3], b"000");
    assert_eq!(report.file_length, 388);
}

#[test]
fn test_extra_comments_warn() {
    let mut record = Record::new(Version::V21);
    let mut image = ImageSubheader::mono(1, 1, 8);
    image.comments = vec!["a".into(), "b".into()];
    image.num_comments = 1;
    record.add_image(image);

    let writer = NitfWriter::prepare(Cursor::new(Vec::new()), record).unwrap();
    assert_eq!(writer.warnings().len(), 1);
    assert!(writer.warnings()[0].contains("NICOM"));
}

#[test]
fn test_count_out_of_range_at_prepare() {
    let mut record = Record::new(Version::V21);
    for _ in 0..1000 {
        record.add_graphic(GraphicSubheader::default());
    }
    let result = NitfWriter::prepare(Cursor::new(Vec::new()), record);
    assert!(matches!(result, Err(NitfError::CountOutOfRange { field: "NUMS", value: 1000 })));
}

#[test]
fn test_create_writes_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("single.ntf");

    let mut record = Record::new(Version::V21);
    record.header.file_title = "tempfile".into();
    record.add_text(TextSubheader::default());

    let options = WriterOptions::new().buffer_capacity(1024);
    let mut writer = NitfWriter::create_with_options(&path, record, options).unwrap();
    writer.attach_text_writer(0, Box::new(BufferSegmentWriter::new(b"plain text".to_vec()))).unwrap();
    let report = writer.write().unwrap();
    drop(writer);

    assert_eq!(std::fs::metadata(&path).unwrap().len(), report.file_length);

    let mut reader = NitfReader::open(&path).unwrap();
    assert_eq!(reader.record().header.file_title, "tempfile");
    assert_eq!(reader.read_payload(SegmentKind::Text, 0).unwrap(), b"plain text");
}

#[test]
fn test_v20_header_has_wide_originator_name_and_no_background_color() {
    let mut record = Record::new(Version::V20);
    record.header.background_color = [1, 2, 3];
    record.header.originator_name = "NAME".into();
    record.header.originator_phone = "PHONE".into();

    let writer = NitfWriter::prepare(Cursor::new(Vec::new()), record).unwrap();
    let (report, bytes) = write_to_vec(writer);
    assert_eq!(report.header_length, 388);

    // FHDR..FSCLAS (120) + 166 security + FSCOP FSCPYS ENCRYP
    let oname = 120 + 166 + 11;
    assert_eq!(&bytes[oname..oname + 27], format!("{:<27}", "NAME").as_bytes());
    assert_eq!(&bytes[oname + 27..oname + 32], b"PHONE");
    assert_eq!(&bytes[342..354], b"000000000388");

    let mut long_name = Record::new(Version::V20);
    long_name.header.originator_name = "N".repeat(27);
    assert!(NitfWriter::prepare(Cursor::new(Vec::new()), long_name).unwrap().write().is_ok());
}

#[test]
fn test_v21_header_keeps_background_color_ahead_of_originator_name() {
    let mut record = Record::new(Version::V21);
    record.header.background_color = [1, 2, 3];
    record.header.originator_name = "NAME".into();

    let writer = NitfWriter::prepare(Cursor::new(Vec::new()), record).unwrap();
    let (_, bytes) = write_to_vec(writer);

    let fbkgc = 120 + 167 + 11;
    assert_eq!(&bytes[fbkgc..fbkgc + 3], &[1, 2, 3]);
    assert_eq!(&bytes[fbkgc + 3..fbkgc + 27], format!("{:<24}", "NAME").as_bytes());
    assert_eq!(&bytes[343..355], b"000000000389");

    let mut long_name = Record::new(Version::V21);
    long_name.header.originator_name = "N".repeat(25);
    let result = NitfWriter::prepare(Cursor::new(Vec::new()), long_name).unwrap().write();
    assert!(matches!(result, Err(NitfError::FieldOverflow { field: "ONAME", .. })));
}
