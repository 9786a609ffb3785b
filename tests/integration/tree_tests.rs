//! Directory tree integration tests.
//!
//! Tests verify:
//! - Little-endian and big-endian files decode to the same values
//! - Sub-directories and IFD1 are reached and ordered
//! - JPEG files expose their Exif segment
//! - Broken records and directories are skipped, not fatal
//! - A decoded directory re-encodes and reads back the same

use bytes::Bytes;

use exif_entry::format::tiff::tags;
use exif_entry::{
    locate_exif, ByteOrder, DecodeSession, Directory, DirectoryKind, Entry, EntryValue, ExifTree,
    FormatError, MemorySource, Number, OverflowPolicy, TiffError,
};

use super::test_utils::{
    create_camera_exif, is_tiff_magic, wrap_in_jpeg, ByteOrderType, IfdBuilder, TiffBuilder, LONG,
};

fn read_tree(data: Vec<u8>) -> ExifTree {
    let source = MemorySource::new(data);
    ExifTree::read(&source, OverflowPolicy::Strict).unwrap()
}

// =============================================================================
// Byte Order Tests
// =============================================================================

#[test]
fn test_little_endian_tree() {
    let data = create_camera_exif(ByteOrderType::LittleEndian);
    assert_eq!(&data[0..2], b"II");
    assert!(is_tiff_magic(&data));

    let tree = read_tree(data);
    assert_eq!(tree.byte_order, ByteOrder::LittleEndian);

    let make = tree.entry(DirectoryKind::Image, tags::MAKE).unwrap();
    assert_eq!(make.value(), EntryValue::Text("Canon".to_string()));
}

#[test]
fn test_big_endian_tree() {
    let data = create_camera_exif(ByteOrderType::BigEndian);
    assert_eq!(&data[0..2], b"MM");

    let tree = read_tree(data);
    assert_eq!(tree.byte_order, ByteOrder::BigEndian);

    let f_number = tree.entry(DirectoryKind::ExifSub, tags::F_NUMBER).unwrap();
    assert_eq!(f_number.value(), EntryValue::Scalar(Number::rational(28, 10)));
    assert_eq!(f_number.text(false), "f/2.8");
}

#[test]
fn test_byte_orders_agree() {
    let le = read_tree(create_camera_exif(ByteOrderType::LittleEndian));
    let be = read_tree(create_camera_exif(ByteOrderType::BigEndian));

    let describe = |tree: &ExifTree| -> Vec<(DirectoryKind, u16, EntryValue, String)> {
        tree.entries()
            .map(|e| (e.directory_kind(), e.tag(), e.value(), e.text(false)))
            .collect()
    };
    assert_eq!(describe(&le), describe(&be));
}

// =============================================================================
// Structure Tests
// =============================================================================

#[test]
fn test_all_directories_found_in_order() {
    let tree = read_tree(create_camera_exif(ByteOrderType::LittleEndian));

    let kinds: Vec<DirectoryKind> = tree.directories.iter().map(|d| d.kind).collect();
    assert_eq!(kinds, DirectoryKind::ALL.to_vec());

    let exif = tree.directory(DirectoryKind::ExifSub).unwrap();
    assert!(exif.pointer(DirectoryKind::InteroperabilitySub).is_some());
    assert!(tree.failures().next().is_none());
}

#[test]
fn test_pointer_tags_are_not_entries() {
    let tree = read_tree(create_camera_exif(ByteOrderType::LittleEndian));

    assert!(tree.entry(DirectoryKind::Image, tags::EXIF_IFD_POINTER).is_none());
    assert!(tree.entry(DirectoryKind::Image, tags::GPS_INFO_IFD_POINTER).is_none());
    assert!(tree
        .entry(DirectoryKind::ExifSub, tags::INTEROPERABILITY_IFD_POINTER)
        .is_none());
}

#[test]
fn test_entries_know_their_directory() {
    let tree = read_tree(create_camera_exif(ByteOrderType::BigEndian));

    // Tag 0x0001 appears in both the GPS and the Interoperability directory
    let gps_ref = tree.entry(DirectoryKind::GpsSub, 0x0001).unwrap();
    let interop_index = tree.entry(DirectoryKind::InteroperabilitySub, 0x0001).unwrap();

    assert_eq!(gps_ref.text(false), "N");
    assert_eq!(interop_index.text(false), "R98");
    assert!(gps_ref.to_debug_string().contains("GPSLatitudeRef"));
    assert!(interop_index.to_debug_string().contains("InteroperabilityIndex"));
}

#[test]
fn test_tag_specific_text() {
    let tree = read_tree(create_camera_exif(ByteOrderType::LittleEndian));
    let text = |kind, tag| tree.entry(kind, tag).unwrap().text(false);

    assert_eq!(text(DirectoryKind::Image, tags::ORIENTATION), "top - left");
    assert_eq!(text(DirectoryKind::Image, tags::RESOLUTION_UNIT), "Inch");
    assert_eq!(text(DirectoryKind::Image, tags::YCBCR_POSITIONING), "co-sited");
    assert_eq!(text(DirectoryKind::ExifSub, tags::EXPOSURE_TIME), "1/200 sec.");
    assert_eq!(text(DirectoryKind::ExifSub, tags::FOCAL_LENGTH), "6.3 mm");
    assert_eq!(text(DirectoryKind::ExifSub, tags::METERING_MODE), "Pattern");
    assert_eq!(text(DirectoryKind::ExifSub, tags::EXIF_VERSION), "Exif Version 2.2");
    assert_eq!(text(DirectoryKind::ExifSub, tags::COLOR_SPACE), "sRGB");
    assert_eq!(text(DirectoryKind::ExifSub, 0x9204), "-1/3");
    assert_eq!(
        text(DirectoryKind::ExifSub, tags::MAKER_NOTE),
        "(20 bytes of vendor data)"
    );
    assert_eq!(
        text(DirectoryKind::InteroperabilitySub, tags::INTEROPERABILITY_VERSION),
        "Interoperability Version 1.0"
    );
    assert_eq!(
        text(DirectoryKind::GpsSub, tags::GPS_LATITUDE),
        "52° 22' 12.34\""
    );
    assert_eq!(text(DirectoryKind::GpsSub, tags::GPS_VERSION_ID), "2, 2, 0, 0");
    assert_eq!(text(DirectoryKind::Thumbnail, tags::COMPRESSION), "6");
}

// =============================================================================
// JPEG Tests
// =============================================================================

#[test]
fn test_jpeg_exif_segment() {
    let tiff = create_camera_exif(ByteOrderType::BigEndian);
    let jpeg = wrap_in_jpeg(&tiff);

    let source = locate_exif(Bytes::from(jpeg)).unwrap();
    let tree = ExifTree::read(&source, OverflowPolicy::Strict).unwrap();

    let model = tree.entry(DirectoryKind::Image, tags::MODEL).unwrap();
    assert_eq!(model.text(false), "Canon EOS 5D");
    assert_eq!(tree.directories.len(), 5);
}

#[test]
fn test_jpeg_without_exif() {
    let mut jpeg = vec![0xFF, 0xD8];
    jpeg.extend_from_slice(&[0xFF, 0xDA, 0x00, 0x02, 0x00]);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);

    let result = locate_exif(Bytes::from(jpeg));
    assert!(matches!(result, Err(FormatError::MissingExif)));
}

// =============================================================================
// Error Handling Tests
// =============================================================================

#[test]
fn test_bad_records_are_skipped() {
    let data = TiffBuilder::new()
        .ifd0(
            IfdBuilder::new()
                .ascii(tags::MAKE, "Nikon")
                .raw(0x0200, 13, 1, &[0, 0, 0, 0])
                // Four longs need an external block; this offset is far out of range
                .raw(0x0201, LONG, 4, &[0xFF, 0xFF, 0xFF, 0x00])
                .short(tags::ORIENTATION, &[8]),
        )
        .build();

    let tree = read_tree(data);
    let ifd0 = tree.directory(DirectoryKind::Image).unwrap();

    assert_eq!(ifd0.entries.len(), 2);
    assert_eq!(ifd0.failures.len(), 2);
    assert!(matches!(ifd0.failures[0].error, TiffError::UnknownFormat(13)));
    assert!(matches!(ifd0.failures[1].error, TiffError::Io(_)));
    assert_eq!(
        ifd0.get(tags::ORIENTATION).unwrap().text(false),
        "left - bottom"
    );
}

#[test]
fn test_dangling_sub_directory_is_skipped() {
    let data = TiffBuilder::new()
        .ifd0(
            IfdBuilder::new()
                .ascii(tags::MAKE, "Nikon")
                .long(tags::EXIF_IFD_POINTER, &[0x00FF_FFFF]),
        )
        .build();

    let tree = read_tree(data);
    assert_eq!(tree.directories.len(), 1);
    assert!(tree.entry(DirectoryKind::Image, tags::MAKE).is_some());
}

#[test]
fn test_invalid_header_is_fatal() {
    let mut data = create_camera_exif(ByteOrderType::LittleEndian);
    data[2] = 43;

    let source = MemorySource::new(data);
    let result = ExifTree::read(&source, OverflowPolicy::Lenient);
    assert!(matches!(result, Err(TiffError::InvalidVersion(43))));
}

// =============================================================================
// Re-encoding Tests
// =============================================================================

#[test]
fn test_directory_reencodes_in_other_order() {
    let tree = read_tree(create_camera_exif(ByteOrderType::LittleEndian));
    let ifd0 = tree.directory(DirectoryKind::Image).unwrap();

    // Place the re-encoded directory right after a big-endian header
    let mut data = vec![b'M', b'M', 0x00, 0x2A, 0x00, 0x00, 0x00, 0x08];
    data.extend_from_slice(&ifd0.encode(ByteOrder::BigEndian, 8).unwrap());

    let source = MemorySource::new(data);
    let session = DecodeSession::new(ByteOrder::BigEndian, OverflowPolicy::Strict);
    let reread = Directory::read(&source, 8, DirectoryKind::Image, &session).unwrap();

    assert!(reread.failures.is_empty());
    assert_eq!(reread.entries.len(), ifd0.entries.len());
    for (before, after) in ifd0.entries.iter().zip(&reread.entries) {
        assert_eq!(before.tag(), after.tag());
        assert_eq!(before.value(), after.value());
        assert_eq!(
            before.bytes(ByteOrder::BigEndian),
            after.bytes(ByteOrder::BigEndian)
        );
    }
}

#[test]
fn test_edited_entry_is_reencoded() {
    let mut tree = read_tree(create_camera_exif(ByteOrderType::BigEndian));

    let ifd0 = tree.directory_mut(DirectoryKind::Image).unwrap();
    let orientation = ifd0
        .get_mut(tags::ORIENTATION)
        .and_then(|entry| entry.as_number_mut())
        .unwrap();
    orientation
        .set_values(vec![Number::int(6)], OverflowPolicy::Strict)
        .unwrap();
    assert!(orientation
        .set_values(vec![Number::int(70_000)], OverflowPolicy::Strict)
        .is_err());

    let ifd0 = tree.directory(DirectoryKind::Image).unwrap();
    let mut data = vec![b'M', b'M', 0x00, 0x2A, 0x00, 0x00, 0x00, 0x08];
    data.extend_from_slice(&ifd0.encode(ByteOrder::BigEndian, 8).unwrap());

    let reread = read_tree(data);
    let orientation = reread.entry(DirectoryKind::Image, tags::ORIENTATION).unwrap();
    assert_eq!(orientation.value(), EntryValue::Scalar(Number::int(6)));
    assert_eq!(orientation.text(false), "right - top");
}
