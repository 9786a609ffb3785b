//! Entry integration tests.
//!
//! Tests verify:
//! - Range checks under both overflow policies
//! - Encoding in both byte orders, inline and external records
//! - Value and text rendering through the public entry contract

use exif_entry::format::tiff::tags;
use exif_entry::{
    debug_string, encode_entry, AsciiEntry, ByteOrder, DecodeSession, DirectoryEntry,
    DirectoryKind, Entry, EntryError, EntryValue, FormatCode, Number, NumberEntry, NumberFormat,
    OverflowPolicy, UndefinedEntry, ENTRY_RECORD_SIZE,
};

const STRICT: OverflowPolicy = OverflowPolicy::Strict;
const LENIENT: OverflowPolicy = OverflowPolicy::Lenient;

// =============================================================================
// Overflow Policy
// =============================================================================

#[test]
fn test_strict_rejects_each_format_bound() {
    for format in NumberFormat::ALL {
        let descriptor = format.descriptor();
        let mut entry = NumberEntry::new(format, 0xBEEF);

        let too_big = descriptor.max + 1;
        let value = if descriptor.dimension == 1 {
            Number::int(too_big)
        } else {
            Number::rational(too_big, 1)
        };

        let result = entry.add_number(value, STRICT);
        assert_eq!(
            result,
            Err(EntryError::OutOfRange {
                value: too_big,
                min: descriptor.min,
                max: descriptor.max,
            }),
            "{:?} accepted {}",
            format,
            too_big
        );
        assert_eq!(entry.component_count(), 0);
    }
}

#[test]
fn test_policies_do_not_interfere() {
    let mut strict_entry = NumberEntry::new(NumberFormat::Byte, 0xBEEF);
    let mut lenient_entry = NumberEntry::new(NumberFormat::Byte, 0xBEEF);

    assert!(lenient_entry.add_number(300, LENIENT).is_ok());
    assert!(strict_entry.add_number(300, STRICT).is_err());
    assert!(lenient_entry.add_number(301, LENIENT).is_ok());

    assert_eq!(strict_entry.component_count(), 0);
    assert_eq!(lenient_entry.component_count(), 2);
}

#[test]
fn test_lenient_value_kept_but_truncated_on_wire() {
    let entry =
        NumberEntry::with_values(NumberFormat::Short, 0xBEEF, vec![Number::int(70_000)], LENIENT)
            .unwrap();

    assert_eq!(entry.value(), EntryValue::Scalar(Number::int(70_000)));
    // 70000 = 0x11170, only the low 16 bits fit
    assert_eq!(&entry.bytes(ByteOrder::BigEndian)[..], &[0x11, 0x70]);
}

#[test]
fn test_failed_set_leaves_value_unchanged() {
    let mut entry =
        NumberEntry::with_values(NumberFormat::SShort, 0xBEEF, vec![Number::int(-5)], STRICT)
            .unwrap();

    let result = entry.set_value(EntryValue::Sequence(vec![Number::int(1), Number::int(40_000)]), STRICT);
    assert!(matches!(result, Err(EntryError::OutOfRange { value: 40_000, .. })));
    assert_eq!(entry.value(), EntryValue::Scalar(Number::int(-5)));
}

#[test]
fn test_shape_mismatch_is_malformed_under_both_policies() {
    for policy in [STRICT, LENIENT] {
        let mut entry = NumberEntry::new(NumberFormat::Rational, tags::X_RESOLUTION);
        let result = entry.add_number(Number::int(72), policy);
        assert!(matches!(result, Err(EntryError::MalformedValue(_))));
    }
}

// =============================================================================
// Encoding
// =============================================================================

#[test]
fn test_rational_bytes_in_both_orders() {
    let entry = NumberEntry::with_values(
        NumberFormat::Rational,
        tags::X_RESOLUTION,
        vec![Number::rational(72, 1)],
        STRICT,
    )
    .unwrap();

    assert_eq!(
        &entry.bytes(ByteOrder::BigEndian)[..],
        &[0, 0, 0, 72, 0, 0, 0, 1]
    );
    assert_eq!(
        &entry.bytes(ByteOrder::LittleEndian)[..],
        &[72, 0, 0, 0, 1, 0, 0, 0]
    );
    // Back to the first order after the cache switched
    assert_eq!(
        &entry.bytes(ByteOrder::BigEndian)[..],
        &[0, 0, 0, 72, 0, 0, 0, 1]
    );
}

#[test]
fn test_mutation_refreshes_bytes() {
    let mut entry = NumberEntry::new(NumberFormat::Short, tags::ORIENTATION);
    entry.add_number(1, STRICT).unwrap();
    assert_eq!(&entry.bytes(ByteOrder::LittleEndian)[..], &[1, 0]);

    entry.set_value(EntryValue::from(6), STRICT).unwrap();
    assert_eq!(&entry.bytes(ByteOrder::LittleEndian)[..], &[6, 0]);
}

#[test]
fn test_inline_record_is_zero_padded() {
    let mut entry = NumberEntry::new(NumberFormat::Short, tags::ORIENTATION);
    entry.add_number(6, STRICT).unwrap();

    let encoded = encode_entry(&entry, ByteOrder::BigEndian, 0x100);
    assert_eq!(encoded.record.len(), ENTRY_RECORD_SIZE);
    assert_eq!(
        encoded.record,
        [0x01, 0x12, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01, 0x00, 0x06, 0x00, 0x00]
    );
    assert!(encoded.external.is_none());
}

#[test]
fn test_external_record_points_at_block() {
    let entry = AsciiEntry::new(tags::MAKE, "Canon").unwrap();

    let encoded = encode_entry(&entry, ByteOrder::LittleEndian, 0x1234);
    assert_eq!(
        encoded.record,
        [0x0F, 0x01, 0x02, 0x00, 0x06, 0x00, 0x00, 0x00, 0x34, 0x12, 0x00, 0x00]
    );
    assert_eq!(encoded.external.as_deref(), Some(&b"Canon\0"[..]));
}

#[test]
fn test_decode_then_encode_preserves_bytes() {
    let session = DecodeSession::new(ByteOrder::BigEndian, STRICT);
    let wire = [0xFF, 0xFF, 0xFF, 0xFD, 0x00, 0x00, 0x00, 0x03];

    let entry = session
        .decode_entry(0x9204, FormatCode::SRational.as_u16(), 1, &wire, DirectoryKind::ExifSub)
        .unwrap();

    assert_eq!(entry.value(), EntryValue::Scalar(Number::rational(-3, 3)));
    assert_eq!(&entry.bytes(ByteOrder::BigEndian)[..], &wire);
    assert_eq!(entry.directory_kind(), DirectoryKind::ExifSub);
}

#[test]
fn test_decode_rejects_unknown_format() {
    let session = DecodeSession::new(ByteOrder::LittleEndian, LENIENT);
    let result = session.decode_entry(0x0100, 13, 1, &[0, 0, 0, 0], DirectoryKind::Image);
    assert!(matches!(result, Err(EntryError::MalformedValue(_))));
}

// =============================================================================
// Text and Description
// =============================================================================

#[test]
fn test_known_tag_text() {
    let mut entry = NumberEntry::new(NumberFormat::Rational, tags::EXPOSURE_TIME);
    entry.set_directory_kind(DirectoryKind::ExifSub);
    entry.add_number(Number::rational(1, 250), STRICT).unwrap();

    assert_eq!(entry.text(false), "1/250 sec.");
}

#[test]
fn test_same_tag_differs_by_directory() {
    // 0x0001 is InteroperabilityIndex in the Interoperability directory and
    // GPSLatitudeRef in the GPS directory
    let mut entry = AsciiEntry::new(0x0001, "R98").unwrap();

    entry.set_directory_kind(DirectoryKind::InteroperabilitySub);
    assert!(debug_string(&entry).contains("(InteroperabilityIndex)"));

    entry.set_directory_kind(DirectoryKind::GpsSub);
    assert!(debug_string(&entry).contains("(GPSLatitudeRef)"));
}

#[test]
fn test_debug_string_layout() {
    let entry = NumberEntry::with_values(
        NumberFormat::Short,
        tags::RESOLUTION_UNIT,
        vec![Number::int(2)],
        STRICT,
    )
    .unwrap();

    assert_eq!(
        entry.to_debug_string(),
        "  Tag: 0x0128 (ResolutionUnit)\n    Format    : 3 (Short)\n    Components: 1\n    Value     : 2\n    Text      : Inch\n"
    );
}

#[test]
fn test_debug_string_hides_vendor_value() {
    let mut entry = UndefinedEntry::new(tags::MAKER_NOTE, vec![0x41; 8]);
    entry.set_directory_kind(DirectoryKind::ExifSub);

    let description = debug_string(&entry);
    assert!(!description.contains("Value"));
    assert!(description.contains("(8 bytes of vendor data)"));
}

#[test]
fn test_directory_entry_dispatch() {
    let entries: Vec<DirectoryEntry> = vec![
        NumberEntry::with_values(NumberFormat::Long, tags::IMAGE_WIDTH, vec![Number::int(4000)], STRICT)
            .unwrap()
            .into(),
        AsciiEntry::new(tags::MODEL, "EOS").unwrap().into(),
        UndefinedEntry::new(tags::EXIF_VERSION, b"0230".to_vec()).into(),
    ];

    let formats: Vec<FormatCode> = entries.iter().map(|e| e.format()).collect();
    assert_eq!(formats, vec![FormatCode::Long, FormatCode::Ascii, FormatCode::Undefined]);

    let counts: Vec<u32> = entries.iter().map(|e| e.component_count()).collect();
    assert_eq!(counts, vec![1, 4, 4]);

    assert_eq!(entries[1].value(), EntryValue::Text("EOS".to_string()));
}
