//! Dump integration tests.
//!
//! Tests verify:
//! - Records for TIFF and JPEG files
//! - Directory filtering and brief text
//! - Failures and unreadable files are reported, not fatal
//! - JSON shape and text rendering

use bytes::Bytes;

use exif_entry::dump::{render_json, render_text};
use exif_entry::{dump_bytes, dump_file, DirectoryKind, DumpOptions, DumpRecord, OverflowPolicy};

use super::test_utils::{create_camera_exif, wrap_in_jpeg, ByteOrderType, IfdBuilder, TiffBuilder};

fn dump(name: &str, data: Vec<u8>, options: &DumpOptions) -> DumpRecord {
    dump_bytes(name, Bytes::from(data), options)
}

// =============================================================================
// Record Tests
// =============================================================================

#[test]
fn test_dump_tiff() {
    let record = dump(
        "camera.tif",
        create_camera_exif(ByteOrderType::BigEndian),
        &DumpOptions::default(),
    );

    assert!(!record.is_error());
    assert_eq!(record.container.as_deref(), Some("TIFF"));
    assert_eq!(record.byte_order.as_deref(), Some("big-endian"));
    assert!(record.failures.is_empty());

    let first = &record.entries[0];
    assert_eq!(first.directory, "IFD0");
    assert_eq!(first.tag, "0x010F");
    assert_eq!(first.name, "Make");
    assert_eq!(first.format, "Ascii");
    assert_eq!(first.components, 6);
    assert_eq!(first.text, "Canon");

    let last = record.entries.last().unwrap();
    assert_eq!(last.directory, "IFD1");
}

#[test]
fn test_dump_jpeg() {
    let jpeg = wrap_in_jpeg(&create_camera_exif(ByteOrderType::LittleEndian));
    let record = dump("camera.jpg", jpeg, &DumpOptions::default());

    assert_eq!(record.container.as_deref(), Some("JPEG"));
    assert_eq!(record.byte_order.as_deref(), Some("little-endian"));
    assert!(record.entries.iter().any(|e| e.name == "FNumber" && e.text == "f/2.8"));
}

#[test]
fn test_directory_filter() {
    let options = DumpOptions {
        directories: Some(vec![DirectoryKind::GpsSub]),
        ..DumpOptions::default()
    };
    let record = dump("camera.tif", create_camera_exif(ByteOrderType::LittleEndian), &options);

    assert_eq!(record.entries.len(), 5);
    assert!(record.entries.iter().all(|e| e.directory == "GPS"));
}

#[test]
fn test_brief_text() {
    let data = TiffBuilder::new()
        .ifd0(IfdBuilder::new().short(0x0112, &[9]).short(0x0102, &[8, 8, 8]))
        .build();

    let verbose = dump("a.tif", data.clone(), &DumpOptions::default());
    assert_eq!(verbose.entries[0].text, "Unknown value 9");
    assert_eq!(verbose.entries[1].text, "8, 8, 8");

    let options = DumpOptions {
        brief: true,
        ..DumpOptions::default()
    };
    let brief = dump("a.tif", data, &options);
    assert_eq!(brief.entries[0].text, "9");
    assert_eq!(brief.entries[1].text, "8 8 8");
}

#[test]
fn test_failures_reported() {
    let data = TiffBuilder::new()
        .ifd0(IfdBuilder::new().ascii(0x010F, "Sony").raw(0x0200, 13, 1, &[0; 4]))
        .build();

    let record = dump("a.tif", data, &DumpOptions::default());
    assert!(!record.is_error());
    assert_eq!(record.entries.len(), 1);
    assert_eq!(record.failures.len(), 1);
    assert_eq!(record.failures[0].directory, "IFD0");
    assert_eq!(record.failures[0].tag, "0x0200");
    assert_eq!(record.failures[0].format, 13);
}

#[test]
fn test_policy_is_recorded_per_call() {
    let data = create_camera_exif(ByteOrderType::LittleEndian);

    let strict = dump("a.tif", data.clone(), &DumpOptions::default());
    let lenient = dump(
        "a.tif",
        data,
        &DumpOptions {
            policy: OverflowPolicy::Lenient,
            ..DumpOptions::default()
        },
    );

    // Wire values always fit their format, so the policy changes nothing here
    assert_eq!(strict.entries.len(), lenient.entries.len());
}

#[test]
fn test_unsupported_file() {
    let record = dump("image.png", b"\x89PNG\r\n\x1a\n".to_vec(), &DumpOptions::default());

    assert!(record.is_error());
    assert!(record.container.is_none());
    assert!(record.error.as_deref().unwrap().contains("Unsupported format"));
}

#[test]
fn test_jpeg_without_exif_keeps_container() {
    let jpeg = vec![0xFF, 0xD8, 0xFF, 0xD9];
    let record = dump("plain.jpg", jpeg, &DumpOptions::default());

    assert!(record.is_error());
    assert_eq!(record.container.as_deref(), Some("JPEG"));
    assert_eq!(record.error.as_deref(), Some("No Exif segment found"));
}

#[test]
fn test_dump_file_on_disk() {
    let path = std::env::temp_dir().join(format!("exif-entry-dump-{}.tif", std::process::id()));
    std::fs::write(&path, create_camera_exif(ByteOrderType::BigEndian)).unwrap();

    let record = dump_file(&path, &DumpOptions::default());
    std::fs::remove_file(&path).unwrap();

    assert!(!record.is_error());
    assert_eq!(record.file, path.display().to_string());
    assert!(!record.entries.is_empty());
}

// =============================================================================
// Rendering Tests
// =============================================================================

#[test]
fn test_json_shape() {
    let record = dump(
        "camera.tif",
        create_camera_exif(ByteOrderType::LittleEndian),
        &DumpOptions::default(),
    );
    let json = render_json(&[record]).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    let record = &parsed[0];
    assert_eq!(record["file"], "camera.tif");
    assert_eq!(record["container"], "TIFF");
    assert!(record.get("error").is_none());

    let entries = record["entries"].as_array().unwrap();
    let find = |name: &str| entries.iter().find(|e| e["name"] == name).unwrap();

    assert_eq!(find("Make")["value"], "Canon");
    assert_eq!(find("Orientation")["value"], 1);
    assert_eq!(find("XResolution")["value"], serde_json::json!([72, 1]));
    assert_eq!(find("GPSVersionID")["value"], serde_json::json!([2, 2, 0, 0]));
    assert_eq!(find("ExifVersion")["value"], "30323230");
    assert!(find("MakerNote").get("value").is_none());
    assert!(find("Make").get("description").is_none());
}

#[test]
fn test_render_text() {
    let record = dump(
        "camera.tif",
        create_camera_exif(ByteOrderType::BigEndian),
        &DumpOptions::default(),
    );
    let text = render_text(&record);

    assert!(text.starts_with("== camera.tif (TIFF, big-endian)\n[IFD0]\n  Tag: 0x010F (Make)\n"));
    for header in ["[Exif]", "[Interoperability]", "[GPS]", "[IFD1]"] {
        assert_eq!(text.matches(header).count(), 1, "{} missing", header);
    }
    assert!(text.contains("    Text      : f/2.8\n"));
    assert!(!text.contains("Failed"));
}

#[test]
fn test_render_text_error() {
    let record = dump("empty.tif", Vec::new(), &DumpOptions::default());
    let text = render_text(&record);

    assert!(text.starts_with("== empty.tif\n"));
    assert!(text.contains("  Error: "));
}
