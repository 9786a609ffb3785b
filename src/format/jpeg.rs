//! JPEG marker segment walking.
//!
//! JPEG files carry Exif data in an APP1 segment whose payload starts with
//! the identifier `Exif\0\0`, followed by a complete TIFF structure.
//!
//! # Segment Layout
//!
//! ```text
//! FF D8                      SOI, no length
//! FF En  LL LL  payload...   APPn, length includes its own two bytes
//! ...
//! FF DA  LL LL  ...          SOS, entropy-coded data follows
//! ```
//!
//! Only the headers before the first SOS are walked.

use bytes::Bytes;
use tracing::debug;

use crate::error::FormatError;

// =============================================================================
// JPEG Markers
// =============================================================================

/// Start Of Image marker
pub const SOI: [u8; 2] = [0xFF, 0xD8];

/// End Of Image marker
pub const EOI: [u8; 2] = [0xFF, 0xD9];

/// Start Of Scan marker
pub const SOS: [u8; 2] = [0xFF, 0xDA];

/// Application segment 0 (JFIF) marker
pub const APP0: [u8; 2] = [0xFF, 0xE0];

/// Application segment 1 (Exif) marker
pub const APP1: [u8; 2] = [0xFF, 0xE1];

/// Identifier that opens the payload of an Exif APP1 segment
pub const EXIF_IDENTIFIER: &[u8; 6] = b"Exif\0\0";

/// Whether a marker stands alone, without a length field.
fn is_standalone(marker: u8) -> bool {
    matches!(marker, 0x01 | 0xD0..=0xD9)
}

// =============================================================================
// Exif Segment Lookup
// =============================================================================

/// Check if data starts with a JPEG SOI marker.
#[inline]
pub fn is_jpeg(data: &[u8]) -> bool {
    data.len() >= 2 && data[0..2] == SOI
}

/// Find the TIFF payload of the first Exif APP1 segment.
///
/// The returned bytes share the input buffer and start at the TIFF header.
///
/// # Errors
/// - `UnsupportedFormat` if the data is not JPEG or a segment is truncated
/// - `MissingExif` if the headers end without an Exif segment
pub fn find_exif(data: &Bytes) -> Result<Bytes, FormatError> {
    if !is_jpeg(data) {
        return Err(FormatError::UnsupportedFormat {
            reason: "missing JPEG SOI marker".to_string(),
        });
    }

    let mut pos = 2;
    while pos + 1 < data.len() {
        if data[pos] != 0xFF {
            return Err(FormatError::UnsupportedFormat {
                reason: format!("expected JPEG marker at offset {}", pos),
            });
        }

        // Fill bytes may precede a marker
        let marker = data[pos + 1];
        if marker == 0xFF {
            pos += 1;
            continue;
        }

        if [0xFF, marker] == SOS || [0xFF, marker] == EOI {
            break;
        }

        if is_standalone(marker) {
            pos += 2;
            continue;
        }

        if pos + 4 > data.len() {
            break;
        }
        let length = u16::from_be_bytes([data[pos + 2], data[pos + 3]]) as usize;
        let end = pos + 2 + length;
        if length < 2 || end > data.len() {
            return Err(FormatError::UnsupportedFormat {
                reason: format!("truncated JPEG segment 0xFF{:02X} at offset {}", marker, pos),
            });
        }

        let payload = pos + 4;
        if [0xFF, marker] == APP1 && data[payload..end].starts_with(EXIF_IDENTIFIER) {
            debug!(offset = pos, length, "Found Exif APP1 segment");
            return Ok(data.slice(payload + EXIF_IDENTIFIER.len()..end));
        }

        pos = end;
    }

    Err(FormatError::MissingExif)
}

// =============================================================================
// Tests
// =============================================================================
