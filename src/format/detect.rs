//! Container detection.
//!
//! Exif data is found either in a bare TIFF file or in the APP1 segment of a
//! JPEG file. Both are identified by their magic bytes.
//!
//! Unsupported containers return [`FormatError::UnsupportedFormat`].

use bytes::Bytes;
use tracing::debug;

use crate::error::FormatError;
use crate::io::{ByteOrder, MemorySource};

use super::jpeg;
use super::tiff::TIFF_HEADER_SIZE;

// =============================================================================
// ContainerFormat
// =============================================================================

/// Detected container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerFormat {
    /// TIFF file, the Exif data is the file itself
    Tiff,

    /// JPEG file with an Exif APP1 segment
    Jpeg,
}

impl ContainerFormat {
    /// Get a human-readable name for the format.
    pub const fn name(&self) -> &'static str {
        match self {
            ContainerFormat::Tiff => "TIFF",
            ContainerFormat::Jpeg => "JPEG",
        }
    }
}

// =============================================================================
// Format Detection
// =============================================================================

/// Detect the container format from the leading bytes.
pub fn detect_format(data: &[u8]) -> Result<ContainerFormat, FormatError> {
    if is_tiff_header(data) {
        Ok(ContainerFormat::Tiff)
    } else if jpeg::is_jpeg(data) {
        Ok(ContainerFormat::Jpeg)
    } else {
        Err(FormatError::UnsupportedFormat {
            reason: "neither a TIFF nor a JPEG file".to_string(),
        })
    }
}

/// Check if bytes represent a classic TIFF header.
///
/// This is a quick check that can be used before attempting full parsing.
pub fn is_tiff_header(bytes: &[u8]) -> bool {
    if bytes.len() < TIFF_HEADER_SIZE {
        return false;
    }

    let byte_order = if bytes[0..2] == ByteOrder::LittleEndian.magic() {
        ByteOrder::LittleEndian
    } else if bytes[0..2] == ByteOrder::BigEndian.magic() {
        ByteOrder::BigEndian
    } else {
        return false;
    };

    byte_order.read_u16(&bytes[2..4]) == 42
}

/// Locate the TIFF data of the Exif block in a file.
///
/// The returned source starts at the TIFF header, which is the origin of
/// every offset in the block.
pub fn locate_exif(data: Bytes) -> Result<MemorySource, FormatError> {
    let format = detect_format(&data)?;
    debug!(format = format.name(), size = data.len(), "Detected container");

    match format {
        ContainerFormat::Tiff => Ok(MemorySource::new(data)),
        ContainerFormat::Jpeg => Ok(MemorySource::new(jpeg::find_exif(&data)?)),
    }
}

// =============================================================================
// Tests
// =============================================================================
