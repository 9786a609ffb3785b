//! TIFF header and raw directory record parsing.
//!
//! Exif data is a classic TIFF structure. This module reads its header and
//! the fixed-size records of a directory table, without interpreting values.
//!
//! # TIFF Header Structure
//!
//! ```text
//! Bytes 0-1: Byte order (0x4949 = little-endian "II", 0x4D4D = big-endian "MM")
//! Bytes 2-3: Version (42 = 0x002A)
//! Bytes 4-7: Offset to first IFD (4 bytes)
//! ```
//!
//! # Directory Record Structure
//!
//! ```text
//! Bytes 0-1:  Tag
//! Bytes 2-3:  Format code
//! Bytes 4-7:  Component count
//! Bytes 8-11: Value (if it fits) or offset to the value block
//! ```

use crate::entry::ENTRY_RECORD_SIZE;
use crate::error::TiffError;
use crate::io::ByteOrder;

use super::tags::FormatCode;

// =============================================================================
// Constants
// =============================================================================

/// Magic bytes indicating little-endian byte order ("II" for Intel)
const BYTE_ORDER_LITTLE_ENDIAN: u16 = 0x4949;

/// Magic bytes indicating big-endian byte order ("MM" for Motorola)
const BYTE_ORDER_BIG_ENDIAN: u16 = 0x4D4D;

/// Version number for classic TIFF
const VERSION_TIFF: u16 = 42;

/// Size of the TIFF header in bytes
pub const TIFF_HEADER_SIZE: usize = 8;

/// Size of the entry count at the start of a directory
pub const IFD_COUNT_SIZE: usize = 2;

/// Size of the next-directory offset at the end of a directory
pub const IFD_NEXT_OFFSET_SIZE: usize = 4;

// =============================================================================
// TiffHeader
// =============================================================================

/// Parsed TIFF header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    /// Byte order for all multi-byte values
    pub byte_order: ByteOrder,

    /// Offset to the first IFD, relative to the header start
    pub first_ifd_offset: u64,
}

impl TiffHeader {
    /// Parse a TIFF header from raw bytes.
    ///
    /// # Arguments
    /// * `bytes` - Raw header bytes (at least 8)
    /// * `data_size` - Total size of the TIFF data (used to validate the IFD offset)
    ///
    /// # Errors
    /// - `FileTooSmall` if there aren't enough bytes for the header
    /// - `InvalidMagic` if byte order bytes are not II or MM
    /// - `InvalidVersion` if version is not 42
    /// - `InvalidIfdOffset` if the first IFD offset is outside the data
    pub fn parse(bytes: &[u8], data_size: u64) -> Result<Self, TiffError> {
        if bytes.len() < TIFF_HEADER_SIZE {
            return Err(TiffError::FileTooSmall {
                required: TIFF_HEADER_SIZE as u64,
                actual: bytes.len() as u64,
            });
        }

        // Read as little-endian because we're checking for specific byte patterns
        let magic = u16::from_le_bytes([bytes[0], bytes[1]]);
        let byte_order = match magic {
            BYTE_ORDER_LITTLE_ENDIAN => ByteOrder::LittleEndian,
            BYTE_ORDER_BIG_ENDIAN => ByteOrder::BigEndian,
            _ => return Err(TiffError::InvalidMagic(magic)),
        };

        let version = byte_order.read_u16(&bytes[2..4]);
        if version != VERSION_TIFF {
            return Err(TiffError::InvalidVersion(version));
        }

        let first_ifd_offset = byte_order.read_u32(&bytes[4..8]) as u64;
        if first_ifd_offset < TIFF_HEADER_SIZE as u64 || first_ifd_offset >= data_size {
            return Err(TiffError::InvalidIfdOffset(first_ifd_offset));
        }

        Ok(TiffHeader {
            byte_order,
            first_ifd_offset,
        })
    }

    /// Serialize the header, the inverse of [`TiffHeader::parse`].
    pub fn to_bytes(&self) -> [u8; TIFF_HEADER_SIZE] {
        let mut out = [0u8; TIFF_HEADER_SIZE];
        out[0..2].copy_from_slice(&self.byte_order.magic());
        out[2..4].copy_from_slice(&self.byte_order.write_u16(VERSION_TIFF));
        out[4..8].copy_from_slice(&self.byte_order.write_u32(self.first_ifd_offset as u32));
        out
    }
}

// =============================================================================
// IfdEntry
// =============================================================================

/// One raw 12-byte directory record.
///
/// The value field is kept undecoded. Whether it holds the value itself or
/// an offset depends on the format and count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IfdEntry {
    /// Tag number
    pub tag: u16,

    /// Format, `None` if the code is unknown
    pub format: Option<FormatCode>,

    /// Format code as stored
    pub format_raw: u16,

    /// Number of components
    pub count: u32,

    /// The raw value/offset field
    pub value_offset_bytes: [u8; 4],
}

impl IfdEntry {
    /// Parse a record from exactly 12 bytes.
    pub fn parse(bytes: &[u8], byte_order: ByteOrder) -> Result<Self, TiffError> {
        if bytes.len() < ENTRY_RECORD_SIZE {
            return Err(TiffError::FileTooSmall {
                required: ENTRY_RECORD_SIZE as u64,
                actual: bytes.len() as u64,
            });
        }

        let tag = byte_order.read_u16(&bytes[0..2]);
        let format_raw = byte_order.read_u16(&bytes[2..4]);
        let count = byte_order.read_u32(&bytes[4..8]);

        let mut value_offset_bytes = [0u8; 4];
        value_offset_bytes.copy_from_slice(&bytes[8..12]);

        Ok(IfdEntry {
            tag,
            format: FormatCode::from_u16(format_raw),
            format_raw,
            count,
            value_offset_bytes,
        })
    }

    /// Total size of the value in bytes, `None` for unknown formats.
    pub fn value_byte_size(&self) -> Option<u64> {
        self.format
            .map(|format| format.size_in_bytes() as u64 * self.count as u64)
    }

    /// Whether the value is stored in the record itself.
    pub fn is_inline(&self) -> bool {
        self.format
            .map(|format| format.fits_inline(self.count))
            .unwrap_or(false)
    }

    /// The value field interpreted as an offset.
    pub fn value_offset(&self, byte_order: ByteOrder) -> u64 {
        byte_order.read_u32(&self.value_offset_bytes) as u64
    }
}

// =============================================================================
// Tests
// =============================================================================
