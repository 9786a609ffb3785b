//! Directory value reading.
//!
//! Values can be stored either inline in the directory record (four bytes
//! or less) or at an offset in the TIFF data. This module resolves both
//! cases to the raw value block handed to the entry decoder.

use bytes::Bytes;

use crate::error::TiffError;
use crate::io::{ByteOrder, DataSource};

use super::parser::IfdEntry;
use super::tags::FormatCode;

// =============================================================================
// ValueReader
// =============================================================================

/// Reads value blocks from TIFF data.
///
/// Offsets in the records are relative to the start of the TIFF header,
/// which is offset 0 of the source.
pub struct ValueReader<'a, S: DataSource> {
    source: &'a S,
    byte_order: ByteOrder,
}

impl<'a, S: DataSource> ValueReader<'a, S> {
    /// Create a new ValueReader.
    pub fn new(source: &'a S, byte_order: ByteOrder) -> Self {
        Self { source, byte_order }
    }

    /// Read the raw value block of a record.
    ///
    /// For inline values, returns the leading bytes of the value field.
    /// For offset values, fetches the bytes from the source.
    pub fn read_bytes(&self, entry: &IfdEntry) -> Result<Bytes, TiffError> {
        let size = entry
            .value_byte_size()
            .ok_or(TiffError::UnknownFormat(entry.format_raw))?;

        if entry.is_inline() {
            Ok(Bytes::copy_from_slice(
                &entry.value_offset_bytes[..size as usize],
            ))
        } else {
            let offset = entry.value_offset(self.byte_order);
            let len = usize::try_from(size).map_err(|_| TiffError::InvalidIfdOffset(offset))?;
            Ok(self.source.slice(offset, len)?)
        }
    }

    /// Read a sub-directory pointer.
    ///
    /// Pointers are a single Long, though some writers use Short.
    /// Returns `None` for any other shape.
    pub fn read_pointer(&self, entry: &IfdEntry) -> Option<u64> {
        if entry.count != 1 {
            return None;
        }
        match entry.format {
            Some(FormatCode::Long) => Some(entry.value_offset(self.byte_order)),
            Some(FormatCode::Short) => {
                Some(self.byte_order.read_u16(&entry.value_offset_bytes) as u64)
            }
            _ => None,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
