//! Decoding and encoding of complete directory records.
//!
//! A directory record is 12 bytes: tag (2), format (2), count (4) and a
//! 4-byte field that holds the value itself when it fits, or the offset of
//! an external value block otherwise.

use bytes::Bytes;
use tracing::debug;

use crate::error::EntryError;
use crate::format::tiff::{DirectoryKind, FormatCode};
use crate::io::ByteOrder;

use super::ascii::AsciiEntry;
use super::formats::NumberFormat;
use super::number::NumberEntry;
use super::policy::OverflowPolicy;
use super::undefined::UndefinedEntry;
use super::{DirectoryEntry, Entry};

/// Size of one directory record in bytes.
pub const ENTRY_RECORD_SIZE: usize = 12;

// =============================================================================
// DecodeSession
// =============================================================================

/// Byte order and overflow policy for one decoding pass.
///
/// Both are fixed for the lifetime of the session so every entry of a file
/// is decoded under the same rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeSession {
    pub byte_order: ByteOrder,
    pub policy: OverflowPolicy,
}

impl DecodeSession {
    pub fn new(byte_order: ByteOrder, policy: OverflowPolicy) -> Self {
        Self { byte_order, policy }
    }

    /// Build a typed entry from a raw record and its value bytes.
    ///
    /// `bytes` must hold exactly `count` components of the given format.
    /// Unknown format codes are rejected as malformed.
    pub fn decode_entry(
        &self,
        tag: u16,
        format_raw: u16,
        count: u32,
        bytes: &[u8],
        kind: DirectoryKind,
    ) -> Result<DirectoryEntry, EntryError> {
        let format = FormatCode::from_u16(format_raw).ok_or_else(|| {
            EntryError::MalformedValue(format!("unknown format code {}", format_raw))
        })?;

        let mut entry: DirectoryEntry = match format {
            FormatCode::Ascii => AsciiEntry::decode(tag, count, bytes)?.into(),
            FormatCode::Undefined => UndefinedEntry::decode(tag, count, bytes)?.into(),
            code => {
                let number_format = NumberFormat::from_format_code(code).ok_or_else(|| {
                    EntryError::MalformedValue(format!("{} is not a numeric format", code))
                })?;
                NumberEntry::decode(number_format, tag, count, bytes, self.byte_order, self.policy)?
                    .into()
            }
        };

        entry.set_directory_kind(kind);
        Ok(entry)
    }
}

// =============================================================================
// Encoding
// =============================================================================

/// A directory record ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedEntry {
    /// The 12-byte record
    pub record: [u8; ENTRY_RECORD_SIZE],
    /// Value bytes that did not fit in the record
    pub external: Option<Bytes>,
}

/// Encode `entry` as a directory record.
///
/// Values of up to four bytes go into the record, left-justified and
/// zero-padded. Larger values are returned as the external block and
/// `external_offset` is written into the record in their place.
pub fn encode_entry<E: Entry + ?Sized>(
    entry: &E,
    order: ByteOrder,
    external_offset: u32,
) -> EncodedEntry {
    let value = entry.bytes(order);

    let mut record = Vec::with_capacity(ENTRY_RECORD_SIZE);
    record.extend_from_slice(&order.write_u16(entry.tag()));
    record.extend_from_slice(&order.write_u16(entry.format().as_u16()));
    record.extend_from_slice(&order.write_u32(entry.component_count()));

    let external = if value.len() <= FormatCode::INLINE_THRESHOLD {
        record.extend_from_slice(&value);
        record.resize(ENTRY_RECORD_SIZE, 0);
        None
    } else {
        record.extend_from_slice(&order.write_u32(external_offset));
        Some(value)
    };

    let mut out = [0u8; ENTRY_RECORD_SIZE];
    out.copy_from_slice(&record);

    debug!(
        tag = entry.tag(),
        inline = external.is_none(),
        "Encoded directory record"
    );
    EncodedEntry {
        record: out,
        external,
    }
}
