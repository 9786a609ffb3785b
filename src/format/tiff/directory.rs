//! Directory (IFD) reading and the Exif directory tree.
//!
//! An Exif block is a chain of directories: IFD0 describes the main image
//! and may point at the Exif and GPS sub-directories, the Exif directory may
//! point at the Interoperability directory, and IFD0's next-directory offset
//! leads to IFD1 (the thumbnail).
//!
//! Reading is tolerant at the entry level. A record that fails to decode is
//! collected as an [`EntryFailure`] and the rest of the directory is still
//! read. Only a broken IFD0 aborts the walk.

use std::collections::{HashSet, VecDeque};

use bytes::{BufMut, Bytes, BytesMut};
use tracing::{debug, warn};

use crate::entry::{encode_entry, DecodeSession, DirectoryEntry, Entry, OverflowPolicy, ENTRY_RECORD_SIZE};
use crate::error::TiffError;
use crate::io::{ByteOrder, DataSource};

use super::parser::{IfdEntry, TiffHeader, IFD_COUNT_SIZE, IFD_NEXT_OFFSET_SIZE, TIFF_HEADER_SIZE};
use super::tags::{self, DirectoryKind};
use super::values::ValueReader;

/// Upper bound on the number of directories in one tree.
const MAX_DIRECTORIES: usize = DirectoryKind::ALL.len();

// =============================================================================
// Directory
// =============================================================================

/// A record that could not be turned into an entry.
#[derive(Debug, Clone)]
pub struct EntryFailure {
    /// Tag of the failing record
    pub tag: u16,
    /// Format code as stored
    pub format_raw: u16,
    /// Why decoding failed
    pub error: TiffError,
}

/// One decoded directory.
#[derive(Debug, Clone)]
pub struct Directory {
    /// Which directory this is
    pub kind: DirectoryKind,

    /// Offset of the directory within the TIFF data
    pub offset: u64,

    /// Successfully decoded entries, in record order
    pub entries: Vec<DirectoryEntry>,

    /// Records that failed to decode
    pub failures: Vec<EntryFailure>,

    /// Sub-directory pointers found in this directory
    pub sub_directories: Vec<(DirectoryKind, u64)>,

    /// Offset of the next directory in the chain, if any
    pub next_offset: Option<u64>,
}

impl Directory {
    /// Read the directory at `offset`.
    ///
    /// Pointer records are consumed into [`Directory::sub_directories`]
    /// rather than kept as entries, since their values are only meaningful
    /// for the layout they were read from.
    pub fn read<S: DataSource>(
        source: &S,
        offset: u64,
        kind: DirectoryKind,
        session: &DecodeSession,
    ) -> Result<Self, TiffError> {
        let byte_order = session.byte_order;

        // First, read just enough to get the entry count
        let count_bytes = source
            .slice(offset, IFD_COUNT_SIZE)
            .map_err(|_| TiffError::InvalidIfdOffset(offset))?;
        let entry_count = byte_order.read_u16(&count_bytes) as usize;

        let table_offset = offset + IFD_COUNT_SIZE as u64;
        let table = source.slice(table_offset, entry_count * ENTRY_RECORD_SIZE)?;

        // Some writers omit the next-directory offset after the last directory
        let next_offset_at = table_offset + table.len() as u64;
        let next_offset = match source.slice(next_offset_at, IFD_NEXT_OFFSET_SIZE) {
            Ok(bytes) => match byte_order.read_u32(&bytes) {
                0 => None,
                next => Some(next as u64),
            },
            Err(_) => None,
        };

        let reader = ValueReader::new(source, byte_order);
        let mut directory = Directory {
            kind,
            offset,
            entries: Vec::with_capacity(entry_count),
            failures: Vec::new(),
            sub_directories: Vec::new(),
            next_offset,
        };

        for record in table.chunks_exact(ENTRY_RECORD_SIZE) {
            let record = IfdEntry::parse(record, byte_order)?;

            if let Some(sub_kind) = sub_directory_kind(kind, record.tag) {
                match reader.read_pointer(&record) {
                    Some(pointer) => directory.sub_directories.push((sub_kind, pointer)),
                    None => directory.failures.push(EntryFailure {
                        tag: record.tag,
                        format_raw: record.format_raw,
                        error: TiffError::InvalidIfdOffset(record.value_offset(byte_order)),
                    }),
                }
                continue;
            }

            match Self::decode_record(&reader, &record, kind, session) {
                Ok(entry) => directory.entries.push(entry),
                Err(error) => {
                    warn!(
                        directory = %kind,
                        tag = record.tag,
                        error = %error,
                        "Skipping entry that failed to decode"
                    );
                    directory.failures.push(EntryFailure {
                        tag: record.tag,
                        format_raw: record.format_raw,
                        error,
                    });
                }
            }
        }

        debug!(
            directory = %kind,
            offset,
            entries = directory.entries.len(),
            failures = directory.failures.len(),
            "Read directory"
        );
        Ok(directory)
    }

    fn decode_record<S: DataSource>(
        reader: &ValueReader<'_, S>,
        record: &IfdEntry,
        kind: DirectoryKind,
        session: &DecodeSession,
    ) -> Result<DirectoryEntry, TiffError> {
        let bytes = reader.read_bytes(record)?;
        let entry = session.decode_entry(record.tag, record.format_raw, record.count, &bytes, kind)?;
        Ok(entry)
    }

    /// Find an entry by tag.
    pub fn get(&self, tag: u16) -> Option<&DirectoryEntry> {
        self.entries.iter().find(|entry| entry.tag() == tag)
    }

    /// Mutable access to an entry by tag.
    pub fn get_mut(&mut self, tag: u16) -> Option<&mut DirectoryEntry> {
        self.entries.iter_mut().find(|entry| entry.tag() == tag)
    }

    /// Offset of the given sub-directory, if this directory points at it.
    pub fn pointer(&self, kind: DirectoryKind) -> Option<u64> {
        self.sub_directories
            .iter()
            .find(|(sub_kind, _)| *sub_kind == kind)
            .map(|(_, offset)| *offset)
    }

    /// Serialize the entries as a standalone directory placed at `offset`.
    ///
    /// The output holds the entry count, the records, a zero next-directory
    /// offset and then the external value blocks, each starting on an even
    /// offset. Sub-directory pointers are not written.
    ///
    /// # Errors
    /// - `TooManyEntries` if the entry count does not fit the 16-bit field
    /// - `OffsetOverflow` if an external block would start past `u32::MAX`
    pub fn encode(&self, order: ByteOrder, offset: u32) -> Result<Bytes, TiffError> {
        let entry_count = u16::try_from(self.entries.len())
            .map_err(|_| TiffError::TooManyEntries(self.entries.len()))?;

        let table_len = IFD_COUNT_SIZE
            + self.entries.len() * ENTRY_RECORD_SIZE
            + IFD_NEXT_OFFSET_SIZE;

        let mut table = BytesMut::with_capacity(table_len);
        let mut external = BytesMut::new();

        table.put_slice(&order.write_u16(entry_count));
        for entry in &self.entries {
            let external_offset = u32::try_from(table_len + external.len())
                .ok()
                .and_then(|relative| offset.checked_add(relative))
                .ok_or(TiffError::OffsetOverflow { offset })?;
            let encoded = encode_entry(entry, order, external_offset);
            table.put_slice(&encoded.record);

            if let Some(block) = encoded.external {
                external.put_slice(&block);
                if external.len() % 2 == 1 {
                    external.put_u8(0);
                }
            }
        }
        table.put_slice(&order.write_u32(0));

        table.put_slice(&external);
        Ok(table.freeze())
    }
}

/// The directory a pointer tag leads to, given the directory it appears in.
fn sub_directory_kind(parent: DirectoryKind, tag: u16) -> Option<DirectoryKind> {
    match (parent, tag) {
        (DirectoryKind::Image, tags::EXIF_IFD_POINTER) => Some(DirectoryKind::ExifSub),
        (DirectoryKind::Image, tags::GPS_INFO_IFD_POINTER) => Some(DirectoryKind::GpsSub),
        (DirectoryKind::ExifSub, tags::INTEROPERABILITY_IFD_POINTER) => {
            Some(DirectoryKind::InteroperabilitySub)
        }
        _ => None,
    }
}

// =============================================================================
// ExifTree
// =============================================================================

/// All directories of one Exif block.
#[derive(Debug, Clone)]
pub struct ExifTree {
    /// Byte order declared by the TIFF header
    pub byte_order: ByteOrder,

    /// Directories in [`DirectoryKind::ALL`] order
    pub directories: Vec<Directory>,
}

impl ExifTree {
    /// Walk the directory tree of TIFF data starting at offset 0 of `source`.
    ///
    /// IFD0 must be readable. Sub-directories and IFD1 that cannot be read
    /// are logged and skipped, and a directory offset that was already
    /// visited is never read twice.
    pub fn read<S: DataSource>(source: &S, policy: OverflowPolicy) -> Result<Self, TiffError> {
        let header_bytes = source.slice(0, TIFF_HEADER_SIZE).map_err(|_| TiffError::FileTooSmall {
            required: TIFF_HEADER_SIZE as u64,
            actual: source.size(),
        })?;
        let header = TiffHeader::parse(&header_bytes, source.size())?;
        let session = DecodeSession::new(header.byte_order, policy);

        let mut visited = HashSet::new();
        visited.insert(header.first_ifd_offset);

        let ifd0 = Directory::read(source, header.first_ifd_offset, DirectoryKind::Image, &session)?;

        let mut pending: VecDeque<(DirectoryKind, u64)> = ifd0.sub_directories.iter().copied().collect();
        if let Some(next) = ifd0.next_offset {
            pending.push_back((DirectoryKind::Thumbnail, next));
        }

        let mut directories = vec![ifd0];
        while let Some((kind, offset)) = pending.pop_front() {
            if directories.len() >= MAX_DIRECTORIES {
                break;
            }
            if directories.iter().any(|directory| directory.kind == kind) {
                continue;
            }
            if !visited.insert(offset) {
                warn!(directory = %kind, error = %TiffError::DirectoryLoop(offset), "Skipping directory");
                continue;
            }

            match Directory::read(source, offset, kind, &session) {
                Ok(directory) => {
                    pending.extend(directory.sub_directories.iter().copied());
                    directories.push(directory);
                }
                Err(error) => {
                    warn!(directory = %kind, offset, error = %error, "Skipping unreadable directory");
                }
            }
        }

        directories.sort_by_key(|directory| {
            DirectoryKind::ALL
                .iter()
                .position(|kind| *kind == directory.kind)
        });

        Ok(ExifTree {
            byte_order: header.byte_order,
            directories,
        })
    }

    /// Get a directory by kind.
    pub fn directory(&self, kind: DirectoryKind) -> Option<&Directory> {
        self.directories.iter().find(|directory| directory.kind == kind)
    }

    /// Mutable access to a directory by kind.
    pub fn directory_mut(&mut self, kind: DirectoryKind) -> Option<&mut Directory> {
        self.directories
            .iter_mut()
            .find(|directory| directory.kind == kind)
    }

    /// Find an entry by directory and tag.
    pub fn entry(&self, kind: DirectoryKind, tag: u16) -> Option<&DirectoryEntry> {
        self.directory(kind)?.get(tag)
    }

    /// All entries of all directories, in directory order.
    pub fn entries(&self) -> impl Iterator<Item = &DirectoryEntry> {
        self.directories
            .iter()
            .flat_map(|directory| directory.entries.iter())
    }

    /// All records that failed to decode, with their directory.
    pub fn failures(&self) -> impl Iterator<Item = (DirectoryKind, &EntryFailure)> {
        self.directories.iter().flat_map(|directory| {
            directory
                .failures
                .iter()
                .map(move |failure| (directory.kind, failure))
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
