//! # Exif Entry
//!
//! Typed directory entries for Exif metadata stored in TIFF structures.
//!
//! This library decodes the value of each directory entry into a typed,
//! range-checked value, renders it as human-readable text and serializes it
//! back to bytes in either byte order. Around that core sits a small
//! container layer that walks the directories of a TIFF file or of the Exif
//! segment of a JPEG file.
//!
//! ## Features
//!
//! - **Typed numeric entries**: all eight TIFF numeric formats share one
//!   generic engine parameterized by a format descriptor
//! - **Explicit overflow policy**: strict or lenient range checks, chosen per
//!   call instead of through global state
//! - **Both byte orders**: values encode under the byte order requested by
//!   the caller, with a per-entry cache of the last encoding
//! - **Readable text**: well-known tags render as words and units
//! - **Container walking**: IFD0, Exif, GPS, Interoperability and IFD1
//!   directories of TIFF and JPEG files
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`entry`] - Entry contract, numeric engine, text and opaque entries
//! - [`mod@format`] - TIFF directory parsing and JPEG segment handling
//! - [`io`] - Byte-order codec and in-memory data sources
//! - [`dump`] - End-to-end description of files
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust
//! use exif_entry::{ByteOrder, Entry, NumberEntry, NumberFormat, OverflowPolicy};
//!
//! let mut entry = NumberEntry::new(NumberFormat::Short, 0x0112);
//! entry.add_number(6, OverflowPolicy::Strict).unwrap();
//!
//! assert_eq!(entry.text(false), "right - top");
//! assert_eq!(&entry.bytes(ByteOrder::BigEndian)[..], &[0x00, 0x06]);
//! assert!(entry.add_number(70_000, OverflowPolicy::Strict).is_err());
//! ```

pub mod config;
pub mod dump;
pub mod entry;
pub mod error;
pub mod format;
pub mod io;

// Re-export commonly used types
pub use config::{Config, OutputFormat};
pub use dump::{dump_bytes, dump_file, DumpOptions, DumpRecord};
pub use entry::{
    debug_string, encode_entry, AsciiEntry, DecodeSession, DirectoryEntry, EncodedEntry, Entry,
    EntryValue, Number, NumberDescriptor, NumberEntry, NumberFormat, OverflowPolicy,
    UndefinedEntry, ENTRY_RECORD_SIZE,
};
pub use error::{EntryError, FormatError, IoError, TiffError};
pub use format::tiff::{Directory, DirectoryKind, EntryFailure, ExifTree, FormatCode, TiffHeader};
pub use format::{detect_format, locate_exif, ContainerFormat};
pub use io::{ByteOrder, DataSource, MemorySource};
