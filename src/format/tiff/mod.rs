//! TIFF structure of an Exif block.
//!
//! Exif data is laid out as a classic TIFF file: a header, then a tree of
//! directories whose records point at value blocks.
//!
//! # Key Concepts
//!
//! - **Byte order**: the header declares its endianness (II = little-endian,
//!   MM = big-endian). All multi-byte values must be read respecting it.
//!
//! - **Directories**: IFD0 (main image), IFD1 (thumbnail) and the Exif, GPS
//!   and Interoperability sub-directories. The same tag number means
//!   different things in different directories.
//!
//! - **Inline vs offset values**: values of four bytes or less are stored in
//!   the directory record itself; larger values are stored at an offset
//!   pointed to by the record.

mod directory;
mod parser;
pub mod tags;
mod values;

pub use directory::{Directory, EntryFailure, ExifTree};
pub use parser::{IfdEntry, TiffHeader, IFD_COUNT_SIZE, IFD_NEXT_OFFSET_SIZE, TIFF_HEADER_SIZE};
pub use tags::{display_name, is_vendor_private, name_for, DirectoryKind, FormatCode};
pub use values::ValueReader;
