//! Typed directory entries.
//!
//! This module turns the raw value bytes of a directory entry into a typed,
//! range-checked value, renders it as text, and serializes it back under a
//! caller-chosen byte order.
//!
//! # Key Concepts
//!
//! - **Entry contract**: [`Entry`] is the uniform interface the container
//!   layer calls into. It is implemented by [`NumberEntry`], [`AsciiEntry`]
//!   and [`UndefinedEntry`], and by the [`DirectoryEntry`] sum type that
//!   decoding produces.
//!
//! - **Generic numeric engine**: all eight numeric formats share
//!   [`NumberEntry`]. A format is nothing but a [`NumberDescriptor`] row
//!   (range, dimension, encode and format functions).
//!
//! - **Components and dimension**: a component is one logical value. For
//!   rationals a component is a numerator/denominator tuple, so the
//!   dimension is 2 while the component count still counts tuples.
//!
//! - **Overflow policy**: range checks are governed by an explicit
//!   [`OverflowPolicy`] argument, never by process-wide state.

mod ascii;
mod formats;
mod number;
mod policy;
mod session;
mod text;
mod undefined;
mod value;

use std::cell::RefCell;

use bytes::Bytes;

use crate::error::EntryError;
use crate::format::tiff::{is_vendor_private, tags, DirectoryKind, FormatCode};
use crate::io::ByteOrder;

pub use ascii::AsciiEntry;
pub use formats::{NumberDescriptor, NumberFormat};
pub use number::NumberEntry;
pub use policy::OverflowPolicy;
pub use session::{encode_entry, DecodeSession, EncodedEntry, ENTRY_RECORD_SIZE};
pub use undefined::UndefinedEntry;
pub use value::{EntryValue, Number};

// =============================================================================
// Entry Contract
// =============================================================================

/// Capability contract of every directory entry.
///
/// Entries are single-writer value holders. The byte cache uses interior
/// mutability, so entries are `Send` but not `Sync`.
pub trait Entry {
    /// The tag number of this entry.
    fn tag(&self) -> u16;

    /// The kind of directory that holds this entry.
    fn directory_kind(&self) -> DirectoryKind;

    /// Move the entry to another directory kind.
    ///
    /// Called by the container layer while attaching entries to a tree.
    /// No legality check is made here.
    fn set_directory_kind(&mut self, kind: DirectoryKind);

    /// The wire format of this entry.
    fn format(&self) -> FormatCode;

    /// Number of logical components held.
    fn component_count(&self) -> u32;

    /// Serialize the current value using `order` for multi-byte fields.
    fn bytes(&self, order: ByteOrder) -> Bytes;

    /// The unformatted value.
    fn value(&self) -> EntryValue;

    /// Replace the value, re-validating it under `policy`.
    fn set_value(&mut self, value: EntryValue, policy: OverflowPolicy) -> Result<(), EntryError>;

    /// The value formatted for display.
    fn text(&self, brief: bool) -> String;

    /// Multi-line description for diagnostics.
    fn to_debug_string(&self) -> String {
        debug_string(self)
    }
}

/// Describe an entry using only the public contract.
///
/// The raw value line is left out for vendor-private tags such as MakerNote
/// and PrintIM, whose content is not reliably printable.
pub fn debug_string<E: Entry + ?Sized>(entry: &E) -> String {
    let tag = entry.tag();
    let format = entry.format();

    let mut out = format!(
        "  Tag: 0x{:04X} ({})\n",
        tag,
        tags::display_name(entry.directory_kind(), tag)
    );
    out.push_str(&format!(
        "    Format    : {} ({})\n",
        format.as_u16(),
        format.name()
    ));
    out.push_str(&format!("    Components: {}\n", entry.component_count()));
    if !is_vendor_private(tag) {
        out.push_str(&format!("    Value     : {}\n", entry.value()));
    }
    out.push_str(&format!("    Text      : {}\n", entry.text(false)));
    out
}

// =============================================================================
// EntryHeader
// =============================================================================

/// Identity and byte cache shared by all entry implementations.
#[derive(Debug, Clone)]
pub(crate) struct EntryHeader {
    tag: u16,
    directory_kind: DirectoryKind,
    cache: RefCell<Option<(ByteOrder, Bytes)>>,
}

impl EntryHeader {
    /// New entries belong to the main image directory until attached.
    pub(crate) fn new(tag: u16) -> Self {
        Self {
            tag,
            directory_kind: DirectoryKind::Image,
            cache: RefCell::new(None),
        }
    }

    pub(crate) fn tag(&self) -> u16 {
        self.tag
    }

    pub(crate) fn directory_kind(&self) -> DirectoryKind {
        self.directory_kind
    }

    pub(crate) fn set_directory_kind(&mut self, kind: DirectoryKind) {
        self.directory_kind = kind;
    }

    /// Return the cached bytes for `order`, encoding them on a miss.
    pub(crate) fn cached_bytes(&self, order: ByteOrder, encode: impl FnOnce() -> Vec<u8>) -> Bytes {
        if let Some((cached_order, bytes)) = self.cache.borrow().as_ref() {
            if *cached_order == order {
                return bytes.clone();
            }
        }

        let bytes = Bytes::from(encode());
        *self.cache.borrow_mut() = Some((order, bytes.clone()));
        bytes
    }

    /// Drop the cached bytes after a mutation.
    pub(crate) fn invalidate(&mut self) {
        *self.cache.get_mut() = None;
    }

    #[cfg(test)]
    pub(crate) fn is_cached(&self) -> bool {
        self.cache.borrow().is_some()
    }
}

// =============================================================================
// DirectoryEntry
// =============================================================================

/// A decoded entry of any format.
#[derive(Debug, Clone)]
pub enum DirectoryEntry {
    /// One of the eight numeric formats
    Number(NumberEntry),
    /// NUL-terminated text
    Ascii(AsciiEntry),
    /// Opaque bytes
    Undefined(UndefinedEntry),
}

impl DirectoryEntry {
    /// Borrow as the entry contract.
    pub fn as_entry(&self) -> &dyn Entry {
        match self {
            DirectoryEntry::Number(entry) => entry,
            DirectoryEntry::Ascii(entry) => entry,
            DirectoryEntry::Undefined(entry) => entry,
        }
    }

    /// Mutably borrow as the entry contract.
    pub fn as_entry_mut(&mut self) -> &mut dyn Entry {
        match self {
            DirectoryEntry::Number(entry) => entry,
            DirectoryEntry::Ascii(entry) => entry,
            DirectoryEntry::Undefined(entry) => entry,
        }
    }

    /// The numeric entry, if this is one.
    pub fn as_number(&self) -> Option<&NumberEntry> {
        match self {
            DirectoryEntry::Number(entry) => Some(entry),
            _ => None,
        }
    }

    /// Mutable access to the numeric entry, if this is one.
    pub fn as_number_mut(&mut self) -> Option<&mut NumberEntry> {
        match self {
            DirectoryEntry::Number(entry) => Some(entry),
            _ => None,
        }
    }
}

impl Entry for DirectoryEntry {
    fn tag(&self) -> u16 {
        self.as_entry().tag()
    }

    fn directory_kind(&self) -> DirectoryKind {
        self.as_entry().directory_kind()
    }

    fn set_directory_kind(&mut self, kind: DirectoryKind) {
        self.as_entry_mut().set_directory_kind(kind);
    }

    fn format(&self) -> FormatCode {
        self.as_entry().format()
    }

    fn component_count(&self) -> u32 {
        self.as_entry().component_count()
    }

    fn bytes(&self, order: ByteOrder) -> Bytes {
        self.as_entry().bytes(order)
    }

    fn value(&self) -> EntryValue {
        self.as_entry().value()
    }

    fn set_value(&mut self, value: EntryValue, policy: OverflowPolicy) -> Result<(), EntryError> {
        self.as_entry_mut().set_value(value, policy)
    }

    fn text(&self, brief: bool) -> String {
        self.as_entry().text(brief)
    }
}

impl From<NumberEntry> for DirectoryEntry {
    fn from(entry: NumberEntry) -> Self {
        DirectoryEntry::Number(entry)
    }
}

impl From<AsciiEntry> for DirectoryEntry {
    fn from(entry: AsciiEntry) -> Self {
        DirectoryEntry::Ascii(entry)
    }
}

impl From<UndefinedEntry> for DirectoryEntry {
    fn from(entry: UndefinedEntry) -> Self {
        DirectoryEntry::Undefined(entry)
    }
}

// =============================================================================
// Tests
// =============================================================================
