use bytes::Bytes;
use tracing::debug;

use crate::error::EntryError;
use crate::format::tiff::{DirectoryKind, FormatCode};
use crate::io::ByteOrder;

use super::policy::OverflowPolicy;
use super::text;
use super::value::EntryValue;
use super::{Entry, EntryHeader};

/// Bytes shown in the verbose hex preview.
const PREVIEW_BYTES: usize = 16;

/// An opaque byte entry.
///
/// The bytes are stored and written back unchanged; byte order does not
/// apply to them.
#[derive(Debug, Clone)]
pub struct UndefinedEntry {
    header: EntryHeader,
    data: Bytes,
}

impl UndefinedEntry {
    /// Create an entry holding `data`.
    pub fn new(tag: u16, data: impl Into<Bytes>) -> Self {
        Self {
            header: EntryHeader::new(tag),
            data: data.into(),
        }
    }

    /// The stored bytes.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Replace the stored bytes.
    pub fn set_data(&mut self, data: impl Into<Bytes>) {
        self.data = data.into();
        self.header.invalidate();
    }

    /// Decode a value block of `count` bytes.
    pub(crate) fn decode(tag: u16, count: u32, bytes: &[u8]) -> Result<Self, EntryError> {
        if bytes.len() as u64 != count as u64 {
            return Err(EntryError::MalformedValue(format!(
                "Undefined entry with {} components needs {} bytes, got {}",
                count,
                count,
                bytes.len()
            )));
        }

        debug!(tag, count, "Decoded Undefined entry");
        Ok(Self::new(tag, Bytes::copy_from_slice(bytes)))
    }
}

impl Entry for UndefinedEntry {
    fn tag(&self) -> u16 {
        self.header.tag()
    }

    fn directory_kind(&self) -> DirectoryKind {
        self.header.directory_kind()
    }

    fn set_directory_kind(&mut self, kind: DirectoryKind) {
        self.header.set_directory_kind(kind);
    }

    fn format(&self) -> FormatCode {
        FormatCode::Undefined
    }

    fn component_count(&self) -> u32 {
        self.data.len() as u32
    }

    fn bytes(&self, _order: ByteOrder) -> Bytes {
        self.data.clone()
    }

    fn value(&self) -> EntryValue {
        EntryValue::Opaque(self.data.clone())
    }

    fn set_value(&mut self, value: EntryValue, _policy: OverflowPolicy) -> Result<(), EntryError> {
        match value {
            EntryValue::Opaque(data) => {
                self.set_data(data);
                Ok(())
            }
            other => Err(EntryError::MalformedValue(format!(
                "Undefined entry expects bytes, got {:?}",
                other
            ))),
        }
    }

    /// Never shows the raw bytes of vendor-private tags.
    fn text(&self, brief: bool) -> String {
        if let Some(special) =
            text::undefined_text(self.header.directory_kind(), self.header.tag(), &self.data)
        {
            return special;
        }

        let len = self.data.len();
        if brief {
            return format!("{} bytes undefined data", len);
        }

        let shown = len.min(PREVIEW_BYTES);
        let ellipsis = if len > shown { "..." } else { "" };
        format!(
            "{}{} ({} bytes)",
            hex::encode(&self.data[..shown]),
            ellipsis,
            len
        )
    }
}
