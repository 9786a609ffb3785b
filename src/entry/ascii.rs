use bytes::Bytes;
use tracing::debug;

use crate::error::EntryError;
use crate::format::tiff::{DirectoryKind, FormatCode};
use crate::io::ByteOrder;

use super::policy::OverflowPolicy;
use super::value::EntryValue;
use super::{Entry, EntryHeader};

/// A NUL-terminated text entry.
///
/// The component count includes the terminator, because readers rely on
/// the declared count to find it.
#[derive(Debug, Clone)]
pub struct AsciiEntry {
    header: EntryHeader,
    text: String,
}

impl AsciiEntry {
    /// Create an entry holding `text`.
    ///
    /// Fails if the text contains a NUL, which would truncate it on the wire.
    pub fn new(tag: u16, text: impl Into<String>) -> Result<Self, EntryError> {
        let mut entry = Self {
            header: EntryHeader::new(tag),
            text: String::new(),
        };
        entry.set_text(text)?;
        Ok(entry)
    }

    /// The text, without terminator.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Replace the text.
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<(), EntryError> {
        let text = text.into();
        if text.contains('\0') {
            return Err(EntryError::MalformedValue(
                "Ascii text contains an interior NUL".to_string(),
            ));
        }

        self.text = text;
        self.header.invalidate();
        Ok(())
    }

    /// Decode a value block of `count` bytes.
    ///
    /// The text ends at the first NUL; anything after it is dropped.
    pub(crate) fn decode(tag: u16, count: u32, bytes: &[u8]) -> Result<Self, EntryError> {
        if bytes.len() as u64 != count as u64 {
            return Err(EntryError::MalformedValue(format!(
                "Ascii entry with {} components needs {} bytes, got {}",
                count,
                count,
                bytes.len()
            )));
        }

        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        let text = String::from_utf8_lossy(&bytes[..end]).into_owned();

        debug!(tag, count, "Decoded Ascii entry");
        Self::new(tag, text)
    }
}

impl Entry for AsciiEntry {
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
        FormatCode::Ascii
    }

    fn component_count(&self) -> u32 {
        self.text.len() as u32 + 1
    }

    fn bytes(&self, order: ByteOrder) -> Bytes {
        self.header.cached_bytes(order, || {
            let mut out = Vec::with_capacity(self.text.len() + 1);
            out.extend_from_slice(self.text.as_bytes());
            out.push(0);
            out
        })
    }

    fn value(&self) -> EntryValue {
        EntryValue::Text(self.text.clone())
    }

    fn set_value(&mut self, value: EntryValue, _policy: OverflowPolicy) -> Result<(), EntryError> {
        match value {
            EntryValue::Text(text) => self.set_text(text),
            other => Err(EntryError::MalformedValue(format!(
                "Ascii entry expects text, got {:?}",
                other
            ))),
        }
    }

    fn text(&self, _brief: bool) -> String {
        self.text.clone()
    }
}
