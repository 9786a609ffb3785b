//! The generic numeric engine.
//!
//! [`NumberEntry`] implements the [`Entry`] contract once for all numeric
//! formats. Validation, encoding and text rendering are driven entirely by
//! the format's [`NumberDescriptor`] row.

use bytes::Bytes;
use tracing::debug;

use crate::error::EntryError;
use crate::format::tiff::{DirectoryKind, FormatCode};
use crate::io::ByteOrder;

use super::formats::{NumberDescriptor, NumberFormat};
use super::policy::OverflowPolicy;
use super::text;
use super::value::{EntryValue, Number};
use super::{Entry, EntryHeader};

/// A numeric entry of any of the eight numeric formats.
///
/// The values are kept in insertion order, which is also serialization
/// order. Duplicates are allowed.
#[derive(Debug, Clone)]
pub struct NumberEntry {
    header: EntryHeader,
    format: NumberFormat,
    values: Vec<Number>,
}

impl NumberEntry {
    /// Create an empty entry.
    pub fn new(format: NumberFormat, tag: u16) -> Self {
        Self {
            header: EntryHeader::new(tag),
            format,
            values: Vec::new(),
        }
    }

    /// Create an entry holding `values`, validated under `policy`.
    pub fn with_values(
        format: NumberFormat,
        tag: u16,
        values: Vec<Number>,
        policy: OverflowPolicy,
    ) -> Result<Self, EntryError> {
        let mut entry = Self::new(format, tag);
        entry.set_values(values, policy)?;
        Ok(entry)
    }

    /// The numeric format of this entry.
    #[inline]
    pub fn number_format(&self) -> NumberFormat {
        self.format
    }

    /// The parameter row of this entry's format.
    #[inline]
    pub fn descriptor(&self) -> &'static NumberDescriptor {
        self.format.descriptor()
    }

    /// Inclusive lower bound of every slot.
    pub fn min(&self) -> i64 {
        self.descriptor().min
    }

    /// Inclusive upper bound of every slot.
    pub fn max(&self) -> i64 {
        self.descriptor().max
    }

    /// Slots per component.
    pub fn dimension(&self) -> usize {
        self.descriptor().dimension
    }

    /// The values held, in order.
    pub fn values(&self) -> &[Number] {
        &self.values
    }

    /// Check that `number` may be stored in this entry.
    ///
    /// For dimensioned formats every slot that is set is checked on its own
    /// against `[min, max]`; unset slots are skipped, so a tuple can be
    /// validated while only partly built. The shape itself is not subject
    /// to the policy: a tuple for a plain format, a plain integer for a
    /// dimensioned format, a tuple with too many slots or with no slot set
    /// at all is always [`EntryError::MalformedValue`].
    pub fn validate_number(&self, number: &Number, policy: OverflowPolicy) -> Result<(), EntryError> {
        let d = self.descriptor();

        match number {
            Number::Int(value) if d.dimension == 1 => policy.check(*value, d.min, d.max),
            Number::Tuple(slots) if d.dimension > 1 => {
                if slots.len() > d.dimension {
                    return Err(EntryError::MalformedValue(format!(
                        "{} expects {} slots per component, got {}",
                        d.code,
                        d.dimension,
                        slots.len()
                    )));
                }
                if slots.iter().all(Option::is_none) {
                    return Err(EntryError::MalformedValue(format!(
                        "{} component has no slot set",
                        d.code
                    )));
                }
                for value in slots.iter().flatten() {
                    policy.check(*value, d.min, d.max)?;
                }
                Ok(())
            }
            Number::Int(_) => Err(EntryError::MalformedValue(format!(
                "{} expects a {}-slot tuple, got a plain number",
                d.code, d.dimension
            ))),
            Number::Tuple(_) => Err(EntryError::MalformedValue(format!(
                "{} expects a plain number, got a tuple",
                d.code
            ))),
        }
    }

    /// Replace all values.
    ///
    /// Every value is validated first; on the first failure the entry is
    /// left unchanged.
    pub fn set_values(&mut self, values: Vec<Number>, policy: OverflowPolicy) -> Result<(), EntryError> {
        for value in &values {
            self.validate_number(value, policy)?;
        }

        self.values = values;
        self.header.invalidate();
        Ok(())
    }

    /// Append one value, increasing the component count by one.
    pub fn add_number(&mut self, number: impl Into<Number>, policy: OverflowPolicy) -> Result<(), EntryError> {
        let number = number.into();
        self.validate_number(&number, policy)?;

        self.values.push(number);
        self.header.invalidate();
        Ok(())
    }

    /// Encode all values, slot by slot, without caching.
    fn encode(&self, order: ByteOrder) -> Vec<u8> {
        let d = self.descriptor();
        let mut out = Vec::with_capacity(self.values.len() * d.code.size_in_bytes());

        for value in &self.values {
            match value {
                Number::Int(v) => (d.encode_one)(*v, order, &mut out),
                Number::Tuple(slots) => {
                    for i in 0..d.dimension {
                        let slot = slots.get(i).copied().flatten().unwrap_or(0);
                        (d.encode_one)(slot, order, &mut out);
                    }
                }
            }
        }

        out
    }

    /// Decode `count` components from a value block.
    ///
    /// The block must be exactly `count` elements long.
    pub(crate) fn decode(
        format: NumberFormat,
        tag: u16,
        count: u32,
        bytes: &[u8],
        order: ByteOrder,
        policy: OverflowPolicy,
    ) -> Result<Self, EntryError> {
        let element = format.format_code().size_in_bytes();
        let expected = count as u64 * element as u64;
        if bytes.len() as u64 != expected {
            return Err(EntryError::MalformedValue(format!(
                "{} entry with {} components needs {} bytes, got {}",
                format.format_code(),
                count,
                expected,
                bytes.len()
            )));
        }

        let mut values = Vec::with_capacity(count as usize);
        for chunk in bytes.chunks_exact(element) {
            let value = format.decode_one(chunk, order).ok_or_else(|| {
                EntryError::MalformedValue(format!("truncated {} component", format.format_code()))
            })?;
            values.push(value);
        }

        debug!(tag, format = ?format, count, "Decoded numeric entry");
        Self::with_values(format, tag, values, policy)
    }
}

impl Entry for NumberEntry {
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
        self.descriptor().code
    }

    fn component_count(&self) -> u32 {
        self.values.len() as u32
    }

    fn bytes(&self, order: ByteOrder) -> Bytes {
        self.header.cached_bytes(order, || self.encode(order))
    }

    /// A single component is returned as a bare scalar; any other count,
    /// including zero, as a sequence.
    fn value(&self) -> EntryValue {
        EntryValue::from_numbers(self.values.clone())
    }

    fn set_value(&mut self, value: EntryValue, policy: OverflowPolicy) -> Result<(), EntryError> {
        let values = value.into_numbers()?;
        self.set_values(values, policy)
    }

    /// Brief text separates values with a single space, verbose text with
    /// a comma and a space. Known tags get their own rendering.
    fn text(&self, brief: bool) -> String {
        if self.values.is_empty() {
            return String::new();
        }

        if let Some(special) = text::number_text(
            self.header.directory_kind(),
            self.header.tag(),
            self.format,
            &self.values,
            brief,
        ) {
            return special;
        }

        let format_one = self.descriptor().format_one;
        let separator = if brief { " " } else { ", " };
        self.values
            .iter()
            .map(|value| format_one(value, brief))
            .collect::<Vec<_>>()
            .join(separator)
    }
}

// =============================================================================
// Tests
// =============================================================================
