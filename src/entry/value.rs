//! Untyped entry values.
//!
//! [`EntryValue`] is what flows through the uniform `value`/`set_value`
//! path of the [`Entry`](super::Entry) contract. Numeric entries hold
//! [`Number`]s, which are either plain integers or fixed-size tuples for
//! dimensioned formats such as rationals.

use std::fmt;

use bytes::Bytes;
use serde::{Serialize, Serializer};

use crate::error::EntryError;

// =============================================================================
// Number
// =============================================================================

/// One logical numeric component.
///
/// Every integer format fits in an `i64`, including the full unsigned
/// 32-bit range and the full signed 32-bit range.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Number {
    /// A plain integer (dimension 1)
    Int(i64),

    /// A tuple of slots (dimension > 1), in wire order.
    ///
    /// Slots may be unset while a value is being built up; unset slots are
    /// skipped by validation and encode as zero.
    Tuple(Vec<Option<i64>>),
}

impl Number {
    /// A plain integer.
    pub const fn int(value: i64) -> Self {
        Number::Int(value)
    }

    /// A fully specified rational.
    pub fn rational(numerator: i64, denominator: i64) -> Self {
        Number::Tuple(vec![Some(numerator), Some(denominator)])
    }

    /// A tuple with possibly unset slots.
    pub fn partial(slots: impl Into<Vec<Option<i64>>>) -> Self {
        Number::Tuple(slots.into())
    }

    /// The integer, if this is a plain number.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Number::Int(value) => Some(*value),
            Number::Tuple(_) => None,
        }
    }

    /// The tuple slots, if this is a tuple.
    pub fn slots(&self) -> Option<&[Option<i64>]> {
        match self {
            Number::Int(_) => None,
            Number::Tuple(slots) => Some(slots),
        }
    }

    /// Numerator and denominator, if this is a pair with both slots set.
    pub fn ratio(&self) -> Option<(i64, i64)> {
        match self.slots()? {
            [Some(numerator), Some(denominator)] => Some((*numerator, *denominator)),
            _ => None,
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

impl From<(i64, i64)> for Number {
    fn from((numerator, denominator): (i64, i64)) -> Self {
        Number::rational(numerator, denominator)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(value) => write!(f, "{}", value),
            Number::Tuple(slots) => {
                for (i, slot) in slots.iter().enumerate() {
                    if i > 0 {
                        f.write_str("/")?;
                    }
                    match slot {
                        Some(value) => write!(f, "{}", value)?,
                        None => f.write_str("?")?,
                    }
                }
                Ok(())
            }
        }
    }
}

// =============================================================================
// EntryValue
// =============================================================================

/// The value held by an entry.
///
/// Numeric entries report a bare [`EntryValue::Scalar`] when they hold
/// exactly one component and an [`EntryValue::Sequence`] otherwise. A
/// one-element sequence passed to `set_value` therefore reads back as a
/// scalar; only the component count tells the two apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EntryValue {
    /// Exactly one numeric component
    Scalar(Number),

    /// Zero or more numeric components, in serialization order
    Sequence(Vec<Number>),

    /// Text of an Ascii entry, without the terminator
    Text(String),

    /// Raw bytes of an Undefined entry
    Opaque(#[serde(serialize_with = "serialize_hex")] Bytes),
}

impl EntryValue {
    /// Wrap numbers, collapsing a single component into a scalar.
    pub fn from_numbers(mut numbers: Vec<Number>) -> Self {
        if numbers.len() == 1 {
            EntryValue::Scalar(numbers.remove(0))
        } else {
            EntryValue::Sequence(numbers)
        }
    }

    /// Unwrap into the numeric components.
    ///
    /// Fails with [`EntryError::MalformedValue`] for text and opaque values.
    pub fn into_numbers(self) -> Result<Vec<Number>, EntryError> {
        match self {
            EntryValue::Scalar(number) => Ok(vec![number]),
            EntryValue::Sequence(numbers) => Ok(numbers),
            EntryValue::Text(_) => Err(EntryError::MalformedValue(
                "expected numbers, got text".to_string(),
            )),
            EntryValue::Opaque(_) => Err(EntryError::MalformedValue(
                "expected numbers, got opaque bytes".to_string(),
            )),
        }
    }
}

impl From<i64> for EntryValue {
    fn from(value: i64) -> Self {
        EntryValue::Scalar(Number::Int(value))
    }
}

impl From<Number> for EntryValue {
    fn from(number: Number) -> Self {
        EntryValue::Scalar(number)
    }
}

impl From<Vec<Number>> for EntryValue {
    fn from(numbers: Vec<Number>) -> Self {
        EntryValue::Sequence(numbers)
    }
}

impl From<&str> for EntryValue {
    fn from(text: &str) -> Self {
        EntryValue::Text(text.to_string())
    }
}

impl From<String> for EntryValue {
    fn from(text: String) -> Self {
        EntryValue::Text(text)
    }
}

impl fmt::Display for EntryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryValue::Scalar(number) => write!(f, "{}", number),
            EntryValue::Sequence(numbers) => {
                f.write_str("[")?;
                for (i, number) in numbers.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", number)?;
                }
                f.write_str("]")
            }
            EntryValue::Text(text) => f.write_str(text),
            EntryValue::Opaque(bytes) => f.write_str(&hex::encode(bytes)),
        }
    }
}

fn serialize_hex<S: Serializer>(bytes: &Bytes, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(bytes))
}
