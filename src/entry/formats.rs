//! Numeric format descriptors.
//!
//! Every numeric format is fully described by one [`NumberDescriptor`] row:
//! its range, its dimension, and the two single-value functions the generic
//! engine calls for encoding and display. There is no per-format logic
//! beyond these rows.

use crate::format::tiff::FormatCode;
use crate::io::ByteOrder;

use super::value::Number;

// =============================================================================
// NumberDescriptor
// =============================================================================

/// Parameter row of a numeric format.
#[derive(Debug)]
pub struct NumberDescriptor {
    /// Wire format code
    pub code: FormatCode,

    /// Width of one slot in bytes
    pub width: usize,

    /// Whether slots are two's complement signed
    pub signed: bool,

    /// Slots per component (1 for integers, 2 for rationals)
    pub dimension: usize,

    /// Inclusive lower bound of every slot
    pub min: i64,

    /// Inclusive upper bound of every slot
    pub max: i64,

    /// Append one slot to the output in the given byte order
    pub encode_one: fn(i64, ByteOrder, &mut Vec<u8>),

    /// Render one component
    pub format_one: fn(&Number, bool) -> String,
}

fn encode_8(value: i64, order: ByteOrder, out: &mut Vec<u8>) {
    order.encode_into(value, 1, out);
}

fn encode_16(value: i64, order: ByteOrder, out: &mut Vec<u8>) {
    order.encode_into(value, 2, out);
}

fn encode_32(value: i64, order: ByteOrder, out: &mut Vec<u8>) {
    order.encode_into(value, 4, out);
}

fn format_decimal(number: &Number, _brief: bool) -> String {
    number.to_string()
}

/// Slots per rational component: numerator and denominator.
const FRACTION_SLOTS: usize = 2;

// Every slot is rendered, including those past the end of a short tuple.
fn format_fraction(number: &Number, _brief: bool) -> String {
    let Some(slots) = number.slots() else {
        return number.to_string();
    };

    (0..FRACTION_SLOTS)
        .map(|i| match slots.get(i).copied().flatten() {
            Some(value) => value.to_string(),
            None => "?".to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

static BYTE: NumberDescriptor = NumberDescriptor {
    code: FormatCode::Byte,
    width: 1,
    signed: false,
    dimension: 1,
    min: 0,
    max: u8::MAX as i64,
    encode_one: encode_8,
    format_one: format_decimal,
};

static SHORT: NumberDescriptor = NumberDescriptor {
    code: FormatCode::Short,
    width: 2,
    signed: false,
    dimension: 1,
    min: 0,
    max: u16::MAX as i64,
    encode_one: encode_16,
    format_one: format_decimal,
};

static LONG: NumberDescriptor = NumberDescriptor {
    code: FormatCode::Long,
    width: 4,
    signed: false,
    dimension: 1,
    min: 0,
    max: u32::MAX as i64,
    encode_one: encode_32,
    format_one: format_decimal,
};

static RATIONAL: NumberDescriptor = NumberDescriptor {
    code: FormatCode::Rational,
    width: 4,
    signed: false,
    dimension: 2,
    min: 0,
    max: u32::MAX as i64,
    encode_one: encode_32,
    format_one: format_fraction,
};

static SBYTE: NumberDescriptor = NumberDescriptor {
    code: FormatCode::SByte,
    width: 1,
    signed: true,
    dimension: 1,
    min: i8::MIN as i64,
    max: i8::MAX as i64,
    encode_one: encode_8,
    format_one: format_decimal,
};

static SSHORT: NumberDescriptor = NumberDescriptor {
    code: FormatCode::SShort,
    width: 2,
    signed: true,
    dimension: 1,
    min: i16::MIN as i64,
    max: i16::MAX as i64,
    encode_one: encode_16,
    format_one: format_decimal,
};

static SLONG: NumberDescriptor = NumberDescriptor {
    code: FormatCode::SLong,
    width: 4,
    signed: true,
    dimension: 1,
    min: i32::MIN as i64,
    max: i32::MAX as i64,
    encode_one: encode_32,
    format_one: format_decimal,
};

static SRATIONAL: NumberDescriptor = NumberDescriptor {
    code: FormatCode::SRational,
    width: 4,
    signed: true,
    dimension: 2,
    min: i32::MIN as i64,
    max: i32::MAX as i64,
    encode_one: encode_32,
    format_one: format_fraction,
};

// =============================================================================
// NumberFormat
// =============================================================================

/// The numeric formats handled by the generic engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberFormat {
    Byte,
    Short,
    Long,
    Rational,
    SByte,
    SShort,
    SLong,
    SRational,
}

impl NumberFormat {
    /// All numeric formats, in format-code order.
    pub const ALL: [NumberFormat; 8] = [
        NumberFormat::Byte,
        NumberFormat::Short,
        NumberFormat::Long,
        NumberFormat::Rational,
        NumberFormat::SByte,
        NumberFormat::SShort,
        NumberFormat::SLong,
        NumberFormat::SRational,
    ];

    /// The parameter row of this format.
    pub fn descriptor(self) -> &'static NumberDescriptor {
        match self {
            NumberFormat::Byte => &BYTE,
            NumberFormat::Short => &SHORT,
            NumberFormat::Long => &LONG,
            NumberFormat::Rational => &RATIONAL,
            NumberFormat::SByte => &SBYTE,
            NumberFormat::SShort => &SSHORT,
            NumberFormat::SLong => &SLONG,
            NumberFormat::SRational => &SRATIONAL,
        }
    }

    /// Select the numeric format for a wire format code.
    ///
    /// Returns `None` for Ascii and Undefined, which are not numeric.
    pub fn from_format_code(code: FormatCode) -> Option<Self> {
        match code {
            FormatCode::Byte => Some(NumberFormat::Byte),
            FormatCode::Short => Some(NumberFormat::Short),
            FormatCode::Long => Some(NumberFormat::Long),
            FormatCode::Rational => Some(NumberFormat::Rational),
            FormatCode::SByte => Some(NumberFormat::SByte),
            FormatCode::SShort => Some(NumberFormat::SShort),
            FormatCode::SLong => Some(NumberFormat::SLong),
            FormatCode::SRational => Some(NumberFormat::SRational),
            FormatCode::Ascii | FormatCode::Undefined => None,
        }
    }

    /// The wire format code.
    #[inline]
    pub fn format_code(self) -> FormatCode {
        self.descriptor().code
    }

    /// Decode one component starting at the beginning of `bytes`.
    ///
    /// `bytes` must hold at least `format_code().size_in_bytes()` bytes.
    pub(crate) fn decode_one(self, bytes: &[u8], order: ByteOrder) -> Option<Number> {
        let d = self.descriptor();
        if d.dimension == 1 {
            return order.decode(bytes, d.width, d.signed).map(Number::Int);
        }

        let mut slots = Vec::with_capacity(d.dimension);
        for i in 0..d.dimension {
            let start = i * d.width;
            let slot = order.decode(bytes.get(start..)?, d.width, d.signed)?;
            slots.push(Some(slot));
        }
        Some(Number::Tuple(slots))
    }
}
