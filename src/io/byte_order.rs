//! Byte order codec.
//!
//! Exif data can be either little-endian or big-endian, determined by the
//! magic bytes at the start of the TIFF header. Every multi-byte field of a
//! directory entry is read and written respecting that order.

// =============================================================================
// Endian Helper Functions
// =============================================================================

/// Read a little-endian u16 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 2 bytes.
#[inline]
pub fn read_u16_le(bytes: &[u8]) -> u16 {
    u16::from_le_bytes([bytes[0], bytes[1]])
}

/// Read a big-endian u16 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 2 bytes.
#[inline]
pub fn read_u16_be(bytes: &[u8]) -> u16 {
    u16::from_be_bytes([bytes[0], bytes[1]])
}

/// Read a little-endian u32 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 4 bytes.
#[inline]
pub fn read_u32_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Read a big-endian u32 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 4 bytes.
#[inline]
pub fn read_u32_be(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

// =============================================================================
// ByteOrder
// =============================================================================

/// Byte order (endianness) of an Exif block.
///
/// The order is chosen by the container, never by an entry: the same entry
/// can be serialized in either order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// Little-endian ("II" = Intel)
    LittleEndian,
    /// Big-endian ("MM" = Motorola)
    BigEndian,
}

impl ByteOrder {
    /// Read a u16 from a byte slice using this byte order.
    #[inline]
    pub fn read_u16(self, bytes: &[u8]) -> u16 {
        match self {
            ByteOrder::LittleEndian => read_u16_le(bytes),
            ByteOrder::BigEndian => read_u16_be(bytes),
        }
    }

    /// Read a u32 from a byte slice using this byte order.
    #[inline]
    pub fn read_u32(self, bytes: &[u8]) -> u32 {
        match self {
            ByteOrder::LittleEndian => read_u32_le(bytes),
            ByteOrder::BigEndian => read_u32_be(bytes),
        }
    }

    /// Read an i16 from a byte slice using this byte order.
    #[inline]
    pub fn read_i16(self, bytes: &[u8]) -> i16 {
        self.read_u16(bytes) as i16
    }

    /// Read an i32 from a byte slice using this byte order.
    #[inline]
    pub fn read_i32(self, bytes: &[u8]) -> i32 {
        self.read_u32(bytes) as i32
    }

    /// Encode a u16 in this byte order.
    #[inline]
    pub fn write_u16(self, value: u16) -> [u8; 2] {
        match self {
            ByteOrder::LittleEndian => value.to_le_bytes(),
            ByteOrder::BigEndian => value.to_be_bytes(),
        }
    }

    /// Encode a u32 in this byte order.
    #[inline]
    pub fn write_u32(self, value: u32) -> [u8; 4] {
        match self {
            ByteOrder::LittleEndian => value.to_le_bytes(),
            ByteOrder::BigEndian => value.to_be_bytes(),
        }
    }

    /// Decode an integer of `width` bytes (1, 2 or 4).
    ///
    /// The result is sign-extended when `signed` is set. Returns `None` for
    /// an unsupported width or a slice that is too short.
    pub fn decode(self, bytes: &[u8], width: usize, signed: bool) -> Option<i64> {
        if bytes.len() < width {
            return None;
        }
        let value = match (width, signed) {
            (1, false) => bytes[0] as i64,
            (1, true) => bytes[0] as i8 as i64,
            (2, false) => self.read_u16(bytes) as i64,
            (2, true) => self.read_i16(bytes) as i64,
            (4, false) => self.read_u32(bytes) as i64,
            (4, true) => self.read_i32(bytes) as i64,
            _ => return None,
        };
        Some(value)
    }

    /// Encode the low `width` bytes (1, 2 or 4) of `value` into `out`.
    ///
    /// Values wider than `width` are truncated; two's complement makes the
    /// same bit pattern valid for signed and unsigned formats.
    pub fn encode_into(self, value: i64, width: usize, out: &mut Vec<u8>) {
        match width {
            1 => out.push(value as u8),
            2 => out.extend_from_slice(&self.write_u16(value as u16)),
            _ => out.extend_from_slice(&self.write_u32(value as u32)),
        }
    }

    /// The two magic bytes that announce this order in a TIFF header.
    pub const fn magic(self) -> [u8; 2] {
        match self {
            ByteOrder::LittleEndian => *b"II",
            ByteOrder::BigEndian => *b"MM",
        }
    }
}
