use thiserror::Error;

/// Errors raised by the typed entry model.
///
/// These are the only failures that originate in the entry core: range
/// violations during validation and values that cannot be represented in
/// the entry's wire format at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    /// A numeric value lies outside the inclusive range of its format
    #[error("Value {value} out of range [{min}, {max}]")]
    OutOfRange { value: i64, min: i64, max: i64 },

    /// A value has the wrong shape or length for its format
    #[error("Malformed value: {0}")]
    MalformedValue(String),
}

/// I/O errors raised by byte sources
#[derive(Debug, Clone, Error)]
pub enum IoError {
    /// Requested range exceeds resource bounds
    #[error("Range out of bounds: requested {requested} bytes at offset {offset}, size is {size}")]
    RangeOutOfBounds {
        offset: u64,
        requested: u64,
        size: u64,
    },

    /// Failure reading from the file system
    #[error("Read error: {0}")]
    Read(String),
}

/// Errors that can occur when walking a TIFF directory tree
#[derive(Debug, Clone, Error)]
pub enum TiffError {
    /// I/O error while reading the data
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// Invalid TIFF magic bytes (not II or MM)
    #[error("Invalid TIFF magic bytes: expected 0x4949 (II) or 0x4D4D (MM), got 0x{0:04X}")]
    InvalidMagic(u16),

    /// Invalid TIFF version number
    #[error("Invalid TIFF version: expected 42, got {0}")]
    InvalidVersion(u16),

    /// Data is too small to contain a valid TIFF header
    #[error("File too small: need at least {required} bytes, got {actual}")]
    FileTooSmall { required: u64, actual: u64 },

    /// Invalid IFD offset (points outside the data)
    #[error("Invalid IFD offset: {0}")]
    InvalidIfdOffset(u64),

    /// Directory record with a format code outside 1..=10
    #[error("Unknown format code: {0}")]
    UnknownFormat(u16),

    /// A directory offset was visited twice
    #[error("Too many entries for one directory: {0} (limit is 65535)")]
    TooManyEntries(usize),

    #[error("Directory at offset {offset} does not fit in 32-bit offsets")]
    OffsetOverflow { offset: u32 },

    #[error("Directory loop detected at offset {0}")]
    DirectoryLoop(u64),

    /// An entry could not be decoded
    #[error("Entry error: {0}")]
    Entry(#[from] EntryError),
}

/// Errors related to container detection
#[derive(Debug, Clone, Error)]
pub enum FormatError {
    /// I/O error while reading the file
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// TIFF parsing error
    #[error("TIFF error: {0}")]
    Tiff(#[from] TiffError),

    /// File format is not supported
    #[error("Unsupported format: {reason}")]
    UnsupportedFormat { reason: String },

    /// JPEG file carries no APP1 Exif segment
    #[error("No Exif segment found")]
    MissingExif,
}
