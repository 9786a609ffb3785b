use bytes::Bytes;

use crate::error::IoError;

/// Trait for bounded-window access to the bytes of a container.
///
/// The directory reader never indexes raw buffers directly; every value
/// block is fetched through `slice`, which rejects out-of-bounds ranges
/// instead of panicking.
pub trait DataSource {
    /// Read exactly `len` bytes starting at `offset`.
    ///
    /// Returns an error if the range is out of bounds.
    fn slice(&self, offset: u64, len: usize) -> Result<Bytes, IoError>;

    /// Get the total size of the window in bytes.
    fn size(&self) -> u64;
}

/// In-memory data source over a shared buffer.
///
/// Offsets are relative to the start of the window, which for Exif data is
/// the first byte of the TIFF header.
#[derive(Debug, Clone)]
pub struct MemorySource {
    data: Bytes,
}

impl MemorySource {
    /// Create a source over the given bytes.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }

    /// Restrict the source to `len` bytes starting at `offset`.
    ///
    /// The returned window shares the underlying buffer.
    pub fn window(&self, offset: u64, len: usize) -> Result<Self, IoError> {
        Ok(Self {
            data: self.slice(offset, len)?,
        })
    }
}

impl DataSource for MemorySource {
    fn slice(&self, offset: u64, len: usize) -> Result<Bytes, IoError> {
        let size = self.size();
        let end = offset.checked_add(len as u64);
        match end {
            Some(end) if end <= size => {
                Ok(self.data.slice(offset as usize..end as usize))
            }
            _ => Err(IoError::RangeOutOfBounds {
                offset,
                requested: len as u64,
                size,
            }),
        }
    }

    fn size(&self) -> u64 {
        self.data.len() as u64
    }
}
