mod byte_order;
mod data_source;

pub use byte_order::{read_u16_be, read_u16_le, read_u32_be, read_u32_le, ByteOrder};
pub use data_source::{DataSource, MemorySource};
