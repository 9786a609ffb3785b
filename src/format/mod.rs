//! Container parsers for Exif data.
//!
//! # Format Detection
//!
//! Use [`detect::detect_format`] to identify the container of a file, or
//! [`detect::locate_exif`] to go straight to its TIFF data.
//! Currently supported containers:
//!
//! - **TIFF**: the Exif data is the file itself
//! - **JPEG**: the Exif data is the payload of the APP1 `Exif` segment

pub mod detect;
pub mod jpeg;
pub mod tiff;

pub use detect::{detect_format, is_tiff_header, locate_exif, ContainerFormat};
