//! Exif format codes, directory kinds and the tag-name registry.
//!
//! This module defines the vocabulary shared by the entry model and the
//! directory reader:
//! - Format codes that determine how values are encoded on the wire
//! - Directory kinds that give tag numbers their meaning
//! - Tag numbers and their human-readable names
//!
//! The registry is consulted for display only. Decoding never depends on
//! whether a tag is known.

use std::fmt;
use std::str::FromStr;

// =============================================================================
// Format Codes
// =============================================================================

/// Wire format of a directory entry.
///
/// Each format has a fixed element size, which is critical for:
/// - Checking that a value block has the length its count announces
/// - Determining if a value fits inline in a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum FormatCode {
    /// Unsigned 8-bit integer (1 byte)
    Byte = 1,

    /// 8-bit ASCII character, NUL terminated (1 byte)
    Ascii = 2,

    /// Unsigned 16-bit integer (2 bytes)
    Short = 3,

    /// Unsigned 32-bit integer (4 bytes)
    Long = 4,

    /// Two unsigned 32-bit integers: numerator, denominator (8 bytes)
    Rational = 5,

    /// Signed 8-bit integer (1 byte)
    SByte = 6,

    /// Undefined byte data (1 byte per element)
    Undefined = 7,

    /// Signed 16-bit integer (2 bytes)
    SShort = 8,

    /// Signed 32-bit integer (4 bytes)
    SLong = 9,

    /// Two signed 32-bit integers: numerator, denominator (8 bytes)
    SRational = 10,
}

impl FormatCode {
    /// Size of a single component of this format in bytes.
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            FormatCode::Byte | FormatCode::SByte => 1,
            FormatCode::Ascii | FormatCode::Undefined => 1,
            FormatCode::Short | FormatCode::SShort => 2,
            FormatCode::Long | FormatCode::SLong => 4,
            FormatCode::Rational | FormatCode::SRational => 8,
        }
    }

    /// Create a FormatCode from its numeric value.
    ///
    /// Returns `None` for unsupported or unknown format values.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(FormatCode::Byte),
            2 => Some(FormatCode::Ascii),
            3 => Some(FormatCode::Short),
            4 => Some(FormatCode::Long),
            5 => Some(FormatCode::Rational),
            6 => Some(FormatCode::SByte),
            7 => Some(FormatCode::Undefined),
            8 => Some(FormatCode::SShort),
            9 => Some(FormatCode::SLong),
            10 => Some(FormatCode::SRational),
            _ => None,
        }
    }

    /// Get the numeric format code.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Get a human-readable name for the format.
    pub const fn name(self) -> &'static str {
        match self {
            FormatCode::Byte => "Byte",
            FormatCode::Ascii => "Ascii",
            FormatCode::Short => "Short",
            FormatCode::Long => "Long",
            FormatCode::Rational => "Rational",
            FormatCode::SByte => "SByte",
            FormatCode::Undefined => "Undefined",
            FormatCode::SShort => "SShort",
            FormatCode::SLong => "SLong",
            FormatCode::SRational => "SRational",
        }
    }

    /// Maximum bytes that can be stored inline in a directory entry.
    pub const INLINE_THRESHOLD: usize = 4;

    /// Check if a value with this format and count fits inline.
    #[inline]
    pub fn fits_inline(self, count: u32) -> bool {
        self.size_in_bytes() as u64 * count as u64 <= Self::INLINE_THRESHOLD as u64
    }
}

impl fmt::Display for FormatCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Directory Kinds
// =============================================================================

/// The logical directory (IFD) that owns an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectoryKind {
    /// IFD0, the main image
    Image,
    /// IFD1, the thumbnail image
    Thumbnail,
    /// Exif sub-IFD
    ExifSub,
    /// GPS sub-IFD
    GpsSub,
    /// Interoperability sub-IFD
    InteroperabilitySub,
}

impl DirectoryKind {
    /// All directory kinds, in tree-walk order.
    pub const ALL: [DirectoryKind; 5] = [
        DirectoryKind::Image,
        DirectoryKind::ExifSub,
        DirectoryKind::InteroperabilitySub,
        DirectoryKind::GpsSub,
        DirectoryKind::Thumbnail,
    ];

    /// Short name used in dumps and on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            DirectoryKind::Image => "IFD0",
            DirectoryKind::Thumbnail => "IFD1",
            DirectoryKind::ExifSub => "Exif",
            DirectoryKind::GpsSub => "GPS",
            DirectoryKind::InteroperabilitySub => "Interoperability",
        }
    }
}

impl fmt::Display for DirectoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DirectoryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ifd0" | "image" => Ok(DirectoryKind::Image),
            "ifd1" | "thumbnail" => Ok(DirectoryKind::Thumbnail),
            "exif" => Ok(DirectoryKind::ExifSub),
            "gps" => Ok(DirectoryKind::GpsSub),
            "interop" | "interoperability" => Ok(DirectoryKind::InteroperabilitySub),
            other => Err(format!("unknown directory kind: {}", other)),
        }
    }
}

// =============================================================================
// Tag Numbers
// =============================================================================

// -----------------------------------------------------------------------------
// IFD0 / IFD1
// -----------------------------------------------------------------------------
pub const IMAGE_WIDTH: u16 = 0x0100;
pub const IMAGE_LENGTH: u16 = 0x0101;
pub const BITS_PER_SAMPLE: u16 = 0x0102;
pub const COMPRESSION: u16 = 0x0103;
pub const IMAGE_DESCRIPTION: u16 = 0x010E;
pub const MAKE: u16 = 0x010F;
pub const MODEL: u16 = 0x0110;
pub const ORIENTATION: u16 = 0x0112;
pub const X_RESOLUTION: u16 = 0x011A;
pub const Y_RESOLUTION: u16 = 0x011B;
pub const RESOLUTION_UNIT: u16 = 0x0128;
pub const SOFTWARE: u16 = 0x0131;
pub const DATE_TIME: u16 = 0x0132;
pub const JPEG_INTERCHANGE_FORMAT: u16 = 0x0201;
pub const JPEG_INTERCHANGE_FORMAT_LENGTH: u16 = 0x0202;
pub const YCBCR_POSITIONING: u16 = 0x0213;
pub const COPYRIGHT: u16 = 0x8298;
pub const EXIF_IFD_POINTER: u16 = 0x8769;
pub const GPS_INFO_IFD_POINTER: u16 = 0x8825;
pub const PRINT_IM: u16 = 0xC4A5;

// -----------------------------------------------------------------------------
// Exif sub-IFD
// -----------------------------------------------------------------------------
pub const EXPOSURE_TIME: u16 = 0x829A;
pub const F_NUMBER: u16 = 0x829D;
pub const EXPOSURE_PROGRAM: u16 = 0x8822;
pub const EXIF_VERSION: u16 = 0x9000;
pub const METERING_MODE: u16 = 0x9207;
pub const FOCAL_LENGTH: u16 = 0x920A;
pub const MAKER_NOTE: u16 = 0x927C;
pub const FLASHPIX_VERSION: u16 = 0xA000;
pub const COLOR_SPACE: u16 = 0xA001;
pub const INTEROPERABILITY_IFD_POINTER: u16 = 0xA005;

// -----------------------------------------------------------------------------
// GPS sub-IFD
// -----------------------------------------------------------------------------
pub const GPS_VERSION_ID: u16 = 0x0000;
pub const GPS_LATITUDE_REF: u16 = 0x0001;
pub const GPS_LATITUDE: u16 = 0x0002;
pub const GPS_LONGITUDE_REF: u16 = 0x0003;
pub const GPS_LONGITUDE: u16 = 0x0004;

// -----------------------------------------------------------------------------
// Interoperability sub-IFD
// -----------------------------------------------------------------------------
pub const INTEROPERABILITY_INDEX: u16 = 0x0001;
pub const INTEROPERABILITY_VERSION: u16 = 0x0002;

/// Tags whose content is vendor-defined and not reliably printable.
#[inline]
pub fn is_vendor_private(tag: u16) -> bool {
    tag == MAKER_NOTE || tag == PRINT_IM
}

// =============================================================================
// Registry
// =============================================================================

/// Names shared by IFD0, IFD1 and the Exif sub-IFD.
static TIFF_NAMES: &[(u16, &str)] = &[
    (0x00FE, "NewSubfileType"),
    (IMAGE_WIDTH, "ImageWidth"),
    (IMAGE_LENGTH, "ImageLength"),
    (BITS_PER_SAMPLE, "BitsPerSample"),
    (COMPRESSION, "Compression"),
    (0x0106, "PhotometricInterpretation"),
    (IMAGE_DESCRIPTION, "ImageDescription"),
    (MAKE, "Make"),
    (MODEL, "Model"),
    (0x0111, "StripOffsets"),
    (ORIENTATION, "Orientation"),
    (0x0115, "SamplesPerPixel"),
    (0x0116, "RowsPerStrip"),
    (0x0117, "StripByteCounts"),
    (X_RESOLUTION, "XResolution"),
    (Y_RESOLUTION, "YResolution"),
    (0x011C, "PlanarConfiguration"),
    (RESOLUTION_UNIT, "ResolutionUnit"),
    (0x012D, "TransferFunction"),
    (SOFTWARE, "Software"),
    (DATE_TIME, "DateTime"),
    (0x013B, "Artist"),
    (0x013E, "WhitePoint"),
    (0x013F, "PrimaryChromaticities"),
    (JPEG_INTERCHANGE_FORMAT, "JPEGInterchangeFormat"),
    (JPEG_INTERCHANGE_FORMAT_LENGTH, "JPEGInterchangeFormatLength"),
    (0x0211, "YCbCrCoefficients"),
    (0x0212, "YCbCrSubSampling"),
    (YCBCR_POSITIONING, "YCbCrPositioning"),
    (0x0214, "ReferenceBlackWhite"),
    (COPYRIGHT, "Copyright"),
    (EXPOSURE_TIME, "ExposureTime"),
    (F_NUMBER, "FNumber"),
    (EXIF_IFD_POINTER, "ExifIfdPointer"),
    (EXPOSURE_PROGRAM, "ExposureProgram"),
    (0x8824, "SpectralSensitivity"),
    (GPS_INFO_IFD_POINTER, "GPSInfoIfdPointer"),
    (0x8827, "ISOSpeedRatings"),
    (EXIF_VERSION, "ExifVersion"),
    (0x9003, "DateTimeOriginal"),
    (0x9004, "DateTimeDigitized"),
    (0x9101, "ComponentsConfiguration"),
    (0x9102, "CompressedBitsPerPixel"),
    (0x9201, "ShutterSpeedValue"),
    (0x9202, "ApertureValue"),
    (0x9203, "BrightnessValue"),
    (0x9204, "ExposureBiasValue"),
    (0x9205, "MaxApertureValue"),
    (0x9206, "SubjectDistance"),
    (METERING_MODE, "MeteringMode"),
    (0x9208, "LightSource"),
    (0x9209, "Flash"),
    (FOCAL_LENGTH, "FocalLength"),
    (MAKER_NOTE, "MakerNote"),
    (0x9286, "UserComment"),
    (0x9290, "SubSecTime"),
    (FLASHPIX_VERSION, "FlashPixVersion"),
    (COLOR_SPACE, "ColorSpace"),
    (0xA002, "PixelXDimension"),
    (0xA003, "PixelYDimension"),
    (INTEROPERABILITY_IFD_POINTER, "InteroperabilityIfdPointer"),
    (0xA20E, "FocalPlaneXResolution"),
    (0xA20F, "FocalPlaneYResolution"),
    (0xA210, "FocalPlaneResolutionUnit"),
    (0xA217, "SensingMethod"),
    (0xA300, "FileSource"),
    (0xA301, "SceneType"),
    (0xA401, "CustomRendered"),
    (0xA402, "ExposureMode"),
    (0xA403, "WhiteBalance"),
    (0xA404, "DigitalZoomRatio"),
    (0xA405, "FocalLengthIn35mmFilm"),
    (0xA406, "SceneCaptureType"),
    (0xA420, "ImageUniqueID"),
    (PRINT_IM, "PrintIM"),
];

static GPS_NAMES: &[(u16, &str)] = &[
    (GPS_VERSION_ID, "GPSVersionID"),
    (GPS_LATITUDE_REF, "GPSLatitudeRef"),
    (GPS_LATITUDE, "GPSLatitude"),
    (GPS_LONGITUDE_REF, "GPSLongitudeRef"),
    (GPS_LONGITUDE, "GPSLongitude"),
    (0x0005, "GPSAltitudeRef"),
    (0x0006, "GPSAltitude"),
    (0x0007, "GPSTimeStamp"),
    (0x0008, "GPSSatellites"),
    (0x0009, "GPSStatus"),
    (0x000A, "GPSMeasureMode"),
    (0x000B, "GPSDOP"),
    (0x000C, "GPSSpeedRef"),
    (0x000D, "GPSSpeed"),
    (0x0010, "GPSImgDirectionRef"),
    (0x0011, "GPSImgDirection"),
    (0x0012, "GPSMapDatum"),
    (0x001D, "GPSDateStamp"),
];

static INTEROPERABILITY_NAMES: &[(u16, &str)] = &[
    (INTEROPERABILITY_INDEX, "InteroperabilityIndex"),
    (INTEROPERABILITY_VERSION, "InteroperabilityVersion"),
    (0x1000, "RelatedImageFileFormat"),
    (0x1001, "RelatedImageWidth"),
    (0x1002, "RelatedImageLength"),
];

/// Look up the name of a tag within a directory kind.
///
/// Returns `None` for unregistered tags. Unknown tags are not an error;
/// they decode and render like any other entry.
pub fn name_for(kind: DirectoryKind, tag: u16) -> Option<&'static str> {
    let table = match kind {
        DirectoryKind::GpsSub => GPS_NAMES,
        DirectoryKind::InteroperabilitySub => INTEROPERABILITY_NAMES,
        DirectoryKind::Image | DirectoryKind::Thumbnail | DirectoryKind::ExifSub => TIFF_NAMES,
    };
    table
        .iter()
        .find(|(number, _)| *number == tag)
        .map(|(_, name)| *name)
}

/// Name of a tag, falling back to a hex placeholder for unknown tags.
pub fn display_name(kind: DirectoryKind, tag: u16) -> String {
    match name_for(kind, tag) {
        Some(name) => name.to_string(),
        None => format!("UnknownTag:0x{:04X}", tag),
    }
}

// =============================================================================
// Tests
// =============================================================================
