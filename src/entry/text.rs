//! Tag-specific text rendering.
//!
//! A handful of well-known tags carry codes or physical quantities that
//! read better as words or units than as raw numbers. These renderers are
//! consulted before the generic rendering and return `None` whenever the
//! value does not have the expected shape, in which case the generic rule
//! applies.

use crate::format::tiff::tags::{
    self, COLOR_SPACE, EXIF_VERSION, EXPOSURE_PROGRAM, EXPOSURE_TIME, FLASHPIX_VERSION,
    FOCAL_LENGTH, F_NUMBER, GPS_LATITUDE, GPS_LONGITUDE, INTEROPERABILITY_VERSION,
    METERING_MODE, ORIENTATION, RESOLUTION_UNIT, YCBCR_POSITIONING,
};
use crate::format::tiff::DirectoryKind;

use super::formats::NumberFormat;
use super::value::Number;

// =============================================================================
// Code Tables
// =============================================================================

static ORIENTATION_NAMES: &[(i64, &str)] = &[
    (1, "top - left"),
    (2, "top - right"),
    (3, "bottom - right"),
    (4, "bottom - left"),
    (5, "left - top"),
    (6, "right - top"),
    (7, "right - bottom"),
    (8, "left - bottom"),
];

static RESOLUTION_UNIT_NAMES: &[(i64, &str)] = &[(2, "Inch"), (3, "Centimeter")];

static YCBCR_POSITIONING_NAMES: &[(i64, &str)] = &[(1, "centered"), (2, "co-sited")];

static EXPOSURE_PROGRAM_NAMES: &[(i64, &str)] = &[
    (0, "Not defined"),
    (1, "Manual"),
    (2, "Normal program"),
    (3, "Aperture priority"),
    (4, "Shutter priority"),
    (5, "Creative program (biased toward depth of field)"),
    (6, "Action program (biased toward fast shutter speed)"),
    (7, "Portrait mode (for closeup photos with the background out of focus)"),
    (8, "Landscape mode (for landscape photos with the background in focus)"),
];

static METERING_MODE_NAMES: &[(i64, &str)] = &[
    (0, "Unknown"),
    (1, "Average"),
    (2, "Center-Weighted Average"),
    (3, "Spot"),
    (4, "Multi Spot"),
    (5, "Pattern"),
    (6, "Partial"),
    (255, "Other"),
];

static COLOR_SPACE_NAMES: &[(i64, &str)] = &[(1, "sRGB"), (0xFFFF, "Uncalibrated")];

fn is_main_image(kind: DirectoryKind) -> bool {
    matches!(kind, DirectoryKind::Image | DirectoryKind::Thumbnail)
}

fn code_table(kind: DirectoryKind, tag: u16) -> Option<&'static [(i64, &'static str)]> {
    match (kind, tag) {
        (k, ORIENTATION) if is_main_image(k) => Some(ORIENTATION_NAMES),
        (k, RESOLUTION_UNIT) if is_main_image(k) => Some(RESOLUTION_UNIT_NAMES),
        (k, YCBCR_POSITIONING) if is_main_image(k) => Some(YCBCR_POSITIONING_NAMES),
        (DirectoryKind::ExifSub, EXPOSURE_PROGRAM) => Some(EXPOSURE_PROGRAM_NAMES),
        (DirectoryKind::ExifSub, METERING_MODE) => Some(METERING_MODE_NAMES),
        (DirectoryKind::ExifSub, COLOR_SPACE) => Some(COLOR_SPACE_NAMES),
        _ => None,
    }
}

// =============================================================================
// Numeric Tags
// =============================================================================

/// Render a numeric entry whose tag has a dedicated rendering.
pub(crate) fn number_text(
    kind: DirectoryKind,
    tag: u16,
    format: NumberFormat,
    values: &[Number],
    brief: bool,
) -> Option<String> {
    match (format, values) {
        (NumberFormat::Short, [Number::Int(code)]) => {
            let table = code_table(kind, tag)?;
            Some(coded_text(table, *code, brief))
        }
        (NumberFormat::Rational, [value]) if kind == DirectoryKind::ExifSub => {
            let quotient = quotient(value)?;
            match tag {
                F_NUMBER => Some(format!("f/{:.1}", quotient)),
                FOCAL_LENGTH => Some(format!("{:.1} mm", quotient)),
                EXPOSURE_TIME => exposure_text(value),
                _ => None,
            }
        }
        (NumberFormat::Rational, [degrees, minutes, seconds])
            if kind == DirectoryKind::GpsSub && (tag == GPS_LATITUDE || tag == GPS_LONGITUDE) =>
        {
            Some(format!(
                "{}° {}' {:.2}\"",
                trimmed(quotient(degrees)?),
                trimmed(quotient(minutes)?),
                quotient(seconds)?
            ))
        }
        _ => None,
    }
}

fn coded_text(table: &[(i64, &str)], code: i64, brief: bool) -> String {
    match table.iter().find(|(value, _)| *value == code) {
        Some((_, name)) => name.to_string(),
        None if brief => code.to_string(),
        None => format!("Unknown value {}", code),
    }
}

/// Value of a rational; `None` for partial tuples and zero denominators.
fn quotient(number: &Number) -> Option<f64> {
    let (numerator, denominator) = number.ratio()?;
    if denominator == 0 {
        return None;
    }
    Some(numerator as f64 / denominator as f64)
}

fn exposure_text(number: &Number) -> Option<String> {
    let (numerator, denominator) = number.ratio()?;
    if numerator == 0 || denominator == 0 {
        return None;
    }

    let seconds = numerator as f64 / denominator as f64;
    if seconds < 1.0 {
        Some(format!("1/{} sec.", (1.0 / seconds).round() as i64))
    } else {
        Some(format!("{} sec.", trimmed(seconds)))
    }
}

/// Whole numbers without decimals, anything else with two.
fn trimmed(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

// =============================================================================
// Undefined Tags
// =============================================================================

/// Render an opaque entry whose tag has a dedicated rendering.
pub(crate) fn undefined_text(kind: DirectoryKind, tag: u16, data: &[u8]) -> Option<String> {
    if tags::is_vendor_private(tag) {
        return Some(format!("({} bytes of vendor data)", data.len()));
    }

    let label = match (kind, tag) {
        (DirectoryKind::ExifSub, EXIF_VERSION) => "Exif Version",
        (DirectoryKind::ExifSub, FLASHPIX_VERSION) => "FlashPix Version",
        (DirectoryKind::InteroperabilitySub, INTEROPERABILITY_VERSION) => "Interoperability Version",
        _ => return None,
    };
    Some(format!("{} {}", label, version_number(data)?))
}

/// Parse a four-digit version such as `0220` into `2.2`.
fn version_number(data: &[u8]) -> Option<String> {
    let digits: &[u8; 4] = data.try_into().ok()?;
    if !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }

    let major = (digits[0] - b'0') * 10 + (digits[1] - b'0');
    let mut version = format!("{}.{}", major, digits[2] as char);
    if digits[3] != b'0' {
        version.push(digits[3] as char);
    }
    Some(version)
}
