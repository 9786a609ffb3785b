//! Exif dump: read files and describe every entry.
//!
//! This is the end-to-end path used by the `exif-dump` binary. Each file
//! produces one [`DumpRecord`], even when it cannot be read, so a batch of
//! files always yields one record per input.

use std::fmt::Write as _;
use std::path::Path;

use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};

use crate::entry::{debug_string, Entry, EntryValue, OverflowPolicy};
use crate::error::{FormatError, IoError};
use crate::format::detect::{detect_format, locate_exif};
use crate::format::tiff::{display_name, is_vendor_private, DirectoryKind, EntryFailure, ExifTree};
use crate::io::ByteOrder;

// =============================================================================
// Options
// =============================================================================

/// What to read and how to render it.
#[derive(Debug, Clone, Default)]
pub struct DumpOptions {
    /// Policy applied while decoding values
    pub policy: OverflowPolicy,

    /// Render text in brief form
    pub brief: bool,

    /// Directories to include, `None` for all
    pub directories: Option<Vec<DirectoryKind>>,
}

impl DumpOptions {
    fn includes(&self, kind: DirectoryKind) -> bool {
        self.directories
            .as_ref()
            .map_or(true, |kinds| kinds.contains(&kind))
    }
}

// =============================================================================
// Records
// =============================================================================

/// Description of one entry.
#[derive(Debug, Clone, Serialize)]
pub struct EntryRecord {
    /// Directory name, e.g. "IFD0" or "Exif"
    pub directory: String,

    /// Tag number as `0x%04X`
    pub tag: String,

    /// Tag name, or `UnknownTag:0x%04X`
    pub name: String,

    /// Format name
    pub format: String,

    /// Number of components
    pub components: u32,

    /// Raw value, left out for vendor-private tags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<EntryValue>,

    /// Formatted value
    pub text: String,

    /// Multi-line description used by the text output
    #[serde(skip)]
    pub description: String,
}

impl EntryRecord {
    /// Describe an entry.
    pub fn from_entry<E: Entry + ?Sized>(entry: &E, brief: bool) -> Self {
        let kind = entry.directory_kind();
        let tag = entry.tag();

        Self {
            directory: kind.name().to_string(),
            tag: format!("0x{:04X}", tag),
            name: display_name(kind, tag),
            format: entry.format().name().to_string(),
            components: entry.component_count(),
            value: (!is_vendor_private(tag)).then(|| entry.value()),
            text: entry.text(brief),
            description: debug_string(entry),
        }
    }
}

/// A record that could not be decoded.
#[derive(Debug, Clone, Serialize)]
pub struct FailureRecord {
    /// Directory name
    pub directory: String,

    /// Tag number as `0x%04X`
    pub tag: String,

    /// Format code as stored
    pub format: u16,

    /// Why decoding failed
    pub error: String,
}

impl FailureRecord {
    fn new(kind: DirectoryKind, failure: &EntryFailure) -> Self {
        Self {
            directory: kind.name().to_string(),
            tag: format!("0x{:04X}", failure.tag),
            format: failure.format_raw,
            error: failure.error.to_string(),
        }
    }
}

/// Everything learned about one file.
#[derive(Debug, Clone, Serialize)]
pub struct DumpRecord {
    /// File name as given
    pub file: String,

    /// Container format name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,

    /// Byte order of the Exif block
    #[serde(skip_serializing_if = "Option::is_none")]
    pub byte_order: Option<String>,

    /// Decoded entries
    pub entries: Vec<EntryRecord>,

    /// Entries that failed to decode
    pub failures: Vec<FailureRecord>,

    /// Why the file could not be read at all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DumpRecord {
    /// Describe the entries of a tree, restricted to the selected directories.
    pub fn from_tree(file: impl Into<String>, tree: &ExifTree, options: &DumpOptions) -> Self {
        let entries = tree
            .entries()
            .filter(|entry| options.includes(entry.directory_kind()))
            .map(|entry| EntryRecord::from_entry(entry, options.brief))
            .collect();

        let failures = tree
            .failures()
            .filter(|(kind, _)| options.includes(*kind))
            .map(|(kind, failure)| FailureRecord::new(kind, failure))
            .collect();

        Self {
            file: file.into(),
            container: None,
            byte_order: Some(byte_order_name(tree.byte_order).to_string()),
            entries,
            failures,
            error: None,
        }
    }

    /// A record for a file that could not be read.
    pub fn from_error(file: impl Into<String>, error: &FormatError) -> Self {
        Self {
            file: file.into(),
            container: None,
            byte_order: None,
            entries: Vec::new(),
            failures: Vec::new(),
            error: Some(error.to_string()),
        }
    }

    /// Whether the file could not be read.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

fn byte_order_name(order: ByteOrder) -> &'static str {
    match order {
        ByteOrder::LittleEndian => "little-endian",
        ByteOrder::BigEndian => "big-endian",
    }
}

// =============================================================================
// Reading
// =============================================================================

/// Read the Exif tree of a TIFF or JPEG file held in memory.
pub fn read_exif(data: Bytes, policy: OverflowPolicy) -> Result<ExifTree, FormatError> {
    let source = locate_exif(data)?;
    Ok(ExifTree::read(&source, policy)?)
}

/// Read the Exif tree of a TIFF or JPEG file on disk.
pub fn read_exif_file(path: &Path, policy: OverflowPolicy) -> Result<ExifTree, FormatError> {
    let data = std::fs::read(path)
        .map_err(|e| IoError::Read(format!("{}: {}", path.display(), e)))?;
    read_exif(Bytes::from(data), policy)
}

/// Dump a file held in memory.
pub fn dump_bytes(file: &str, data: Bytes, options: &DumpOptions) -> DumpRecord {
    let container = detect_format(&data).ok().map(|format| format.name().to_string());

    match read_exif(data, options.policy) {
        Ok(tree) => {
            let mut record = DumpRecord::from_tree(file, &tree, options);
            record.container = container;
            info!(
                file,
                entries = record.entries.len(),
                failures = record.failures.len(),
                "Dumped Exif data"
            );
            record
        }
        Err(error) => {
            warn!(file, error = %error, "Skipping file");
            let mut record = DumpRecord::from_error(file, &error);
            record.container = container;
            record
        }
    }
}

/// Dump a file on disk.
pub fn dump_file(path: &Path, options: &DumpOptions) -> DumpRecord {
    let file = path.display().to_string();
    match std::fs::read(path) {
        Ok(data) => dump_bytes(&file, Bytes::from(data), options),
        Err(e) => {
            let error = FormatError::Io(IoError::Read(e.to_string()));
            warn!(file = %file, error = %error, "Skipping file");
            DumpRecord::from_error(file, &error)
        }
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Render records as pretty-printed JSON.
pub fn render_json(records: &[DumpRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(records)
}

/// Render one record as plain text.
pub fn render_text(record: &DumpRecord) -> String {
    let mut out = String::new();

    let mut details: Vec<&str> = Vec::new();
    details.extend(record.container.as_deref());
    details.extend(record.byte_order.as_deref());
    if details.is_empty() {
        let _ = writeln!(out, "== {}", record.file);
    } else {
        let _ = writeln!(out, "== {} ({})", record.file, details.join(", "));
    }

    if let Some(error) = &record.error {
        let _ = writeln!(out, "  Error: {}", error);
        return out;
    }

    let mut current: Option<&str> = None;
    for entry in &record.entries {
        if current != Some(entry.directory.as_str()) {
            let _ = writeln!(out, "[{}]", entry.directory);
            current = Some(entry.directory.as_str());
        }
        out.push_str(&entry.description);
    }

    for failure in &record.failures {
        let _ = writeln!(
            out,
            "  Failed: {} {} (format {}): {}",
            failure.directory, failure.tag, failure.format, failure.error
        );
    }
    out
}

// =============================================================================
// Tests
// =============================================================================
