//! Configuration for the `exif-dump` tool.
//!
//! This module provides a configuration system that supports:
//! - Command-line arguments via clap
//! - Environment variables with `EXIF_` prefix
//! - Sensible defaults for all optional settings
//!
//! # Example
//!
//! ```ignore
//! use exif_entry::config::Config;
//!
//! let config = Config::parse();
//! let options = config.dump_options();
//! ```
//!
//! # Environment Variables
//!
//! - `EXIF_POLICY` - Overflow policy, `strict` or `lenient` (default: strict)
//! - `EXIF_OUTPUT` - Output format, `json` or `text` (default: json)
//! - `EXIF_BRIEF` - Render entry text in brief form (default: false)
//! - `EXIF_DIRECTORIES` - Comma-separated directories to include (default: all)

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::dump::DumpOptions;
use crate::entry::OverflowPolicy;
use crate::format::tiff::DirectoryKind;

// =============================================================================
// Output Format
// =============================================================================

/// How dump records are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One pretty-printed JSON array for all files
    #[default]
    Json,

    /// One block of plain text per file
    Text,
}

// =============================================================================
// CLI Arguments
// =============================================================================

/// exif-dump - Describe the Exif entries of TIFF and JPEG files.
///
/// Every entry is decoded into a typed value, range-checked under the chosen
/// overflow policy and printed with its tag name and formatted text.
#[derive(Parser, Debug, Clone)]
#[command(name = "exif-dump")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Files to read.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    // =========================================================================
    // Decoding Configuration
    // =========================================================================
    /// Overflow policy for out-of-range values (strict, lenient).
    ///
    /// Strict rejects an entry whose value does not fit its format; lenient
    /// keeps it and logs a warning.
    #[arg(long, default_value = "strict", env = "EXIF_POLICY")]
    pub policy: OverflowPolicy,

    /// Directories to include (comma-separated: ifd0, ifd1, exif, gps, interop).
    ///
    /// If not specified, all directories are included.
    #[arg(long, env = "EXIF_DIRECTORIES", value_delimiter = ',')]
    pub directories: Option<Vec<DirectoryKind>>,

    // =========================================================================
    // Output Configuration
    // =========================================================================
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json, env = "EXIF_OUTPUT")]
    pub output: OutputFormat,

    /// Render entry text in brief form.
    #[arg(long, default_value_t = false, env = "EXIF_BRIEF")]
    pub brief: bool,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.paths.is_empty() {
            return Err("At least one file path is required".to_string());
        }

        if let Some(path) = self.paths.iter().find(|path| path.as_os_str().is_empty()) {
            return Err(format!("Invalid empty file path: {:?}", path));
        }

        if let Some(directories) = &self.directories {
            if directories.is_empty() {
                return Err(
                    "Directory filter is empty. Omit --directories or EXIF_DIRECTORIES to include all"
                        .to_string(),
                );
            }
        }

        Ok(())
    }

    /// Options for [`crate::dump`] derived from this configuration.
    pub fn dump_options(&self) -> DumpOptions {
        DumpOptions {
            policy: self.policy,
            brief: self.brief,
            directories: self.directories.clone(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
