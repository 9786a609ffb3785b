//! exif-dump - Describe the Exif entries of TIFF and JPEG files.
//!
//! This binary reads each file given on the command line and prints one
//! record per file. A file that cannot be read is reported and the batch
//! continues.

use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use exif_entry::{
    config::{Config, OutputFormat},
    dump::{dump_file, render_json, render_text, DumpRecord},
};

fn main() -> ExitCode {
    let config = Config::parse();

    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    debug!(
        files = config.paths.len(),
        policy = %config.policy,
        brief = config.brief,
        "Starting dump"
    );

    let options = config.dump_options();
    let records: Vec<DumpRecord> = config
        .paths
        .iter()
        .map(|path| dump_file(path, &options))
        .collect();

    match config.output {
        OutputFormat::Json => match render_json(&records) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to serialize output: {}", e);
                return ExitCode::FAILURE;
            }
        },
        OutputFormat::Text => {
            for record in &records {
                print!("{}", render_text(record));
            }
        }
    }

    if records.iter().any(DumpRecord::is_error) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Logs go to stderr so the dump on stdout stays machine-readable.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "exif_entry=debug,exif_dump=debug"
    } else {
        "exif_entry=warn,exif_dump=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
