//! sigdupe - Duplicate File Finder with Signature Verification
//!
//! A CLI application for finding duplicate files of a given extension by
//! content hash (SHA-256), validating each candidate's true type via
//! magic-byte signature inspection before hashing.

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;
pub mod signal;
pub mod signature;

use std::sync::Arc;

use anyhow::Context;

use crate::cli::Cli;
use crate::config::Config;
use crate::duplicates::{DuplicateFinder, FinderConfig, FinderError};
use crate::error::ExitCode;
use crate::output::{table, CsvExport};
use crate::progress::Progress;
use crate::signature::{normalize_extension, SignatureCatalog};

/// Run the application with parsed CLI arguments.
///
/// Maps every run outcome to an [`ExitCode`]; only unexpected failures
/// propagate as errors for the binary to report.
///
/// # Errors
///
/// Returns an error for failures outside the normal outcome taxonomy:
/// a malformed embedded catalog, a failed CSV export write, or a fatal
/// hashing error.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    let config = Config::load();
    if cli.no_color || !config.color {
        yansi::disable();
    }

    let catalog = SignatureCatalog::load().context("failed to load the signature catalog")?;

    if cli.list_extensions {
        table::print_supported_extensions(&catalog.known_extensions());
        return Ok(ExitCode::Success);
    }

    // Clap guarantees these are present when --list-extensions is absent.
    let (Some(directory), Some(extension)) = (cli.directory, cli.extension) else {
        anyhow::bail!("directory and extension are required");
    };
    let extension = normalize_extension(&extension);

    if !cli.quiet {
        table::print_banner();
    }

    let shutdown = signal::install_handler().context("failed to install Ctrl+C handler")?;
    let progress = Arc::new(Progress::new(cli.quiet));
    let finder = DuplicateFinder::new(
        catalog,
        FinderConfig::default()
            .with_shutdown_flag(shutdown.get_flag())
            .with_progress_callback(progress),
    );

    match finder.run(&directory, &extension) {
        Ok(report) => {
            if !cli.quiet {
                table::render_report(&report, &extension);
            }
            if cli.export {
                let path = cli.export_path.unwrap_or_else(|| config.export_path.clone());
                CsvExport::new(&report)
                    .write_to_path(&path)
                    .with_context(|| format!("failed to write CSV export to {}", path.display()))?;
                if !cli.quiet {
                    table::print_export_note(&path);
                }
            }
            Ok(ExitCode::Success)
        }
        Err(FinderError::UnknownExtension {
            extension,
            supported,
            suggestion,
        }) => {
            table::print_unknown_extension(&extension, &supported, suggestion.as_deref());
            Ok(ExitCode::UnknownExtension)
        }
        Err(FinderError::Interrupted) => Ok(ExitCode::Interrupted),
        Err(e) => Err(e.into()),
    }
}
