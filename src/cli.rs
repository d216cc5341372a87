//! Command-line interface definitions.
//!
//! All CLI arguments are defined here using the clap derive API.
//!
//! # Example
//!
//! ```bash
//! # Scan ~/Downloads for duplicate PDFs, console table output
//! sigdupe ~/Downloads pdf
//!
//! # Also export the matches to CSV
//! sigdupe ~/Downloads pdf --export
//!
//! # Export to a specific file
//! sigdupe ~/Downloads pdf --export --export-path /tmp/dupes.csv
//!
//! # Show every extension the signature catalog knows about
//! sigdupe --list-extensions
//! ```

use std::path::PathBuf;

use clap::Parser;

/// Duplicate file finder with magic-byte signature verification.
///
/// Walks a directory tree, confirms that each candidate file's magic
/// bytes match its claimed extension, hashes verified files with
/// SHA-256, and reports groups of identical content.
#[derive(Debug, Parser)]
#[command(name = "sigdupe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory path to scan
    #[arg(value_name = "DIR", required_unless_present = "list_extensions")]
    pub directory: Option<PathBuf>,

    /// File extension to scan for (without leading dot)
    #[arg(value_name = "EXT", required_unless_present = "list_extensions")]
    pub extension: Option<String>,

    /// Export duplicate matches to CSV in addition to the console table
    #[arg(short, long)]
    pub export: bool,

    /// Where the CSV export is written (defaults to the configured path)
    #[arg(long, value_name = "PATH", requires = "export")]
    pub export_path: Option<PathBuf>,

    /// List the supported extensions and exit
    #[arg(long)]
    pub list_extensions: bool,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the banner, progress, and table output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,
}
