//! Logging infrastructure.
//!
//! Structured logging using the `log` facade and `env_logger` backend.
//! Log levels are determined by (in priority order):
//!
//! 1. `RUST_LOG` environment variable (if set)
//! 2. CLI flags: `--quiet` (error only) or `-v`/`-vv` (debug/trace)
//! 3. Default: warn level, so normal runs stay clean for the table output

use std::env;
use std::io::Write;

use env_logger::Builder;
use log::LevelFilter;

/// Initialize the logging subsystem based on CLI verbosity flags.
///
/// Call once at startup, before any logging happens.
///
/// # Arguments
///
/// * `verbose` - Verbosity count from CLI (0=warn, 1=debug, 2+=trace)
/// * `quiet` - If true, only show errors (overridden by `RUST_LOG`)
///
/// # Panics
///
/// Panics if called more than once; `env_logger` can only be installed
/// once per process.
pub fn init_logging(verbose: u8, quiet: bool) {
    let mut builder = Builder::new();

    if env::var("RUST_LOG").is_ok() {
        builder.parse_default_env();
    } else {
        builder.filter_level(determine_level(verbose, quiet));
    }

    builder.format(|buf, record| {
        let level = record.level();
        let level_style = buf.default_level_style(level);
        writeln!(
            buf,
            "{level_style}{:<5}{level_style:#} {}",
            level,
            record.args()
        )
    });

    builder.init();
}

/// Determine the log level from CLI flags.
fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
