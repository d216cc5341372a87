//! sigdupe - Duplicate File Finder with Signature Verification
//!
//! Entry point for the sigdupe CLI application.

use clap::Parser;
use sigdupe::{cli::Cli, error::ExitCode};

fn main() {
    let cli = Cli::parse();

    match sigdupe::run_app(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(ExitCode::GeneralError.as_i32());
        }
    }
}
