//! Console rendering for scan results.
//!
//! Presentation glue over a finished [`DuplicateReport`]: the startup
//! banner, the duplicates table, the summary line, and the mismatch
//! listing. Colors come from yansi and honor the global disable switch.

use std::path::Path;

use yansi::Paint;

use crate::duplicates::DuplicateReport;

const SEPARATOR_WIDTH: usize = 70;

/// Print the startup banner.
pub fn print_banner() {
    let banner = r"
       _           __
  ___ (_)__ _____/ /_ _____  ___
 (_-</ / _ `/ _  / // / _ \/ -_)
/___/_/\_, /\_,_/\_,_/ .__/\__/
      /___/         /_/
";
    println!("{}", banner.cyan());
}

/// Render the duplicates table, summary counts, and any mismatches.
pub fn render_report(report: &DuplicateReport, extension: &str) {
    if report.has_duplicates() {
        print!("{}", format_groups_table(report));
    } else {
        println!("\nNo duplicates found.");
    }

    let found = "✔".green();
    println!(
        "{} Unique file hashes: {} of {}",
        found, report.summary.unique_digests, report.summary.hashed_files
    );

    if !report.mismatches.is_empty() {
        let invalid = "✖".red();
        println!(
            "\n{} Unable to validate the file signature for the following '{}' files:",
            invalid, extension
        );
        println!("{}", "-".repeat(SEPARATOR_WIDTH).bright_blue());
        for (num, path) in report.mismatches.iter().enumerate() {
            println!("  [{}] {}", num + 1, path.display());
        }
    }
}

/// Print a note pointing at the written CSV export.
pub fn print_export_note(path: &Path) {
    println!(
        "{} Duplicate matches written to: {}",
        "✔".green(),
        path.display()
    );
}

/// Report an unknown extension along with everything the catalog
/// supports and, when one is close, a likely correction.
pub fn print_unknown_extension(extension: &str, supported: &[String], suggestion: Option<&str>) {
    eprintln!(
        "{} Unsupported file extension '{}'. Use only supported file extensions.",
        "✖".red(),
        extension
    );
    if let Some(suggestion) = suggestion {
        eprintln!("  Did you mean '{}'?", suggestion.green());
    }
    eprintln!("\nSupported extensions:");
    for line in wrap_list(supported, 60) {
        eprintln!("  {line}");
    }
}

/// Print the supported-extension listing for `--list-extensions`.
pub fn print_supported_extensions(supported: &[String]) {
    println!("Supported extensions:");
    for line in wrap_list(supported, 60) {
        println!("  {line}");
    }
}

/// Two-column table of duplicate files and their shared digests.
///
/// Groups are sorted by digest and paths within a group are sorted, so
/// the rendering is stable for a static tree; grouped rows stay
/// contiguous.
fn format_groups_table(report: &DuplicateReport) -> String {
    let groups = report.sorted_groups();

    let file_width = groups
        .iter()
        .flat_map(|g| g.paths.iter())
        .map(|p| p.to_string_lossy().chars().count())
        .max()
        .unwrap_or(0)
        .max("File".len());

    let mut out = String::new();
    out.push_str(&format!("\n{}\n", "Duplicates".bold()));
    out.push_str(&format!(
        "{}  {}\n",
        format!("{:<file_width$}", "File").cyan(),
        "Hash".magenta()
    ));
    out.push_str(&format!("{}  {}\n", "-".repeat(file_width), "-".repeat(64)));

    for group in &groups {
        let hash = group.digest_hex();
        for path in &group.paths {
            out.push_str(&format!(
                "{:<file_width$}  {}\n",
                path.to_string_lossy(),
                hash
            ));
        }
    }

    out
}

/// Wrap a list of short words into lines no wider than `width`.
fn wrap_list(items: &[String], width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for item in items {
        if !current.is_empty() && current.len() + item.len() + 2 > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push_str(", ");
        }
        current.push_str(item);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
}
