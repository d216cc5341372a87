//! Progress reporting utilities using indicatif.
//!
//! The core reports through the [`ProgressCallback`] trait so it never
//! depends on a display library; [`Progress`] is the indicatif-backed
//! implementation used by the CLI.

use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress callback for the duplicate-finding phases.
///
/// Implement this trait to receive progress updates while the finder
/// walks and scans.
pub trait ProgressCallback: Send + Sync {
    /// Called when a phase starts.
    ///
    /// # Arguments
    ///
    /// * `phase` - Name of the phase (`"walking"` or `"scanning"`)
    /// * `total` - Total number of items, or 0 when unknown
    fn on_phase_start(&self, phase: &str, total: usize);

    /// Called for each item processed.
    ///
    /// # Arguments
    ///
    /// * `current` - Current item number (1-based)
    /// * `path` - Path being processed
    fn on_progress(&self, current: usize, path: &str);

    /// Called when a phase completes.
    fn on_phase_end(&self, phase: &str);
}

/// No-op callback for callers that don't want progress output.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn on_phase_start(&self, _phase: &str, _total: usize) {}
    fn on_progress(&self, _current: usize, _path: &str) {}
    fn on_phase_end(&self, _phase: &str) {}
}

/// Progress reporter using indicatif.
///
/// Shows a spinner while the walk counts files and a bar while
/// candidates are verified and hashed.
pub struct Progress {
    walking: Mutex<Option<ProgressBar>>,
    scanning: Mutex<Option<ProgressBar>>,
    quiet: bool,
}

impl Progress {
    /// Create a new progress reporter.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, no progress bars will be displayed.
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            walking: Mutex::new(None),
            scanning: Mutex::new(None),
            quiet,
        }
    }

    fn walking_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed_precise}] {pos} files")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
    }

    fn scanning_style() -> ProgressStyle {
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█>-")
    }
}

impl ProgressCallback for Progress {
    fn on_phase_start(&self, phase: &str, total: usize) {
        if self.quiet {
            return;
        }

        match phase {
            "walking" => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(Self::walking_style());
                pb.set_message("Getting file count");
                pb.enable_steady_tick(Duration::from_millis(100));
                *self.walking.lock().unwrap() = Some(pb);
            }
            "scanning" => {
                let pb = ProgressBar::new(total as u64);
                pb.set_style(Self::scanning_style());
                pb.set_message("Processing");
                *self.scanning.lock().unwrap() = Some(pb);
            }
            _ => {}
        }
    }

    fn on_progress(&self, current: usize, path: &str) {
        if self.quiet {
            return;
        }

        if let Some(ref pb) = *self.scanning.lock().unwrap() {
            pb.set_position(current as u64);
            pb.set_message(truncate_path(path, 30));
        } else if let Some(ref pb) = *self.walking.lock().unwrap() {
            pb.set_position(current as u64);
        }
    }

    fn on_phase_end(&self, phase: &str) {
        if self.quiet {
            return;
        }

        match phase {
            "walking" => {
                if let Some(pb) = self.walking.lock().unwrap().take() {
                    pb.finish_and_clear();
                }
            }
            "scanning" => {
                if let Some(pb) = self.scanning.lock().unwrap().take() {
                    pb.finish_with_message("Processing complete");
                }
            }
            _ => {}
        }
    }
}

/// Truncate a path for display in the progress bar.
fn truncate_path(path: &str, max_len: usize) -> String {
    if path.len() <= max_len {
        return path.to_string();
    }

    let file_name = std::path::Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    if file_name.len() >= max_len {
        return format!("...{}", &file_name[file_name.len() - max_len + 3..]);
    }

    format!(".../{}", file_name)
}
