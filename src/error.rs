//! Exit codes for the application.

/// Process exit codes.
///
/// - 0: Success (completed normally, with or without duplicates)
/// - 1: General error (unexpected failure)
/// - 2: Unsupported extension (aborted before scanning)
/// - 130: Interrupted by user (Ctrl+C)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Scan completed normally.
    Success = 0,
    /// An unexpected error occurred.
    GeneralError = 1,
    /// The requested extension has no signature rule.
    UnknownExtension = 2,
    /// The run was interrupted by the user.
    Interrupted = 130,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}
