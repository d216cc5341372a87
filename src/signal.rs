//! Signal handling for graceful shutdown.
//!
//! Centralized Ctrl+C handling: an `AtomicBool` flag shared with the
//! finder signals when shutdown has been requested. The finder checks
//! the flag between files and aborts with no partial output; the
//! process then exits with code 130 (128 + SIGINT).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shutdown coordinator wrapping a shared atomic flag.
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandler {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandler {
    /// Create a new handler with the flag initially unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if shutdown has been requested.
    #[must_use]
    pub fn is_shutdown_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Manually request a shutdown.
    pub fn request_shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Get a clone of the flag for passing to the finder.
    #[must_use]
    pub fn get_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }
}

/// Install a Ctrl+C handler and return the connected [`ShutdownHandler`].
///
/// # Errors
///
/// Returns an error if a handler is already installed for this process.
pub fn install_handler() -> Result<ShutdownHandler, ctrlc::Error> {
    let handler = ShutdownHandler::new();
    let flag = handler.get_flag();

    ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
        eprintln!("\nInterrupted. Cleaning up...");
    })?;

    Ok(handler)
}
