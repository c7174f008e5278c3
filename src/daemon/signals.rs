//! OS signals for the `run` loop: SIGTERM/SIGINT stop the service, SIGHUP
//! drops cached lookups and forces a display rewrite.
//!
//! The run loop polls the flags; nothing blocks on signal delivery.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use signal_hook::consts::{SIGINT, SIGTERM};
use tracing::warn;

/// Signal flags shared between the OS handlers and the run loop.
#[derive(Clone, Default)]
pub struct SignalHandler {
    shutdown_flag: Arc<AtomicBool>,
    refresh_flag: Arc<AtomicBool>,
}

impl SignalHandler {
    /// Create a handler and register the OS hooks.
    ///
    /// Registration failures are logged and otherwise ignored.
    pub fn new() -> Self {
        let handler = Self::unregistered();
        handler.register_signals();
        handler
    }

    /// Flags only, with no OS hooks attached.
    pub fn unregistered() -> Self {
        Self::default()
    }

    /// Whether a stop has been requested. Stays set once raised.
    pub fn should_shutdown(&self) -> bool {
        self.shutdown_flag.load(Ordering::Relaxed)
    }

    /// Check and clear a pending refresh request.
    pub fn should_refresh(&self) -> bool {
        self.refresh_flag.swap(false, Ordering::Relaxed)
    }

    /// Ask the run loop to stop.
    pub fn request_shutdown(&self) {
        self.shutdown_flag.store(true, Ordering::Relaxed);
    }

    /// Ask the run loop to refresh as if SIGHUP arrived.
    pub fn request_refresh(&self) {
        self.refresh_flag.store(true, Ordering::Relaxed);
    }

    fn register_signals(&self) {
        for (name, signal) in [("SIGTERM", SIGTERM), ("SIGINT", SIGINT)] {
            if let Err(e) = signal_hook::flag::register(signal, Arc::clone(&self.shutdown_flag)) {
                warn!(signal = name, error = %e, "failed to register signal");
            }
        }

        #[cfg(unix)]
        {
            use signal_hook::consts::SIGHUP;
            if let Err(e) = signal_hook::flag::register(SIGHUP, Arc::clone(&self.refresh_flag)) {
                warn!(signal = "SIGHUP", error = %e, "failed to register signal");
            }
        }
    }
}
