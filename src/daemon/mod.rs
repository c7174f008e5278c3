//! Daemon subsystem: the update-cycle service, its runner thread, and signal handling.

pub mod service;
#[cfg(feature = "daemon")]
pub mod signals;
