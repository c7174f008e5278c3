#![forbid(unsafe_code)]

//! EDx52 display: Elite Dangerous journal data on the Saitek X52 Pro MFD.
//!
//! The pipeline, once per refresh tick:
//! 1. **Tail** the newest `Journal.*.log` and decode new lines into events
//! 2. **Fold** events into the carried [`journal::JournalState`]
//! 3. **Render** fixed-width pages from state, cargo and EDSM lookups
//! 4. **Publish** through a diff gate that only writes changed content
//!
//! # Library usage
//!
//! ```rust,no_run
//! use edx52_display::prelude::*;
//! ```
//!
//! Individual modules can also be imported directly:
//!
//! ```rust,no_run
//! use edx52_display::core::config::Config;
//! use edx52_display::layout::space_between;
//! ```

pub mod prelude;

pub mod cargo;
pub mod core;
pub mod daemon;
pub mod display;
pub mod journal;
pub mod layout;
pub mod logger;
pub mod render;
pub mod sysinfo;
