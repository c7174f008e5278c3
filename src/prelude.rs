//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use edx52_display::prelude::*;
//! ```

// Core
pub use crate::core::config::Config;
pub use crate::core::errors::{EdxError, Result};

// Journal
pub use crate::journal::{JournalEvent, JournalState, JournalTailer, LocationType, StatusTailer};

// Cargo
pub use crate::cargo::{CargoSnapshot, NameLookupTable};

// Rendering
pub use crate::layout::{PAGE_WIDTH, center, fill_between, space_between};
pub use crate::render::{PageKind, RenderContext, render_display};
pub use crate::sysinfo::{EdsmClient, SystemInfoService};

// Display
pub use crate::display::{DiffGate, Display, DisplayDevice, JsonFileDevice, Page, Published};

// Service
pub use crate::daemon::service::{DisplayService, ServiceDeps, ServiceHandle, ServiceOptions};
