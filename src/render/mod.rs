//! Turns journal state, cargo and remote lookups into MFD pages.

pub mod layouts;
pub mod pages;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cargo::{CargoSnapshot, NameLookupTable};
use crate::core::errors::EdxError;
use crate::display::page::{Display, Page};
use crate::journal::state::JournalState;
use crate::sysinfo::SystemInfoService;

pub use layouts::{LOOKUP_ERROR, NO_EDSM_DATA};
pub use pages::{
    BANNER, CARGO_HOLD_EMPTY, NO_CARGO_DATA, NO_DESTINATION, cargo_page, destination_page,
    location_page,
};

/// A logical MFD page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    /// Splash, arrival, local target or next jump.
    Destination,
    /// Current system or body.
    Location,
    /// Hold contents.
    Cargo,
}

impl PageKind {
    /// Every page, in the default order.
    pub const ALL: [Self; 3] = [Self::Destination, Self::Location, Self::Cargo];

    /// Config spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Destination => "destination",
            Self::Location => "location",
            Self::Cargo => "cargo",
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageKind {
    type Err = EdxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EdxError::InvalidConfig {
                details: format!("unknown page {s:?} (expected destination, location or cargo)"),
            })
    }
}

/// Everything a page renderer reads. Borrowed for the length of one render.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    /// Folded journal state.
    pub state: &'a JournalState,
    /// Last loaded cargo document, `None` if none has loaded.
    pub cargo: Option<&'a CargoSnapshot>,
    /// Commodity display names.
    pub names: &'a NameLookupTable,
    /// Remote system data; calls may block.
    pub sysinfo: &'a dyn SystemInfoService,
}

/// Render one page.
pub fn render_page(kind: PageKind, ctx: &RenderContext<'_>) -> Page {
    match kind {
        PageKind::Destination => destination_page(ctx),
        PageKind::Location => location_page(ctx),
        PageKind::Cargo => cargo_page(ctx),
    }
}

/// Render every enabled page, in order.
pub fn render_display(kinds: &[PageKind], ctx: &RenderContext<'_>) -> Display {
    Display {
        pages: kinds.iter().map(|kind| render_page(*kind, ctx)).collect(),
    }
}
