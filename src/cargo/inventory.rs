//! `Cargo.json` snapshot loading.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cargo::names::NameLookupTable;

/// Name of the cargo document inside the journal folder.
pub const CARGO_FILE: &str = "Cargo.json";

/// One commodity stack in the hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CargoLine {
    /// Commodity symbol, e.g. `drones` or `lowtemperaturediamond`.
    #[serde(rename = "Name")]
    pub name: String,
    /// Units carried.
    #[serde(rename = "Count")]
    pub count: i64,
    /// Units flagged as stolen.
    #[serde(rename = "Stolen")]
    pub stolen: i64,
    /// In-game display name, when the game supplies one.
    #[serde(rename = "Name_Localised", skip_serializing_if = "Option::is_none")]
    pub name_localised: Option<String>,
}

impl CargoLine {
    /// Display name: lookup table first, then the localised name, then the raw symbol.
    #[must_use]
    pub fn display_name<'a>(&'a self, names: &'a NameLookupTable) -> &'a str {
        names
            .lookup(&self.name)
            .or(self.name_localised.as_deref().filter(|name| !name.is_empty()))
            .unwrap_or(self.name.as_str())
    }
}

/// Parsed cargo document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CargoSnapshot {
    /// Total units in the hold.
    #[serde(rename = "Count")]
    pub count: i64,
    /// Stacks in the order the game listed them.
    #[serde(rename = "Inventory")]
    pub inventory: Vec<CargoLine>,
}

/// Outcome of reading the cargo document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CargoRead {
    /// The document does not exist: there is no cargo data.
    Missing,
    /// The document was read and parsed.
    Loaded(CargoSnapshot),
    /// The document could not be read or parsed this time; keep what we had.
    Unavailable,
}

/// Read and parse `path`.
#[must_use]
pub fn read_cargo(path: &Path) -> CargoRead {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no cargo file");
            return CargoRead::Missing;
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "cannot read cargo file");
            return CargoRead::Unavailable;
        }
    };
    match serde_json::from_slice::<CargoSnapshot>(&data) {
        Ok(snapshot) => CargoRead::Loaded(snapshot),
        Err(err) => {
            debug!(path = %path.display(), error = %err, "cargo file not parseable yet");
            CargoRead::Unavailable
        }
    }
}

/// Apply a read to the carried snapshot. `None` means no cargo data has loaded.
pub fn update_snapshot(current: &mut Option<CargoSnapshot>, read: CargoRead) {
    match read {
        CargoRead::Missing => *current = None,
        CargoRead::Loaded(snapshot) => *current = Some(snapshot),
        CargoRead::Unavailable => {}
    }
}
