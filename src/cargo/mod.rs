//! Cargo hold snapshot and commodity naming.

pub mod inventory;
pub mod names;

pub use inventory::{CARGO_FILE, CargoLine, CargoRead, CargoSnapshot, read_cargo, update_snapshot};
pub use names::NameLookupTable;
