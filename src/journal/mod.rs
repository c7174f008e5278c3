//! Journal side of the pipeline: tailing, decoding, and state folding.

pub mod events;
pub mod state;
pub mod status;
pub mod tailer;

pub use events::{JournalEvent, LocationFix, decode};
pub use state::{Destination, FsdTarget, JournalState, Location, LocationType, reduce};
pub use status::{STATUS_FILE, StatusTailer};
pub use tailer::{FileIdentity, JournalTailer, TailCursor};
