//! Display buffers, the diff gate, and device sinks.

pub mod device;
pub mod gate;
pub mod page;

pub use device::{DisplayDevice, JsonFileDevice, TextDevice};
pub use gate::{DiffGate, Published};
pub use page::{Display, Page};
