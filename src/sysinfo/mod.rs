//! Remote system lookups.

pub mod edsm;
pub mod model;

pub use edsm::{CurlFetch, DEFAULT_BASE_URL, EdsmClient, HttpFetch};
pub use model::{
    Body, MaterialShare, SystemInfo, SystemInfoService, ValuableBody, ValueInfo, short_body_name,
};
