//! System and body data as served by EDSM, plus the lookup service seam.

#![allow(missing_docs)]

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::core::errors::Result;

/// Bodies known for one star system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SystemInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub id64: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub body_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub bodies: Vec<Body>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Body {
    #[serde(deserialize_with = "null_as_default")]
    pub body_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub body_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sub_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_main_star: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_scoopable: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_landable: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub gravity: f64,
    /// Material name to percentage of the surface composition.
    #[serde(deserialize_with = "null_as_default")]
    pub materials: BTreeMap<String, f64>,
}

/// EDSM sends `null` for fields it has no value for; treat those like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One material on a body, for display.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialShare {
    pub name: String,
    pub percentage: f64,
}

impl Body {
    /// Materials by descending percentage, name ascending on ties.
    #[must_use]
    pub fn materials_sorted(&self) -> Vec<MaterialShare> {
        let mut shares: Vec<MaterialShare> = self
            .materials
            .iter()
            .map(|(name, pct)| MaterialShare {
                name: name.clone(),
                percentage: *pct,
            })
            .collect();
        shares.sort_by(|a, b| {
            b.percentage
                .partial_cmp(&a.percentage)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });
        shares
    }

    #[must_use]
    pub fn short_name<'a>(&'a self, system_name: &str) -> &'a str {
        short_body_name(&self.name, system_name)
    }
}

impl SystemInfo {
    /// The primary star, if EDSM knows it.
    #[must_use]
    pub fn main_star(&self) -> Option<&Body> {
        self.bodies.iter().find(|body| body.is_main_star)
    }

    #[must_use]
    pub fn body_by_id(&self, body_id: i64) -> Option<&Body> {
        self.bodies.iter().find(|body| body.body_id == body_id)
    }

    pub fn landable_bodies(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(|body| body.is_landable)
    }
}

/// Estimated exploration payouts for a system.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValueInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub id64: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub estimated_value: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub estimated_value_mapped: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub valuable_bodies: Vec<ValuableBody>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValuableBody {
    #[serde(deserialize_with = "null_as_default")]
    pub body_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub body_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub value_max: i64,
}

impl ValuableBody {
    #[must_use]
    pub fn short_name<'a>(&'a self, system_name: &str) -> &'a str {
        short_body_name(&self.body_name, system_name)
    }
}

/// Strip the owning system's name from a body name: `"Sol 3"` in `"Sol"` is `"3"`.
///
/// Bodies with their own names (not prefixed by the system) are returned whole.
#[must_use]
pub fn short_body_name<'a>(body_name: &'a str, system_name: &str) -> &'a str {
    if system_name.is_empty() {
        return body_name;
    }
    match body_name.strip_prefix(system_name) {
        Some(rest) if rest.starts_with(' ') => rest.trim_start(),
        _ => body_name,
    }
}

/// Remote provider of system and value data.
///
/// Implementations may block. Callers make at most one attempt per render.
pub trait SystemInfoService: Send + Sync {
    /// Bodies for the system with the given 64-bit address.
    fn fetch_bodies(&self, system_id: i64) -> Result<SystemInfo>;
    /// Exploration value estimates for the system.
    fn fetch_value(&self, system_id: i64) -> Result<ValueInfo>;
    /// Drop any cached answers. Uncached services have nothing to do.
    fn clear_cache(&self) {}
}
