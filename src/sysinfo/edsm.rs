//! EDSM system lookups over a `curl` subprocess, cached per system.

use std::collections::HashMap;
use std::process::Command;

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::core::errors::{EdxError, Result};
use crate::sysinfo::model::{SystemInfo, SystemInfoService, ValueInfo};

/// Public EDSM endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.edsm.net";

/// Fetches a URL and returns the response body.
pub trait HttpFetch: Send + Sync {
    /// GET `url`; the error is a human-readable reason.
    fn get(&self, url: &str) -> std::result::Result<String, String>;
}

/// [`HttpFetch`] that shells out to `curl`.
#[derive(Debug, Clone)]
pub struct CurlFetch {
    timeout_secs: u64,
}

impl CurlFetch {
    /// Transport passing `timeout_secs` as `--max-time`.
    #[must_use]
    pub const fn new(timeout_secs: u64) -> Self {
        Self { timeout_secs }
    }
}

impl HttpFetch for CurlFetch {
    fn get(&self, url: &str) -> std::result::Result<String, String> {
        let output = Command::new("curl")
            .args(["-fsSL", "-H", "Accept: application/json", "--max-time"])
            .arg(self.timeout_secs.to_string())
            .arg(url)
            .output()
            .map_err(|e| format!("curl not found or failed: {e}"))?;

        if !output.status.success() {
            return Err(format!("request failed (status {})", output.status));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// EDSM-backed [`SystemInfoService`].
///
/// Successful answers are kept until [`SystemInfoService::clear_cache`]; failures are
/// never cached so the next render tries again.
pub struct EdsmClient {
    base_url: String,
    fetch: Box<dyn HttpFetch>,
    bodies: Mutex<HashMap<i64, SystemInfo>>,
    values: Mutex<HashMap<i64, ValueInfo>>,
}

impl EdsmClient {
    /// Client using `curl` with the given request timeout.
    #[must_use]
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        Self::with_fetch(base_url, Box::new(CurlFetch::new(timeout_secs)))
    }

    /// Client with a custom transport.
    #[must_use]
    pub fn with_fetch(base_url: &str, fetch: Box<dyn HttpFetch>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            fetch,
            bodies: Mutex::new(HashMap::new()),
            values: Mutex::new(HashMap::new()),
        }
    }

    /// Number of systems with cached body data.
    #[must_use]
    pub fn cached_systems(&self) -> usize {
        self.bodies.lock().len()
    }

    fn endpoint(&self, api: &str, system_id: i64) -> String {
        format!("{}/api-system-v1/{api}?systemId64={system_id}", self.base_url)
    }

    fn request<T: DeserializeOwned>(&self, api: &str, system_id: i64) -> Result<T> {
        let url = self.endpoint(api, system_id);
        debug!(%url, "edsm request");
        let body = self
            .fetch
            .get(&url)
            .map_err(|details| EdxError::Lookup { system_id, details })?;

        // EDSM answers unknown systems with `[]` or `{}`.
        if body.trim() == "[]" {
            return Err(EdxError::NoSystemData { system_id });
        }
        serde_json::from_str(&body).map_err(|e| EdxError::Lookup {
            system_id,
            details: format!("unparseable {api} response: {e}"),
        })
    }
}

impl SystemInfoService for EdsmClient {
    fn fetch_bodies(&self, system_id: i64) -> Result<SystemInfo> {
        if let Some(hit) = self.bodies.lock().get(&system_id) {
            return Ok(hit.clone());
        }
        let sys: SystemInfo = self.request("bodies", system_id)?;
        if sys.id64 == 0 {
            return Err(EdxError::NoSystemData { system_id });
        }
        self.bodies.lock().insert(system_id, sys.clone());
        Ok(sys)
    }

    fn fetch_value(&self, system_id: i64) -> Result<ValueInfo> {
        if let Some(hit) = self.values.lock().get(&system_id) {
            return Ok(hit.clone());
        }
        let value: ValueInfo = self.request("estimated-value", system_id)?;
        if value.id64 == 0 {
            return Err(EdxError::NoSystemData { system_id });
        }
        self.values.lock().insert(system_id, value.clone());
        Ok(value)
    }

    fn clear_cache(&self) {
        self.bodies.lock().clear();
        self.values.lock().clear();
    }
}
