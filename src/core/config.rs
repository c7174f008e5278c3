//! Configuration system: TOML file + env var overrides + defaults.

#![allow(missing_docs)]

use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::errors::{EdxError, Result};
use crate::core::paths::expand_path;
use crate::render::PageKind;
use crate::sysinfo::DEFAULT_BASE_URL;

/// Accepted values for `logging.level`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

const MIN_REFRESH_INTERVAL_MS: u64 = 50;

/// Full configuration model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Config {
    pub journal: JournalConfig,
    pub display: DisplayConfig,
    pub names: NamesConfig,
    pub edsm: EdsmConfig,
    pub logging: LoggingConfig,
}

/// Where the game writes its journal and how often to look.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct JournalConfig {
    /// Journal folder; `~`, `$VAR`, `${VAR}` and `%VAR%` are expanded.
    pub folder: String,
    pub refresh_interval_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Enabled pages in MFD order.
    pub pages: Vec<PageKind>,
    /// JSON document picked up by the MFD bridge.
    pub output_file: String,
    /// How long the splash screen stays on the destination page after startup.
    pub splash_duration_ms: u64,
}

/// Commodity name reference tables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NamesConfig {
    pub commodity_file: String,
    pub rare_commodity_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EdsmConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Log file; empty logs to stderr.
    pub file: String,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            folder: "%USERPROFILE%/Saved Games/Frontier Developments/Elite Dangerous".to_string(),
            refresh_interval_ms: 1000,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            pages: PageKind::ALL.to_vec(),
            output_file: "~/.local/share/edx52-display/mfd.json".to_string(),
            splash_duration_ms: 3000,
        }
    }
}

impl Default for NamesConfig {
    fn default() -> Self {
        Self {
            commodity_file: "names/commodity.csv".to_string(),
            rare_commodity_file: "names/rare_commodity.csv".to_string(),
        }
    }
}

impl Default for EdsmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: String::new(),
        }
    }
}

impl JournalConfig {
    #[must_use]
    pub fn folder_path(&self) -> PathBuf {
        expand_path(&self.folder)
    }

    #[must_use]
    pub const fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }
}

impl DisplayConfig {
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        expand_path(&self.output_file)
    }

    #[must_use]
    pub const fn splash_duration(&self) -> Duration {
        Duration::from_millis(self.splash_duration_ms)
    }
}

impl NamesConfig {
    #[must_use]
    pub fn commodity_path(&self) -> PathBuf {
        expand_path(&self.commodity_file)
    }

    #[must_use]
    pub fn rare_commodity_path(&self) -> PathBuf {
        expand_path(&self.rare_commodity_file)
    }
}

impl LoggingConfig {
    #[must_use]
    pub fn file_path(&self) -> Option<PathBuf> {
        let trimmed = self.file.trim();
        (!trimmed.is_empty()).then(|| expand_path(trimmed))
    }
}

impl Config {
    /// Default configuration path.
    #[must_use]
    pub fn default_path() -> PathBuf {
        let home_dir = env::var_os("HOME").map_or_else(
            || {
                eprintln!("[EDX-CONFIG] WARNING: HOME not set, looking for config under /tmp");
                PathBuf::from("/tmp")
            },
            PathBuf::from,
        );
        home_dir
            .join(".config")
            .join("edx52-display")
            .join("config.toml")
    }

    /// Load config from default or explicit path, then apply env overrides.
    ///
    /// Missing config file is not an error when loading from default path; defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path_buf = path.map_or_else(Self::default_path, Path::to_path_buf);

        let mut cfg = if path_buf.exists() {
            let raw = fs::read_to_string(&path_buf).map_err(|e| EdxError::io(&path_buf, e))?;
            toml::from_str(&raw)?
        } else if path.is_some() {
            return Err(EdxError::MissingConfig { path: path_buf });
        } else {
            Self::default()
        };

        cfg.apply_env_overrides_from(env_var)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Deterministic hash of the effective config for the startup log line.
    ///
    /// FNV-1a over the canonical JSON form, stable across processes and releases.
    pub fn stable_hash(&self) -> Result<String> {
        let canonical = serde_json::to_string(self)?;
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in canonical.as_bytes() {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(0x0100_0000_01b3);
        }
        Ok(format!("{hash:016x}"))
    }

    /// Effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| EdxError::Serialization {
            context: "toml",
            details: e.to_string(),
        })
    }

    fn apply_env_overrides_from<F>(&mut self, mut lookup: F) -> Result<()>
    where
        F: FnMut(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("EDX_JOURNAL_FOLDER") {
            self.journal.folder = raw;
        }
        if let Some(raw) = lookup("EDX_JOURNAL_REFRESH_INTERVAL_MS") {
            self.journal.refresh_interval_ms =
                parse_env_u64("EDX_JOURNAL_REFRESH_INTERVAL_MS", &raw)?;
        }
        if let Some(raw) = lookup("EDX_DISPLAY_OUTPUT_FILE") {
            self.display.output_file = raw;
        }
        if let Some(raw) = lookup("EDX_DISPLAY_SPLASH_DURATION_MS") {
            self.display.splash_duration_ms =
                parse_env_u64("EDX_DISPLAY_SPLASH_DURATION_MS", &raw)?;
        }
        if let Some(raw) = lookup("EDX_EDSM_BASE_URL") {
            self.edsm.base_url = raw;
        }
        if let Some(raw) = lookup("EDX_EDSM_TIMEOUT_SECS") {
            self.edsm.timeout_secs = parse_env_u64("EDX_EDSM_TIMEOUT_SECS", &raw)?;
        }
        if let Some(raw) = lookup("EDX_LOGGING_LEVEL") {
            self.logging.level = raw.trim().to_ascii_lowercase();
        }
        if let Some(raw) = lookup("EDX_LOGGING_FILE") {
            self.logging.file = raw;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.journal.folder.trim().is_empty() {
            return Err(EdxError::InvalidConfig {
                details: "journal.folder must not be empty".to_string(),
            });
        }
        if self.journal.refresh_interval_ms < MIN_REFRESH_INTERVAL_MS {
            return Err(EdxError::InvalidConfig {
                details: format!(
                    "journal.refresh_interval_ms must be >= {MIN_REFRESH_INTERVAL_MS}, got {}",
                    self.journal.refresh_interval_ms
                ),
            });
        }

        if self.display.pages.is_empty() {
            return Err(EdxError::InvalidConfig {
                details: "display.pages must enable at least one page".to_string(),
            });
        }
        let mut seen = HashSet::new();
        for page in &self.display.pages {
            if !seen.insert(*page) {
                return Err(EdxError::InvalidConfig {
                    details: format!("display.pages lists {page} more than once"),
                });
            }
        }
        if self.display.output_file.trim().is_empty() {
            return Err(EdxError::InvalidConfig {
                details: "display.output_file must not be empty".to_string(),
            });
        }

        if self.edsm.timeout_secs == 0 {
            return Err(EdxError::InvalidConfig {
                details: "edsm.timeout_secs must be >= 1".to_string(),
            });
        }
        if !self.edsm.base_url.starts_with("http://") && !self.edsm.base_url.starts_with("https://")
        {
            return Err(EdxError::InvalidConfig {
                details: format!("edsm.base_url must be an http(s) URL, got {:?}", self.edsm.base_url),
            });
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(EdxError::InvalidConfig {
                details: format!(
                    "logging.level must be one of {}, got {:?}",
                    LOG_LEVELS.join("/"),
                    self.logging.level
                ),
            });
        }
        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|raw| !raw.trim().is_empty())
}

fn parse_env_u64(name: &str, raw: &str) -> Result<u64> {
    raw.trim().parse::<u64>().map_err(|error| EdxError::ConfigParse {
        context: "env",
        details: format!("{name}={raw:?}: {error}"),
    })
}

#[cfg(test)]
mod tests {
    use super::{Config, EdxError, PageKind};
    use std::collections::HashMap;
    use std::path::Path;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
            .collect()
    }

    #[test]
    fn default_config_is_valid() {
        let cfg = Config::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.display.pages, PageKind::ALL);
        assert_eq!(cfg.journal.refresh_interval_ms, 1000);
    }

    #[test]
    fn parses_full_toml_document() {
        let cfg: Config = toml::from_str(
            r#"
            [journal]
            folder = "/games/journal"
            refresh_interval_ms = 250

            [display]
            pages = ["cargo", "location"]
            output_file = "/tmp/mfd.json"

            [edsm]
            timeout_secs = 9

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.journal.folder_path(), Path::new("/games/journal"));
        assert_eq!(cfg.display.pages, [PageKind::Cargo, PageKind::Location]);
        assert_eq!(cfg.display.splash_duration_ms, 3000, "unset keys keep defaults");
        assert_eq!(cfg.edsm.timeout_secs, 9);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn unknown_page_name_is_a_parse_error() {
        let err: EdxError = toml::from_str::<Config>("[display]\npages = [\"radar\"]\n")
            .unwrap_err()
            .into();
        assert_eq!(err.code(), "EDX-1003");
    }

    #[test]
    fn refresh_interval_floor_enforced() {
        let mut cfg = Config::default();
        cfg.journal.refresh_interval_ms = 10;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("refresh_interval_ms"));
    }

    #[test]
    fn duplicate_and_empty_pages_rejected() {
        let mut cfg = Config::default();
        cfg.display.pages = vec![PageKind::Cargo, PageKind::Cargo];
        assert!(cfg.validate().unwrap_err().to_string().contains("more than once"));

        cfg.display.pages.clear();
        assert!(matches!(
            cfg.validate().unwrap_err(),
            EdxError::InvalidConfig { .. }
        ));
    }

    #[test]
    fn zero_timeout_and_bad_level_rejected() {
        let mut cfg = Config::default();
        cfg.edsm.timeout_secs = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = Config::default();
        cfg.logging.level = "loud".to_string();
        assert!(cfg.validate().unwrap_err().to_string().contains("logging.level"));
    }

    #[test]
    fn env_overrides_apply() {
        let env = vars(&[
            ("EDX_JOURNAL_FOLDER", "/srv/journal"),
            ("EDX_JOURNAL_REFRESH_INTERVAL_MS", "500"),
            ("EDX_DISPLAY_SPLASH_DURATION_MS", "0"),
            ("EDX_EDSM_BASE_URL", "http://localhost:8080"),
            ("EDX_LOGGING_LEVEL", "WARN"),
            ("EDX_LOGGING_FILE", "/var/log/edx.log"),
        ]);
        let mut cfg = Config::default();
        cfg.apply_env_overrides_from(|name| env.get(name).cloned())
            .unwrap();
        assert_eq!(cfg.journal.folder, "/srv/journal");
        assert_eq!(cfg.journal.refresh_interval_ms, 500);
        assert_eq!(cfg.display.splash_duration_ms, 0);
        assert_eq!(cfg.edsm.base_url, "http://localhost:8080");
        assert_eq!(cfg.logging.level, "warn");
        assert_eq!(
            cfg.logging.file_path().as_deref(),
            Some(Path::new("/var/log/edx.log"))
        );
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn env_invalid_number_rejected() {
        let env = vars(&[("EDX_EDSM_TIMEOUT_SECS", "soon")]);
        let mut cfg = Config::default();
        let err = cfg
            .apply_env_overrides_from(|name| env.get(name).cloned())
            .unwrap_err();
        assert!(matches!(err, EdxError::ConfigParse { context: "env", .. }));
    }

    #[test]
    fn empty_log_file_means_stderr() {
        assert!(Config::default().logging.file_path().is_none());
    }

    #[test]
    fn load_returns_error_for_explicit_missing_path() {
        let err = Config::load(Some(Path::new("/nonexistent/edx52/config.toml"))).unwrap_err();
        assert!(matches!(err, EdxError::MissingConfig { .. }));
    }

    #[test]
    fn load_reads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[display]\nsplash_duration_ms = 0\n").unwrap();
        let cfg = Config::load(Some(&path)).unwrap();
        assert_eq!(cfg.display.splash_duration_ms, 0);
    }

    #[test]
    fn toml_output_round_trips() {
        let cfg = Config::default();
        let text = cfg.to_toml().unwrap();
        assert!(text.contains("[journal]"));
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn stable_hash_tracks_content() {
        let cfg = Config::default();
        assert_eq!(cfg.stable_hash().unwrap(), cfg.stable_hash().unwrap());
        let mut other = cfg.clone();
        other.journal.refresh_interval_ms += 1;
        assert_ne!(cfg.stable_hash().unwrap(), other.stable_hash().unwrap());
    }
}
