//! EDX-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, EdxError>;

/// Top-level error type for the journal display service.
#[derive(Debug, Error)]
pub enum EdxError {
    #[error("[EDX-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[EDX-1002] missing configuration file: {path}")]
    MissingConfig { path: PathBuf },

    #[error("[EDX-1003] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[EDX-1101] name table {path} could not be loaded: {details}")]
    NameTable { path: PathBuf, details: String },

    #[error("[EDX-2101] serialization failure in {context}: {details}")]
    Serialization {
        context: &'static str,
        details: String,
    },

    #[error("[EDX-3002] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[EDX-3900] runtime failure: {details}")]
    Runtime { details: String },

    #[error("[EDX-4001] lookup for system {system_id} failed: {details}")]
    Lookup { system_id: i64, details: String },

    #[error("[EDX-4002] no system data for system address {system_id}")]
    NoSystemData { system_id: i64 },

    #[error("[EDX-5001] display device failure: {details}")]
    Device { details: String },
}

impl EdxError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "EDX-1001",
            Self::MissingConfig { .. } => "EDX-1002",
            Self::ConfigParse { .. } => "EDX-1003",
            Self::NameTable { .. } => "EDX-1101",
            Self::Serialization { .. } => "EDX-2101",
            Self::Io { .. } => "EDX-3002",
            Self::Runtime { .. } => "EDX-3900",
            Self::Lookup { .. } => "EDX-4001",
            Self::NoSystemData { .. } => "EDX-4002",
            Self::Device { .. } => "EDX-5001",
        }
    }

    /// Whether a later cycle might succeed where this one failed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Io { .. } | Self::Lookup { .. } | Self::Device { .. } | Self::Runtime { .. }
        )
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<serde_json::Error> for EdxError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}

impl From<toml::de::Error> for EdxError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}
