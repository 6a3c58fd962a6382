//! Shared error type across kvstats crates.

use thiserror::Error;

/// Coarse error classes (stable, used as log field values).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or invalid configuration.
    Config,
    /// Store lookup failed.
    Store,
    /// Upstream API answered with a non-success status.
    Upstream,
    /// Payload could not be (de)serialized.
    Json,
    /// Local filesystem failure.
    Io,
    /// Transport failure talking to the upstream API.
    Http,
}

impl ErrorKind {
    /// String representation used in structured logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Config => "CONFIG",
            ErrorKind::Store => "STORE",
            ErrorKind::Upstream => "UPSTREAM",
            ErrorKind::Json => "JSON",
            ErrorKind::Io => "IO",
            ErrorKind::Http => "HTTP",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, KvStatsError>;

/// Unified error type used by core, gateway, and sync.
#[derive(Debug, Error)]
pub enum KvStatsError {
    #[error("{0}")]
    Config(String),
    #[error("store error: {0}")]
    Store(String),
    #[error("request failed with status code {status}: {message}")]
    Upstream { status: u16, message: String },
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Http(#[from] reqwest::Error),
}

impl KvStatsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            KvStatsError::Config(_) => ErrorKind::Config,
            KvStatsError::Store(_) => ErrorKind::Store,
            KvStatsError::Upstream { .. } => ErrorKind::Upstream,
            KvStatsError::Json(_) => ErrorKind::Json,
            KvStatsError::Io(_) => ErrorKind::Io,
            KvStatsError::Http(_) => ErrorKind::Http,
        }
    }
}
