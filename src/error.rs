//! Error types for portq.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PqError>;

#[derive(Error, Debug)]
pub enum PqError {
    /// Configuration file could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// A required configuration value is absent.
    #[error("missing config: {0}")]
    MissingConfig(String),

    /// The ports index could not be fetched or decoded. Raised by the
    /// fetch that actually failed; later calls see `IndexUnavailable`.
    #[error("failed to load ports index: {0}")]
    IndexLoad(String),

    /// The ports index failed to load earlier in this process. The
    /// loader never retries; a fresh process is required.
    #[error("ports index unavailable: {0}")]
    IndexUnavailable(String),

    /// A URL argument could not be parsed.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PqError {
    /// Stable machine-readable code for robot-mode error envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::MissingConfig(_) => "missing_config",
            Self::IndexLoad(_) => "index_load_failed",
            Self::IndexUnavailable(_) => "index_unavailable",
            Self::InvalidUrl(_) => "invalid_url",
            Self::Io(_) => "io",
        }
    }
}
