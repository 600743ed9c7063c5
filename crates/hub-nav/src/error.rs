//! Error types for the navigation core.
//!
//! None of these reach the user as an error screen. Identity failures degrade
//! to anonymous browsing, and configuration failures stop the host before it
//! starts.

use std::path::PathBuf;

use thiserror::Error;

/// Failures reported by an identity source.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IdentityError {
    /// The auth backend could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The auth backend answered with an error.
    #[error("identity provider rejected the request: {0}")]
    Rejected(String),
}

impl IdentityError {
    /// Create a network error from any error source.
    pub fn network(err: impl std::fmt::Display) -> Self {
        Self::Network(err.to_string())
    }

    /// Create a rejection error from any error source.
    pub fn rejected(err: impl std::fmt::Display) -> Self {
        Self::Rejected(err.to_string())
    }
}

/// Failures while loading or saving `HubConfig`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
