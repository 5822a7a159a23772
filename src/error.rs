//! Error types for state transitions and configuration loading.

use crate::states::StateId;
use std::path::PathBuf;

/// Errors raised by the state manager.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StateError {
    /// No constructor is registered for the requested identifier.
    /// The previously active state has already been disposed at this point.
    #[error("No state registered for identifier {0}")]
    Unregistered(StateId),
}

/// Errors raised while loading `Settings`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {field}: {value}")]
    Invalid { field: &'static str, value: f32 },
}
