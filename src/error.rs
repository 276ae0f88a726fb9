//! Error types surfaced across the matching boundary.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the matching engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// The roster was empty after blank entries and duplicates were dropped.
    #[error("roster is empty after removing blank and duplicate entries")]
    EmptyRoster,

    /// No strategy could build any partition of the roster.
    #[error("unable to partition a roster of {size} participant(s); adjust the roster manually")]
    UnresolvableRoster { size: usize },

    /// A history record could not be turned into a group.
    #[error("malformed history record #{index}: {reason}")]
    MalformedRecord { index: usize, reason: String },

    /// A group was constructed with the wrong shape.
    #[error("invalid group: {reason}")]
    InvalidGroup { reason: String },
}

/// Errors raised while loading [`crate::MatchConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// A configuration field has an invalid value.
    #[error("invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Errors from the plain-text roster and history files.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
