//! Renaming Errors

use thiserror::Error;

/// Errors raised while building, consulting, seeding or persisting a renaming map.
///
/// None of these are recoverable: a renaming pass that fails leaves any
/// partially-built output map undefined and callers should discard it.
#[derive(Debug, Error)]
pub enum RenameError {
    /// A lookup or constructor was handed an argument it cannot accept.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A map was seeded after it already served a lookup.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Persisted renaming map input did not match the expected format.
    #[error("malformed renaming map: {0}")]
    Format(String),

    /// One key was asked to map to two different values.
    #[error("inconsistent mapping for '{key}': '{existing}' vs '{conflicting}'")]
    Inconsistent {
        key: String,
        existing: String,
        conflicting: String,
    },

    /// The short name counter ran past its integer range.
    #[error("short name space exhausted after index {0}")]
    Exhausted(u64),

    #[error("Unknown strategy \"{0}\".")]
    UnknownStrategy(String),

    #[error("Unknown mode \"{0}\".")]
    UnknownMode(String),

    #[error("Unknown renaming map format \"{0}\".")]
    UnknownFormat(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("invalid exception pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, RenameError>;
