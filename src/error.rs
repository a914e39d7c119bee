//! Unified error types for Cadence.
//!
//! The scheduling core itself performs no I/O and cannot fail for valid
//! inputs: numeric invariants (ease floor, mastery bounds, interval bounds,
//! box bounds) are enforced by clamping inside the functions that would
//! otherwise violate them. Errors therefore fall into two groups:
//!
//! - `InvalidArgument`: a contract violation (unrecognized quality or
//!   difficulty text, malformed input). Fails fast, never coerced to a
//!   default branch.
//! - Collaborator failures (`Storage`, `Serde`, `Config`, `ItemNotFound`):
//!   surfaced to the caller for reporting.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Cadence operations.
#[derive(Error, Debug)]
pub enum CadenceError {
    /// Contract violation: unrecognized or malformed input.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// I/O errors from item or snapshot file operations.
    #[error("storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// JSON parsing/serialization errors.
    #[error("serialization error: {message}")]
    Serde { message: String },

    /// Configuration loading errors.
    #[error("config error: {message}")]
    Config { message: String },

    /// Item not found in the store.
    #[error("item not found: {id}")]
    ItemNotFound { id: String },
}

/// A specialized Result type for Cadence operations.
pub type Result<T> = std::result::Result<T, CadenceError>;

impl CadenceError {
    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a storage error from an I/O error.
    pub fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Create a serialization error.
    pub fn serde(message: impl Into<String>) -> Self {
        Self::Serde {
            message: message.into(),
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an item not found error.
    pub fn item_not_found(id: impl Into<String>) -> Self {
        Self::ItemNotFound { id: id.into() }
    }

    /// Whether this error is a caller contract violation rather than an
    /// infrastructure failure.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

impl From<io::Error> for CadenceError {
    fn from(err: io::Error) -> Self {
        Self::Storage {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for CadenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde {
            message: err.to_string(),
        }
    }
}
