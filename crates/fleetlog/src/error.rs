//! Error types for fleetlog.
//!
//! This module defines all error types used throughout the fleetlog crate.
//! Note that absence of a derived result (not enough fuel records, no
//! triggered reminders) is a normal outcome expressed with `Option`, never an
//! error; the variants here cover the boundaries around the computation core.

use std::path::PathBuf;

use thiserror::Error;

use crate::record::CarId;

/// The main error type for fleetlog operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Fleet Errors ===
    /// A record referenced a car that is not registered in the fleet.
    #[error("no car with id {id}")]
    UnknownCar {
        /// The id that failed to resolve.
        id: CarId,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Snapshot Errors ===
    /// Failed to read a fleet snapshot file.
    #[error("failed to read snapshot at {path}: {source}")]
    SnapshotRead {
        /// Path to the snapshot file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a fleet snapshot file.
    #[error("failed to write snapshot at {path}: {source}")]
    SnapshotWrite {
        /// Path to the snapshot file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for fleetlog operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new unknown-car error.
    #[must_use]
    pub fn unknown_car(id: CarId) -> Self {
        Self::UnknownCar { id }
    }

    /// Create a new configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Check if this error is an unknown-car error.
    #[must_use]
    pub fn is_unknown_car(&self) -> bool {
        matches!(self, Self::UnknownCar { .. })
    }
}
