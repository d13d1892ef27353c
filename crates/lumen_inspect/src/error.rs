//! # Inspector Error Types
//!
//! All errors that can occur while setting up label synchronization.

use std::path::PathBuf;

use lumen_core::CoreError;
use thiserror::Error;

/// Errors that can occur in the inspector.
#[derive(Error, Debug)]
pub enum InspectError {
    /// The ECS core rejected an operation (e.g. the target world is missing).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid TOML for [`SyncConfig`](crate::SyncConfig).
    #[error("invalid configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result type for inspector operations.
pub type InspectResult<T> = Result<T, InspectError>;
