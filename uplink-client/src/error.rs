//! Error types for coordinator and configuration operations
//!
//! Transfer outcomes are not errors at this level: a failed upload is
//! reported through `on_error` and recorded in the snapshot. `UploadError`
//! covers misuse (unknown ids) and setup problems.

use std::io;

use crate::transfers::UploadStatus;

/// Errors returned by coordinator and configuration operations
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// No upload with this id is registered
    #[error("no upload with id {0}")]
    NotFound(String),

    /// Only queued uploads can be started
    #[error("upload {id} cannot be started from status {status:?}")]
    NotQueued { id: String, status: UploadStatus },

    /// Session configuration is unusable
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Reading a config or source file failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Config file is not valid JSON
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}
