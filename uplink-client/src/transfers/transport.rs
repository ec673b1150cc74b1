//! Transport contract for single-file uploads
//!
//! A transport owns one file and one destination. It performs exactly one
//! upload, reports fractional progress to any number of listeners, and can
//! be cancelled while in flight.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use uplink_common::DEFAULT_FIELD_NAME;

use super::types::SourceFile;

/// Status text reported for cancelled transfers
pub const ABORTED_STATUS_TEXT: &str = "aborted";

/// Listener invoked with the transfer progress in percent (0 to 100)
pub type ProgressListener = Box<dyn Fn(f64) + Send + Sync>;

// =============================================================================
// Transfer Failure
// =============================================================================

/// A rejected upload
///
/// `status` is the HTTP status code, or 0 when no response was received
/// (network failure or cancellation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferFailure {
    pub status: u16,
    pub status_text: String,
}

impl TransferFailure {
    pub fn new(status: u16, status_text: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
        }
    }

    /// Failure without an HTTP response
    pub fn network(error: impl fmt::Display) -> Self {
        Self::new(0, error.to_string())
    }

    /// Failure reported for a cancelled transfer
    pub fn aborted() -> Self {
        Self::new(0, ABORTED_STATUS_TEXT)
    }

    /// Returns true if this failure came from `Transport::cancel`
    pub fn is_aborted(&self) -> bool {
        self.status == 0 && self.status_text == ABORTED_STATUS_TEXT
    }
}

impl fmt::Display for TransferFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.status == 0 {
            f.write_str(&self.status_text)
        } else {
            write!(f, "{} {}", self.status, self.status_text)
        }
    }
}

impl std::error::Error for TransferFailure {}

// =============================================================================
// Upload Options
// =============================================================================

/// Per-request options forwarded verbatim to every transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadOptions {
    /// Text fields placed in the form before the file
    #[serde(default)]
    pub form_fields: Vec<(String, String)>,

    /// Form field the file is attached under
    #[serde(default = "default_field_name")]
    pub field_name: String,

    /// Extra text fields appended after the file
    #[serde(default)]
    pub additional_fields: BTreeMap<String, String>,

    /// Request headers; session headers take precedence on conflict
    #[serde(default)]
    pub custom_headers: BTreeMap<String, String>,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            form_fields: Vec::new(),
            field_name: default_field_name(),
            additional_fields: BTreeMap::new(),
            custom_headers: BTreeMap::new(),
        }
    }
}

fn default_field_name() -> String {
    DEFAULT_FIELD_NAME.to_string()
}

// =============================================================================
// Transport
// =============================================================================

/// One file transfer
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform the upload, resolving with the raw response body on 2xx
    async fn upload(&self, options: &UploadOptions) -> Result<String, TransferFailure>;

    /// Register a progress listener (listeners accumulate)
    fn on_progress(&self, listener: ProgressListener);

    /// Abort the in-flight transfer
    fn cancel(&self);
}

/// Creates the transport for each attached file
pub trait TransportFactory: Send + Sync {
    fn create(
        &self,
        url: &str,
        file: SourceFile,
        headers: &BTreeMap<String, String>,
    ) -> Arc<dyn Transport>;
}
