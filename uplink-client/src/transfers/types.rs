//! Upload types for session tracking
//!
//! These types describe files handed to the coordinator and the metadata
//! published to subscribers on every change.

use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use uplink_common::{RejectionKind, pretty_file_size, strip_name_from_extension};

use super::transport::TransferFailure;

// =============================================================================
// Source File
// =============================================================================

/// A file selected for upload
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// File name as presented to the server (no directory components)
    pub name: String,

    /// MIME type for the multipart part, if known
    pub mime_type: Option<String>,

    /// File contents
    pub contents: Bytes,
}

impl SourceFile {
    /// Create a file from in-memory contents
    pub fn new(name: impl Into<String>, contents: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            mime_type: None,
            contents: contents.into(),
        }
    }

    /// Set the MIME type sent with the file part
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Read a file from disk, guessing its MIME type from the extension
    pub async fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let contents = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        let mime_type = mime_guess::from_path(path)
            .first()
            .map(|mime| mime.essence_str().to_string());

        Ok(Self {
            name,
            mime_type,
            contents: Bytes::from(contents),
        })
    }

    /// Size in bytes
    pub fn size(&self) -> u64 {
        self.contents.len() as u64
    }
}

// =============================================================================
// Upload Status
// =============================================================================

/// Current status of an upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    /// Admitted, transfer not started yet
    Queued,
    /// Transfer in flight
    Transferring,
    /// Server confirmed the upload
    Loaded,
    /// Transfer failed (final, no retries)
    Failed,
    /// Refused by admission control (never transfers)
    Rejected,
}

impl UploadStatus {
    /// Returns true while the upload still expects transport events
    pub fn is_active(&self) -> bool {
        matches!(self, UploadStatus::Queued | UploadStatus::Transferring)
    }
}

// =============================================================================
// Upload Meta
// =============================================================================

/// Per-file metadata published in every snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadMeta {
    /// Registry key
    pub id: String,

    /// Display name without extension
    pub file_name: String,

    /// Extension including the dot, or empty
    pub extension: String,

    /// Human-readable size label (e.g., "12KB")
    pub file_size: String,

    /// Size in bytes
    pub raw_size: u64,

    /// Attach counter value at attach time (UI ordering)
    pub sort_order: u64,

    /// Transfer progress, 0 to 100
    #[serde(default)]
    pub progress: f64,

    /// Whether the server confirmed the upload
    #[serde(default)]
    pub is_loaded: bool,

    /// Current status
    pub status: UploadStatus,

    /// User-facing reason the upload was rejected or failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_reason: Option<String>,

    /// Machine-readable rejection kind (admission only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection: Option<RejectionKind>,

    /// Parsed server response, set on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_response: Option<Value>,

    /// Unix timestamp when the file was attached
    pub attached_at: i64,
}

impl UploadMeta {
    /// Build the metadata for a newly attached file
    pub fn new(id: String, file: &SourceFile, sort_order: u64) -> Self {
        let split = strip_name_from_extension(&file.name);
        let raw_size = file.size();

        Self {
            id,
            file_name: split.name,
            extension: split.extension,
            file_size: pretty_file_size(Some(raw_size)),
            raw_size,
            sort_order,
            progress: 0.0,
            is_loaded: false,
            status: UploadStatus::Queued,
            error_reason: None,
            rejection: None,
            server_response: None,
            attached_at: chrono::Utc::now().timestamp(),
        }
    }

    /// Mark as refused by admission control
    pub fn reject(&mut self, kind: RejectionKind, reason: String) {
        self.status = UploadStatus::Rejected;
        self.rejection = Some(kind);
        self.error_reason = Some(reason);
    }

    /// Mark as confirmed by the server
    pub fn complete(&mut self, response: Value) {
        self.status = UploadStatus::Loaded;
        self.is_loaded = true;
        self.progress = 100.0;
        self.server_response = Some(response);
    }

    /// Mark the transfer as failed
    pub fn fail(&mut self, error: &TransferFailure) {
        self.status = UploadStatus::Failed;
        self.error_reason = Some(error.to_string());
    }

    /// Full display name (base name plus extension)
    pub fn display_name(&self) -> String {
        format!("{}{}", self.file_name, self.extension)
    }
}

/// Full mapping from upload id to metadata
pub type Snapshot = BTreeMap<String, UploadMeta>;

// =============================================================================
// Callback Payloads
// =============================================================================

/// Result passed to `on_load` for one confirmed upload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadResult {
    /// Upload id
    pub id: String,
    /// Parsed response body, or `{"raw": body}` when it is not JSON
    pub response: Value,
}

/// Payload passed to `on_error` for one failed upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFailure {
    /// Upload id
    pub id: String,
    /// Transport failure
    pub error: TransferFailure,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_meta_new() {
        let file = SourceFile::new("holiday.jpg", vec![0u8; 2048]);
        let meta = UploadMeta::new("file_holidayjpg".to_string(), &file, 3);

        assert_eq!(meta.file_name, "holiday");
        assert_eq!(meta.extension, ".jpg");
        assert_eq!(meta.file_size, "2KB");
        assert_eq!(meta.raw_size, 2048);
        assert_eq!(meta.sort_order, 3);
        assert_eq!(meta.progress, 0.0);
        assert_eq!(meta.status, UploadStatus::Queued);
        assert!(!meta.is_loaded);
        assert!(meta.attached_at > 0);
        assert_eq!(meta.display_name(), "holiday.jpg");
    }

    #[test]
    fn test_upload_status_methods() {
        assert!(UploadStatus::Queued.is_active());
        assert!(UploadStatus::Transferring.is_active());
        assert!(!UploadStatus::Loaded.is_active());
        assert!(!UploadStatus::Failed.is_active());
        assert!(!UploadStatus::Rejected.is_active());
    }

    #[test]
    fn test_upload_meta_reject() {
        let file = SourceFile::new("big.iso", vec![0u8; 10]);
        let mut meta = UploadMeta::new("file_bigiso".to_string(), &file, 0);
        meta.reject(RejectionKind::MaxFileSize, "Too large".to_string());

        assert_eq!(meta.status, UploadStatus::Rejected);
        assert_eq!(meta.rejection, Some(RejectionKind::MaxFileSize));
        assert_eq!(meta.error_reason.as_deref(), Some("Too large"));
    }

    #[test]
    fn test_upload_meta_complete_and_fail() {
        let file = SourceFile::new("a.txt", "hello");
        let mut meta = UploadMeta::new("file_atxt".to_string(), &file, 0);
        meta.progress = 42.0;
        meta.complete(serde_json::json!({"ok": true}));

        assert_eq!(meta.status, UploadStatus::Loaded);
        assert!(meta.is_loaded);
        assert_eq!(meta.progress, 100.0);
        assert_eq!(meta.server_response, Some(serde_json::json!({"ok": true})));

        let mut failed = UploadMeta::new("file_atxt1".to_string(), &file, 1);
        failed.fail(&TransferFailure::new(500, "Internal Server Error"));
        assert_eq!(failed.status, UploadStatus::Failed);
        assert!(!failed.is_loaded);
        assert_eq!(
            failed.error_reason.as_deref(),
            Some("500 Internal Server Error")
        );
    }

    #[test]
    fn test_upload_meta_serialization_roundtrip() {
        let file = SourceFile::new("notes.md", "# notes");
        let mut meta = UploadMeta::new("file_notesmd".to_string(), &file, 7);
        meta.reject(RejectionKind::MaxFiles, "Limit reached".to_string());

        let json = serde_json::to_string(&meta).expect("serialize");
        assert!(json.contains(r#""status":"rejected""#));
        assert!(json.contains(r#""rejection":"max_files""#));
        assert!(!json.contains("server_response"));

        let deserialized: UploadMeta = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(deserialized, meta);
    }

    #[tokio::test]
    async fn test_source_file_open() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("report.pdf");
        tokio::fs::write(&path, b"%PDF-1.7").await.expect("write");

        let file = SourceFile::open(&path).await.expect("open");
        assert_eq!(file.name, "report.pdf");
        assert_eq!(file.mime_type.as_deref(), Some("application/pdf"));
        assert_eq!(file.size(), 8);
    }
}
