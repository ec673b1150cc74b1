//! Uplink client library
//!
//! Coordinates multipart HTTP uploads for a session: admission against the
//! configured limits, one background transfer per file, and a full metadata
//! snapshot published to subscribers after every change.

pub mod config;
pub mod constants;
pub mod error;
pub mod transfers;

pub use config::{SessionCallbacks, SessionConfig};
pub use error::UploadError;
pub use transfers::{
    HttpTransport, HttpTransportFactory, Snapshot, SourceFile, TransferFailure, Transport,
    TransportFactory, UploadCoordinator, UploadEvent, UploadFailure, UploadMeta, UploadOptions,
    UploadResult, UploadStatus,
};
