//! Upload management
//!
//! Files handed to a session are registered with the `UploadCoordinator`,
//! checked against the count and size limits and sent over a `Transport`
//! (multipart HTTP by default). Each transfer runs on its own task and
//! reports back through `UploadEvent`s.
//!
//! Key types:
//! - `UploadCoordinator` - Registry, admission control and event handling
//! - `Transport` / `TransportFactory` - One upload of one file
//! - `HttpTransport` - reqwest multipart implementation
//! - `UploadMeta` - Per-file metadata published in every snapshot

mod coordinator;
mod executor;
mod http;
mod transport;
mod types;

pub use coordinator::{UploadCoordinator, parse_response};
pub use executor::{UploadEvent, execute_upload, forward_progress, spawn_upload};
pub use http::{HttpTransport, HttpTransportFactory};
pub use transport::{
    ABORTED_STATUS_TEXT, ProgressListener, TransferFailure, Transport, TransportFactory,
    UploadOptions,
};
pub use types::{Snapshot, SourceFile, UploadFailure, UploadMeta, UploadResult, UploadStatus};
