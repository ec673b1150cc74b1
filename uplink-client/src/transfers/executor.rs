//! Upload executor - runs transfers in the background
//!
//! Each admitted file gets its own tokio task. The task drives the
//! transport's single upload and reports back to the coordinator through
//! an unbounded channel; it never touches the registry itself.
//!
//! Every event carries the transfer number the coordinator assigned when
//! it started the upload. Ids are reused once an upload is aborted, so the
//! number is what ties an event to one particular transfer.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::transport::{TransferFailure, Transport, UploadOptions};

// =============================================================================
// Progress Events
// =============================================================================

/// Event sent from a running transfer to the coordinator
#[derive(Debug, Clone, PartialEq)]
pub enum UploadEvent {
    /// Progress tick (percent of the file sent)
    Progress {
        id: String,
        transfer: u64,
        percent: f64,
    },

    /// Server accepted the upload; `body` is the raw response text
    Completed {
        id: String,
        transfer: u64,
        body: String,
    },

    /// Upload failed
    Failed {
        id: String,
        transfer: u64,
        error: TransferFailure,
    },
}

impl UploadEvent {
    /// Id of the upload this event belongs to
    pub fn id(&self) -> &str {
        match self {
            UploadEvent::Progress { id, .. }
            | UploadEvent::Completed { id, .. }
            | UploadEvent::Failed { id, .. } => id,
        }
    }

    /// Transfer number assigned when the upload was started
    pub fn transfer(&self) -> u64 {
        match self {
            UploadEvent::Progress { transfer, .. }
            | UploadEvent::Completed { transfer, .. }
            | UploadEvent::Failed { transfer, .. } => *transfer,
        }
    }

    /// Returns true for the single settle event of a transfer
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            UploadEvent::Completed { .. } | UploadEvent::Failed { .. }
        )
    }
}

// =============================================================================
// Executor
// =============================================================================

/// Forward a transport's progress ticks as events
pub fn forward_progress(
    id: &str,
    transfer: u64,
    transport: &dyn Transport,
    event_tx: &mpsc::UnboundedSender<UploadEvent>,
) {
    let id = id.to_string();
    let event_tx = event_tx.clone();
    transport.on_progress(Box::new(move |percent| {
        let _ = event_tx.send(UploadEvent::Progress {
            id: id.clone(),
            transfer,
            percent,
        });
    }));
}

/// Execute a single upload
///
/// Sends exactly one terminal event unless the task is aborted first.
pub async fn execute_upload(
    id: String,
    transfer: u64,
    transport: Arc<dyn Transport>,
    options: UploadOptions,
    event_tx: mpsc::UnboundedSender<UploadEvent>,
) {
    let event = match transport.upload(&options).await {
        Ok(body) => UploadEvent::Completed { id, transfer, body },
        Err(error) => UploadEvent::Failed {
            id,
            transfer,
            error,
        },
    };

    debug!(id = event.id(), transfer, terminal = ?event, "upload settled");

    // Receiver only goes away with the coordinator
    let _ = event_tx.send(event);
}

/// Spawn [`execute_upload`] on the current tokio runtime
pub fn spawn_upload(
    id: String,
    transfer: u64,
    transport: Arc<dyn Transport>,
    options: UploadOptions,
    event_tx: mpsc::UnboundedSender<UploadEvent>,
) -> JoinHandle<()> {
    tokio::spawn(execute_upload(id, transfer, transport, options, event_tx))
}
