//! Upload coordinator
//!
//! Owns the registry of uploads for one session: assigns ids, applies the
//! count and size limits, starts admitted transfers, folds their events into
//! per-file metadata and republishes the full snapshot after every change.
//!
//! All mutation goes through `&mut self`. Transfers run on their own tasks
//! but only talk to the coordinator through `UploadEvent`s, which the owner
//! applies one at a time with [`UploadCoordinator::next_event`] or
//! [`UploadCoordinator::run_until_idle`]. An event only applies to the entry
//! whose current transfer number it carries.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use uplink_common::{RejectionKind, bytes_to_mb, item_id, open_slots};

use super::executor::{UploadEvent, forward_progress, spawn_upload};
use super::http::HttpTransportFactory;
use super::transport::{Transport, TransportFactory};
use super::types::{Snapshot, SourceFile, UploadFailure, UploadMeta, UploadResult, UploadStatus};
use crate::config::{SessionCallbacks, SessionConfig};
use crate::constants::{IN_FLIGHT_PROGRESS_CAP, RAW_RESPONSE_KEY};
use crate::error::UploadError;

/// One tracked file
struct UploadEntry {
    /// `None` for entries seeded from a previous snapshot
    transport: Option<Arc<dyn Transport>>,
    /// Executor task, once started
    task: Option<JoinHandle<()>>,
    /// Transfer whose events this entry still accepts
    transfer: Option<u64>,
    meta: UploadMeta,
}

impl UploadEntry {
    fn cancel(&mut self) {
        if let Some(transport) = &self.transport {
            transport.cancel();
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.transfer = None;
    }
}

/// Coordinates every upload in a session
pub struct UploadCoordinator {
    config: SessionConfig,
    callbacks: SessionCallbacks,
    factory: Arc<dyn TransportFactory>,
    uploads: HashMap<String, UploadEntry>,
    /// Attach counter: sort order and collision suffix, never reset
    file_counter: u64,
    /// Last transfer number handed out
    transfer_counter: u64,
    event_tx: mpsc::UnboundedSender<UploadEvent>,
    event_rx: mpsc::UnboundedReceiver<UploadEvent>,
}

impl UploadCoordinator {
    /// Create a coordinator, seeding the registry from `config.uploads`
    pub fn new(
        config: SessionConfig,
        callbacks: SessionCallbacks,
        factory: Arc<dyn TransportFactory>,
    ) -> Self {
        let uploads: HashMap<String, UploadEntry> = config
            .uploads
            .iter()
            .map(|(id, meta)| {
                let entry = UploadEntry {
                    transport: None,
                    task: None,
                    transfer: None,
                    meta: meta.clone(),
                };
                (id.clone(), entry)
            })
            .collect();
        let file_counter = uploads.len() as u64;
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        Self {
            config,
            callbacks,
            factory,
            uploads,
            file_counter,
            transfer_counter: 0,
            event_tx,
            event_rx,
        }
    }

    /// Create a coordinator that uploads over HTTP
    pub fn with_http(
        config: SessionConfig,
        callbacks: SessionCallbacks,
    ) -> Result<Self, UploadError> {
        config.validate()?;
        let factory = HttpTransportFactory::new()?;
        Ok(Self::new(config, callbacks, Arc::new(factory)))
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Number of registered uploads (rejected ones included)
    pub fn len(&self) -> usize {
        self.uploads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uploads.is_empty()
    }

    /// Metadata for one upload
    pub fn get(&self, id: &str) -> Option<&UploadMeta> {
        self.uploads.get(id).map(|entry| &entry.meta)
    }

    /// Files the session may still accept
    pub fn open_slots(&self) -> usize {
        open_slots(self.uploads.len(), self.config.max_files)
    }

    /// Returns true while any upload still expects transport events
    pub fn has_active(&self) -> bool {
        self.uploads
            .values()
            .any(|entry| entry.transfer.is_some() && entry.meta.status.is_active())
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Register a batch of files and start the admitted ones
    ///
    /// Rejected files are registered too (with their reason) so they show
    /// up in the snapshot. Returns the admitted ids in input order.
    /// Must be called from within a tokio runtime.
    pub fn attach(&mut self, files: Vec<SourceFile>) -> Result<Vec<String>, UploadError> {
        let ids = self.prepare_files_for_upload(files);
        self.start_transfers(&ids)?;
        self.publish();
        Ok(ids)
    }

    /// Start transfers for queued uploads
    ///
    /// Every id must be registered and `Queued`; otherwise nothing is
    /// started. Rejected, running and settled uploads never start again.
    pub fn start(&mut self, ids: &[String]) -> Result<(), UploadError> {
        self.start_transfers(ids)?;
        self.publish();
        Ok(())
    }

    fn start_transfers(&mut self, ids: &[String]) -> Result<(), UploadError> {
        for id in ids {
            let entry = self
                .uploads
                .get(id)
                .ok_or_else(|| UploadError::NotFound(id.clone()))?;
            if entry.meta.status != UploadStatus::Queued {
                return Err(UploadError::NotQueued {
                    id: id.clone(),
                    status: entry.meta.status,
                });
            }
        }

        for id in ids {
            let Some(entry) = self.uploads.get_mut(id) else {
                continue;
            };
            // Repeated ids in one call
            if entry.meta.status != UploadStatus::Queued {
                continue;
            }
            let Some(transport) = entry.transport.clone() else {
                warn!(id = %id, "upload has no transport; not starting");
                continue;
            };

            self.transfer_counter += 1;
            let transfer = self.transfer_counter;

            forward_progress(id, transfer, transport.as_ref(), &self.event_tx);
            entry.meta.status = UploadStatus::Transferring;
            entry.transfer = Some(transfer);
            entry.task = Some(spawn_upload(
                id.clone(),
                transfer,
                transport,
                self.config.options.clone(),
                self.event_tx.clone(),
            ));
            debug!(id = %id, transfer, "upload started");
        }
        Ok(())
    }

    /// Cancel an upload and drop it from the registry
    pub fn abort(&mut self, id: &str) -> Result<(), UploadError> {
        let mut entry = self
            .uploads
            .remove(id)
            .ok_or_else(|| UploadError::NotFound(id.to_string()))?;
        entry.cancel();
        debug!(id = %id, "upload aborted");
        self.publish();
        Ok(())
    }

    /// Current metadata for every registered upload
    pub fn snapshot(&self) -> Snapshot {
        self.uploads
            .iter()
            .map(|(id, entry)| (id.clone(), entry.meta.clone()))
            .collect()
    }

    /// Metadata ordered by attach order
    pub fn sorted_snapshot(&self) -> Vec<UploadMeta> {
        let mut metas: Vec<UploadMeta> = self
            .uploads
            .values()
            .map(|entry| entry.meta.clone())
            .collect();
        metas.sort_by_key(|meta| meta.sort_order);
        metas
    }

    /// Send the current snapshot to the update subscriber, if any
    pub fn publish(&self) {
        if let Some(on_update) = &self.callbacks.on_update {
            on_update(&self.snapshot());
        }
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Wait for the next transfer event and apply it
    ///
    /// Returns None only if the event channel has closed.
    pub async fn next_event(&mut self) -> Option<UploadEvent> {
        let event = self.event_rx.recv().await?;
        self.handle_event(event.clone());
        Some(event)
    }

    /// Apply events until no upload is queued or transferring
    pub async fn run_until_idle(&mut self) {
        while self.has_active() {
            if self.next_event().await.is_none() {
                break;
            }
        }
    }

    /// Apply one transfer event
    ///
    /// Events are ignored unless the entry they name is still waiting on
    /// the transfer that sent them. That covers aborted uploads and ids
    /// reused by a later attach.
    pub fn handle_event(&mut self, event: UploadEvent) {
        let Some(entry) = self.uploads.get_mut(event.id()) else {
            return;
        };
        if entry.transfer != Some(event.transfer()) {
            debug!(
                id = event.id(),
                transfer = event.transfer(),
                "ignoring stale transfer event"
            );
            return;
        }
        if event.is_terminal() {
            entry.transfer = None;
            entry.task = None;
        }

        match event {
            UploadEvent::Progress { id, percent, .. } => self.on_progress(&id, percent),
            UploadEvent::Completed { id, body, .. } => self.on_completed(&id, &body),
            UploadEvent::Failed { id, error, .. } => {
                let Some(entry) = self.uploads.get_mut(&id) else {
                    return;
                };
                entry.meta.fail(&error);
                warn!(id = %id, error = %error, "upload failed");

                if let Some(on_error) = &self.callbacks.on_error {
                    on_error(&UploadFailure { id, error });
                }
                self.publish();
            }
        }
    }

    fn on_progress(&mut self, id: &str, percent: f64) {
        let Some(entry) = self.uploads.get_mut(id) else {
            return;
        };
        if entry.meta.status != UploadStatus::Transferring {
            return;
        }

        // Ticks may arrive out of order; 100 is reserved for confirmed uploads
        let percent = percent.clamp(0.0, IN_FLIGHT_PROGRESS_CAP);
        entry.meta.progress = entry.meta.progress.max(percent);
        self.publish();
    }

    fn on_completed(&mut self, id: &str, body: &str) {
        let Some(entry) = self.uploads.get_mut(id) else {
            return;
        };
        let response = parse_response(body);
        entry.meta.complete(response.clone());
        info!(id = %id, "upload complete");

        if let Some(on_load) = &self.callbacks.on_load {
            let result = UploadResult {
                id: id.to_string(),
                response,
            };
            on_load(&result, &self.snapshot());
        }
        self.publish();
    }

    // =========================================================================
    // Admission
    // =========================================================================

    /// Register every file, returning the ids admitted for transfer
    fn prepare_files_for_upload(&mut self, files: Vec<SourceFile>) -> Vec<String> {
        let mut admitted = Vec::new();
        let mut slots = self.open_slots();

        for file in files {
            let id = self.unique_id(&file.name);
            let mut meta = UploadMeta::new(id.clone(), &file, self.file_counter);
            self.file_counter += 1;

            let transport = self
                .factory
                .create(&self.config.url, file, &self.config.headers);

            if let Some(max) = self.config.size_limit()
                && bytes_to_mb(Some(meta.raw_size)) > max
            {
                warn!(id = %id, size = meta.raw_size, max_mb = max, "file exceeds size limit");
                meta.reject(
                    RejectionKind::MaxFileSize,
                    self.config.max_file_size_text.clone(),
                );
            } else if slots == 0 {
                warn!(id = %id, max_files = self.config.max_files, "file count limit reached");
                meta.reject(RejectionKind::MaxFiles, self.config.max_files_text.clone());
            } else {
                slots -= 1;
                admitted.push(id.clone());
                debug!(id = %id, size = meta.raw_size, "file admitted");
            }

            self.uploads.insert(
                id,
                UploadEntry {
                    transport: Some(transport),
                    task: None,
                    transfer: None,
                    meta,
                },
            );
        }

        admitted
    }

    /// Derive an id for `name` that is not yet registered
    ///
    /// A taken id gets the current attach counter appended; should that
    /// also be taken, `_2`, `_3`, ... are tried until one is free.
    fn unique_id(&self, name: &str) -> String {
        let base = item_id(name);
        if !self.uploads.contains_key(&base) {
            return base;
        }

        let suffixed = format!("{base}{}", self.file_counter);
        let mut candidate = suffixed.clone();
        let mut attempt = 1;
        while self.uploads.contains_key(&candidate) {
            attempt += 1;
            candidate = format!("{suffixed}_{attempt}");
        }
        candidate
    }
}

impl Drop for UploadCoordinator {
    fn drop(&mut self) {
        for entry in self.uploads.values_mut() {
            entry.cancel();
        }
    }
}

/// Parse a response body as JSON, wrapping anything else as `{"raw": body}`
pub fn parse_response(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| {
        let mut wrapped = Map::new();
        wrapped.insert(RAW_RESPONSE_KEY.to_string(), Value::String(body.to_string()));
        Value::Object(wrapped)
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::transfers::transport::{ProgressListener, TransferFailure, UploadOptions};

    /// Transport that never settles on its own
    #[derive(Default)]
    struct IdleTransport {
        cancelled: Mutex<bool>,
    }

    #[async_trait]
    impl Transport for IdleTransport {
        async fn upload(&self, _options: &UploadOptions) -> Result<String, TransferFailure> {
            std::future::pending().await
        }

        fn on_progress(&self, _listener: ProgressListener) {}

        fn cancel(&self) {
            *self.cancelled.lock().unwrap() = true;
        }
    }

    #[derive(Default)]
    struct IdleFactory {
        created: Mutex<Vec<Arc<IdleTransport>>>,
    }

    impl TransportFactory for IdleFactory {
        fn create(
            &self,
            _url: &str,
            _file: SourceFile,
            _headers: &std::collections::BTreeMap<String, String>,
        ) -> Arc<dyn Transport> {
            let transport = Arc::new(IdleTransport::default());
            self.created.lock().unwrap().push(Arc::clone(&transport));
            transport
        }
    }

    fn coordinator(config: SessionConfig) -> (UploadCoordinator, Arc<AtomicUsize>) {
        let updates = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&updates);
        let callbacks = SessionCallbacks::new().on_update(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let coordinator =
            UploadCoordinator::new(config, callbacks, Arc::new(IdleFactory::default()));
        (coordinator, updates)
    }

    fn file(name: &str, size: usize) -> SourceFile {
        SourceFile::new(name, vec![0u8; size])
    }

    #[test]
    fn test_parse_response() {
        assert_eq!(
            parse_response(r#"{"url":"/files/1"}"#),
            serde_json::json!({"url": "/files/1"})
        );
        assert_eq!(
            parse_response("<html>ok</html>"),
            serde_json::json!({"raw": "<html>ok</html>"})
        );
        assert_eq!(parse_response(""), serde_json::json!({"raw": ""}));
    }

    #[tokio::test]
    async fn test_attach_assigns_ids_and_sort_order() {
        let (mut coordinator, updates) = coordinator(SessionConfig::new("http://localhost/"));

        let ids = coordinator
            .attach(vec![file("a.jpg", 10), file("b.png", 20)])
            .expect("attach");

        assert_eq!(ids, vec!["file_ajpg", "file_bpng"]);
        assert_eq!(coordinator.get("file_ajpg").unwrap().sort_order, 0);
        assert_eq!(coordinator.get("file_bpng").unwrap().sort_order, 1);
        assert_eq!(
            coordinator.get("file_ajpg").unwrap().status,
            UploadStatus::Transferring
        );
        assert_eq!(updates.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_duplicate_names_get_counter_suffix() {
        let (mut coordinator, _) = coordinator(SessionConfig::new("http://localhost/"));

        let same = file("photo.jpg", 10);
        let ids = coordinator
            .attach(vec![same.clone(), same])
            .expect("attach");

        // Second id carries the counter value before its own increment
        assert_eq!(ids, vec!["file_photojpg", "file_photojpg1"]);
    }

    #[tokio::test]
    async fn test_repeated_collisions_never_overwrite() {
        let (mut coordinator, _) = coordinator(SessionConfig::new("http://localhost/"));

        // Third file collides on file_a, and file_a + counter 2 is taken too
        let ids = coordinator
            .attach(vec![file("a", 1), file("a2", 1), file("a", 1)])
            .expect("attach");

        assert_eq!(ids, vec!["file_a", "file_a2", "file_a2_2"]);
        assert_eq!(coordinator.len(), 3);
    }

    #[tokio::test]
    async fn test_counter_survives_abort() {
        let (mut coordinator, _) = coordinator(SessionConfig::new("http://localhost/"));

        coordinator.attach(vec![file("a", 1)]).expect("attach");
        coordinator.abort("file_a").expect("abort");
        coordinator.attach(vec![file("b", 1)]).expect("attach");

        assert_eq!(coordinator.get("file_b").unwrap().sort_order, 1);
    }

    #[tokio::test]
    async fn test_abort_cancels_transport() {
        let factory = Arc::new(IdleFactory::default());
        let mut coordinator = UploadCoordinator::new(
            SessionConfig::new("http://localhost/"),
            SessionCallbacks::new(),
            factory.clone(),
        );

        coordinator.attach(vec![file("a", 1)]).expect("attach");
        assert!(coordinator.has_active());

        coordinator.abort("file_a").expect("abort");
        assert!(*factory.created.lock().unwrap()[0].cancelled.lock().unwrap());
        assert!(coordinator.is_empty());
        assert!(!coordinator.has_active());
    }

    #[tokio::test]
    async fn test_abort_unknown_id() {
        let (mut coordinator, updates) = coordinator(SessionConfig::new("http://localhost/"));
        assert!(matches!(
            coordinator.abort("file_missing"),
            Err(UploadError::NotFound(id)) if id == "file_missing"
        ));
        assert_eq!(updates.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_start_unknown_id() {
        let (mut coordinator, _) = coordinator(SessionConfig::new("http://localhost/"));
        assert!(matches!(
            coordinator.start(&["file_missing".to_string()]),
            Err(UploadError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_progress_is_monotonic_and_capped() {
        let (mut coordinator, updates) = coordinator(SessionConfig::new("http://localhost/"));
        coordinator.attach(vec![file("a", 1)]).expect("attach");

        let tick = |percent| UploadEvent::Progress {
            id: "file_a".to_string(),
            transfer: 1,
            percent,
        };
        coordinator.handle_event(tick(40.0));
        coordinator.handle_event(tick(20.0));
        assert_eq!(coordinator.get("file_a").unwrap().progress, 40.0);

        coordinator.handle_event(tick(100.0));
        assert_eq!(
            coordinator.get("file_a").unwrap().progress,
            IN_FLIGHT_PROGRESS_CAP
        );

        coordinator.handle_event(UploadEvent::Completed {
            id: "file_a".to_string(),
            transfer: 1,
            body: "{}".to_string(),
        });
        assert_eq!(coordinator.get("file_a").unwrap().progress, 100.0);
        assert!(!coordinator.has_active());

        // A second settle for the same transfer is dropped
        coordinator.handle_event(UploadEvent::Failed {
            id: "file_a".to_string(),
            transfer: 1,
            error: TransferFailure::new(500, "Internal Server Error"),
        });
        assert_eq!(
            coordinator.get("file_a").unwrap().status,
            UploadStatus::Loaded
        );

        // attach + three ticks + completion
        assert_eq!(updates.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_events_from_aborted_transfer_skip_reused_id() {
        let (mut coordinator, updates) = coordinator(SessionConfig::new("http://localhost/"));
        coordinator.attach(vec![file("a", 1)]).expect("attach");
        coordinator.abort("file_a").expect("abort");
        coordinator.attach(vec![file("a", 1)]).expect("attach");
        let published = updates.load(Ordering::SeqCst);

        coordinator.handle_event(UploadEvent::Progress {
            id: "file_a".to_string(),
            transfer: 1,
            percent: 60.0,
        });
        coordinator.handle_event(UploadEvent::Completed {
            id: "file_a".to_string(),
            transfer: 1,
            body: r#"{"old":true}"#.to_string(),
        });

        let meta = coordinator.get("file_a").unwrap();
        assert_eq!(meta.status, UploadStatus::Transferring);
        assert_eq!(meta.progress, 0.0);
        assert!(meta.server_response.is_none());
        assert!(coordinator.has_active());
        assert_eq!(updates.load(Ordering::SeqCst), published);

        coordinator.handle_event(UploadEvent::Completed {
            id: "file_a".to_string(),
            transfer: 2,
            body: r#"{"new":true}"#.to_string(),
        });
        assert_eq!(
            coordinator.get("file_a").unwrap().server_response,
            Some(serde_json::json!({"new": true}))
        );
    }

    #[tokio::test]
    async fn test_start_requires_queued_status() {
        let mut config = SessionConfig::new("http://localhost/");
        config.max_files = 1;
        let (mut coordinator, updates) = coordinator(config);
        coordinator
            .attach(vec![file("a", 1), file("b", 1)])
            .expect("attach");

        assert!(matches!(
            coordinator.start(&["file_b".to_string()]),
            Err(UploadError::NotQueued { id, status: UploadStatus::Rejected }) if id == "file_b"
        ));
        assert!(matches!(
            coordinator.start(&["file_a".to_string()]),
            Err(UploadError::NotQueued { status: UploadStatus::Transferring, .. })
        ));
        assert_eq!(
            coordinator.get("file_b").unwrap().status,
            UploadStatus::Rejected
        );
        assert_eq!(updates.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_start_checks_every_id_first() {
        let seed_file = file("seed.txt", 1);
        let seed = UploadMeta::new("file_seedtxt".to_string(), &seed_file, 0);

        let mut config = SessionConfig::new("http://localhost/");
        config.uploads.insert(seed.id.clone(), seed);
        let (mut coordinator, updates) = coordinator(config);

        let ids = ["file_seedtxt".to_string(), "file_missing".to_string()];
        assert!(matches!(
            coordinator.start(&ids),
            Err(UploadError::NotFound(_))
        ));
        assert_eq!(updates.load(Ordering::SeqCst), 0);

        // Seeded entries have no transport, so starting one only republishes
        coordinator
            .start(&["file_seedtxt".to_string()])
            .expect("start");
        assert_eq!(
            coordinator.get("file_seedtxt").unwrap().status,
            UploadStatus::Queued
        );
        assert!(!coordinator.has_active());
        assert_eq!(updates.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_events_for_removed_ids_are_ignored() {
        let (mut coordinator, updates) = coordinator(SessionConfig::new("http://localhost/"));
        coordinator.handle_event(UploadEvent::Completed {
            id: "file_gone".to_string(),
            transfer: 1,
            body: "{}".to_string(),
        });
        coordinator.handle_event(UploadEvent::Failed {
            id: "file_gone".to_string(),
            transfer: 1,
            error: TransferFailure::aborted(),
        });
        assert_eq!(updates.load(Ordering::SeqCst), 0);
        assert!(coordinator.is_empty());
    }

    #[tokio::test]
    async fn test_seeded_uploads() {
        let seed_file = file("old.txt", 5);
        let mut seed_meta = UploadMeta::new("file_oldtxt".to_string(), &seed_file, 0);
        seed_meta.complete(serde_json::json!({"id": 1}));

        let mut config = SessionConfig::new("http://localhost/");
        config.max_files = 2;
        config.uploads.insert(seed_meta.id.clone(), seed_meta);

        let (mut coordinator, _) = coordinator(config);
        assert_eq!(coordinator.len(), 1);
        assert_eq!(coordinator.open_slots(), 1);

        // Counter starts after the seeded entries
        let ids = coordinator
            .attach(vec![file("old.txt", 5), file("new.txt", 5)])
            .expect("attach");
        assert_eq!(ids, vec!["file_oldtxt1"]);
        assert_eq!(coordinator.get("file_oldtxt1").unwrap().sort_order, 1);
        assert_eq!(
            coordinator.get("file_newtxt").unwrap().status,
            UploadStatus::Rejected
        );

        // Seeded entries have no transport but can still be removed
        coordinator.abort("file_oldtxt").expect("abort");
        assert_eq!(coordinator.len(), 2);
    }

    #[tokio::test]
    async fn test_sorted_snapshot_follows_attach_order() {
        let (mut coordinator, _) = coordinator(SessionConfig::new("http://localhost/"));
        coordinator
            .attach(vec![file("zeta", 1), file("alpha", 1), file("mid", 1)])
            .expect("attach");

        let order: Vec<String> = coordinator
            .sorted_snapshot()
            .into_iter()
            .map(|meta| meta.id)
            .collect();
        assert_eq!(order, vec!["file_zeta", "file_alpha", "file_mid"]);
    }
}
