//! HTTP transport - multipart POST uploads with progress reporting
//!
//! The file part is streamed to the server in fixed-size chunks. Each chunk
//! handed to the connection produces a progress tick, so listeners see the
//! share of the file body that has been sent.
//!
//! Cancellation is signalled through a watch channel: the body stream stops
//! yielding chunks and any pending wait on the server resolves immediately.

use std::collections::BTreeMap;
use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use tokio::sync::watch;
use tracing::debug;

use super::transport::{
    ABORTED_STATUS_TEXT, ProgressListener, TransferFailure, Transport, TransportFactory,
    UploadOptions,
};
use super::types::SourceFile;
use crate::constants::{MIME_TYPE_FIELD, UPLOAD_CHUNK_SIZE, USER_AGENT};

// =============================================================================
// Transport
// =============================================================================

/// Uploads one file to one URL with a multipart POST
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    file: SourceFile,
    headers: BTreeMap<String, String>,
    listeners: Arc<Mutex<Vec<ProgressListener>>>,
    cancel_tx: watch::Sender<bool>,
}

impl HttpTransport {
    pub fn new(
        client: reqwest::Client,
        url: impl Into<String>,
        file: SourceFile,
        headers: BTreeMap<String, String>,
    ) -> Self {
        let (cancel_tx, _) = watch::channel(false);
        Self {
            client,
            url: url.into(),
            file,
            headers,
            listeners: Arc::new(Mutex::new(Vec::new())),
            cancel_tx,
        }
    }

    /// The file this transport uploads
    pub fn file(&self) -> &SourceFile {
        &self.file
    }

    fn is_cancelled(&self) -> bool {
        *self.cancel_tx.borrow()
    }

    /// Resolves once `cancel` has been called
    async fn cancelled(&self) {
        let mut rx = self.cancel_tx.subscribe();
        // The sender lives as long as `self`, so this only returns on cancel
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }

    /// Build the multipart body: seeded fields, the MIME type field when the
    /// type is known, the file, then extra fields
    fn build_form(&self, options: &UploadOptions) -> Result<Form, TransferFailure> {
        let mut form = Form::new();

        for (name, value) in &options.form_fields {
            form = form.text(name.clone(), value.clone());
        }

        let mut part = Part::stream_with_length(self.progress_body(), self.file.size())
            .file_name(self.file.name.clone());
        if let Some(mime_type) = &self.file.mime_type {
            part = part
                .mime_str(mime_type)
                .map_err(|e| TransferFailure::network(format!("invalid MIME type: {e}")))?;
            form = form.text(MIME_TYPE_FIELD, mime_type.clone());
        }
        form = form.part(options.field_name.clone(), part);

        for (name, value) in &options.additional_fields {
            form = form.text(name.clone(), value.clone());
        }

        Ok(form)
    }

    /// Stream the file contents in chunks, reporting progress per chunk
    fn progress_body(&self) -> reqwest::Body {
        let contents = self.file.contents.clone();
        let total = contents.len();
        let listeners = Arc::clone(&self.listeners);
        let cancel_rx = self.cancel_tx.subscribe();

        let chunks = (0..total)
            .step_by(UPLOAD_CHUNK_SIZE)
            .map(move |start| -> Result<Bytes, io::Error> {
                if *cancel_rx.borrow() {
                    return Err(io::Error::new(
                        io::ErrorKind::Interrupted,
                        ABORTED_STATUS_TEXT,
                    ));
                }
                let end = (start + UPLOAD_CHUNK_SIZE).min(total);
                notify_progress(&listeners, end as f64 / total as f64 * 100.0);
                Ok(contents.slice(start..end))
            });

        reqwest::Body::wrap_stream(futures::stream::iter(chunks))
    }

    async fn send(&self, options: &UploadOptions) -> Result<String, TransferFailure> {
        let form = self.build_form(options)?;
        let headers = merge_headers(&options.custom_headers, &self.headers)?;

        debug!(url = %self.url, file = %self.file.name, size = self.file.size(), "sending upload");

        let response = self
            .client
            .post(&self.url)
            .headers(headers)
            .multipart(form)
            .send()
            .await
            .map_err(TransferFailure::network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransferFailure::new(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
            ));
        }

        response.text().await.map_err(TransferFailure::network)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn upload(&self, options: &UploadOptions) -> Result<String, TransferFailure> {
        if self.is_cancelled() {
            return Err(TransferFailure::aborted());
        }

        tokio::select! {
            biased;
            _ = self.cancelled() => Err(TransferFailure::aborted()),
            result = self.send(options) => result,
        }
    }

    fn on_progress(&self, listener: ProgressListener) {
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push(listener);
        }
    }

    fn cancel(&self) {
        self.cancel_tx.send_replace(true);
    }
}

fn notify_progress(listeners: &Mutex<Vec<ProgressListener>>, percent: f64) {
    if let Ok(listeners) = listeners.lock() {
        for listener in listeners.iter() {
            listener(percent);
        }
    }
}

/// Custom headers first, then session headers on top
fn merge_headers(
    custom: &BTreeMap<String, String>,
    session: &BTreeMap<String, String>,
) -> Result<HeaderMap, TransferFailure> {
    let mut headers = HeaderMap::new();

    for (name, value) in custom.iter().chain(session.iter()) {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| TransferFailure::network(format!("invalid header name {name}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| TransferFailure::network(format!("invalid header value: {e}")))?;
        headers.insert(name, value);
    }

    Ok(headers)
}

// =============================================================================
// Factory
// =============================================================================

/// Creates [`HttpTransport`]s sharing one connection pool
#[derive(Debug, Clone)]
pub struct HttpTransportFactory {
    client: reqwest::Client,
}

impl HttpTransportFactory {
    /// Build a factory with a fresh HTTP client
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }

    /// Build a factory around an existing client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl TransportFactory for HttpTransportFactory {
    fn create(
        &self,
        url: &str,
        file: SourceFile,
        headers: &BTreeMap<String, String>,
    ) -> Arc<dyn Transport> {
        Arc::new(HttpTransport::new(
            self.client.clone(),
            url,
            file,
            headers.clone(),
        ))
    }
}
