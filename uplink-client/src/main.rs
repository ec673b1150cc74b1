//! Uplink - multipart upload client

mod args;

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use uplink_client::constants::{DEFAULT_MAX_FILE_SIZE_TEXT, DEFAULT_MAX_FILES_TEXT};
use uplink_client::{
    SessionCallbacks, SessionConfig, SourceFile, UploadCoordinator, UploadError, UploadStatus,
};

use args::Args;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let default_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = setup_config(&args).unwrap_or_else(|e| {
        eprintln!("Failed to load session config: {}", e);
        process::exit(1);
    });

    let mut files = Vec::with_capacity(args.files.len());
    for path in &args.files {
        match SourceFile::open(path).await {
            Ok(file) => files.push(file),
            Err(e) => {
                eprintln!("Failed to read {}: {}", path.display(), e);
                process::exit(1);
            }
        }
    }

    let callbacks = SessionCallbacks::new()
        .on_update(|snapshot| {
            let total = snapshot.len();
            let loaded = snapshot.values().filter(|meta| meta.is_loaded).count();
            let transferring: Vec<String> = snapshot
                .values()
                .filter(|meta| meta.status == UploadStatus::Transferring)
                .map(|meta| format!("{} {:.0}%", meta.display_name(), meta.progress))
                .collect();
            println!("[{}/{}] {}", loaded, total, transferring.join(", "));
        })
        .on_load(|result, _| println!("{}: {}", result.id, result.response))
        .on_error(|failure| eprintln!("{}: upload failed: {}", failure.id, failure.error));

    let mut coordinator = UploadCoordinator::with_http(config, callbacks).unwrap_or_else(|e| {
        eprintln!("Failed to start upload session: {}", e);
        process::exit(1);
    });

    if let Err(e) = coordinator.attach(files) {
        eprintln!("Failed to attach files: {}", e);
        process::exit(1);
    }
    coordinator.run_until_idle().await;

    let mut failed = 0;
    for meta in coordinator.sorted_snapshot() {
        match meta.status {
            UploadStatus::Rejected | UploadStatus::Failed => {
                failed += 1;
                eprintln!(
                    "{}: {}",
                    meta.display_name(),
                    meta.error_reason.as_deref().unwrap_or("not uploaded")
                );
            }
            _ => {}
        }
    }

    if failed > 0 {
        process::exit(1);
    }
}

/// Build the session config from the config file and command-line overrides
///
/// An explicit `--config` must exist; the platform default is used only if
/// present.
fn setup_config(args: &Args) -> Result<SessionConfig, UploadError> {
    let mut config = match &args.config {
        Some(path) => SessionConfig::load(path)?,
        None => match SessionConfig::default_path() {
            Some(path) if path.exists() => SessionConfig::load(&path)?,
            _ => SessionConfig::new(args.url.clone()),
        },
    };

    config.url = args.url.clone();
    if let Some(max_files) = args.max_files {
        config.max_files = max_files;
    }
    if let Some(max_file_size) = args.max_file_size {
        config.max_file_size = Some(max_file_size);
    }
    if let Some(field) = &args.field {
        config.options.field_name = field.clone();
    }
    config
        .options
        .form_fields
        .extend(args.form_fields.iter().cloned());
    config.headers.extend(args.headers.iter().cloned());

    if config.max_files_text.is_empty() {
        config.max_files_text = DEFAULT_MAX_FILES_TEXT.to_string();
    }
    if config.max_file_size_text.is_empty() {
        config.max_file_size_text = DEFAULT_MAX_FILE_SIZE_TEXT.to_string();
    }

    config.validate()?;
    Ok(config)
}
