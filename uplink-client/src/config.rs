//! Session configuration
//!
//! `SessionConfig` is plain data (loadable from JSON); the subscriber
//! closures live in `SessionCallbacks` and are attached separately.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use uplink_common::DEFAULT_MAX_FILES;

use crate::constants::{APP_DIR_NAME, CONFIG_FILE_NAME};
use crate::error::UploadError;
use crate::transfers::{Snapshot, UploadFailure, UploadOptions, UploadResult};

// =============================================================================
// Session Config
// =============================================================================

/// Immutable settings for one upload session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Destination URL for every upload
    pub url: String,

    /// Previously published snapshot to seed the registry from
    #[serde(default)]
    pub uploads: Snapshot,

    /// Maximum number of files the session holds
    #[serde(default = "default_max_files")]
    pub max_files: usize,

    /// Maximum file size in megabytes (absent or 0 = unlimited)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_file_size: Option<f64>,

    /// Static headers sent with every upload
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// Options forwarded to every transport
    #[serde(default)]
    pub options: UploadOptions,

    /// Reason shown on files refused by the count limit
    #[serde(default)]
    pub max_files_text: String,

    /// Reason shown on files refused by the size limit
    #[serde(default)]
    pub max_file_size_text: String,
}

fn default_max_files() -> usize {
    DEFAULT_MAX_FILES
}

impl SessionConfig {
    /// Create a config for `url` with every other setting at its default
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            uploads: Snapshot::new(),
            max_files: DEFAULT_MAX_FILES,
            max_file_size: None,
            headers: BTreeMap::new(),
            options: UploadOptions::default(),
            max_files_text: String::new(),
            max_file_size_text: String::new(),
        }
    }

    /// Get the platform-specific session config path
    ///
    /// Returns None if the config directory cannot be determined.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load and validate a config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, UploadError> {
        let contents = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the destination is an absolute http(s) URL and the
    /// limits are sane
    pub fn validate(&self) -> Result<(), UploadError> {
        if self.url.is_empty() {
            return Err(UploadError::InvalidConfig("url is required".to_string()));
        }

        let url = Url::parse(&self.url)
            .map_err(|e| UploadError::InvalidConfig(format!("invalid url {}: {e}", self.url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(UploadError::InvalidConfig(format!(
                "unsupported url scheme: {}",
                url.scheme()
            )));
        }

        if let Some(max) = self.max_file_size
            && (max.is_nan() || max < 0.0)
        {
            return Err(UploadError::InvalidConfig(format!(
                "max_file_size must be a positive number of megabytes, got {max}"
            )));
        }

        Ok(())
    }

    /// Size limit in megabytes, if one is in effect
    pub fn size_limit(&self) -> Option<f64> {
        self.max_file_size.filter(|max| *max > 0.0)
    }
}

// =============================================================================
// Callbacks
// =============================================================================

type UpdateCallback = Box<dyn Fn(&Snapshot) + Send + Sync>;
type LoadCallback = Box<dyn Fn(&UploadResult, &Snapshot) + Send + Sync>;
type ErrorCallback = Box<dyn Fn(&UploadFailure) + Send + Sync>;

/// Subscriber callbacks, all optional
///
/// Every callback runs synchronously inside the coordinator call that
/// caused it.
#[derive(Default)]
pub struct SessionCallbacks {
    pub(crate) on_update: Option<UpdateCallback>,
    pub(crate) on_load: Option<LoadCallback>,
    pub(crate) on_error: Option<ErrorCallback>,
}

impl SessionCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with the full snapshot after every mutation
    pub fn on_update(mut self, callback: impl Fn(&Snapshot) + Send + Sync + 'static) -> Self {
        self.on_update = Some(Box::new(callback));
        self
    }

    /// Called once per confirmed upload
    pub fn on_load(
        mut self,
        callback: impl Fn(&UploadResult, &Snapshot) + Send + Sync + 'static,
    ) -> Self {
        self.on_load = Some(Box::new(callback));
        self
    }

    /// Called once per failed upload
    pub fn on_error(mut self, callback: impl Fn(&UploadFailure) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for SessionCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCallbacks")
            .field("on_update", &self.on_update.is_some())
            .field("on_load", &self.on_load.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}
