//! Application-wide constants
//!
//! Shared constants used across multiple modules.

/// Application directory name (used in config directory path)
pub const APP_DIR_NAME: &str = "uplink";

/// Session config file name
pub const CONFIG_FILE_NAME: &str = "session.json";

/// User agent sent with every upload
pub const USER_AGENT: &str = concat!("uplink/", env!("CARGO_PKG_VERSION"));

/// Chunk size for streamed file bodies (one progress tick per chunk)
pub const UPLOAD_CHUNK_SIZE: usize = 64 * 1024; // 64KB

/// Highest progress shown before the server confirms an upload
pub const IN_FLIGHT_PROGRESS_CAP: f64 = 99.0;

/// Key used to wrap response bodies that are not valid JSON
pub const RAW_RESPONSE_KEY: &str = "raw";

/// Reason shown for files over the count limit when the config has none
pub const DEFAULT_MAX_FILES_TEXT: &str = "Maximum number of files reached";

/// Reason shown for files over the size limit when the config has none
pub const DEFAULT_MAX_FILE_SIZE_TEXT: &str = "File exceeds the maximum file size";

/// Text field carrying the file's MIME type, sent just before the file part
pub const MIME_TYPE_FIELD: &str = "content-type";
