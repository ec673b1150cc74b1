//! Uplink Common Library
//!
//! Shared helpers for the Uplink upload coordinator: file naming, size
//! labels, admission defaults and rejection kinds.

mod error_kind;
pub mod file_name;
pub mod file_size;

pub use error_kind::RejectionKind;
pub use file_name::{ID_PREFIX, SplitName, item_id, strip_name_from_extension};
pub use file_size::{bytes_to_mb, pretty_file_size};

/// Default maximum number of files per session
pub const DEFAULT_MAX_FILES: usize = 10;

/// Default form field name the file is attached under
pub const DEFAULT_FIELD_NAME: &str = "file";

/// Number of files a session may still accept
///
/// Never negative: a session holding more entries than its limit
/// (rejected entries also occupy the registry) has no open slots.
pub fn open_slots(file_count: usize, max_files: usize) -> usize {
    max_files.saturating_sub(file_count)
}
