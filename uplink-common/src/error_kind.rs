//! Machine-readable rejection kinds for admission control
//!
//! These kinds travel alongside the user-facing limit text in upload
//! metadata, allowing front ends to make decisions based on why a file
//! was refused (e.g., suggesting compression for oversized files).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a file was refused at attach time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionKind {
    /// The session already holds its maximum number of files
    MaxFiles,

    /// The file is larger than the configured size limit
    ///
    /// Checked before the count limit, so an oversized file reports
    /// this kind even when slots are exhausted.
    MaxFileSize,
}

impl RejectionKind {
    /// Convert to the string representation used in serialized metadata
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MaxFiles => "max_files",
            Self::MaxFileSize => "max_file_size",
        }
    }

    /// Parse from string
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "max_files" => Some(Self::MaxFiles),
            "max_file_size" => Some(Self::MaxFileSize),
            _ => None,
        }
    }
}

impl fmt::Display for RejectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<RejectionKind> for String {
    fn from(kind: RejectionKind) -> Self {
        kind.as_str().to_string()
    }
}
