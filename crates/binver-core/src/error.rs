//! Error types for version detection.

use std::io;
use std::path::PathBuf;

/// Usage errors surfaced by [`crate::resolve::detect_version`] and
/// [`crate::checksum::compute_digest`].
///
/// An unknown version is not an error; see [`crate::resolve::Detection::Unknown`].
#[derive(Debug, thiserror::Error)]
pub enum DetectError {
    /// Path was missing, empty, or whitespace-only. No I/O was attempted.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// The file could not be opened or read for hashing.
    #[error("cannot read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DetectError {
    pub(crate) fn blank_path() -> Self {
        DetectError::InvalidInput {
            reason: "file path is missing or blank".to_string(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        DetectError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, DetectError::InvalidInput { .. })
    }

    pub fn is_io(&self) -> bool {
        matches!(self, DetectError::Io { .. })
    }
}
