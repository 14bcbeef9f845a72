//! Error types for the file-level operations.

use std::io;
use std::path::PathBuf;

use terrapin_core::AttestError;
use thiserror::Error;

/// Errors that can occur while attesting or validating files.
#[derive(Debug, Error)]
pub enum TerrapinError {
    /// Attestation engine error.
    #[error(transparent)]
    Attest(#[from] AttestError),

    /// File could not be opened, read, written, or positioned.
    #[error("failed to {action} {}: {source}", .path.display())]
    File {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing verified content to the output failed.
    #[error("failed to echo file contents: {0}")]
    Output(#[source] io::Error),

    /// The requested range extends past the end of the file.
    #[error("requested range ends at {end}, past the end of the file ({file_len} bytes)")]
    RangePastEnd { end: u64, file_len: u64 },

    /// The file ended while echoing a range that fit when checked.
    #[error("failed to echo file contents: expected {expected} bytes, copied {copied}")]
    ShortEcho { expected: u64, copied: u64 },

    /// The data does not match its attestations.
    #[error("file verification failed")]
    VerificationFailed,
}

impl TerrapinError {
    /// Map an I/O error on `path` into [`TerrapinError::File`].
    pub(crate) fn file(
        action: &'static str,
        path: impl Into<PathBuf>,
    ) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| TerrapinError::File {
            action,
            path,
            source,
        }
    }
}

/// Result type for file-level operations.
pub type Result<T> = std::result::Result<T, TerrapinError>;
