//! Error types for the attestation engine.

use thiserror::Error;

use crate::config::MAX_CHUNK_CAPACITY;
use crate::digest::{DigestError, DIGEST_SIZE};

/// Errors that can occur during attestation and verification.
///
/// A verification mismatch is not an error: verification returns
/// `Ok(false)` for data that does not match its attestations.
#[derive(Debug, Error)]
pub enum AttestError {
    /// Bytes were added after the attestor was finalized.
    #[error("terrapin attestor already finalized")]
    AlreadyFinalized,

    /// Verification was attempted before the attestor was finalized.
    #[error("terrapin attestor not finalized")]
    NotFinalized,

    /// Stored attestations are not a whole number of digests.
    #[error("invalid attestations: length {len} is not a multiple of {}", DIGEST_SIZE)]
    InvalidAttestations { len: usize },

    /// Byte range with a negative start or an end not past the start.
    #[error("invalid range: start {start}, end {end}")]
    InvalidRange { start: i64, end: i64 },

    /// Chunk capacity of zero or above the supported maximum.
    #[error("chunk capacity must be between 1 and {} bytes", MAX_CHUNK_CAPACITY)]
    InvalidChunkCapacity,

    /// The byte source failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The digest function failed.
    #[error(transparent)]
    Digest(#[from] DigestError),
}

/// Result type for attestation operations.
pub type Result<T> = std::result::Result<T, AttestError>;
