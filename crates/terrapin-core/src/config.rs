//! Attestor configuration.

use crate::error::{AttestError, Result};

/// Chunk capacity used by the reference tooling: 2 MiB.
pub const DEFAULT_CHUNK_CAPACITY: usize = 2 * 1024 * 1024;

/// Largest accepted chunk capacity: 1 GiB. A whole chunk is held in memory.
pub const MAX_CHUNK_CAPACITY: usize = 1024 * 1024 * 1024;

/// Configuration for an [`Attestor`](crate::Attestor).
///
/// The chunk capacity is not recorded in the attestation list. Producer and
/// verifier must agree on it out of band; verifying with a different
/// capacity than the one used to attest will not match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttestorConfig {
    chunk_capacity: usize,
}

impl AttestorConfig {
    /// Create a config with the given chunk capacity in bytes.
    ///
    /// Fails with [`AttestError::InvalidChunkCapacity`] unless the capacity
    /// is in `1..=MAX_CHUNK_CAPACITY`.
    pub fn new(chunk_capacity: usize) -> Result<Self> {
        if chunk_capacity == 0 || chunk_capacity > MAX_CHUNK_CAPACITY {
            return Err(AttestError::InvalidChunkCapacity);
        }
        Ok(Self { chunk_capacity })
    }

    /// Size of every chunk except possibly the last.
    pub const fn chunk_capacity(&self) -> usize {
        self.chunk_capacity
    }
}

impl Default for AttestorConfig {
    fn default() -> Self {
        Self {
            chunk_capacity: DEFAULT_CHUNK_CAPACITY,
        }
    }
}
