//! Verification of a byte source against a finalized attestation list.
//!
//! Both verifiers re-chunk the source with the attestor's chunk capacity and
//! compare digests index by index. A mismatch is `Ok(false)`; errors are
//! reserved for conditions under which verification could not run.

use std::io::{self, Read};

use tracing::debug;

use crate::attestor::Attestor;
use crate::digest::DigestFunction;
use crate::error::{AttestError, Result};
use crate::types::AttestationList;

/// Fill `buf` from `reader`, tolerating short reads.
///
/// Returns the number of bytes read, which is less than `buf.len()` only
/// when the source is exhausted.
pub fn read_chunk<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// A byte range widened outward to chunk boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRange {
    /// Byte offset of the first chunk (start rounded down).
    pub start_offset: u64,
    /// Byte offset just past the last chunk (end rounded up).
    pub end_offset: u64,
    /// Index of the first chunk in the range.
    pub first_chunk: u64,
    /// Index one past the last chunk in the range.
    pub end_chunk: u64,
}

impl ChunkRange {
    /// Align `[start, end)` to `chunk_capacity` boundaries.
    ///
    /// Fails with [`AttestError::InvalidRange`] if `start < 0` or `end <= start`.
    pub fn align(start: i64, end: i64, chunk_capacity: usize) -> Result<Self> {
        if start < 0 || end <= start {
            return Err(AttestError::InvalidRange { start, end });
        }
        if chunk_capacity == 0 {
            return Err(AttestError::InvalidChunkCapacity);
        }

        let capacity = chunk_capacity as u64;
        let first_chunk = start as u64 / capacity;
        let end_chunk = (end as u64).div_ceil(capacity);
        Ok(Self {
            start_offset: first_chunk * capacity,
            end_offset: end_chunk.saturating_mul(capacity),
            first_chunk,
            end_chunk,
        })
    }

    /// Number of chunks covered.
    pub fn chunk_count(&self) -> u64 {
        self.end_chunk - self.first_chunk
    }
}

impl<D: DigestFunction> Attestor<D> {
    /// Verify an entire byte source against the attestation list.
    ///
    /// Returns `Ok(true)` only if the source yields exactly the attested
    /// chunks: every digest matches, no attested chunk is missing, and
    /// nothing follows the last one. Stops reading at the first mismatch.
    pub fn verify<R: Read>(&self, mut reader: R) -> Result<bool> {
        let attestations = self.finalized_attestations()?;
        let mut buffer = vec![0u8; self.chunk_capacity()];

        let mut index = 0;
        loop {
            let n = read_chunk(&mut reader, &mut buffer)?;
            if n == 0 {
                if index < attestations.len() {
                    debug!(index, expected = attestations.len(), "source truncated");
                    return Ok(false);
                }
                return Ok(true);
            }
            if !self.chunk_matches(attestations, index, &buffer[..n])? {
                return Ok(false);
            }
            index += 1;
        }
    }

    /// Verify the chunks overlapping `[start, end)`.
    ///
    /// The range is widened to chunk boundaries (see [`ChunkRange::align`]).
    /// The caller positions `reader` at the aligned start offset. Reading
    /// stops at the end of the aligned range, at the end of the source, or
    /// at the first mismatch.
    pub fn verify_range<R: Read>(&self, mut reader: R, start: i64, end: i64) -> Result<bool> {
        let range = ChunkRange::align(start, end, self.chunk_capacity())?;
        let attestations = self.finalized_attestations()?;
        let mut buffer = vec![0u8; self.chunk_capacity()];

        let first = usize::try_from(range.first_chunk).unwrap_or(usize::MAX);
        let last = usize::try_from(range.end_chunk).unwrap_or(usize::MAX);
        for index in first..last {
            let n = read_chunk(&mut reader, &mut buffer)?;
            if n == 0 {
                break;
            }
            if !self.chunk_matches(attestations, index, &buffer[..n])? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn chunk_matches(
        &self,
        attestations: &AttestationList,
        index: usize,
        chunk: &[u8],
    ) -> Result<bool> {
        let Some(expected) = attestations.get(index) else {
            debug!(index, "chunk beyond attested length");
            return Ok(false);
        };
        let computed = self.digest_function().digest(chunk)?;
        if &computed != expected {
            debug!(index, ?expected, ?computed, "chunk digest mismatch");
            return Ok(false);
        }
        Ok(true)
    }
}
