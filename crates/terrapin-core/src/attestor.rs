//! The attestor: chunk accumulation and finalization.
//!
//! An attestor is either open (accepting bytes) or finalized (frozen, with a
//! top-level identifier). The two states carry different data, so a
//! finalized attestor has no buffer and an open one has no identifier.
//!
//! ```text
//! Open --add--> Open
//! Open --finalize--> Finalized
//! Finalized --finalize--> Finalized   (same result, no recomputation)
//! Finalized --add--> AlreadyFinalized (no state change)
//! ```

use std::io;

use tracing::debug;

use crate::config::AttestorConfig;
use crate::digest::{DigestFunction, GitoidSha256};
use crate::error::{AttestError, Result};
use crate::types::{AttestationList, GitOid};

#[derive(Debug, Clone)]
enum State {
    Open {
        /// Bytes not yet flushed. Shorter than the chunk capacity between calls.
        buffer: Vec<u8>,
        attestations: AttestationList,
    },
    Finalized {
        attestations: AttestationList,
        id: GitOid,
    },
}

/// Chunked content attestor.
///
/// Owned by a single caller while open: `add` and `finalize` take `&mut self`.
/// Once finalized, verification takes `&self` and may run from several
/// threads against distinct byte sources.
#[derive(Debug, Clone)]
pub struct Attestor<D: DigestFunction = GitoidSha256> {
    config: AttestorConfig,
    digest: D,
    state: State,
}

impl Attestor<GitoidSha256> {
    /// Create an open attestor with the default 2 MiB chunk capacity.
    pub fn new() -> Self {
        Self::with_config(AttestorConfig::default())
    }

    /// Create an open attestor with a custom config.
    pub fn with_config(config: AttestorConfig) -> Self {
        Self::with_digest(config, GitoidSha256)
    }

    /// Reconstruct a finalized attestor from stored attestation bytes.
    ///
    /// Fails with [`AttestError::InvalidAttestations`] if `attestations` is
    /// not a whole number of digests.
    pub fn from_attestations(attestations: &[u8]) -> Result<Self> {
        Self::from_attestations_with(AttestorConfig::default(), GitoidSha256, attestations)
    }
}

impl Default for Attestor<GitoidSha256> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: DigestFunction> Attestor<D> {
    /// Create an open attestor with a custom config and digest function.
    pub fn with_digest(config: AttestorConfig, digest: D) -> Self {
        Self {
            config,
            digest,
            state: State::Open {
                buffer: Vec::with_capacity(config.chunk_capacity()),
                attestations: AttestationList::new(),
            },
        }
    }

    /// Reconstruct a finalized attestor with a custom config and digest function.
    pub fn from_attestations_with(
        config: AttestorConfig,
        digest: D,
        attestations: &[u8],
    ) -> Result<Self> {
        let list = AttestationList::from_bytes(attestations)?;
        let id = GitOid::new(digest.algorithm(), digest.digest(attestations)?);
        debug!(chunks = list.len(), %id, "restored attestations");

        Ok(Self {
            config,
            digest,
            state: State::Finalized {
                attestations: list,
                id,
            },
        })
    }

    /// Append bytes, flushing a chunk digest every time the buffer fills.
    ///
    /// Input of any length is accepted; whole chunks are flushed and the
    /// remainder stays buffered until the next `add` or `finalize`. On a
    /// digest failure every byte taken so far is either attested or
    /// buffered, and the failed chunk is retried by the next call.
    pub fn add(&mut self, data: &[u8]) -> Result<()> {
        self.append(data).1
    }

    /// Like `add`, also returning how many bytes of `data` were taken.
    fn append(&mut self, data: &[u8]) -> (usize, Result<()>) {
        let capacity = self.config.chunk_capacity();
        let State::Open {
            buffer,
            attestations,
        } = &mut self.state
        else {
            return (0, Err(AttestError::AlreadyFinalized));
        };

        let mut remaining = data;
        loop {
            let taken = data.len() - remaining.len();

            // Only full after a digest failure.
            if buffer.len() >= capacity {
                if let Err(e) = flush_chunk(&self.digest, buffer, attestations) {
                    return (taken, Err(e));
                }
                buffer.clear();
            }

            if remaining.is_empty() {
                return (taken, Ok(()));
            }

            // Whole chunks straight from the input skip the buffer copy.
            if buffer.is_empty() && remaining.len() >= capacity {
                let (chunk, rest) = remaining.split_at(capacity);
                if let Err(e) = flush_chunk(&self.digest, chunk, attestations) {
                    buffer.extend_from_slice(chunk);
                    return (taken + capacity, Err(e));
                }
                remaining = rest;
                continue;
            }

            let take = remaining.len().min(capacity - buffer.len());
            buffer.extend_from_slice(&remaining[..take]);
            remaining = &remaining[take..];
        }
    }

    /// Flush any buffered bytes as the final chunk and freeze the attestor.
    ///
    /// Returns the identifier and a copy of the attestation list. Calling it
    /// again returns the same values without recomputing. A digest failure
    /// leaves the attestor open and unchanged.
    pub fn finalize(&mut self) -> Result<(GitOid, AttestationList)> {
        let (buffer, attestations) = match &mut self.state {
            State::Finalized { attestations, id } => {
                return Ok((id.clone(), attestations.clone()));
            }
            State::Open {
                buffer,
                attestations,
            } => (buffer, attestations),
        };

        let tail = if buffer.is_empty() {
            None
        } else {
            Some(self.digest.digest(buffer)?)
        };

        let mut concatenated = attestations.to_bytes();
        if let Some(tail) = &tail {
            concatenated.extend_from_slice(tail.as_bytes());
        }
        let id = GitOid::new(self.digest.algorithm(), self.digest.digest(&concatenated)?);

        let mut attestations = std::mem::take(attestations);
        if let Some(tail) = tail {
            attestations.push(tail);
        }
        debug!(chunks = attestations.len(), %id, "attestor finalized");

        self.state = State::Finalized {
            attestations: attestations.clone(),
            id: id.clone(),
        };
        Ok((id, attestations))
    }

    /// Whether `finalize` has completed.
    pub fn is_finalized(&self) -> bool {
        matches!(self.state, State::Finalized { .. })
    }

    /// The top-level identifier, once finalized.
    pub fn id(&self) -> Option<&GitOid> {
        match &self.state {
            State::Finalized { id, .. } => Some(id),
            State::Open { .. } => None,
        }
    }

    /// Digests flushed so far (all of them, once finalized).
    pub fn attestations(&self) -> &AttestationList {
        match &self.state {
            State::Open { attestations, .. } | State::Finalized { attestations, .. } => {
                attestations
            }
        }
    }

    /// Number of chunks attested so far.
    pub fn chunk_count(&self) -> usize {
        self.attestations().len()
    }

    /// Bytes waiting for the next flush. Always zero once finalized.
    pub fn buffered_len(&self) -> usize {
        match &self.state {
            State::Open { buffer, .. } => buffer.len(),
            State::Finalized { .. } => 0,
        }
    }

    /// The configured chunk capacity.
    pub fn chunk_capacity(&self) -> usize {
        self.config.chunk_capacity()
    }

    pub(crate) fn digest_function(&self) -> &D {
        &self.digest
    }

    /// Attestation list of a finalized attestor.
    pub(crate) fn finalized_attestations(&self) -> Result<&AttestationList> {
        match &self.state {
            State::Finalized { attestations, .. } => Ok(attestations),
            State::Open { .. } => Err(AttestError::NotFinalized),
        }
    }
}

fn flush_chunk<D: DigestFunction>(
    digest: &D,
    chunk: &[u8],
    attestations: &mut AttestationList,
) -> Result<()> {
    let chunk_digest = digest.digest(chunk)?;
    debug!(
        index = attestations.len(),
        len = chunk.len(),
        digest = ?chunk_digest,
        "chunk flushed"
    );
    attestations.push(chunk_digest);
    Ok(())
}

impl<D: DigestFunction> io::Write for Attestor<D> {
    /// Reports partial progress as `Ok(n)`; an error means nothing was taken.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.append(buf) {
            (_, Ok(())) => Ok(buf.len()),
            (taken, Err(_)) if taken > 0 => Ok(taken),
            (_, Err(e)) => Err(io::Error::new(io::ErrorKind::Other, e)),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(capacity: usize) -> Attestor {
        Attestor::with_config(AttestorConfig::new(capacity).unwrap())
    }

    #[test]
    fn test_new_attestor_is_open_and_empty() {
        let attestor = Attestor::new();
        assert!(!attestor.is_finalized());
        assert_eq!(attestor.chunk_count(), 0);
        assert_eq!(attestor.buffered_len(), 0);
        assert!(attestor.id().is_none());
        assert_eq!(attestor.chunk_capacity(), 2 * 1024 * 1024);
    }

    #[test]
    fn test_add_buffers_partial_chunk() {
        let mut attestor = Attestor::new();
        attestor.add(&[1, 2, 3, 4, 5]).unwrap();
        assert_eq!(attestor.buffered_len(), 5);
        assert_eq!(attestor.chunk_count(), 0);
    }

    #[test]
    fn test_add_flushes_full_chunks() {
        let mut attestor = small(4);
        attestor.add(&[0; 10]).unwrap();
        assert_eq!(attestor.chunk_count(), 2);
        assert_eq!(attestor.buffered_len(), 2);

        attestor.add(&[0; 2]).unwrap();
        assert_eq!(attestor.chunk_count(), 3);
        assert_eq!(attestor.buffered_len(), 0);
    }

    #[test]
    fn test_add_empty_is_noop() {
        let mut attestor = small(4);
        attestor.add(&[]).unwrap();
        assert_eq!(attestor.chunk_count(), 0);
        assert_eq!(attestor.buffered_len(), 0);
    }

    #[test]
    fn test_split_adds_match_single_add() {
        let data: Vec<u8> = (0..=255).collect();

        let mut whole = small(7);
        whole.add(&data).unwrap();

        let mut pieces = small(7);
        for piece in data.chunks(3) {
            pieces.add(piece).unwrap();
        }

        assert_eq!(whole.finalize().unwrap(), pieces.finalize().unwrap());
    }

    #[test]
    fn test_finalize_single_chunk_digest() {
        let data = [1u8, 2, 3, 4, 5];
        let mut attestor = Attestor::new();
        attestor.add(&data).unwrap();

        let (id, attestations) = attestor.finalize().unwrap();
        assert_eq!(attestations.len(), 1);
        assert_eq!(attestations.get(0), Some(&GitoidSha256.digest(&data).unwrap()));

        let expected = GitoidSha256.digest(&attestations.to_bytes()).unwrap();
        assert_eq!(id.digest(), &expected);
        assert!(!id.uri().is_empty());
    }

    #[test]
    fn test_exact_multiple_has_no_empty_chunk() {
        let mut attestor = small(8);
        attestor.add(&[9; 32]).unwrap();
        let (_, attestations) = attestor.finalize().unwrap();
        assert_eq!(attestations.len(), 4);
    }

    #[test]
    fn test_finalize_empty_is_deterministic() {
        let (id1, list1) = Attestor::new().finalize().unwrap();
        let (id2, list2) = Attestor::new().finalize().unwrap();
        assert!(list1.is_empty());
        assert_eq!(id1, id2);
        assert_eq!(id1.digest(), &GitoidSha256.digest(b"").unwrap());
    }

    #[test]
    fn test_finalize_idempotent() {
        let mut attestor = small(4);
        attestor.add(b"hello world").unwrap();
        let first = attestor.finalize().unwrap();
        let second = attestor.finalize().unwrap();
        assert_eq!(first, second);
        assert!(attestor.is_finalized());
        assert_eq!(attestor.id(), Some(&first.0));
    }

    #[test]
    fn test_returned_list_is_a_copy() {
        let mut attestor = small(4);
        attestor.add(b"abcdefgh").unwrap();
        let (_, list) = attestor.finalize().unwrap();
        drop(list);
        assert_eq!(attestor.attestations().len(), 2);
    }

    #[test]
    fn test_add_after_finalize_fails() {
        let mut attestor = small(4);
        attestor.add(b"abc").unwrap();
        let before = attestor.finalize().unwrap();

        let err = attestor.add(b"more").unwrap_err();
        assert!(matches!(err, AttestError::AlreadyFinalized));
        assert_eq!(err.to_string(), "terrapin attestor already finalized");
        assert_eq!(attestor.finalize().unwrap(), before);
    }

    #[test]
    fn test_from_attestations_is_finalized() {
        let mut original = small(4);
        original.add(b"0123456789").unwrap();
        let (id, list) = original.finalize().unwrap();

        let restored = Attestor::from_attestations(&list.to_bytes()).unwrap();
        assert!(restored.is_finalized());
        assert_eq!(restored.id(), Some(&id));
        assert_eq!(restored.attestations(), &list);
    }

    #[test]
    fn test_from_attestations_rejects_truncated() {
        let err = Attestor::from_attestations(&[0u8; 33]).unwrap_err();
        assert!(matches!(err, AttestError::InvalidAttestations { len: 33 }));
    }

    #[test]
    fn test_io_copy_into_attestor() {
        let data = vec![3u8; 100];
        let mut via_copy = small(16);
        io::copy(&mut &data[..], &mut via_copy).unwrap();

        let mut direct = small(16);
        direct.add(&data).unwrap();

        assert_eq!(via_copy.finalize().unwrap(), direct.finalize().unwrap());
    }
}
