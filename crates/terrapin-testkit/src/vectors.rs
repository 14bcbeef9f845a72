//! Golden test vectors.
//!
//! Each vector attests a known input and checks the resulting chunk count
//! and, where pinned, the gitoid URI. Pinned URIs are checkable against git
//! itself: an attestation list is a blob, so `git hash-object
//! --object-format=sha256` over the attestation file yields the same hex.

use terrapin_core::{Attestor, AttestorConfig, DEFAULT_CHUNK_CAPACITY};

use crate::fixtures::patterned_data;

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Input length; the input is [`patterned_data`] of this length.
    pub len: usize,
    /// Chunk capacity used to attest.
    pub chunk_capacity: usize,
    /// Expected number of attestations.
    pub expected_chunks: usize,
    /// Expected URI, if pinned.
    pub expected_uri: Option<&'static str>,
}

impl GoldenVector {
    /// The input bytes.
    pub fn data(&self) -> Vec<u8> {
        patterned_data(self.len)
    }

    /// Attest the input and return the finalized attestor.
    pub fn attest(&self) -> Attestor {
        let config = AttestorConfig::new(self.chunk_capacity).expect("non-zero chunk capacity");
        let mut attestor = Attestor::with_config(config);
        attestor.add(&self.data()).expect("open attestor accepts data");
        attestor.finalize().expect("finalize");
        attestor
    }
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "empty stream",
            len: 0,
            chunk_capacity: DEFAULT_CHUNK_CAPACITY,
            expected_chunks: 0,
            // The sha256 object id of the empty blob.
            expected_uri: Some(
                "gitoid:blob:sha256:473a0f4c3be8a93681a267e3b1e9a7dcda1185436fe141f7749120a303721813",
            ),
        },
        GoldenVector {
            name: "five bytes",
            len: 5,
            chunk_capacity: DEFAULT_CHUNK_CAPACITY,
            expected_chunks: 1,
            expected_uri: None,
        },
        GoldenVector {
            name: "one byte past a chunk",
            len: 65,
            chunk_capacity: 64,
            expected_chunks: 2,
            expected_uri: None,
        },
        GoldenVector {
            name: "exact multiple",
            len: 256,
            chunk_capacity: 64,
            expected_chunks: 4,
            expected_uri: None,
        },
        GoldenVector {
            name: "single byte chunks",
            len: 9,
            chunk_capacity: 1,
            expected_chunks: 9,
            expected_uri: None,
        },
    ]
}

/// Attest every vector. Returns `(name, ok, uri)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let attestor = v.attest();
            let uri = attestor.id().map(|id| id.uri()).unwrap_or_default();
            let chunks_ok = attestor.chunk_count() == v.expected_chunks;
            let uri_ok = v.expected_uri.map_or(true, |expected| expected == uri);
            (v.name.to_string(), chunks_ok && uri_ok, uri)
        })
        .collect()
}
