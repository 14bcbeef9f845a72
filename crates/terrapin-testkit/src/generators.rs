//! Proptest generators for property-based testing.

use proptest::prelude::*;

use terrapin_core::{Attestor, AttestorConfig, DIGEST_SIZE};

/// A small chunk capacity, so that short payloads span many chunks.
pub fn chunk_capacity() -> impl Strategy<Value = usize> {
    1usize..=64
}

/// Payload bytes of up to `max_len` bytes.
pub fn payload(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Attestation bytes of arbitrary length, valid or not.
pub fn attestation_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=DIGEST_SIZE * 6)
}

/// Parameters for attesting a payload fed in several `add` calls.
#[derive(Debug, Clone)]
pub struct AttestParams {
    pub data: Vec<u8>,
    pub chunk_capacity: usize,
    /// Sizes of successive `add` calls; the tail goes in one final call.
    pub splits: Vec<usize>,
}

impl AttestParams {
    /// Feed `data` through a fresh attestor in `splits`-sized pieces.
    ///
    /// The attestor is left open.
    pub fn attestor(&self) -> Attestor {
        let config = AttestorConfig::new(self.chunk_capacity).expect("non-zero chunk capacity");
        let mut attestor = Attestor::with_config(config);
        let mut rest = &self.data[..];
        for &split in &self.splits {
            let (piece, tail) = rest.split_at(split.min(rest.len()));
            attestor.add(piece).expect("open attestor accepts data");
            rest = tail;
        }
        attestor.add(rest).expect("open attestor accepts data");
        attestor
    }
}

impl Arbitrary for AttestParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            payload(512),
            chunk_capacity(),
            prop::collection::vec(0usize..=96, 0..8),
        )
            .prop_map(|(data, chunk_capacity, splits)| AttestParams {
                data,
                chunk_capacity,
                splits,
            })
            .boxed()
    }
}
