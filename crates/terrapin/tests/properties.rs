//! Property tests for the attestation engine.

use proptest::prelude::*;

use terrapin::core::DIGEST_SIZE;
use terrapin::{AttestError, Attestor, AttestorConfig};
use terrapin_testkit::generators::{attestation_bytes, chunk_capacity, payload};
use terrapin_testkit::{AttestParams, ShortReader, StubDigest};

proptest! {
    #[test]
    fn attested_data_verifies(params in any::<AttestParams>(), max_read in 1usize..=40) {
        let mut attestor = params.attestor();
        attestor.finalize().unwrap();

        prop_assert!(attestor.verify(&params.data[..]).unwrap());
        prop_assert!(attestor.verify(ShortReader::new(&params.data[..], max_read)).unwrap());
    }

    #[test]
    fn single_byte_mutation_detected(
        data in payload(300).prop_filter("non-empty", |d| !d.is_empty()),
        capacity in chunk_capacity(),
        offset in any::<prop::sample::Index>(),
        flip in 1u8..=255,
    ) {
        let config = AttestorConfig::new(capacity).unwrap();
        let mut attestor = Attestor::with_config(config);
        attestor.add(&data).unwrap();
        attestor.finalize().unwrap();

        let mut mutated = data.clone();
        mutated[offset.index(data.len())] ^= flip;
        prop_assert!(!attestor.verify(&mutated[..]).unwrap());
    }

    #[test]
    fn finalize_is_idempotent(params: AttestParams) {
        let mut attestor = params.attestor();
        let first = attestor.finalize().unwrap();
        let second = attestor.finalize().unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn reconstruction_requires_whole_digests(bytes in attestation_bytes()) {
        let result = Attestor::from_attestations(&bytes);
        if bytes.len() % DIGEST_SIZE == 0 {
            let attestor = result.unwrap();
            prop_assert!(attestor.is_finalized());
            prop_assert_eq!(attestor.attestations().to_bytes(), bytes);
        } else {
            let is_invalid = matches!(result, Err(AttestError::InvalidAttestations { .. }));
            prop_assert!(is_invalid);
        }
    }

    #[test]
    fn add_after_finalize_changes_nothing(params in any::<AttestParams>(), extra in payload(64)) {
        let mut attestor = params.attestor();
        let before = attestor.finalize().unwrap();

        let is_finalized_err = matches!(attestor.add(&extra), Err(AttestError::AlreadyFinalized));
        prop_assert!(is_finalized_err);
        prop_assert_eq!(attestor.finalize().unwrap(), before);
    }

    #[test]
    fn invalid_range_regardless_of_state(
        start in -100i64..100,
        end in -100i64..100,
        finalized in any::<bool>(),
    ) {
        prop_assume!(start < 0 || end <= start);
        let mut attestor = Attestor::with_config(AttestorConfig::new(8).unwrap());
        attestor.add(&[0; 20]).unwrap();
        if finalized {
            attestor.finalize().unwrap();
        }

        let result = attestor.verify_range(std::io::empty(), start, end);
        let is_invalid = matches!(result, Err(AttestError::InvalidRange { .. }));
        prop_assert!(is_invalid);
    }

    #[test]
    fn every_range_of_attested_data_verifies(
        params in any::<AttestParams>(),
        a in any::<prop::sample::Index>(),
        b in any::<prop::sample::Index>(),
    ) {
        prop_assume!(!params.data.is_empty());
        let mut attestor = params.attestor();
        attestor.finalize().unwrap();

        let len = params.data.len();
        let (x, y) = (a.index(len), b.index(len) + 1);
        let (start, end) = (x.min(y - 1), x.max(y));
        let aligned = (start / params.chunk_capacity) * params.chunk_capacity;

        let source = &params.data[aligned..];
        prop_assert!(attestor.verify_range(source, start as i64, end as i64).unwrap());
    }

    #[test]
    fn stub_digest_round_trip(data in payload(300), capacity in chunk_capacity()) {
        let config = AttestorConfig::new(capacity).unwrap();
        let mut attestor = Attestor::with_digest(config, StubDigest);
        attestor.add(&data).unwrap();
        let (id, _) = attestor.finalize().unwrap();

        prop_assert!(id.uri().starts_with("gitoid:blob:stub:"));
        prop_assert!(attestor.verify(&data[..]).unwrap());
    }
}
