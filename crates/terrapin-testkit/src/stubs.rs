//! Digest function stubs.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use terrapin_core::{Digest, DigestError, DigestFunction, GitoidSha256, DIGEST_SIZE};

/// A cheap deterministic digest: length in the first 8 bytes, then a
/// position-weighted byte sum. Not collision resistant; for engine tests
/// that only need determinism and sensitivity to single-byte changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubDigest;

impl DigestFunction for StubDigest {
    fn algorithm(&self) -> &'static str {
        "stub"
    }

    fn digest(&self, data: &[u8]) -> Result<Digest, DigestError> {
        let mut out = [0u8; DIGEST_SIZE];
        out[..8].copy_from_slice(&(data.len() as u64).to_le_bytes());
        for (i, byte) in data.iter().enumerate() {
            let slot = 8 + i % (DIGEST_SIZE - 8);
            out[slot] = out[slot]
                .wrapping_mul(31)
                .wrapping_add(*byte)
                .wrapping_add(i as u8);
        }
        Ok(Digest::from_bytes(out))
    }
}

/// Delegates to [`GitoidSha256`] for a fixed number of calls, then fails.
///
/// Built with [`FailingDigest::after`] it keeps failing; built with
/// [`FailingDigest::once_after`] it fails a single call and then recovers.
#[derive(Debug)]
pub struct FailingDigest {
    remaining: AtomicUsize,
    recover: bool,
    tripped: AtomicBool,
}

impl FailingDigest {
    /// Succeed `calls` times, then fail every call.
    pub fn after(calls: usize) -> Self {
        Self {
            remaining: AtomicUsize::new(calls),
            recover: false,
            tripped: AtomicBool::new(false),
        }
    }

    /// Succeed `calls` times, fail once, then succeed again.
    pub fn once_after(calls: usize) -> Self {
        Self {
            recover: true,
            ..Self::after(calls)
        }
    }
}

impl DigestFunction for FailingDigest {
    fn algorithm(&self) -> &'static str {
        "sha256"
    }

    fn digest(&self, data: &[u8]) -> Result<Digest, DigestError> {
        if self.recover && self.tripped.load(Ordering::SeqCst) {
            return GitoidSha256.digest(data);
        }
        if self
            .remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_err()
        {
            self.tripped.store(true, Ordering::SeqCst);
            return Err(DigestError("injected digest failure".into()));
        }
        GitoidSha256.digest(data)
    }
}
