//! The digest capability applied to chunks and to the attestation list.
//!
//! The engine only depends on [`DigestFunction`]. [`GitoidSha256`] is the
//! implementation used by the reference tooling: every chunk is digested as
//! a git blob object under SHA-256, so a chunk's attestation equals the
//! object id git would assign to a file with the same contents.

use sha2::{Digest as _, Sha256};
use thiserror::Error;

use crate::types::Digest;

/// Size in bytes of every digest in an attestation list.
pub const DIGEST_SIZE: usize = 32;

/// Failure inside a digest function.
#[derive(Debug, Error)]
#[error("failed to compute digest: {0}")]
pub struct DigestError(pub String);

/// A content-addressing hash producing [`DIGEST_SIZE`]-byte digests.
///
/// Implementations must be deterministic. They are shared between verifying
/// threads, hence `Send + Sync`.
pub trait DigestFunction: Send + Sync {
    /// Algorithm name used in the identifier URI, e.g. `sha256`.
    fn algorithm(&self) -> &'static str;

    /// Digest a byte span.
    fn digest(&self, data: &[u8]) -> Result<Digest, DigestError>;
}

/// Git blob object id over SHA-256: `SHA-256("blob <len>\0" || data)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GitoidSha256;

impl DigestFunction for GitoidSha256 {
    fn algorithm(&self) -> &'static str {
        "sha256"
    }

    fn digest(&self, data: &[u8]) -> Result<Digest, DigestError> {
        let mut hasher = Sha256::new();
        hasher.update(b"blob ");
        hasher.update(data.len().to_string().as_bytes());
        hasher.update([0u8]);
        hasher.update(data);

        let mut out = [0u8; DIGEST_SIZE];
        out.copy_from_slice(&hasher.finalize());
        Ok(Digest::from_bytes(out))
    }
}

impl<T: DigestFunction + ?Sized> DigestFunction for &T {
    fn algorithm(&self) -> &'static str {
        (**self).algorithm()
    }

    fn digest(&self, data: &[u8]) -> Result<Digest, DigestError> {
        (**self).digest(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::Digest as _;

    #[test]
    fn test_empty_blob_matches_git() {
        // `git hash-object --object-format=sha256 /dev/null`
        let digest = GitoidSha256.digest(b"").unwrap();
        assert_eq!(
            digest.to_hex(),
            "473a0f4c3be8a93681a267e3b1e9a7dcda1185436fe141f7749120a303721813"
        );
    }

    #[test]
    fn test_blob_header_is_hashed() {
        let data = b"hello world";
        let mut plain = Sha256::new();
        plain.update(data);
        let plain = plain.finalize();

        let gitoid = GitoidSha256.digest(data).unwrap();
        assert_ne!(gitoid.as_bytes().as_slice(), plain.as_slice());

        let mut framed = Sha256::new();
        framed.update(b"blob 11\0hello world");
        assert_eq!(gitoid.as_bytes().as_slice(), framed.finalize().as_slice());
    }

    #[test]
    fn test_digest_deterministic() {
        let d1 = GitoidSha256.digest(b"test data").unwrap();
        let d2 = GitoidSha256.digest(b"test data").unwrap();
        assert_eq!(d1, d2);

        let d3 = GitoidSha256.digest(b"different data").unwrap();
        assert_ne!(d1, d3);
    }
}
