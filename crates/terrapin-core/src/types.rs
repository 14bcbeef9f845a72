//! Strong types for digests, identifiers, and attestation lists.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::digest::DIGEST_SIZE;
use crate::error::{AttestError, Result};

/// A 32-byte digest of one chunk (or of a whole attestation list).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Digest(pub [u8; DIGEST_SIZE]);

impl Digest {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> std::result::Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != DIGEST_SIZE {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; DIGEST_SIZE];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; DIGEST_SIZE]> for Digest {
    fn from(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for Digest {
    type Error = std::array::TryFromSliceError;

    fn try_from(slice: &[u8]) -> std::result::Result<Self, Self::Error> {
        let arr: [u8; DIGEST_SIZE] = slice.try_into()?;
        Ok(Self(arr))
    }
}

/// The top-level identifier of an attested stream.
///
/// Displays as `gitoid:blob:<algorithm>:<hex>`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GitOid {
    algorithm: String,
    digest: Digest,
}

impl GitOid {
    /// Create an identifier from an algorithm name and digest.
    pub fn new(algorithm: impl Into<String>, digest: Digest) -> Self {
        Self {
            algorithm: algorithm.into(),
            digest,
        }
    }

    /// The algorithm name, e.g. `sha256`.
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// The raw digest.
    pub const fn digest(&self) -> &Digest {
        &self.digest
    }

    /// The URI form.
    pub fn uri(&self) -> String {
        self.to_string()
    }
}

impl fmt::Debug for GitOid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GitOid({}:{})", self.algorithm, &self.digest.to_hex()[..16])
    }
}

impl fmt::Display for GitOid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gitoid:blob:{}:{}", self.algorithm, self.digest.to_hex())
    }
}

/// Ordered chunk digests. Index `i` is the digest of chunk `i` of the stream.
///
/// The byte form is a flat concatenation of digests with no header, which is
/// also the attestation file format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestationList(Vec<Digest>);

impl AttestationList {
    /// Create an empty list.
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Parse the flat byte form.
    ///
    /// Fails with [`AttestError::InvalidAttestations`] unless the length is a
    /// multiple of [`DIGEST_SIZE`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() % DIGEST_SIZE != 0 {
            return Err(AttestError::InvalidAttestations { len: bytes.len() });
        }
        let digests = bytes
            .chunks_exact(DIGEST_SIZE)
            .map(|chunk| {
                let mut arr = [0u8; DIGEST_SIZE];
                arr.copy_from_slice(chunk);
                Digest(arr)
            })
            .collect();
        Ok(Self(digests))
    }

    /// Flat byte form: every digest concatenated in chunk order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.0.len() * DIGEST_SIZE);
        for digest in &self.0 {
            out.extend_from_slice(digest.as_bytes());
        }
        out
    }

    /// Digest of chunk `index`, if attested.
    pub fn get(&self, index: usize) -> Option<&Digest> {
        self.0.get(index)
    }

    /// Number of attested chunks.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no chunk has been attested.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length of the flat byte form.
    pub fn byte_len(&self) -> usize {
        self.0.len() * DIGEST_SIZE
    }

    /// Iterate digests in chunk order.
    pub fn iter(&self) -> std::slice::Iter<'_, Digest> {
        self.0.iter()
    }

    pub(crate) fn push(&mut self, digest: Digest) {
        self.0.push(digest);
    }
}

impl<'a> IntoIterator for &'a AttestationList {
    type Item = &'a Digest;
    type IntoIter = std::slice::Iter<'a, Digest>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Vec<Digest>> for AttestationList {
    fn from(digests: Vec<Digest>) -> Self {
        Self(digests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_hex_roundtrip() {
        let digest = Digest::from_bytes([0x42; 32]);
        let recovered = Digest::from_hex(&digest.to_hex()).unwrap();
        assert_eq!(digest, recovered);
        assert!(Digest::from_hex("abcd").is_err());
    }

    #[test]
    fn test_digest_debug() {
        let debug = format!("{:?}", Digest::from_bytes([0xcd; 32]));
        assert_eq!(debug, "Digest(cdcdcdcdcdcdcdcd)");
    }

    #[test]
    fn test_gitoid_uri() {
        let id = GitOid::new("sha256", Digest::from_bytes([0xab; 32]));
        assert_eq!(id.uri(), format!("gitoid:blob:sha256:{}", "ab".repeat(32)));
        assert_eq!(id.algorithm(), "sha256");
    }

    #[test]
    fn test_attestation_list_byte_form() {
        let list = AttestationList::from(vec![
            Digest::from_bytes([1; 32]),
            Digest::from_bytes([2; 32]),
        ]);
        let bytes = list.to_bytes();
        assert_eq!(bytes.len(), 64);
        assert_eq!(&bytes[..32], &[1; 32]);
        assert_eq!(&bytes[32..], &[2; 32]);
        assert_eq!(AttestationList::from_bytes(&bytes).unwrap(), list);
    }

    #[test]
    fn test_attestation_list_rejects_partial_digest() {
        for len in [1usize, 31, 33, 63] {
            let err = AttestationList::from_bytes(&vec![0u8; len]).unwrap_err();
            assert!(matches!(err, AttestError::InvalidAttestations { len: l } if l == len));
        }
        assert!(AttestationList::from_bytes(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_attestation_list_json() {
        let list = AttestationList::from(vec![Digest::from_bytes([7; 32])]);
        let json = serde_json::to_string(&list).unwrap();
        let back: AttestationList = serde_json::from_str(&json).unwrap();
        assert_eq!(list, back);
    }
}
