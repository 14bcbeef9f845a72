//! # Terrapin Core
//!
//! The attestation engine: chunk a byte stream, digest every chunk, and
//! derive a single content identifier from the ordered list of digests.
//! The same list later re-verifies the stream, in full or over a byte range.
//!
//! This crate contains no file system access and no process concerns. It
//! operates on anything implementing [`std::io::Read`].
//!
//! ## Key Types
//!
//! - [`Attestor`] - Accumulates bytes, flushes chunk digests, finalizes once
//! - [`AttestationList`] - Ordered chunk digests (the attestation file contents)
//! - [`GitOid`] - Top-level identifier, rendered as `gitoid:blob:sha256:<hex>`
//! - [`DigestFunction`] - The digest capability, with [`GitoidSha256`] as default
//!
//! ## Usage
//!
//! ```rust
//! use terrapin_core::Attestor;
//!
//! let mut attestor = Attestor::new();
//! attestor.add(b"some bytes").unwrap();
//! let (id, attestations) = attestor.finalize().unwrap();
//! assert!(id.uri().starts_with("gitoid:blob:sha256:"));
//!
//! let restored = Attestor::from_attestations(&attestations.to_bytes()).unwrap();
//! assert!(restored.verify(&b"some bytes"[..]).unwrap());
//! ```

pub mod attestor;
pub mod config;
pub mod digest;
pub mod error;
pub mod types;
pub mod verify;

pub use attestor::Attestor;
pub use config::{AttestorConfig, DEFAULT_CHUNK_CAPACITY, MAX_CHUNK_CAPACITY};
pub use digest::{DigestError, DigestFunction, GitoidSha256, DIGEST_SIZE};
pub use error::{AttestError, Result};
pub use types::{AttestationList, Digest, GitOid};
pub use verify::{read_chunk, ChunkRange};
