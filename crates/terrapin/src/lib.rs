//! # Terrapin
//!
//! Chunked content attestation for files.
//!
//! ## Overview
//!
//! A file is split into fixed-size chunks (2 MiB by default), every chunk is
//! digested as a SHA-256 git blob, and the digests are stored back to back
//! as an attestation file. The gitoid of the attestation file identifies the
//! whole content. Later, the file (or any byte range of it) can be checked
//! against the attestation file without the original data.
//!
//! ## Operations
//!
//! - [`Terrapin::attest`] - Produce attestations and the gitoid for a file
//! - [`Terrapin::validate`] - Verify a file, or a byte range of it
//! - [`Terrapin::cat`] - Verify, then write the requested bytes to a sink
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use terrapin::{Terrapin, ByteRange};
//! use terrapin::core::AttestorConfig;
//!
//! let terrapin = Terrapin::new(AttestorConfig::default());
//! let image = Path::new("disk.img");
//! let attestations = Path::new("disk.att");
//!
//! let report = terrapin.attest(image, Some(attestations)).unwrap();
//! println!("Gitoid URI: {}", report.gitoid);
//!
//! terrapin
//!     .validate(image, attestations, Some(ByteRange::from(4096)))
//!     .unwrap();
//! ```
//!
//! ## Re-exports
//!
//! - `terrapin::core` - The attestation engine ([`Attestor`], [`GitOid`], ...)

pub mod error;
pub mod tool;

pub use terrapin_core as core;

pub use error::{Result, TerrapinError};
pub use tool::{AttestReport, ByteRange, Terrapin};

pub use terrapin_core::{
    AttestError, AttestationList, Attestor, AttestorConfig, Digest, GitOid,
    DEFAULT_CHUNK_CAPACITY,
};
