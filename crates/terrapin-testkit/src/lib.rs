//! # Terrapin Testkit
//!
//! Testing utilities for Terrapin.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known inputs with expected gitoid identifiers
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Deterministic data and misbehaving readers
//! - **Stubs**: Deterministic and failing digest functions
//!
//! ## Golden Vectors
//!
//! ```rust
//! use terrapin_testkit::vectors::verify_all_vectors;
//!
//! for (name, ok, uri) in verify_all_vectors() {
//!     assert!(ok, "{name}: {uri}");
//! }
//! ```
//!
//! ## Fixtures
//!
//! ```rust
//! use terrapin_testkit::fixtures::{attested, patterned_data, ShortReader};
//!
//! let data = patterned_data(100);
//! let attestor = attested(&data, 16);
//! assert!(attestor.verify(ShortReader::new(&data[..], 7)).unwrap());
//! ```

pub mod fixtures;
pub mod generators;
pub mod stubs;
pub mod vectors;

pub use fixtures::{attested, patterned_data, seeded_data, FailingReader, ShortReader};
pub use generators::{chunk_capacity, payload, AttestParams};
pub use stubs::{FailingDigest, StubDigest};
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector};
