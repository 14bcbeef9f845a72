//! Test fixtures and helpers.

use std::io::{self, Read};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use terrapin_core::{Attestor, AttestorConfig};

/// Bytes `i % 256` for `i in 0..len`, the pattern used by the reference tests.
pub fn patterned_data(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 256) as u8).collect()
}

/// Pseudo-random bytes, reproducible from `seed`.
pub fn seeded_data(seed: u64, len: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = vec![0u8; len];
    rng.fill_bytes(&mut data);
    data
}

/// Attest `data` with the given chunk capacity and finalize.
///
/// # Panics
///
/// Panics if `chunk_capacity` is zero.
pub fn attested(data: &[u8], chunk_capacity: usize) -> Attestor {
    let config = AttestorConfig::new(chunk_capacity).expect("non-zero chunk capacity");
    let mut attestor = Attestor::with_config(config);
    attestor.add(data).expect("open attestor accepts data");
    attestor.finalize().expect("finalize");
    attestor
}

/// A reader that returns at most `max_read` bytes per call.
#[derive(Debug)]
pub struct ShortReader<R> {
    inner: R,
    max_read: usize,
}

impl<R: Read> ShortReader<R> {
    /// Wrap `inner`, capping every read at `max_read` bytes.
    pub fn new(inner: R, max_read: usize) -> Self {
        assert!(max_read > 0, "max_read must be positive");
        Self { inner, max_read }
    }
}

impl<R: Read> Read for ShortReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let len = buf.len().min(self.max_read);
        self.inner.read(&mut buf[..len])
    }
}

/// A reader that serves `ok_bytes` of zeros, then fails.
#[derive(Debug)]
pub struct FailingReader {
    ok_bytes: usize,
    kind: io::ErrorKind,
}

impl FailingReader {
    /// Fail with `kind` after `ok_bytes` have been read.
    pub fn new(ok_bytes: usize, kind: io::ErrorKind) -> Self {
        Self { ok_bytes, kind }
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.ok_bytes == 0 {
            return Err(io::Error::new(self.kind, "injected read failure"));
        }
        let n = buf.len().min(self.ok_bytes);
        buf[..n].fill(0);
        self.ok_bytes -= n;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_data_reproducible() {
        assert_eq!(seeded_data(7, 64), seeded_data(7, 64));
        assert_ne!(seeded_data(7, 64), seeded_data(8, 64));
    }

    #[test]
    fn test_short_reader_caps_reads() {
        let data = patterned_data(10);
        let mut reader = ShortReader::new(&data[..], 3);
        let mut buf = [0u8; 8];
        assert_eq!(reader.read(&mut buf).unwrap(), 3);
        assert_eq!(&buf[..3], &[0, 1, 2]);
    }

    #[test]
    fn test_failing_reader() {
        let mut reader = FailingReader::new(4, io::ErrorKind::UnexpectedEof);
        let mut buf = [1u8; 8];
        assert_eq!(reader.read(&mut buf).unwrap(), 4);
        let err = reader.read(&mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
