//! File-level operations: attest, validate, and verified cat.
//!
//! These are the operations behind the `terrapin` binary, over paths and
//! writers so they can be driven from tests.

use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use terrapin_core::{read_chunk, Attestor, AttestorConfig, ChunkRange, GitoidSha256};

use crate::error::{Result, TerrapinError};

/// A requested byte range. A missing `end` means the end of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ByteRange {
    pub start: i64,
    pub end: Option<i64>,
}

impl ByteRange {
    /// `[start, end)`.
    pub fn new(start: i64, end: i64) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// Range mode is used when a start offset or an end is given.
    pub fn is_requested(&self) -> bool {
        self.start != 0 || self.end.is_some()
    }

    fn resolve(&self, file_len: u64) -> (i64, i64) {
        let end = self
            .end
            .unwrap_or_else(|| i64::try_from(file_len).unwrap_or(i64::MAX));
        (self.start, end)
    }
}

impl From<i64> for ByteRange {
    /// From `start` to the end of the file.
    fn from(start: i64) -> Self {
        Self { start, end: None }
    }
}

/// Outcome of attesting a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttestReport {
    /// The gitoid URI of the attestation list.
    pub gitoid: String,
    /// Number of attested chunks.
    pub chunks: usize,
    /// Chunk capacity the file was attested with.
    pub chunk_size: usize,
    /// Bytes read from the input.
    pub bytes: u64,
}

/// Runs attestation and verification against files.
#[derive(Debug, Clone, Copy, Default)]
pub struct Terrapin {
    config: AttestorConfig,
}

impl Terrapin {
    /// Create with the given attestor config. Attest and validate must use
    /// the same chunk capacity.
    pub fn new(config: AttestorConfig) -> Self {
        Self { config }
    }

    /// The attestor config in use.
    pub fn config(&self) -> &AttestorConfig {
        &self.config
    }

    /// Attest `input`, optionally writing the attestation bytes to `output`.
    pub fn attest(&self, input: &Path, output: Option<&Path>) -> Result<AttestReport> {
        let mut file = File::open(input).map_err(TerrapinError::file("open", input))?;
        let mut attestor = Attestor::with_config(self.config);
        let mut buffer = vec![0u8; self.config.chunk_capacity()];
        let mut bytes = 0u64;

        loop {
            let n = read_chunk(&mut file, &mut buffer)
                .map_err(TerrapinError::file("read", input))?;
            if n == 0 {
                break;
            }
            attestor.add(&buffer[..n])?;
            bytes += n as u64;
        }

        let (id, attestations) = attestor.finalize()?;
        if let Some(output) = output {
            fs::write(output, attestations.to_bytes())
                .map_err(TerrapinError::file("write", output))?;
            debug!(path = %output.display(), chunks = attestations.len(), "attestations written");
        }
        info!(input = %input.display(), bytes, %id, "attested");

        Ok(AttestReport {
            gitoid: id.uri(),
            chunks: attestations.len(),
            chunk_size: self.config.chunk_capacity(),
            bytes,
        })
    }

    /// Verify `input` against the attestation file.
    ///
    /// With a requested range only the chunks overlapping it are read.
    /// Returns [`TerrapinError::VerificationFailed`] on a mismatch.
    pub fn validate(
        &self,
        input: &Path,
        attestations: &Path,
        range: Option<ByteRange>,
    ) -> Result<()> {
        let attestor = self.load(attestations)?;
        let mut file = File::open(input).map_err(TerrapinError::file("open", input))?;
        self.check(&attestor, &mut file, input, range)?;
        info!(input = %input.display(), "file verification succeeded");
        Ok(())
    }

    /// Verify `input`, then copy the requested bytes to `out`.
    ///
    /// Nothing is written unless verification succeeds. Returns the number
    /// of bytes written.
    pub fn cat<W: Write>(
        &self,
        input: &Path,
        attestations: &Path,
        range: Option<ByteRange>,
        mut out: W,
    ) -> Result<u64> {
        let attestor = self.load(attestations)?;
        let mut file = File::open(input).map_err(TerrapinError::file("open", input))?;

        let echo = self.check(&attestor, &mut file, input, range)?;
        let copied = match echo {
            Some((start, end)) => {
                let file_len = file
                    .metadata()
                    .map_err(TerrapinError::file("stat", input))?
                    .len();
                if end > file_len {
                    return Err(TerrapinError::RangePastEnd { end, file_len });
                }
                file.seek(SeekFrom::Start(start))
                    .map_err(TerrapinError::file("seek", input))?;
                let expected = end - start;
                let copied = io::copy(&mut (&mut file).take(expected), &mut out)
                    .map_err(TerrapinError::Output)?;
                if copied != expected {
                    return Err(TerrapinError::ShortEcho { expected, copied });
                }
                copied
            }
            None => {
                file.rewind().map_err(TerrapinError::file("seek", input))?;
                io::copy(&mut file, &mut out).map_err(TerrapinError::Output)?
            }
        };
        out.flush().map_err(TerrapinError::Output)?;
        Ok(copied)
    }

    fn load(&self, attestations: &Path) -> Result<Attestor> {
        let bytes = fs::read(attestations).map_err(TerrapinError::file("read", attestations))?;
        Ok(Attestor::from_attestations_with(
            self.config,
            GitoidSha256,
            &bytes,
        )?)
    }

    /// Run full or range verification. In range mode returns the resolved
    /// `[start, end)` byte offsets.
    fn check(
        &self,
        attestor: &Attestor,
        file: &mut File,
        path: &Path,
        range: Option<ByteRange>,
    ) -> Result<Option<(u64, u64)>> {
        let Some(range) = range.filter(ByteRange::is_requested) else {
            if !attestor.verify(&mut *file)? {
                return Err(TerrapinError::VerificationFailed);
            }
            return Ok(None);
        };

        let file_len = file
            .metadata()
            .map_err(TerrapinError::file("stat", path))?
            .len();
        let (start, end) = range.resolve(file_len);
        let aligned = ChunkRange::align(start, end, self.config.chunk_capacity())?;
        debug!(start, end, ?aligned, "verifying range");

        file.seek(SeekFrom::Start(aligned.start_offset))
            .map_err(TerrapinError::file("seek", path))?;
        if !attestor.verify_range(&mut *file, start, end)? {
            return Err(TerrapinError::VerificationFailed);
        }
        // align() rejected negative and empty ranges.
        Ok(Some((start as u64, end as u64)))
    }
}
