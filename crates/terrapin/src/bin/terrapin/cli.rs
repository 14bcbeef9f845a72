//! CLI definition for terrapin.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use terrapin::{ByteRange, DEFAULT_CHUNK_CAPACITY};

/// Chunked content attestation for files.
#[derive(Parser, Debug)]
#[command(name = "terrapin")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Chunk size in bytes. Must match between attest and validate.
    #[arg(long, global = true, default_value_t = DEFAULT_CHUNK_CAPACITY)]
    pub chunk_size: usize,

    /// Log level (overridden by RUST_LOG).
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Terrapin commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Attest a file and print its gitoid URI.
    Attest {
        /// Input file path.
        #[arg(long)]
        input: PathBuf,

        /// Output file path for terrapin attestations.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Print a JSON report instead of the URI line.
        #[arg(long)]
        json: bool,
    },
    /// Verify a file, or a byte range of it, against its attestations.
    Validate(VerifyArgs),
    /// Verify, then echo the file (or byte range) to stdout.
    Cat(VerifyArgs),
}

/// Arguments shared by `validate` and `cat`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Input file path.
    #[arg(long)]
    pub input: PathBuf,

    /// Attestations file path for verification.
    #[arg(long)]
    pub attestations: PathBuf,

    /// Start byte for range.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub start: i64,

    /// End byte for range (exclusive). Defaults to the file size.
    #[arg(long, allow_negative_numbers = true)]
    pub end: Option<i64>,
}

impl VerifyArgs {
    /// The requested range, if any.
    pub fn range(&self) -> Option<ByteRange> {
        let range = ByteRange {
            start: self.start,
            end: self.end,
        };
        range.is_requested().then_some(range)
    }
}
