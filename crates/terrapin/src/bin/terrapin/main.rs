//! terrapin CLI entry point.

mod cli;

use clap::Parser;
use cli::{Cli, Command};
use std::io;
use terrapin::{AttestorConfig, Terrapin};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    // stdout carries file contents for `cat`.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    let terrapin = Terrapin::new(AttestorConfig::new(cli.chunk_size)?);

    match cli.command {
        Command::Attest {
            input,
            output,
            json,
        } => {
            let report = terrapin.attest(&input, output.as_deref())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Gitoid URI: {}", report.gitoid);
            }
        }
        Command::Validate(args) => {
            terrapin.validate(&args.input, &args.attestations, args.range())?;
            println!("File verification succeeded");
        }
        Command::Cat(args) => {
            let stdout = io::stdout();
            let copied =
                terrapin.cat(&args.input, &args.attestations, args.range(), stdout.lock())?;
            info!(bytes = copied, "echoed verified content");
        }
    }

    Ok(())
}
