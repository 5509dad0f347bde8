#![deny(missing_docs)]

//! # specscrub CLI
//!
//! Command Line Interface for the specification scrubber.
//!
//! Supported Commands:
//! - `scrub`: removes invalid operations and definitions from a
//!   Swagger/OpenAPI specification, writing the error report to stderr and
//!   the pruned document to stdout.

use clap::{Parser, Subcommand};

use crate::error::CliResult;

mod error;
mod scrub;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Swagger/OpenAPI structural scrubber")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Remove invalid endpoints and definitions from a Swagger/OpenAPI specification.
    Scrub(scrub::ScrubArgs),
}

fn main() -> CliResult<()> {
    // Diagnostics go to stderr so stdout stays a clean document stream.
    env_logger::Builder::from_env(env_logger::Env::default())
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Scrub(args) => scrub::execute(args),
    }
}
