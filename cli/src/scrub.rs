#![deny(missing_docs)]

//! # Scrub Command
//!
//! Loads a specification from a file or URL, runs the exhaustive
//! validate-and-scrub pipeline, and writes the error report (stderr) and the
//! pruned document (stdout) as indented JSON.

use crate::error::{CliError, CliResult};
use specscrub_core::{validate_and_scrub_exhaustive, Dialect, IdentityConverter, ScrubOptions};
use std::fs;
use url::Url;

/// Arguments for the scrub command.
#[derive(clap::Args, Debug, Clone)]
pub struct ScrubArgs {
    /// The file or URL where the Swagger/OpenAPI specification resides.
    pub source: String,

    /// The dialect of the input specification.
    #[clap(long, short = 'f', value_parser = parse_dialect)]
    pub from: Dialect,

    /// Validation rule codes to ignore (repeatable).
    #[clap(long = "ignore-rule", short = 'i')]
    pub ignore_rule: Vec<String>,
}

/// Helper to parse a dialect name argument.
fn parse_dialect(value: &str) -> Result<Dialect, String> {
    value.parse()
}

/// Executes the scrub command.
pub fn execute(args: &ScrubArgs) -> CliResult<()> {
    let source = load_source(&args.source)?;
    let options = ScrubOptions {
        from: args.from,
        ignore_codes: args.ignore_rule.clone(),
    };
    let outcome = validate_and_scrub_exhaustive(&IdentityConverter, &source, &options)?;

    // Report and document are both always materialized, on separate streams.
    let report = serde_json::to_string_pretty(&outcome.errors)
        .map_err(|error| CliError::General(error.to_string()))?;
    let document = serde_json::to_string_pretty(&outcome.spec)
        .map_err(|error| CliError::General(error.to_string()))?;
    eprintln!("{}", report);
    println!("{}", document);

    if !outcome.converged {
        return Err(CliError::General(
            "unscrubbable validation errors remain in the document".into(),
        ));
    }
    Ok(())
}

/// Loads the specification text from a filesystem path or an HTTP(S) URL.
fn load_source(source: &str) -> CliResult<String> {
    if let Ok(url) = Url::parse(source) {
        if matches!(url.scheme(), "http" | "https") {
            return fetch_source(url.as_str());
        }
    }
    Ok(fs::read_to_string(source)?)
}

#[cfg(feature = "client")]
fn fetch_source(url: &str) -> CliResult<String> {
    let mut response = ureq::get(url)
        .call()
        .map_err(|error| CliError::Http(error.to_string()))?;
    response
        .body_mut()
        .read_to_string()
        .map_err(|error| CliError::Http(error.to_string()))
}

#[cfg(not(feature = "client"))]
fn fetch_source(url: &str) -> CliResult<String> {
    Err(CliError::General(format!(
        "cannot fetch '{}': built without the 'client' feature",
        url
    )))
}
