// src/cli.rs
use clap::Parser;
use std::path::PathBuf;

/// ct-publisher: Certificate Transparency submission client
///
/// Submit an issued certificate to the configured CT logs, verify the
/// returned SCTs, and persist the receipts.
#[derive(Parser, Debug, Clone)]
#[command(name = "ct-publisher")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Certificate to submit (PEM or DER)
    #[arg(value_name = "CERTIFICATE")]
    pub cert: PathBuf,

    /// Path to TOML config file
    #[arg(short = 'c', long = "config", default_value = "config.toml")]
    pub config: String,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}
