// src/main.rs
use anyhow::Context;
use clap::Parser;
use ct_publisher::cli::Cli;
use ct_publisher::config::Config;
use ct_publisher::publisher::Publisher;
use ct_publisher::storage::JsonFileStorageAuthority;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::from_file(Path::new(&cli.config))?;

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        &config.logging.level
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!("Starting ct-publisher...");

    let leaf_der = read_certificate(&cli.cert)?;

    let sa = Arc::new(JsonFileStorageAuthority::new(config.storage.receipts_file.clone()).await?);
    let publisher = Publisher::from_config(&config.ct, sa.clone())?;

    tracing::info!(
        "Submitting {} to {} CT logs",
        cli.cert.display(),
        config.ct.logs.len()
    );

    publisher.submit_to_ct(&leaf_der).await?;

    tracing::info!(
        "Submission complete, {} receipts in {}",
        sa.count().await,
        config.storage.receipts_file.display()
    );
    Ok(())
}

/// Read a leaf certificate from disk, accepting either PEM or raw DER.
fn read_certificate(path: &Path) -> anyhow::Result<Vec<u8>> {
    let data = std::fs::read(path)
        .with_context(|| format!("Failed to read certificate {}", path.display()))?;

    if data.starts_with(b"-----BEGIN") {
        let (_, pem) = x509_parser::pem::parse_x509_pem(&data)
            .map_err(|e| anyhow::anyhow!("Failed to parse certificate PEM: {:?}", e))?;
        Ok(pem.contents)
    } else {
        Ok(data)
    }
}
