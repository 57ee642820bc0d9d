// src/bundle.rs
//! Intermediate bundle loading. The bundle PEM carries the issuance
//! chain above the leaf, direct issuer first; it is read once at startup
//! and every submission appends it to the chain unchanged.

use base64::Engine;
use std::path::Path;
use tracing::debug;
use x509_parser::pem::Pem;
use x509_parser::prelude::*;

use crate::config::ConfigError;

/// Reads the PEM bundle at `path` and returns its CERTIFICATE blocks as
/// base64 DER, in file order. Non-certificate blocks are skipped. A
/// missing file, an unparseable block, or a bundle with no certificates
/// is a configuration error.
pub fn load_issuer_bundle(path: &Path) -> Result<Vec<String>, ConfigError> {
    let data = std::fs::read(path).map_err(|source| ConfigError::BundleRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut bundle = Vec::new();
    for pem in Pem::iter_from_buffer(&data) {
        let pem = pem.map_err(|e| ConfigError::BundlePem(e.to_string()))?;
        if pem.label != "CERTIFICATE" {
            debug!("Skipping {} block in {}", pem.label, path.display());
            continue;
        }
        X509Certificate::from_der(&pem.contents)
            .map_err(|e| ConfigError::BundleCert(format!("{e:?}")))?;
        bundle.push(base64::engine::general_purpose::STANDARD.encode(&pem.contents));
    }

    if bundle.is_empty() {
        return Err(ConfigError::EmptyBundle(path.to_path_buf()));
    }

    debug!(
        "Loaded {} intermediate certificates from {}",
        bundle.len(),
        path.display()
    );
    Ok(bundle)
}
