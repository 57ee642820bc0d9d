// src/publisher.rs
//! Fan-out of one certificate to every configured CT log, hand-off of
//! verified SCTs to the Storage Authority.

use base64::Engine;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info};
use x509_parser::prelude::*;

use crate::bundle;
use crate::config::{ConfigError, CtConfig};
use crate::ct_log::{LogClient, LogClientError, LogDescription};
use crate::storage::StorageAuthority;

#[derive(Error, Debug)]
pub enum PublisherError {
    #[error("malformed certificate: {0}")]
    MalformedCertificate(String),

    #[error("no CT logs configured")]
    NoLogsConfigured,

    #[error("all {} CT log submissions failed", .0.len())]
    AllSubmissionsFailed(Vec<(String, LogClientError)>),
}

/// Submits certificates to a fixed set of CT logs. Everything shared is
/// read-only after construction, so a single Publisher serves concurrent
/// submissions.
pub struct Publisher {
    logs: Vec<Arc<LogDescription>>,
    issuer_bundle: Arc<Vec<String>>,
    client: Arc<LogClient>,
    sa: Arc<dyn StorageAuthority>,
}

impl Publisher {
    pub fn new(
        logs: Vec<LogDescription>,
        issuer_bundle: Vec<String>,
        backoff: Duration,
        max_retries: u32,
        sa: Arc<dyn StorageAuthority>,
    ) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(ConfigError::Http)?;

        Ok(Self {
            logs: logs.into_iter().map(Arc::new).collect(),
            issuer_bundle: Arc::new(issuer_bundle),
            client: Arc::new(LogClient::new(http, backoff, max_retries)),
            sa,
        })
    }

    /// Builds a Publisher from the config record: parses the backoff
    /// string, loads the PEM intermediate bundle, and constructs every
    /// log descriptor. All validation happens here, once; submissions
    /// never see a half-built descriptor.
    pub fn from_config(
        config: &CtConfig,
        sa: Arc<dyn StorageAuthority>,
    ) -> Result<Self, ConfigError> {
        let backoff = config.parse_backoff()?;
        let issuer_bundle = bundle::load_issuer_bundle(&config.intermediate_bundle)?;

        let mut logs = Vec::with_capacity(config.logs.len());
        for log_config in &config.logs {
            logs.push(LogDescription::from_config(log_config)?);
        }

        Self::new(logs, issuer_bundle, backoff, config.submission_retries, sa)
    }

    /// Submits `leaf_der` to every configured log concurrently.
    ///
    /// Each log gets its own task; failures never cancel peers. Verified
    /// SCTs are forwarded to the Storage Authority with the leaf's serial
    /// attached. Returns `Ok` if at least one log accepted the
    /// certificate, otherwise the collected per-log errors. Storage
    /// Authority errors are logged, not propagated.
    pub async fn submit_to_ct(&self, leaf_der: &[u8]) -> Result<(), PublisherError> {
        let serial = {
            let (_, leaf) = X509Certificate::from_der(leaf_der)
                .map_err(|e| PublisherError::MalformedCertificate(format!("{e:?}")))?;
            hex::encode(leaf.raw_serial())
        };

        if self.logs.is_empty() {
            return Err(PublisherError::NoLogsConfigured);
        }

        let mut chain = Vec::with_capacity(1 + self.issuer_bundle.len());
        chain.push(base64::engine::general_purpose::STANDARD.encode(leaf_der));
        chain.extend(self.issuer_bundle.iter().cloned());

        let chain = Arc::new(chain);
        let leaf_der = Arc::new(leaf_der.to_vec());

        let mut handles = Vec::with_capacity(self.logs.len());
        for log in &self.logs {
            let log = Arc::clone(log);
            let chain = Arc::clone(&chain);
            let leaf_der = Arc::clone(&leaf_der);
            let client = Arc::clone(&self.client);
            let sa = Arc::clone(&self.sa);
            let serial = serial.clone();

            handles.push(tokio::spawn(async move {
                match client.submit(&log, &chain, &leaf_der).await {
                    Ok(mut sct) => {
                        sct.certificate_serial = serial;
                        info!(
                            "Submitted certificate to CT log {}, SCT timestamp {}",
                            log.uri, sct.timestamp
                        );
                        if let Err(e) = sa.add_sct_receipt(&sct).await {
                            error!("Failed to store SCT receipt from {}: {}", log.uri, e);
                        }
                        (log.uri.clone(), Ok(()))
                    }
                    Err(e) => {
                        error!("Unable to submit certificate to CT log {}: {}", log.uri, e);
                        (log.uri.clone(), Err(e))
                    }
                }
            }));
        }

        let mut succeeded = false;
        let mut failures = Vec::new();
        for handle in handles {
            match handle.await {
                Ok((_, Ok(()))) => succeeded = true,
                Ok((uri, Err(e))) => failures.push((uri, e)),
                Err(e) => error!("CT submission task failed to run: {}", e),
            }
        }

        if succeeded {
            Ok(())
        } else {
            Err(PublisherError::AllSubmissionsFailed(failures))
        }
    }
}
