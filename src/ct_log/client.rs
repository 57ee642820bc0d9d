// src/ct_log/client.rs
use base64::Engine;
use reqwest::header::RETRY_AFTER;
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use super::types::{AddChainRequest, LogDescription, RawSct};
use crate::sct::{SctError, SignedCertificateTimestamp};

/// Per-attempt HTTP timeout for log submissions.
pub const SUBMISSION_TIMEOUT: Duration = Duration::from_secs(10);

/// Ceiling on a single inter-attempt sleep. A log advertising a huge
/// Retry-After must not be able to park a submission task indefinitely.
const MAX_RETRY_AFTER: Duration = Duration::from_secs(600);

#[derive(Error, Debug)]
pub enum LogClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("log returned HTTP status {0}")]
    HttpStatus(StatusCode),

    #[error("malformed add-chain response: {0}")]
    Decode(String),

    #[error(transparent)]
    Verification(#[from] SctError),
}

/// One failed attempt. `retry_after` is `Some` iff the failure is
/// retryable; it carries the server-requested delay (zero when the
/// server didn't ask for one).
struct AttemptFailure {
    error: LogClientError,
    retry_after: Option<Duration>,
}

/// HTTP submitter for a single CT log transaction.
///
/// A submission moves through `Sending` and, on a retryable failure with
/// attempts left, back through `Retrying` to `Sending`; it terminates in
/// `Done` with a verified SCT or in `Failed` with the last error.
pub struct LogClient {
    http: reqwest::Client,
    backoff: Duration,
    max_retries: u32,
}

impl LogClient {
    pub fn new(http: reqwest::Client, backoff: Duration, max_retries: u32) -> Self {
        Self {
            http,
            backoff,
            max_retries,
        }
    }

    /// Submits `chain` to `log` and returns the verified SCT.
    ///
    /// Performs at most `max_retries + 1` attempts. An attempt is
    /// retryable iff the status is one of 408/500/502/503/504 or the
    /// transport failed to connect or timed out; everything else,
    /// including every decode failure, is fatal. Between retryable
    /// attempts the task sleeps `max(backoff, Retry-After)`.
    pub async fn submit(
        &self,
        log: &LogDescription,
        chain: &[String],
        leaf_der: &[u8],
    ) -> Result<SignedCertificateTimestamp, LogClientError> {
        let url = format!("{}/ct/v1/add-chain", log.uri);
        let request = AddChainRequest {
            chain: chain.to_vec(),
        };

        let attempts = self.max_retries + 1;
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            debug!("{}: add-chain attempt {}/{}", log.uri, attempt, attempts);

            let failure = match self.attempt_once(&url, &request).await {
                Ok(raw) => return self.decode_and_verify(log, raw, leaf_der),
                Err(failure) => failure,
            };

            let Some(retry_after) = failure.retry_after else {
                return Err(failure.error);
            };
            if attempt >= attempts {
                return Err(failure.error);
            }

            let delay = self.backoff.max(retry_after).min(MAX_RETRY_AFTER);
            warn!(
                "{}: attempt {}/{} failed ({}), retrying in {:?}",
                log.uri, attempt, attempts, failure.error, delay
            );
            tokio::time::sleep(delay).await;
        }
    }

    async fn attempt_once(
        &self,
        url: &str,
        request: &AddChainRequest,
    ) -> Result<RawSct, AttemptFailure> {
        let response = match self
            .http
            .post(url)
            .timeout(SUBMISSION_TIMEOUT)
            .json(request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                let retryable = e.is_timeout() || e.is_connect();
                return Err(AttemptFailure {
                    error: LogClientError::Transport(e),
                    retry_after: retryable.then_some(Duration::ZERO),
                });
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            let retry_after = is_retryable_status(status)
                .then(|| retry_after_duration(response.headers()));
            return Err(AttemptFailure {
                error: LogClientError::HttpStatus(status),
                retry_after,
            });
        }

        response.json::<RawSct>().await.map_err(|e| AttemptFailure {
            error: LogClientError::Decode(e.to_string()),
            retry_after: None,
        })
    }

    fn decode_and_verify(
        &self,
        log: &LogDescription,
        raw: RawSct,
        leaf_der: &[u8],
    ) -> Result<SignedCertificateTimestamp, LogClientError> {
        let engine = base64::engine::general_purpose::STANDARD;

        if raw.sct_version != 0 {
            return Err(LogClientError::Decode(format!(
                "unsupported SCT version {}",
                raw.sct_version
            )));
        }

        // When the log names itself, it must name the configured key
        if !raw.id.is_empty() {
            let id = engine
                .decode(&raw.id)
                .map_err(|e| LogClientError::Decode(format!("invalid base64 log id: {e}")))?;
            if id != log.key_id {
                return Err(LogClientError::Decode(
                    "SCT log id does not match the configured log key".to_string(),
                ));
            }
        }

        let signature = engine
            .decode(&raw.signature)
            .map_err(|e| LogClientError::Decode(format!("invalid base64 signature: {e}")))?;
        let extensions = engine
            .decode(&raw.extensions)
            .map_err(|e| LogClientError::Decode(format!("invalid base64 extensions: {e}")))?;

        let sct = SignedCertificateTimestamp {
            version: raw.sct_version,
            log_id: log.key_id_base64(),
            timestamp: raw.timestamp,
            extensions,
            signature,
            certificate_serial: String::new(),
        };
        sct.verify_signature(leaf_der, &log.key)?;

        debug!("{}: SCT verified, timestamp {}", log.uri, sct.timestamp);
        Ok(sct)
    }
}

fn is_retryable_status(status: StatusCode) -> bool {
    matches!(status.as_u16(), 408 | 500 | 502 | 503 | 504)
}

/// Retry-After per the add-chain contract: integer seconds only; a
/// missing or non-integer header counts as zero.
fn retry_after_duration(headers: &reqwest::header::HeaderMap) -> Duration {
    headers
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(Duration::ZERO)
}
