// src/ct_log/types.rs
use base64::Engine;
use p256::ecdsa::VerifyingKey;
use p256::pkcs8::DecodePublicKey;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::{ConfigError, LogConfig};

/// Request body for the add-chain endpoint.
/// `chain` holds base64 DER certificates, leaf first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddChainRequest {
    pub chain: Vec<String>,
}

/// SCT as returned by a log's add-chain endpoint, fields still
/// base64-encoded. Logs are allowed to omit everything except the
/// signature; absent fields take their zero values the way the wire
/// format defines them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSct {
    #[serde(default)]
    pub sct_version: u8,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub timestamp: u64,
    #[serde(default)]
    pub extensions: String,
    pub signature: String,
}

/// A CT log the publisher submits to. Built once at startup from the
/// configuration and immutable afterwards.
#[derive(Debug, Clone)]
pub struct LogDescription {
    /// Base URI of the log, scheme and host validated.
    pub uri: String,
    /// The log's ECDSA P-256 key.
    pub key: VerifyingKey,
    /// SHA-256 over the log's SubjectPublicKeyInfo DER; what RFC 6962
    /// calls the log ID.
    pub key_id: [u8; 32],
}

impl LogDescription {
    /// Builds a descriptor from a base URI and the log's public key
    /// (DER SubjectPublicKeyInfo bytes).
    pub fn new(uri: &str, key_der: &[u8]) -> Result<Self, ConfigError> {
        let parsed =
            reqwest::Url::parse(uri).map_err(|_| ConfigError::BadLogUri(uri.to_string()))?;
        if parsed.host_str().is_none() {
            return Err(ConfigError::BadLogUri(uri.to_string()));
        }

        let key =
            VerifyingKey::from_public_key_der(key_der).map_err(|e| ConfigError::BadLogKey {
                uri: uri.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            uri: uri.trim_end_matches('/').to_string(),
            key,
            key_id: Sha256::digest(key_der).into(),
        })
    }

    pub fn from_config(config: &LogConfig) -> Result<Self, ConfigError> {
        let key_der = base64::engine::general_purpose::STANDARD
            .decode(&config.key)
            .map_err(|e| ConfigError::BadLogKey {
                uri: config.uri.clone(),
                reason: format!("invalid base64: {e}"),
            })?;
        Self::new(&config.uri, &key_der)
    }

    /// The log ID in the form it appears in SCT responses.
    pub fn key_id_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(self.key_id)
    }
}
