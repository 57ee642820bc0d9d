// src/config.rs

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid submission backoff {value:?}: {source}")]
    BadBackoff {
        value: String,
        #[source]
        source: humantime::DurationError,
    },

    #[error("invalid log URI {0:?}")]
    BadLogUri(String),

    #[error("invalid public key for log {uri}: {reason}")]
    BadLogKey { uri: String, reason: String },

    #[error("failed to read intermediate bundle {path}: {source}")]
    BundleRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid PEM in intermediate bundle: {0}")]
    BundlePem(String),

    #[error("intermediate bundle entry is not a valid certificate: {0}")]
    BundleCert(String),

    #[error("intermediate bundle {0} contains no certificates")]
    EmptyBundle(PathBuf),

    #[error("failed to build HTTP client: {0}")]
    Http(reqwest::Error),
}

/// CT submission settings.
#[derive(Debug, Deserialize, Clone)]
pub struct CtConfig {
    #[serde(default)]
    pub logs: Vec<LogConfig>,
    /// Baseline sleep between retryable attempts, e.g. "0s", "500ms", "2s".
    #[serde(default = "default_submission_backoff")]
    pub submission_backoff: String,
    /// PEM file holding the issuance chain above the leaf, in order.
    pub intermediate_bundle: PathBuf,
    /// Extra attempts after the first; 0 means one attempt total.
    #[serde(default = "default_submission_retries")]
    pub submission_retries: u32,
}

fn default_submission_backoff() -> String {
    "0s".to_string()
}
fn default_submission_retries() -> u32 {
    0
}

impl CtConfig {
    pub fn parse_backoff(&self) -> Result<Duration, ConfigError> {
        humantime::parse_duration(&self.submission_backoff).map_err(|source| {
            ConfigError::BadBackoff {
                value: self.submission_backoff.clone(),
                source,
            }
        })
    }
}

/// A single log entry in the config: base URI plus the log's public key
/// as base64 of the DER SubjectPublicKeyInfo.
#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    pub uri: String,
    pub key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_receipts_file")]
    pub receipts_file: PathBuf,
}

fn default_receipts_file() -> PathBuf {
    PathBuf::from("sct-receipts.jsonl")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            receipts_file: default_receipts_file(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub ct: CtConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg: Config = toml::from_str(&contents)?;
        Ok(cfg)
    }
}
