// src/storage.rs
//! Storage Authority seam: sinks that persist validated SCTs, keyed by
//! (log id, certificate serial).

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use crate::sct::SignedCertificateTimestamp;

/// Sink accepting validated SCT receipts. Implementations must tolerate
/// concurrent calls and be idempotent per (log_id, certificate_serial).
#[async_trait]
pub trait StorageAuthority: Send + Sync {
    async fn add_sct_receipt(&self, sct: &SignedCertificateTimestamp) -> Result<()>;
}

/// In-memory Storage Authority, used by tests and as a stand-in when no
/// persistent sink is wired up.
#[derive(Default)]
pub struct MemoryStorageAuthority {
    receipts: Mutex<HashMap<(String, String), SignedCertificateTimestamp>>,
}

impl MemoryStorageAuthority {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.receipts.lock().await.len()
    }

    pub async fn receipts(&self) -> Vec<SignedCertificateTimestamp> {
        self.receipts.lock().await.values().cloned().collect()
    }
}

#[async_trait]
impl StorageAuthority for MemoryStorageAuthority {
    async fn add_sct_receipt(&self, sct: &SignedCertificateTimestamp) -> Result<()> {
        let key = (sct.log_id.clone(), sct.certificate_serial.clone());
        self.receipts.lock().await.entry(key).or_insert_with(|| sct.clone());
        Ok(())
    }
}

/// One receipt as written to the receipts file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SctReceiptRecord {
    sct_version: u8,
    log_id: String,
    timestamp: u64,
    extensions: String,
    signature: String,
    certificate_serial: String,
}

impl SctReceiptRecord {
    fn from_sct(sct: &SignedCertificateTimestamp) -> Self {
        let engine = base64::engine::general_purpose::STANDARD;
        Self {
            sct_version: sct.version,
            log_id: sct.log_id.clone(),
            timestamp: sct.timestamp,
            extensions: engine.encode(&sct.extensions),
            signature: engine.encode(&sct.signature),
            certificate_serial: sct.certificate_serial.clone(),
        }
    }
}

/// File-backed Storage Authority keeping one JSON record per line.
/// Existing records are loaded at startup so re-running a submission does
/// not duplicate receipts.
pub struct JsonFileStorageAuthority {
    path: PathBuf,
    inner: Mutex<FileState>,
}

struct FileState {
    records: Vec<SctReceiptRecord>,
    seen: HashSet<(String, String)>,
}

impl JsonFileStorageAuthority {
    pub async fn new(path: PathBuf) -> Result<Self> {
        let mut records = Vec::new();
        let mut seen = HashSet::new();

        if path.exists() {
            let contents = fs::read_to_string(&path)
                .await
                .context("Failed to read receipts file")?;
            for line in contents.lines().filter(|line| !line.trim().is_empty()) {
                let record: SctReceiptRecord =
                    serde_json::from_str(line).context("Failed to parse receipts file")?;
                seen.insert((record.log_id.clone(), record.certificate_serial.clone()));
                records.push(record);
            }
            debug!("Loaded {} SCT receipts from {}", records.len(), path.display());
        }

        Ok(Self {
            path,
            inner: Mutex::new(FileState { records, seen }),
        })
    }

    pub async fn count(&self) -> usize {
        self.inner.lock().await.records.len()
    }

    /// Write to a temporary file first, then rename for atomicity.
    async fn save(&self, records: &[SctReceiptRecord]) -> Result<()> {
        let mut contents = String::new();
        for record in records {
            contents.push_str(&serde_json::to_string(record)?);
            contents.push('\n');
        }

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, contents)
            .await
            .context("Failed to write receipts to temporary file")?;
        fs::rename(&temp_path, &self.path)
            .await
            .context("Failed to rename temporary receipts file")?;
        Ok(())
    }
}

#[async_trait]
impl StorageAuthority for JsonFileStorageAuthority {
    async fn add_sct_receipt(&self, sct: &SignedCertificateTimestamp) -> Result<()> {
        let mut inner = self.inner.lock().await;
        let key = (sct.log_id.clone(), sct.certificate_serial.clone());
        if !inner.seen.insert(key) {
            debug!(
                "Duplicate SCT receipt for serial {} from log {}, keeping the first",
                sct.certificate_serial, sct.log_id
            );
            return Ok(());
        }
        inner.records.push(SctReceiptRecord::from_sct(sct));
        self.save(&inner.records).await
    }
}
