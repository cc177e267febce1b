use crate::config::StorageRegion;
use crate::context::{AppContext, TransferConfiguration};
use crate::errors::{ProviderError, Result};
use crate::storage::models::{TransferKind, TransferRecord, TransferState};
use aws_sdk_s3::Client;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Uploads and downloads single objects against the configured bucket and tracks each transfer
pub struct TransferUtility {
    pub(crate) client: Client,
    pub(crate) runtime: tokio::runtime::Runtime,
    context: AppContext,
    configuration: TransferConfiguration,
    records: Mutex<BTreeMap<u64, TransferRecord>>,
    next_id: AtomicU64,
}

impl TransferUtility {
    pub(crate) fn new(
        client: Client,
        client_region: StorageRegion,
        context: AppContext,
        configuration: TransferConfiguration,
    ) -> Result<Self> {
        if let Some(configured) = configuration.region() {
            if configured != client_region {
                tracing::warn!(
                    configured = %configured,
                    client = %client_region,
                    "transfer configuration region differs from client region; using client region"
                );
            }
        }

        // Runtime for async operations - reused for every transfer
        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| ProviderError::Runtime(format!("Failed to create runtime: {}", e)))?;

        tracing::debug!(
            application = context.application_id(),
            bucket = configuration.bucket(),
            "transfer utility initialized"
        );

        Ok(Self {
            client,
            runtime,
            context,
            configuration,
            records: Mutex::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn bucket(&self) -> &str {
        self.configuration.bucket()
    }

    /// Context the utility was built from
    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub fn configuration(&self) -> &TransferConfiguration {
        &self.configuration
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn transfer(&self, id: u64) -> Option<TransferRecord> {
        self.lock_records().get(&id).cloned()
    }

    /// All tracked transfers, oldest first
    pub fn transfers(&self) -> Vec<TransferRecord> {
        self.lock_records().values().cloned().collect()
    }

    pub fn transfers_with_state(&self, state: TransferState) -> Vec<TransferRecord> {
        self.lock_records()
            .values()
            .filter(|r| r.state == state)
            .cloned()
            .collect()
    }

    /// Stop tracking a finished transfer and hand back its final record
    pub fn remove_transfer(&self, id: u64) -> Result<TransferRecord> {
        let mut records = self.lock_records();
        match records.get(&id).map(TransferRecord::is_finished) {
            None => Err(ProviderError::Transfer(format!("Unknown transfer {}", id))),
            Some(false) => Err(ProviderError::Transfer(format!(
                "Transfer {} is still in progress",
                id
            ))),
            Some(true) => records
                .remove(&id)
                .ok_or_else(|| ProviderError::Transfer(format!("Unknown transfer {}", id))),
        }
    }

    /// Drop every completed or failed record, returning how many were removed
    pub fn clear_finished(&self) -> usize {
        let mut records = self.lock_records();
        let before = records.len();
        records.retain(|_, record| !record.is_finished());
        before - records.len()
    }

    pub(crate) fn begin(
        &self,
        kind: TransferKind,
        key: &str,
        file: PathBuf,
        bytes_total: u64,
    ) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = TransferRecord::started(id, kind, self.bucket(), key, file, bytes_total);
        self.lock_records().insert(id, record);
        id
    }

    pub(crate) fn complete(
        &self,
        id: u64,
        bytes: u64,
        etag: Option<String>,
    ) -> Result<TransferRecord> {
        self.finish(id, |record| {
            record.state = TransferState::Completed;
            record.bytes_transferred = bytes;
            if record.bytes_total == 0 {
                record.bytes_total = bytes;
            }
            record.etag = etag;
        })
    }

    pub(crate) fn fail(&self, id: u64, error: &str) -> Result<TransferRecord> {
        self.finish(id, |record| {
            record.state = TransferState::Failed;
            record.error = Some(error.to_string());
        })
    }

    fn finish(
        &self,
        id: u64,
        update: impl FnOnce(&mut TransferRecord),
    ) -> Result<TransferRecord> {
        let mut records = self.lock_records();
        let record = records.get_mut(&id).ok_or_else(|| {
            ProviderError::Transfer(format!("Transfer {} is no longer tracked", id))
        })?;
        update(record);
        Ok(record.clone())
    }

    fn lock_records(&self) -> MutexGuard<'_, BTreeMap<u64, TransferRecord>> {
        // a panic while holding the lock leaves the records readable
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}
