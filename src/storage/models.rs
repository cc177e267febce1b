use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Direction of a transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferKind {
    Upload,
    Download,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferState {
    InProgress,
    Completed,
    Failed,
}

/// Snapshot of a single tracked transfer
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRecord {
    pub id: u64,
    pub kind: TransferKind,
    pub bucket: String,
    pub key: String,
    pub file: PathBuf,
    pub state: TransferState,
    pub bytes_total: u64,
    pub bytes_transferred: u64,
    pub etag: Option<String>,
    pub error: Option<String>,
    pub started_at: DateTime<Utc>,
}

impl TransferRecord {
    pub(crate) fn started(
        id: u64,
        kind: TransferKind,
        bucket: &str,
        key: &str,
        file: PathBuf,
        bytes_total: u64,
    ) -> Self {
        Self {
            id,
            kind,
            bucket: bucket.to_string(),
            key: key.to_string(),
            file,
            state: TransferState::InProgress,
            bytes_total,
            bytes_transferred: 0,
            etag: None,
            error: None,
            started_at: Utc::now(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state != TransferState::InProgress
    }
}
