use crate::errors::{ProviderError, Result};
use crate::storage::models::{TransferKind, TransferRecord};
use crate::storage::transfer::TransferUtility;
use aws_sdk_s3::error::DisplayErrorContext;
use std::path::Path;

impl TransferUtility {
    /// Download `key` from the configured bucket and write it to `local_path`
    pub fn download(&self, key: &str, local_path: &Path) -> Result<TransferRecord> {
        if key.is_empty() {
            return Err(ProviderError::Transfer("Object key must not be empty".to_string()));
        }

        let id = self.begin(TransferKind::Download, key, local_path.to_path_buf(), 0);
        tracing::info!(id, bucket = self.bucket(), key, "download started");

        let outcome = self.runtime.block_on(async {
            let response = self
                .client
                .get_object()
                .bucket(self.bucket())
                .key(key)
                .send()
                .await
                .map_err(|e| {
                    format!("Failed to download from storage: {}", DisplayErrorContext(e))
                })?;

            let etag = response.e_tag().map(|tag| tag.replace('"', ""));
            let bytes = response
                .body
                .collect()
                .await
                .map_err(|e| format!("Failed to read response body: {}", e))?
                .into_bytes();

            tokio::fs::write(local_path, &bytes)
                .await
                .map_err(|e| format!("Failed to write {}: {}", local_path.display(), e))?;

            Ok::<(u64, Option<String>), String>((bytes.len() as u64, etag))
        });

        match outcome {
            Ok((size, etag)) => {
                let record = self.complete(id, size, etag)?;
                tracing::info!(id, key, size, "download completed");
                Ok(record)
            }
            Err(message) => {
                if let Err(e) = self.fail(id, &message) {
                    tracing::debug!(id, error = %e, "failed transfer was already untracked");
                }
                tracing::warn!(id, key, error = %message, "download failed");
                Err(ProviderError::Transfer(message))
            }
        }
    }
}
