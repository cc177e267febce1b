use crate::errors::{ProviderError, Result};
use crate::storage::models::{TransferKind, TransferRecord};
use crate::storage::transfer::TransferUtility;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use std::path::Path;

impl TransferUtility {
    /// Upload a local file to `key` in the configured bucket
    ///
    /// A missing local file is rejected before anything is tracked or sent.
    pub fn upload(&self, key: &str, local_path: &Path) -> Result<TransferRecord> {
        if key.is_empty() {
            return Err(ProviderError::Transfer("Object key must not be empty".to_string()));
        }

        let metadata = std::fs::metadata(local_path).map_err(|e| {
            ProviderError::Transfer(format!(
                "Local file does not exist: {}: {}",
                local_path.display(),
                e
            ))
        })?;
        if !metadata.is_file() {
            return Err(ProviderError::Transfer(format!(
                "Local path is not a file: {}",
                local_path.display()
            )));
        }
        let size = metadata.len();

        let id = self.begin(TransferKind::Upload, key, local_path.to_path_buf(), size);
        tracing::info!(id, bucket = self.bucket(), key, size, "upload started");

        let outcome = self.runtime.block_on(async {
            // Stream from the file rather than loading it into memory
            let body = ByteStream::from_path(local_path)
                .await
                .map_err(|e| format!("Failed to create ByteStream from path: {}", e))?;

            let response = self
                .client
                .put_object()
                .bucket(self.bucket())
                .key(key)
                .body(body)
                .send()
                .await
                .map_err(|e| format!("Failed to upload to storage: {}", DisplayErrorContext(e)))?;

            Ok::<Option<String>, String>(response.e_tag().map(|tag| tag.replace('"', "")))
        });

        match outcome {
            Ok(etag) => {
                let record = self.complete(id, size, etag)?;
                tracing::info!(id, key, "upload completed");
                Ok(record)
            }
            Err(message) => {
                if let Err(e) = self.fail(id, &message) {
                    tracing::debug!(id, error = %e, "failed transfer was already untracked");
                }
                tracing::warn!(id, key, error = %message, "upload failed");
                Err(ProviderError::Transfer(message))
            }
        }
    }
}
