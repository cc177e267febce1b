pub mod client;
pub mod download;
pub mod models;
pub mod transfer;
pub mod upload;

// Re-export types for convenient access from other modules
pub use client::StorageClientProvider;
pub use models::{TransferKind, TransferRecord, TransferState};
pub use transfer::TransferUtility;
