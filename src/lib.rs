//! Lazily built S3 transfer utility backed by injected static credentials.
//!
//! A [`StorageClientProvider`] is created from a [`ProviderConfig`]. Each call to
//! [`StorageClientProvider::get_storage_client`] builds a fresh S3 client, while
//! [`StorageClientProvider::get_transfer_utility`] builds one [`TransferUtility`] on first use
//! and hands back that same instance afterwards.

pub mod config;
pub mod context;
pub mod errors;
pub mod interfaces;
pub mod storage;

pub use config::{ProviderConfig, StaticCredentials, StorageRegion};
pub use context::{AppContext, TransferConfiguration};
pub use errors::{ProviderError, Result};
pub use interfaces::{BundledConfigurationLoader, ConfigurationLoader};
pub use storage::{
    StorageClientProvider, TransferKind, TransferRecord, TransferState, TransferUtility,
};
