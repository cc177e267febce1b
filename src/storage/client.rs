use crate::config::ProviderConfig;
use crate::context::AppContext;
use crate::errors::Result;
use crate::interfaces::{BundledConfigurationLoader, ConfigurationLoader};
use crate::storage::transfer::TransferUtility;
use aws_config::retry::RetryConfig;
use aws_credential_types::Credentials;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{BehaviorVersion, Region, SharedHttpClient};
use once_cell::sync::OnceCell;
use std::sync::atomic::{AtomicUsize, Ordering};

const CREDENTIALS_PROVIDER_NAME: &str = "StaticCredentials";

/// Builds S3 clients from injected credentials and owns the lazily created transfer utility
///
/// The transfer utility is built on the first successful call to
/// [`StorageClientProvider::get_transfer_utility`] and reused for the life of the provider.
/// Later calls get the same instance even when they pass a different context.
pub struct StorageClientProvider<L = BundledConfigurationLoader> {
    config: ProviderConfig,
    loader: L,
    http_client: Option<SharedHttpClient>,
    transfer_utility: OnceCell<TransferUtility>,
    clients_built: AtomicUsize,
}

impl StorageClientProvider<BundledConfigurationLoader> {
    /// Create a provider that reads transfer settings from the context's bundled resource
    pub fn new(config: ProviderConfig) -> Self {
        Self::with_loader(config, BundledConfigurationLoader)
    }
}

impl<L: ConfigurationLoader> StorageClientProvider<L> {
    pub fn with_loader(config: ProviderConfig, loader: L) -> Self {
        Self {
            config,
            loader,
            http_client: None,
            transfer_utility: OnceCell::new(),
            clients_built: AtomicUsize::new(0),
        }
    }

    /// Route every client this provider builds through the given HTTP client
    pub fn with_http_client(mut self, http_client: SharedHttpClient) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Build a new S3 client. Construction is local; no request is sent.
    pub fn get_storage_client(&self) -> Result<Client> {
        self.config.validate()?;

        let credentials = self.config.credentials();
        let region = self.config.region();

        tracing::debug!(
            region = %region,
            key_id = %credentials.redacted_key_id(),
            endpoint = self.config.endpoint_url().unwrap_or("<regional>"),
            "creating S3 client"
        );

        let credentials = Credentials::new(
            credentials.access_key_id(),
            credentials.secret_access_key(),
            credentials.session_token().map(str::to_string),
            None, // No expiry
            CREDENTIALS_PROVIDER_NAME,
        );

        let mut builder = aws_sdk_s3::Config::builder()
            .region(Region::new(region.as_str()))
            .credentials_provider(credentials)
            .retry_config(RetryConfig::standard().with_max_attempts(self.config.max_attempts()))
            .force_path_style(self.config.force_path_style())
            .behavior_version(BehaviorVersion::latest());

        if let Some(endpoint) = self.config.endpoint_url() {
            builder = builder.endpoint_url(endpoint);
        }
        if let Some(http_client) = &self.http_client {
            builder = builder.http_client(http_client.clone());
        }

        let client = Client::from_conf(builder.build());
        self.clients_built.fetch_add(1, Ordering::SeqCst);
        Ok(client)
    }

    /// Return the provider's transfer utility, building it on first use
    ///
    /// If loading the context's configuration fails the error is returned and nothing is
    /// stored, so a later call tries again. Concurrent first callers wait for a single
    /// initializer rather than each building their own utility.
    pub fn get_transfer_utility(&self, context: &AppContext) -> Result<&TransferUtility> {
        if let Some(existing) = self.transfer_utility.get() {
            if existing.context() != context {
                tracing::debug!(
                    bound = existing.context().application_id(),
                    requested = context.application_id(),
                    "transfer utility already bound to another context, reusing it"
                );
            }
            return Ok(existing);
        }

        self.transfer_utility.get_or_try_init(|| {
            let configuration = self.loader.load(context)?;
            let client = self.get_storage_client()?;
            TransferUtility::new(client, self.config.region(), context.clone(), configuration)
        })
    }

    pub fn is_initialized(&self) -> bool {
        self.transfer_utility.get().is_some()
    }

    /// Number of S3 clients this provider has built so far
    pub fn client_constructions(&self) -> usize {
        self.clients_built.load(Ordering::SeqCst)
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }
}
