use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// Malformed or missing credentials, region or endpoint.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The context-derived transfer configuration could not be loaded.
    #[error("Initialization error: {0}")]
    Initialization(String),

    #[error("Transfer error: {0}")]
    Transfer(String),

    #[error("Runtime error: {0}")]
    Runtime(String),
}

pub type Result<T> = std::result::Result<T, ProviderError>;
