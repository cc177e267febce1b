use crate::context::{AppContext, TransferConfiguration};
use crate::errors::Result;
use mockall::automock;

/// Interface for turning a runtime context into transfer settings, to facilitate testing
#[automock]
pub trait ConfigurationLoader {
    fn load(&self, context: &AppContext) -> Result<TransferConfiguration>;
}

/// Default implementation that reads the context's bundled configuration resource
#[derive(Debug, Default, Clone, Copy)]
pub struct BundledConfigurationLoader;

impl ConfigurationLoader for BundledConfigurationLoader {
    fn load(&self, context: &AppContext) -> Result<TransferConfiguration> {
        TransferConfiguration::from_context(context)
    }
}
