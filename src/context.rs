//! Application runtime context and the transfer configuration derived from it

use crate::config::StorageRegion;
use crate::errors::{ProviderError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// File name of the bundled configuration resource inside a context's resource directory
pub const CONFIGURATION_RESOURCE: &str = "awsconfiguration.json";

pub const DEFAULT_CONFIGURATION_NAME: &str = "Default";

/// Handle on the running application: who it is and where its bundled resources live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppContext {
    application_id: String,
    resource_dir: PathBuf,
    configuration_name: String,
}

impl AppContext {
    pub fn new(application_id: impl Into<String>, resource_dir: impl Into<PathBuf>) -> Self {
        Self {
            application_id: application_id.into(),
            resource_dir: resource_dir.into(),
            configuration_name: DEFAULT_CONFIGURATION_NAME.to_string(),
        }
    }

    /// Select a named section of the configuration resource instead of `Default`
    pub fn with_configuration_name(mut self, name: impl Into<String>) -> Self {
        self.configuration_name = name.into();
        self
    }

    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    pub fn resource_dir(&self) -> &Path {
        &self.resource_dir
    }

    pub fn configuration_name(&self) -> &str {
        &self.configuration_name
    }

    pub fn configuration_resource(&self) -> PathBuf {
        self.resource_dir.join(CONFIGURATION_RESOURCE)
    }
}

/// Transfer settings read from a context's configuration resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferConfiguration {
    bucket: String,
    region: Option<StorageRegion>,
    source: PathBuf,
}

#[derive(Deserialize)]
struct ConfigurationDocument {
    #[serde(rename = "S3TransferUtility")]
    transfer_utility: Option<HashMap<String, TransferSection>>,
}

#[derive(Deserialize)]
struct TransferSection {
    #[serde(rename = "Bucket")]
    bucket: String,
    #[serde(rename = "Region")]
    region: Option<String>,
}

impl TransferConfiguration {
    pub fn new(bucket: impl Into<String>, region: Option<StorageRegion>) -> Self {
        Self {
            bucket: bucket.into(),
            region,
            source: PathBuf::new(),
        }
    }

    /// Read the `S3TransferUtility` section named by the context from its bundled resource
    pub fn from_context(context: &AppContext) -> Result<Self> {
        let path = context.configuration_resource();
        let contents = std::fs::read_to_string(&path).map_err(|e| {
            ProviderError::Initialization(format!(
                "Failed to read configuration resource {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&contents, context.configuration_name(), &path)
    }

    fn parse(contents: &str, name: &str, source: &Path) -> Result<Self> {
        let document: ConfigurationDocument = serde_json::from_str(contents).map_err(|e| {
            ProviderError::Initialization(format!(
                "Invalid configuration resource {}: {}",
                source.display(),
                e
            ))
        })?;

        let mut sections = document.transfer_utility.ok_or_else(|| {
            ProviderError::Initialization(format!(
                "No S3TransferUtility section in {}",
                source.display()
            ))
        })?;
        let section = sections.remove(name).ok_or_else(|| {
            ProviderError::Initialization(format!(
                "No S3TransferUtility.{} entry in {}",
                name,
                source.display()
            ))
        })?;

        if section.bucket.trim().is_empty() {
            return Err(ProviderError::Initialization(format!(
                "S3TransferUtility.{}.Bucket is empty in {}",
                name,
                source.display()
            )));
        }

        let region = section
            .region
            .map(|code| code.parse::<StorageRegion>())
            .transpose()
            .map_err(|e| ProviderError::Initialization(e.to_string()))?;

        Ok(Self {
            bucket: section.bucket.trim().to_string(),
            region,
            source: source.to_path_buf(),
        })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn region(&self) -> Option<StorageRegion> {
        self.region
    }

    /// Resource the configuration was read from; empty for configurations built in code
    pub fn source(&self) -> &Path {
        &self.source
    }
}
