use crate::errors::{ProviderError, Result};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Geographic storage endpoint a client targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum StorageRegion {
    UsEast1,
    UsEast2,
    UsWest1,
    UsWest2,
    CaCentral1,
    #[default]
    SaEast1,
    EuWest1,
    EuWest2,
    EuWest3,
    EuCentral1,
    EuNorth1,
    ApSouth1,
    ApNortheast1,
    ApNortheast2,
    ApSoutheast1,
    ApSoutheast2,
}

impl StorageRegion {
    pub const ALL: [StorageRegion; 16] = [
        StorageRegion::UsEast1,
        StorageRegion::UsEast2,
        StorageRegion::UsWest1,
        StorageRegion::UsWest2,
        StorageRegion::CaCentral1,
        StorageRegion::SaEast1,
        StorageRegion::EuWest1,
        StorageRegion::EuWest2,
        StorageRegion::EuWest3,
        StorageRegion::EuCentral1,
        StorageRegion::EuNorth1,
        StorageRegion::ApSouth1,
        StorageRegion::ApNortheast1,
        StorageRegion::ApNortheast2,
        StorageRegion::ApSoutheast1,
        StorageRegion::ApSoutheast2,
    ];

    /// Region code as understood by the S3 endpoint resolver
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageRegion::UsEast1 => "us-east-1",
            StorageRegion::UsEast2 => "us-east-2",
            StorageRegion::UsWest1 => "us-west-1",
            StorageRegion::UsWest2 => "us-west-2",
            StorageRegion::CaCentral1 => "ca-central-1",
            StorageRegion::SaEast1 => "sa-east-1",
            StorageRegion::EuWest1 => "eu-west-1",
            StorageRegion::EuWest2 => "eu-west-2",
            StorageRegion::EuWest3 => "eu-west-3",
            StorageRegion::EuCentral1 => "eu-central-1",
            StorageRegion::EuNorth1 => "eu-north-1",
            StorageRegion::ApSouth1 => "ap-south-1",
            StorageRegion::ApNortheast1 => "ap-northeast-1",
            StorageRegion::ApNortheast2 => "ap-northeast-2",
            StorageRegion::ApSoutheast1 => "ap-southeast-1",
            StorageRegion::ApSoutheast2 => "ap-southeast-2",
        }
    }
}

impl fmt::Display for StorageRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageRegion {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self> {
        let code = s.trim().to_ascii_lowercase();
        StorageRegion::ALL
            .iter()
            .copied()
            .find(|region| region.as_str() == code)
            .ok_or_else(|| ProviderError::Configuration(format!("Unknown region: '{}'", s)))
    }
}

impl TryFrom<String> for StorageRegion {
    type Error = ProviderError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}
