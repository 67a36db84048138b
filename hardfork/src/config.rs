//! Node configuration for the hard-fork rules

use crate::schedule::ReleaseVersion;
use crate::table::HardFork;
use crate::{ChainConfig, Error, NetworkType, Result};
use serde::{Deserialize, Serialize};

/// Hard-fork related node configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Network the node follows
    pub network: NetworkType,

    /// Node release version
    pub release: ReleaseVersion,

    /// Hard forks for the fakechain network
    pub fakechain_hard_forks: Vec<HardFork>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: NetworkType::Mainnet,
            release: ReleaseVersion::default(),
            fakechain_hard_forks: vec![],
        }
    }
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();

        if let Ok(network) = std::env::var("SN_RULES_NETWORK") {
            config.network = network.parse()?;
        }

        if let Ok(release) = std::env::var("SN_RULES_RELEASE") {
            config.release = parse_release(&release)?;
        }

        Ok(config)
    }

    /// Validate into the configuration every query takes
    pub fn chain_config(&self) -> Result<ChainConfig> {
        ChainConfig::builder()
            .fakechain_hard_forks(self.fakechain_hard_forks.iter().copied())
            .release(self.release)
            .build()
    }
}

/// Parses `major.minor.patch`
fn parse_release(s: &str) -> Result<ReleaseVersion> {
    let invalid = || Error::Config(format!("Invalid release version: {}", s));
    let mut parts = s.trim().split('.').map(|part| part.parse::<u16>());
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(Ok(major)), Some(Ok(minor)), Some(Ok(patch)), None) => {
            Ok(ReleaseVersion::new(major, minor, patch))
        }
        _ => Err(invalid()),
    }
}
