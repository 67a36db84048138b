//! Network types and network state

use crate::{Error, NetworkVersion};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which chain a node is following
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    /// Production network
    Mainnet,
    /// Public test network
    Testnet,
    /// Developer network
    Devnet,
    /// Local test chain with a configurable hard-fork table
    Fakechain,
}

impl NetworkType {
    /// All network types
    pub const ALL: [NetworkType; 4] = [
        NetworkType::Mainnet,
        NetworkType::Testnet,
        NetworkType::Devnet,
        NetworkType::Fakechain,
    ];

    /// Lowercase name used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkType::Mainnet => "mainnet",
            NetworkType::Testnet => "testnet",
            NetworkType::Devnet => "devnet",
            NetworkType::Fakechain => "fakechain",
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(NetworkType::Mainnet),
            "testnet" => Ok(NetworkType::Testnet),
            "devnet" => Ok(NetworkType::Devnet),
            "fakechain" => Ok(NetworkType::Fakechain),
            other => Err(Error::UnknownNetwork(other.to_string())),
        }
    }
}

/// A network together with the version currently active on it.
///
/// Most queries take this instead of a height so that callers can resolve the
/// height once and reuse the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkState {
    /// Chain being queried
    pub network: NetworkType,
    /// Active version on that chain
    pub version: NetworkVersion,
}

impl NetworkState {
    /// Create a network state
    pub const fn new(network: NetworkType, version: NetworkVersion) -> Self {
        Self { network, version }
    }

    /// Same network, different version
    pub const fn with_version(self, version: NetworkVersion) -> Self {
        Self::new(self.network, version)
    }
}
