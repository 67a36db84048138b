//! Chain configuration shared by every query
//!
//! The only runtime-configurable table is the fakechain one. It is installed
//! once through [`ChainConfigBuilder`] and immutable afterwards, so a
//! `&ChainConfig` can be shared freely across threads.

use crate::schedule::{ForkSchedule, ReleaseVersion};
use crate::table::{self, HardFork, DEVNET_HARD_FORKS, MAINNET_HARD_FORKS, TESTNET_HARD_FORKS};
use crate::{NetworkState, NetworkType, NetworkVersion, Result};
use tracing::debug;

/// Validated hard-fork configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainConfig {
    fakechain_hard_forks: Vec<HardFork>,
    release: ReleaseVersion,
}

impl ChainConfig {
    /// Start building a configuration
    pub fn builder() -> ChainConfigBuilder {
        ChainConfigBuilder::default()
    }

    /// Release version used for the ideal block version
    pub fn release(&self) -> ReleaseVersion {
        self.release
    }

    /// Ordered hard-fork table for `network`
    pub fn get_hard_forks(&self, network: NetworkType) -> &[HardFork] {
        match network {
            NetworkType::Mainnet => MAINNET_HARD_FORKS,
            NetworkType::Testnet => TESTNET_HARD_FORKS,
            NetworkType::Devnet => DEVNET_HARD_FORKS,
            NetworkType::Fakechain => &self.fakechain_hard_forks,
        }
    }

    /// Query engine for `network`
    pub fn schedule(&self, network: NetworkType) -> ForkSchedule<'_> {
        ForkSchedule::trusted(network, self.get_hard_forks(network))
    }

    /// See [`ForkSchedule::heights`]
    pub fn get_hard_fork_heights(
        &self,
        network: NetworkType,
        version: NetworkVersion,
    ) -> (Option<u64>, Option<u64>) {
        self.schedule(network).heights(version)
    }

    /// See [`ForkSchedule::ceil`]
    pub fn hard_fork_ceil(&self, state: NetworkState) -> NetworkVersion {
        self.schedule(state.network).ceil(state.version)
    }

    /// See [`ForkSchedule::floor`]
    pub fn hard_fork_floor(&self, state: NetworkState) -> NetworkVersion {
        self.schedule(state.network).floor(state.version)
    }

    /// See [`ForkSchedule::versions_for_height`]
    pub fn get_network_versions_for_height(
        &self,
        network: NetworkType,
        height: u64,
    ) -> (NetworkVersion, NetworkVersion) {
        self.schedule(network).versions_for_height(height)
    }

    /// See [`ForkSchedule::is_at_least`]
    pub fn is_hard_fork_at_least(
        &self,
        network: NetworkType,
        version: NetworkVersion,
        height: u64,
    ) -> bool {
        self.schedule(network).is_at_least(version, height)
    }

    /// See [`ForkSchedule::is_beyond`]
    pub fn is_hard_fork_beyond(&self, network: NetworkType, version: NetworkVersion, height: u64) -> bool {
        self.schedule(network).is_beyond(version, height)
    }

    /// See [`ForkSchedule::is_beyond_version`]
    pub fn is_hard_fork_beyond_state(&self, version: NetworkVersion, current: NetworkState) -> bool {
        self.schedule(current.network).is_beyond_version(version, current.version)
    }

    /// `hard_fork_ceil({given.network, needed}) <= hard_fork_floor(given)`
    pub fn is_network_version_enabled(&self, needed: NetworkVersion, given: NetworkState) -> bool {
        self.schedule(given.network).is_enabled(needed, given.version)
    }

    /// See [`ForkSchedule::is_only`]
    pub fn is_network_version_only(&self, needed: NetworkVersion, given: NetworkState) -> bool {
        self.schedule(given.network).is_only(needed, given.version)
    }

    /// See [`ForkSchedule::ideal_version`]
    pub fn get_ideal_network_version(&self, network: NetworkType, height: u64) -> NetworkVersion {
        self.schedule(network).ideal_version(height, self.release)
    }

    /// See [`ForkSchedule::is_same_hard_fork`]
    pub fn is_same_hard_fork(&self, network: NetworkType, a: NetworkVersion, b: NetworkVersion) -> bool {
        self.schedule(network).is_same_hard_fork(a, b)
    }
}

/// Builder for [`ChainConfig`]
#[derive(Debug, Default)]
pub struct ChainConfigBuilder {
    fakechain_hard_forks: Vec<HardFork>,
    release: ReleaseVersion,
}

impl ChainConfigBuilder {
    /// Append one fakechain hard fork
    pub fn fakechain_hard_fork(mut self, hard_fork: HardFork) -> Self {
        self.fakechain_hard_forks.push(hard_fork);
        self
    }

    /// Append several fakechain hard forks
    pub fn fakechain_hard_forks(mut self, forks: impl IntoIterator<Item = HardFork>) -> Self {
        self.fakechain_hard_forks.extend(forks);
        self
    }

    /// Set the node release version
    pub fn release(mut self, release: ReleaseVersion) -> Self {
        self.release = release;
        self
    }

    /// Validate and freeze the configuration.
    ///
    /// An empty fakechain table is allowed (fakechain unused); a non-empty one
    /// must satisfy the fakechain ordering rules.
    pub fn build(self) -> Result<ChainConfig> {
        if let Some(top) = self.fakechain_hard_forks.last() {
            table::validate(NetworkType::Fakechain, &self.fakechain_hard_forks)?;
            debug!(
                forks = self.fakechain_hard_forks.len(),
                top = %top.version,
                "Installed fakechain hard forks"
            );
        }

        Ok(ChainConfig {
            fakechain_hard_forks: self.fakechain_hard_forks,
            release: self.release,
        })
    }
}
