//! Hard-fork summary for RPC consumers

use crate::{ChainConfig, NetworkState, NetworkType, NetworkVersion};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What the network knows about one version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardForkInfo {
    /// Version the information is about
    pub version: NetworkVersion,
    /// Whether `version` is enabled on the current version
    pub enabled: bool,
    /// First height at which `version` is the active rule set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earliest_height: Option<u64>,
    /// Last height at which `version` is the active rule set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_height: Option<u64>,
    /// Estimated activation time of the fork that introduced `version`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activation_time: Option<DateTime<Utc>>,
}

impl ChainConfig {
    /// Describe `requested` on `network` given that `current` is active
    pub fn hard_fork_info(
        &self,
        network: NetworkType,
        current: NetworkVersion,
        requested: NetworkVersion,
    ) -> HardForkInfo {
        let schedule = self.schedule(network);
        let (earliest_height, latest_height) = schedule.heights(requested);
        let activation_time = schedule
            .fork_for(requested)
            .and_then(|hf| i64::try_from(hf.time).ok())
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0));

        HardForkInfo {
            version: requested,
            enabled: self.is_network_version_enabled(requested, NetworkState::new(network, current)),
            earliest_height,
            latest_height,
            activation_time,
        }
    }
}
