//! Named features and network-dependent value selection
//!
//! Call sites ask "is the name system live" instead of "is the version at
//! least 15.0". Every version-gated constant goes through
//! [`network_dependent_value`], so its tie-break rules are consensus relevant.

use crate::{ChainConfig, NetworkState, NetworkVersion};
use serde::{Deserialize, Serialize};

/// Protocol features and the network version that first enables them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Feature {
    /// Service node registration and rewards
    ServiceNodes,
    /// Infinite staking and its contribution rules
    InfiniteStaking,
    /// Version 4 transactions with explicit transaction types
    TxV4Types,
    /// Staking requirement from the linear approximation table
    LinearApproxStakingReq,
    /// Contributions capped at a fraction above the remaining stake
    OverstakeProtection,
    /// Part of the transaction fee is burned
    FeeBurning,
    /// Name system registrations
    Ons,
    /// Flat staking requirement
    FixedStakingRequirement,
}

impl Feature {
    /// Every feature, oldest first
    pub const ALL: [Feature; 8] = [
        Feature::ServiceNodes,
        Feature::InfiniteStaking,
        Feature::TxV4Types,
        Feature::LinearApproxStakingReq,
        Feature::OverstakeProtection,
        Feature::FeeBurning,
        Feature::Ons,
        Feature::FixedStakingRequirement,
    ];

    /// First network version with this feature
    pub const fn version(self) -> NetworkVersion {
        match self {
            Feature::ServiceNodes => NetworkVersion::new(9, 0),
            Feature::InfiniteStaking | Feature::TxV4Types => NetworkVersion::new(11, 0),
            Feature::LinearApproxStakingReq | Feature::OverstakeProtection => {
                NetworkVersion::new(13, 0)
            }
            Feature::FeeBurning => NetworkVersion::new(14, 0),
            Feature::Ons => NetworkVersion::new(15, 0),
            Feature::FixedStakingRequirement => NetworkVersion::new(16, 0),
        }
    }
}

impl From<Feature> for NetworkVersion {
    fn from(feature: Feature) -> Self {
        feature.version()
    }
}

fn strictly_descending(versions: impl Iterator<Item = NetworkVersion>) -> bool {
    let mut prev: Option<NetworkVersion> = None;
    for version in versions {
        if prev.is_some_and(|prev| prev <= version) {
            return false;
        }
        prev = Some(version);
    }
    true
}

/// Picks the value of the most recent enabled feature.
///
/// `choices` must be in strictly descending version order (checked in debug
/// builds only; out-of-order input yields plausible but wrong values in
/// release builds). The first `(feature, value)` with
/// `ceil(feature) <= floor(given)` wins, otherwise `default`.
///
/// ```
/// use hardfork::{network_dependent_value, ChainConfig, Feature, NetworkState, NetworkType, NetworkVersion};
///
/// let config = ChainConfig::default();
/// let given = NetworkState::new(NetworkType::Mainnet, NetworkVersion::new(14, 0));
/// let limit = network_dependent_value(
///     &config,
///     given,
///     &[(Feature::Ons, 3), (Feature::TxV4Types, 2)],
///     1,
/// );
/// assert_eq!(limit, 2);
/// ```
pub fn network_dependent_value<V, T>(
    config: &ChainConfig,
    given: NetworkState,
    choices: &[(V, T)],
    default: T,
) -> T
where
    V: Copy + Into<NetworkVersion>,
    T: Copy,
{
    debug_assert!(
        strictly_descending(choices.iter().map(|(version, _)| (*version).into())),
        "network dependent values must be given in descending version order"
    );

    let schedule = config.schedule(given.network);
    let given_floor = schedule.floor(given.version);
    choices
        .iter()
        .find(|(version, _)| schedule.ceil((*version).into()) <= given_floor)
        .map(|(_, value)| *value)
        .unwrap_or(default)
}

impl ChainConfig {
    /// True if `feature` is live for `given`
    pub fn is_feature_enabled(&self, feature: Feature, given: NetworkState) -> bool {
        self.is_network_version_enabled(feature.version(), given)
    }
}
