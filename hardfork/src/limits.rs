//! Version-gated protocol limits

use crate::{network_dependent_value, ChainConfig, Feature, NetworkState};
use serde::{Deserialize, Serialize};

/// Transaction format version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TxVersion {
    /// RingCT transactions
    V2 = 2,
    /// Per-output unlock times
    V3PerOutputUnlockTimes = 3,
    /// Explicit transaction types
    V4TxTypes = 4,
}

/// Transaction type carried by v4 transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TxType {
    /// Plain transfer
    Standard,
    /// Service node state change vote
    StateChange,
    /// Stake unlock request
    KeyImageUnlock,
    /// Service node contribution
    Stake,
    /// Name system registration or update
    NameSystem,
}

/// Highest transaction version accepted for `given`
pub fn max_transaction_version(config: &ChainConfig, given: NetworkState) -> TxVersion {
    network_dependent_value(
        config,
        given,
        &[
            (Feature::TxV4Types, TxVersion::V4TxTypes),
            (Feature::ServiceNodes, TxVersion::V3PerOutputUnlockTimes),
        ],
        TxVersion::V2,
    )
}

/// Highest transaction type accepted for `given`
pub fn max_transaction_type(config: &ChainConfig, given: NetworkState) -> TxType {
    network_dependent_value(
        config,
        given,
        &[(Feature::Ons, TxType::NameSystem), (Feature::TxV4Types, TxType::Stake)],
        TxType::Standard,
    )
}

/// Whether part of the fee is burned for `given`
pub fn burns_fees(config: &ChainConfig, given: NetworkState) -> bool {
    network_dependent_value(config, given, &[(Feature::FeeBurning, true)], false)
}
