//! Contribution limits for service node stakes

use crate::constants::{
    MAXIMUM_ACCEPTABLE_STAKE_DEN, MAXIMUM_ACCEPTABLE_STAKE_NUM, MAX_NUMBER_OF_CONTRIBUTORS,
    STAKING_PORTIONS,
};
use crate::portions::get_portions_to_make_amount;
use hardfork::{ChainConfig, Feature, NetworkState};

/// Smallest contribution accepted for the next slot.
///
/// Before infinite staking every contributor had to put in a quarter of the
/// requirement (or whatever was left). Afterwards the remaining stake is
/// spread over the remaining slots. Returns `u64::MAX` once every slot is
/// taken, so no contribution can qualify.
pub fn get_min_node_contribution(
    config: &ChainConfig,
    state: NetworkState,
    staking_requirement: u64,
    total_reserved: u64,
    num_contributions: usize,
) -> u64 {
    let needed = staking_requirement.saturating_sub(total_reserved);

    if !config.is_feature_enabled(Feature::InfiniteStaking, state) {
        return needed.min(staking_requirement / MAX_NUMBER_OF_CONTRIBUTORS as u64);
    }

    match MAX_NUMBER_OF_CONTRIBUTORS.checked_sub(num_contributions) {
        Some(slots) if slots > 0 => needed / slots as u64,
        _ => u64::MAX,
    }
}

/// [`get_min_node_contribution`] expressed in portions of a full stake
pub fn get_min_node_contribution_in_portions(
    config: &ChainConfig,
    state: NetworkState,
    staking_requirement: u64,
    total_reserved: u64,
    num_contributions: usize,
) -> u64 {
    match get_min_node_contribution(
        config,
        state,
        staking_requirement,
        total_reserved,
        num_contributions,
    ) {
        u64::MAX => u64::MAX,
        amount => get_portions_to_make_amount(staking_requirement, amount),
    }
}

/// Largest contribution accepted.
///
/// Unlimited until overstake protection, then capped at 101% of what is left.
pub fn get_max_node_contribution(
    config: &ChainConfig,
    state: NetworkState,
    staking_requirement: u64,
    total_reserved: u64,
) -> u64 {
    if !config.is_feature_enabled(Feature::OverstakeProtection, state) {
        return u64::MAX;
    }
    let needed = staking_requirement.saturating_sub(total_reserved) as u128;
    (needed * MAXIMUM_ACCEPTABLE_STAKE_NUM as u128 / MAXIMUM_ACCEPTABLE_STAKE_DEN as u128) as u64
}

/// True if `portions` is an acceptable reservation list.
///
/// Every entry must meet the minimum for its slot given what earlier entries
/// reserved, there can be at most [`MAX_NUMBER_OF_CONTRIBUTORS`] entries and
/// the total cannot exceed a full stake.
pub fn check_service_node_portions(
    config: &ChainConfig,
    state: NetworkState,
    portions: &[u64],
) -> bool {
    if portions.len() > MAX_NUMBER_OF_CONTRIBUTORS {
        return false;
    }

    let mut reserved: u64 = 0;
    for (index, &portion) in portions.iter().enumerate() {
        let min_portions =
            get_min_node_contribution(config, state, STAKING_PORTIONS, reserved, index);
        if portion < min_portions {
            return false;
        }
        reserved = match reserved.checked_add(portion) {
            Some(total) => total,
            None => return false,
        };
    }

    reserved <= STAKING_PORTIONS
}
