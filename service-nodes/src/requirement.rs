//! Service node staking requirement
//!
//! The requirement went through three eras on mainnet:
//!
//! | Era          | Enabled by                   | Shape                              |
//! |--------------|------------------------------|------------------------------------|
//! | Exponential  | service nodes (9.0)          | `base + variable / 2^(Δh/129600)`  |
//! | Linear       | `LinearApproxStakingReq`     | piecewise linear over 7 points     |
//! | Fixed        | `FixedStakingRequirement`    | 15000 coins                        |
//!
//! Test networks use a flat requirement, devnet follows mainnet at a scaled
//! down level.

use crate::constants::{
    BLOCKS_PER_DAY, COIN, DEVNET_MAINNET_HEIGHT_OFFSET, FIXED_STAKING_REQUIREMENT,
    STAKING_REQUIREMENT_HALF_LIFE, TEST_NETWORK_STAKING_REQUIREMENT,
};
use hardfork::{network_dependent_value, ChainConfig, Feature, NetworkState, NetworkType};
use tracing::warn;

/// Control point heights of the linear era
const LINEAR_HEIGHTS: [i64; 7] = [385824, 429024, 472224, 515424, 558624, 601824, 645024];

/// Requirement at each control point, in atomic units
#[allow(clippy::inconsistent_digit_grouping)]
const LINEAR_REQUIREMENTS: [i64; 7] = [
    20458_380815527,
    19332_319724305,
    18438_564443912,
    17729_190407764,
    17166_159862153,
    16719_282221956,
    16364_595203882,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Era {
    Exponential,
    Linear,
    Fixed,
}

/// Atomic units a service node must lock at `height`.
pub fn get_staking_requirement(config: &ChainConfig, state: NetworkState, height: u64) -> u64 {
    match state.network {
        NetworkType::Testnet | NetworkType::Fakechain => return TEST_NETWORK_STAKING_REQUIREMENT,
        NetworkType::Devnet => {
            let mainnet = NetworkState::new(NetworkType::Mainnet, state.version);
            let mainnet_height = height.saturating_add(DEVNET_MAINNET_HEIGHT_OFFSET);
            return get_staking_requirement(config, mainnet, mainnet_height) / 10;
        }
        NetworkType::Mainnet => {}
    }

    let era = network_dependent_value(
        config,
        state,
        &[
            (Feature::FixedStakingRequirement, Era::Fixed),
            (Feature::LinearApproxStakingReq, Era::Linear),
        ],
        Era::Exponential,
    );

    match era {
        Era::Fixed => FIXED_STAKING_REQUIREMENT,
        Era::Linear => linear_requirement(height),
        Era::Exponential => exponential_requirement(config, state, height),
    }
}

/// Requirement a registration made at `height` must satisfy.
///
/// A registration may be mined up to a day later, so it takes the larger of
/// the requirement now and one day ahead.
pub fn registration_staking_requirement(
    config: &ChainConfig,
    state: NetworkState,
    height: u64,
) -> u64 {
    let now = get_staking_requirement(config, state, height);
    let later = get_staking_requirement(config, state, height.saturating_add(BLOCKS_PER_DAY));
    now.max(later)
}

fn linear_requirement(height: u64) -> u64 {
    let last = LINEAR_HEIGHTS.len() - 1;
    let h = i64::try_from(height).unwrap_or(i64::MAX);
    if h >= LINEAR_HEIGHTS[last] {
        return LINEAR_REQUIREMENTS[last] as u64;
    }
    if h < LINEAR_HEIGHTS[0] {
        warn!(height, "Linear staking requirement requested below its first control point");
    }

    let i = LINEAR_HEIGHTS[1..]
        .iter()
        .position(|&next| next > h)
        .unwrap_or(0);

    // Per-block slope is truncated before scaling
    let slope = (LINEAR_REQUIREMENTS[i + 1] - LINEAR_REQUIREMENTS[i])
        / (LINEAR_HEIGHTS[i + 1] - LINEAR_HEIGHTS[i]);
    let result = LINEAR_REQUIREMENTS[i] + (h - LINEAR_HEIGHTS[i]) * slope;
    u64::try_from(result).unwrap_or(0)
}

fn exponential_requirement(config: &ChainConfig, state: NetworkState, height: u64) -> u64 {
    let (hf_height, _) = config.get_hard_fork_heights(state.network, Feature::ServiceNodes.into());
    let hf_height = hf_height.unwrap_or(0);
    let height_adjusted = height.max(hf_height) - hf_height;

    let (base, variable) = if config.is_feature_enabled(Feature::InfiniteStaking, state) {
        (15_000 * COIN, 25_007.0)
    } else {
        (10_000 * COIN, 35_000.0)
    };

    let halvings = height_adjusted as f64 / STAKING_REQUIREMENT_HALF_LIFE;
    let variable = (variable * COIN as f64) / halvings.exp2();
    base + variable as u64
}
