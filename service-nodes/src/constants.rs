//! Economic constants shared by the staking rules

/// Atomic units per coin
pub const COIN: u64 = 1_000_000_000;

/// Portions that make up a full stake.
///
/// Divisible by 4 so a four-way split is exact.
pub const STAKING_PORTIONS: u64 = 0xffff_ffff_ffff_fffc;

/// Maximum contributors to one service node, operator included
pub const MAX_NUMBER_OF_CONTRIBUTORS: usize = 4;

/// Numerator of the overstake cap (contribution ≤ remaining × 101/100)
pub const MAXIMUM_ACCEPTABLE_STAKE_NUM: u64 = 101;

/// Denominator of the overstake cap
pub const MAXIMUM_ACCEPTABLE_STAKE_DEN: u64 = 100;

/// Remaining stake at or below this many atomic units is rounding dust
pub const DUST: u64 = MAX_NUMBER_OF_CONTRIBUTORS as u64;

/// Blocks per day at the 2 minute target
pub const BLOCKS_PER_DAY: u64 = 720;

/// Blocks over which the exponential-era variable part halves
pub const STAKING_REQUIREMENT_HALF_LIFE: f64 = 129_600.0;

/// Flat requirement on the test networks
pub const TEST_NETWORK_STAKING_REQUIREMENT: u64 = 100 * COIN;

/// Flat requirement once fixed staking is enabled
pub const FIXED_STAKING_REQUIREMENT: u64 = 15_000 * COIN;

/// Mainnet height devnet requirements are sampled ahead by
pub const DEVNET_MAINNET_HEIGHT_OFFSET: u64 = 650_000;
