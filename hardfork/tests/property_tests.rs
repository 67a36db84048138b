//! Property-based tests for hard-fork invariants
//!
//! These tests verify properties that must hold for every network:
//! - Table ordering: heights increase, times never go back, first version >= 7.0
//! - Rounding: ceil/floor are fixed points on tabled versions
//! - Monotonicity: later heights never map to older versions

use hardfork::table::{find_defect, TableRules};
use hardfork::{
    ChainConfig, Feature, ForkSchedule, HardFork, NetworkState, NetworkType, NetworkVersion,
};
use proptest::prelude::*;

fn fakechain_config() -> ChainConfig {
    ChainConfig::builder()
        .fakechain_hard_forks([
            HardFork::new(7, 0, 0, 0),
            HardFork::new(9, 0, 5, 100),
            HardFork::new(11, 0, 10, 200),
            HardFork::new(11, 4, 15, 200),
            HardFork::new(16, 0, 20, 300),
        ])
        .build()
        .unwrap()
}

/// Strategy for generating network types
fn network_strategy() -> impl Strategy<Value = NetworkType> {
    prop_oneof![
        Just(NetworkType::Mainnet),
        Just(NetworkType::Testnet),
        Just(NetworkType::Devnet),
        Just(NetworkType::Fakechain),
    ]
}

/// Strategy for generating versions around the tabled range
fn version_strategy() -> impl Strategy<Value = NetworkVersion> {
    (5u16..24, 0u16..130).prop_map(|(major, minor)| NetworkVersion::new(major, minor))
}

// ============================================================================
// Table invariants
// ============================================================================

#[test]
fn every_table_is_ordered() {
    let config = fakechain_config();
    for network in NetworkType::ALL {
        let forks = config.get_hard_forks(network);
        assert!(!forks.is_empty(), "{} has no hard forks", network);
        assert!(forks[0].version >= NetworkVersion::new(7, 0));
        for pair in forks.windows(2) {
            assert!(pair[1].height > pair[0].height, "{} heights", network);
            assert!(pair[1].time >= pair[0].time, "{} times", network);
            if network == NetworkType::Mainnet {
                assert!(pair[1].version.major > pair[0].version.major);
            } else {
                assert!(pair[1].version > pair[0].version);
            }
        }
        assert_eq!(find_defect(forks, TableRules::for_network(network)), None);
    }
}

#[test]
fn tabled_versions_are_fixed_points() {
    let config = fakechain_config();
    for network in NetworkType::ALL {
        let schedule = config.schedule(network);
        for hf in schedule.forks() {
            let ceil = schedule.ceil(hf.version);
            assert_eq!(ceil, hf.version);
            assert_eq!(schedule.floor(ceil), ceil);
            assert!(schedule.is_enabled(hf.version, hf.version));
            assert_eq!(schedule.heights(hf.version).0, Some(hf.height));
        }
    }
}

#[test]
fn release_fork_examples() {
    let forks = [
        HardFork::new(7, 0, 1, 0),
        HardFork::new(19, 32, 100, 1),
        HardFork::new(20, 33, 200, 2),
        HardFork::new(21, 32, 300, 3),
    ];
    let schedule = ForkSchedule::new(NetworkType::Mainnet, &forks).unwrap();
    assert_eq!(schedule.ceil(NetworkVersion::new(19, 31)), NetworkVersion::new(19, 32));
    assert_eq!(schedule.ceil(NetworkVersion::new(19, 35)), NetworkVersion::new(20, 33));
    assert_eq!(schedule.ceil(NetworkVersion::new(21, 33)), NetworkVersion::new(22, 0));
    assert_eq!(schedule.floor(NetworkVersion::new(20, 32)), NetworkVersion::new(19, 32));
    assert_eq!(schedule.floor(NetworkVersion::new(57, 0)), NetworkVersion::new(21, 32));
}

#[test]
fn mainnet_blink_height_end_to_end() {
    let config = ChainConfig::default();
    let (min, _) = config.get_network_versions_for_height(NetworkType::Mainnet, 442333);
    assert_eq!(min, NetworkVersion::new(14, 0));

    let given = NetworkState::new(NetworkType::Mainnet, min);
    assert!(config.is_network_version_enabled(NetworkVersion::new(13, 0), given));
    assert!(!config.is_network_version_enabled(NetworkVersion::new(15, 0), given));
    assert!(config.is_feature_enabled(Feature::FeeBurning, given));
    assert!(!config.is_feature_enabled(Feature::Ons, given));
}

// ============================================================================
// Rounding properties
// ============================================================================

proptest! {
    /// Property: floor(ceil(v)) == ceil(v) whenever ceil(v) is a tabled version
    #[test]
    fn ceil_is_floor_fixed_point(network in network_strategy(), version in version_strategy()) {
        let config = fakechain_config();
        let schedule = config.schedule(network);
        let ceil = schedule.ceil(version);
        if schedule.forks().iter().any(|hf| hf.version == ceil) {
            prop_assert_eq!(schedule.floor(ceil), ceil);
        }
    }

    /// Property: ceil rounds up, floor rounds down
    #[test]
    fn ceil_and_floor_bracket_version(network in network_strategy(), version in version_strategy()) {
        let config = fakechain_config();
        let schedule = config.schedule(network);
        prop_assert!(schedule.ceil(version) >= version);
        prop_assert!(schedule.floor(version) <= version);
    }

    /// Property: enabling is monotone in the given version
    #[test]
    fn enabled_is_monotone(
        network in network_strategy(),
        needed in version_strategy(),
        a in version_strategy(),
        b in version_strategy(),
    ) {
        let config = fakechain_config();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        if config.is_network_version_enabled(needed, NetworkState::new(network, low)) {
            prop_assert!(config.is_network_version_enabled(needed, NetworkState::new(network, high)));
        }
    }

    /// Property: version bands never move backwards as height grows
    #[test]
    fn version_band_is_monotone(
        network in network_strategy(),
        h1 in 0u64..1_000_000,
        h2 in 0u64..1_000_000,
    ) {
        let config = fakechain_config();
        let (low, high) = if h1 <= h2 { (h1, h2) } else { (h2, h1) };
        let (min_low, max_low) = config.get_network_versions_for_height(network, low);
        let (min_high, _) = config.get_network_versions_for_height(network, high);
        prop_assert!(min_low <= max_low);
        prop_assert!(min_low <= min_high);
    }

    /// Property: a block version inside the band at a height is in a known band
    #[test]
    fn band_minimum_resolves_to_its_height_range(network in network_strategy(), height in 1u64..1_000_000) {
        let config = fakechain_config();
        let (min, _) = config.get_network_versions_for_height(network, height);
        let (first, last) = config.get_hard_fork_heights(network, min);
        let first = first.expect("band minimum is a tabled version");
        prop_assert!(first <= height);
        if let Some(last) = last {
            prop_assert!(height <= last);
        }
    }
}
