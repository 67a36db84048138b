//! Compiled-in hard-fork tables and their ordering rules
//!
//! Mainnet, testnet and devnet tables are constants checked by `const`
//! assertions below: a malformed table does not compile. The fakechain table is
//! supplied at runtime through [`ChainConfig`](crate::ChainConfig) and goes
//! through [`validate`] instead.

use crate::{Error, NetworkType, NetworkVersion, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every table must start at or above this version
pub const FIRST_VERSION: NetworkVersion = NetworkVersion::new(7, 0);

/// Minor versions at or above this are reserved for mainnet release forks
/// (`32 * release_minor + release_patch`), so test networks stay below it.
pub const RELEASE_MINOR_BASE: u16 = 32;

/// A hard fork: from `height` on, every block must be at least `version`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HardFork {
    /// Minimum network version from this fork on
    pub version: NetworkVersion,
    /// First height of the fork
    pub height: u64,
    /// Estimated activation time (unix seconds); informational only
    pub time: u64,
}

impl HardFork {
    /// Create a hard fork entry
    pub const fn new(major: u16, minor: u16, height: u64, time: u64) -> Self {
        Self {
            version: NetworkVersion::new(major, minor),
            height,
            time,
        }
    }
}

/// Mainnet: version 7 from genesis, then one fork per major version.
pub const MAINNET_HARD_FORKS: &[HardFork] = &[
    HardFork::new(7, 0, 1, 1503046577),
    HardFork::new(8, 0, 64324, 1533006000),   // 2018-07-31 03:00 UTC: new emission schedule
    HardFork::new(9, 0, 101250, 1537444800),  // 2018-09-20 12:00 UTC: service nodes
    HardFork::new(10, 0, 161849, 1544743800), // 2018-12-13 23:30 UTC: bulletproofs
    HardFork::new(11, 0, 234767, 1554170400), // 2019-03-26: infinite staking
    HardFork::new(12, 0, 321467, 1563940800), // 2019-07-24: checkpointing
    HardFork::new(13, 0, 385824, 1571850000), // 2019-10-23: checkpoints enforced
    HardFork::new(14, 0, 442333, 1578528000), // 2020-01-09 00:00 UTC: blink
    HardFork::new(15, 0, 496969, 1585105200), // 2020-03-25 03:00 UTC: name system
    HardFork::new(16, 0, 641111, 1602464400), // 2020-10-12 01:00 UTC: pulse
    HardFork::new(17, 0, 770711, 1618016400), // 2021-04-10 01:00 UTC
    HardFork::new(18, 0, 785000, 1619736143), // 2021-04-29 22:42 UTC
];

/// Testnet was rebooted during the v11 development cycle.
pub const TESTNET_HARD_FORKS: &[HardFork] = &[
    HardFork::new(7, 0, 1, 1533631121),
    HardFork::new(8, 0, 2, 1533631122),
    HardFork::new(9, 0, 3, 1533631123),
    HardFork::new(10, 0, 4, 1542681077),
    HardFork::new(11, 0, 5, 1551223964),
    HardFork::new(12, 0, 75471, 1561608000),
    HardFork::new(13, 0, 127028, 1568440800),
    HardFork::new(14, 0, 174630, 1575075600),
    HardFork::new(15, 0, 244777, 1583940000),
    HardFork::new(16, 0, 382222, 1600468200),
    HardFork::new(17, 0, 447275, 1608276840),
    HardFork::new(18, 0, 501750, 1616631051),
    HardFork::new(19, 0, 551773, 1621375273),
];

/// Devnet jumps straight to pulse.
pub const DEVNET_HARD_FORKS: &[HardFork] = &[
    HardFork::new(7, 0, 1, 1599848400),
    HardFork::new(16, 0, 2, 1599848400),
];

/// Ordering rules a table must satisfy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableRules {
    /// Strictly increasing major version: one fork per major version
    Mainnet,
    /// Strictly increasing `(major, minor)`, minors below [`RELEASE_MINOR_BASE`]
    TestNetwork,
    /// Strictly increasing `(major, minor)`
    Fakechain,
}

impl TableRules {
    /// Rules that apply to the given network's table
    pub const fn for_network(network: NetworkType) -> Self {
        match network {
            NetworkType::Mainnet => TableRules::Mainnet,
            NetworkType::Testnet | NetworkType::Devnet => TableRules::TestNetwork,
            NetworkType::Fakechain => TableRules::Fakechain,
        }
    }
}

/// First rule a table breaks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableDefect {
    /// No entries at all
    Empty,
    /// First entry is below [`FIRST_VERSION`]
    FirstVersionTooLow,
    /// Version does not increase at `index`
    VersionNotIncreasing {
        /// Offending entry
        index: usize,
    },
    /// Height does not increase at `index`
    HeightNotIncreasing {
        /// Offending entry
        index: usize,
    },
    /// Time goes backwards at `index`
    TimeDecreasing {
        /// Offending entry
        index: usize,
    },
    /// Mainnet-style release minor on a test network at `index`
    ReleaseMinorOnTestNetwork {
        /// Offending entry
        index: usize,
    },
}

impl fmt::Display for TableDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableDefect::Empty => write!(f, "table is empty"),
            TableDefect::FirstVersionTooLow => {
                write!(f, "first version must be at least {}", FIRST_VERSION)
            }
            TableDefect::VersionNotIncreasing { index } => {
                write!(f, "version at entry {} does not increase", index)
            }
            TableDefect::HeightNotIncreasing { index } => {
                write!(f, "height at entry {} does not increase", index)
            }
            TableDefect::TimeDecreasing { index } => {
                write!(f, "time at entry {} is earlier than its predecessor", index)
            }
            TableDefect::ReleaseMinorOnTestNetwork { index } => write!(
                f,
                "minor version at entry {} is >= {}",
                index, RELEASE_MINOR_BASE
            ),
        }
    }
}

/// Returns the first rule `forks` breaks, if any. Usable in `const` context.
pub const fn find_defect(forks: &[HardFork], rules: TableRules) -> Option<TableDefect> {
    if forks.is_empty() {
        return Some(TableDefect::Empty);
    }
    if forks[0].version.precedes(FIRST_VERSION) {
        return Some(TableDefect::FirstVersionTooLow);
    }

    let mut index = 0;
    while index < forks.len() {
        let hf = forks[index];
        if matches!(rules, TableRules::TestNetwork) && hf.version.minor >= RELEASE_MINOR_BASE {
            return Some(TableDefect::ReleaseMinorOnTestNetwork { index });
        }
        if index > 0 {
            let prev = forks[index - 1];
            let increasing = match rules {
                TableRules::Mainnet => prev.version.major < hf.version.major,
                TableRules::TestNetwork | TableRules::Fakechain => prev.version.precedes(hf.version),
            };
            if !increasing {
                return Some(TableDefect::VersionNotIncreasing { index });
            }
            if hf.height <= prev.height {
                return Some(TableDefect::HeightNotIncreasing { index });
            }
            if hf.time < prev.time {
                return Some(TableDefect::TimeDecreasing { index });
            }
        }
        index += 1;
    }
    None
}

const _: () = assert!(
    find_defect(MAINNET_HARD_FORKS, TableRules::Mainnet).is_none(),
    "Invalid mainnet hard forks: version must start at 7, major versions and heights must be strictly increasing, and timestamps must be non-decreasing"
);
const _: () = assert!(
    find_defect(TESTNET_HARD_FORKS, TableRules::TestNetwork).is_none(),
    "Invalid testnet hard forks: version must start at 7, versions and heights must be strictly increasing, and timestamps must be non-decreasing"
);
const _: () = assert!(
    find_defect(DEVNET_HARD_FORKS, TableRules::TestNetwork).is_none(),
    "Invalid devnet hard forks: version must start at 7, versions and heights must be strictly increasing, and timestamps must be non-decreasing"
);

/// Checks a runtime-supplied table against the rules of `network`.
pub fn validate(network: NetworkType, forks: &[HardFork]) -> Result<()> {
    match find_defect(forks, TableRules::for_network(network)) {
        None => Ok(()),
        Some(defect) => Err(Error::InvalidHardForkTable {
            network: network.to_string(),
            reason: defect.to_string(),
        }),
    }
}
