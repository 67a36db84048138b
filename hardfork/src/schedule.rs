//! Hard-fork query engine
//!
//! [`ForkSchedule`] answers every "which rules apply" question for one network
//! by scanning its ordered hard-fork table. Tables are tiny (a dozen entries),
//! so every query is a linear scan.

use crate::table::{self, HardFork, RELEASE_MINOR_BASE};
use crate::version::MAX_MINOR;
use crate::{NetworkType, NetworkVersion, Result};
use serde::{Deserialize, Serialize};

/// Release version of the node software (`major.minor.patch`).
///
/// On mainnet the top known hard fork is produced with a minor block version of
/// `32 * minor + patch`, so blocks carry which point release made them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseVersion {
    /// Release major
    pub major: u16,
    /// Release minor
    pub minor: u16,
    /// Release patch
    pub patch: u16,
}

impl ReleaseVersion {
    /// Create a release version
    pub const fn new(major: u16, minor: u16, patch: u16) -> Self {
        Self { major, minor, patch }
    }

    /// Minor block version this release produces on the top mainnet fork
    pub fn block_minor(&self) -> u16 {
        RELEASE_MINOR_BASE
            .saturating_mul(self.minor)
            .saturating_add(self.patch)
            .min(MAX_MINOR)
    }
}

impl Default for ReleaseVersion {
    fn default() -> Self {
        Self::new(10, 1, 0)
    }
}

/// Query engine over one network's ordered hard-fork table
#[derive(Debug, Clone, Copy)]
pub struct ForkSchedule<'a> {
    network: NetworkType,
    forks: &'a [HardFork],
}

impl<'a> ForkSchedule<'a> {
    /// Build a schedule over an arbitrary table, checking it against the
    /// ordering rules of `network`.
    pub fn new(network: NetworkType, forks: &'a [HardFork]) -> Result<Self> {
        table::validate(network, forks)?;
        Ok(Self { network, forks })
    }

    /// Build a schedule over a table that has already been validated.
    pub(crate) const fn trusted(network: NetworkType, forks: &'a [HardFork]) -> Self {
        Self { network, forks }
    }

    /// Network this schedule belongs to
    pub fn network(&self) -> NetworkType {
        self.network
    }

    /// The ordered table
    pub fn forks(&self) -> &'a [HardFork] {
        self.forks
    }

    fn is_mainnet(&self) -> bool {
        self.network == NetworkType::Mainnet
    }

    /// First and last heights at which `version` is the active rule set.
    ///
    /// The first height is `None` when no fork on `version.major` is at or
    /// below `version` (e.g. 20.19 when the first 20.x fork is 20.32): such a
    /// version was never valid, or we are outdated. The last height is `None`
    /// when no later fork is known.
    pub fn heights(&self, version: NetworkVersion) -> (Option<u64>, Option<u64>) {
        let mut first = None;
        let mut last = None;
        for hf in self.forks {
            if hf.version > version {
                if first.is_some() {
                    last = Some(hf.height - 1);
                }
                break;
            } else if hf.version.major == version.major {
                // A later fork on the same major (test networks) overrides this
                first = Some(hf.height);
            }
        }
        (first, last)
    }

    /// Smallest tabled version not less than `version`: the version at which
    /// `version` becomes guaranteed supported across the network.
    ///
    /// With no such fork, returns the earliest version that *could* be a hard
    /// fork: on mainnet `(major + 1).0` when the last fork already used this
    /// major, else `version` itself; elsewhere `major.(minor + 1)`.
    pub fn ceil(&self, version: NetworkVersion) -> NetworkVersion {
        if let Some(hf) = self.forks.iter().find(|hf| hf.version >= version) {
            return hf.version;
        }

        if self.is_mainnet() {
            match self.forks.last() {
                Some(last) if last.version.major == version.major => {
                    NetworkVersion::new(version.major.saturating_add(1), 0)
                }
                _ => version,
            }
        } else {
            NetworkVersion::new(version.major, version.minor.saturating_add(1))
        }
    }

    /// Largest tabled version not greater than `version`: what is guaranteed
    /// supported given that we are on `version`.
    ///
    /// Returns [`NetworkVersion::ZERO`] when `version` precedes every fork, so
    /// nothing counts as enabled below the first fork.
    pub fn floor(&self, version: NetworkVersion) -> NetworkVersion {
        let mut floor = NetworkVersion::ZERO;
        for hf in self.forks {
            if hf.version > version {
                break;
            }
            floor = hf.version;
        }
        floor
    }

    /// Minimum and maximum block versions acceptable at `height`.
    ///
    /// `max` is one minor below the next known fork, capped at
    /// `min.major.127`; with no next fork mainnet accepts up to
    /// `min.major.127` while test networks pin `max == min` so that the next
    /// minor can still become a fork.
    pub fn versions_for_height(&self, height: u64) -> (NetworkVersion, NetworkVersion) {
        let mut band = (FIRST_BAND_MIN, NetworkVersion::new(FIRST_BAND_MIN.major, MAX_MINOR));

        let current = self.forks.iter().rposition(|hf| height >= hf.height);
        if let Some(index) = current {
            let from = self.forks[index].version;
            let cap = NetworkVersion::new(from.major, MAX_MINOR);
            let to = match self.forks.get(index + 1) {
                Some(next) => match next.version.minor.checked_sub(1) {
                    Some(minor) => NetworkVersion::new(next.version.major, minor).min(cap),
                    None => cap,
                },
                None if self.is_mainnet() => cap,
                None => from,
            };
            band = (from, to);
        }
        band
    }

    /// True once `height` is at or past the fork that enables `version`.
    pub fn is_at_least(&self, version: NetworkVersion, height: u64) -> bool {
        let (min, _) = self.versions_for_height(height);
        min >= version
    }

    /// True once `height` is at least one fork beyond the one that first makes
    /// `version` universally supported.
    ///
    /// With forks at 19.7 and 20.3 this turns true at the 20.3 height for 19.6
    /// and 19.7, but not for 19.8 (only guaranteed from 20.3 itself).
    ///
    /// This compares `floor(min) > ceil(version)`, not `version > max` of the
    /// band at `height`. The band comparison is true for 19.8 at a 19.7
    /// height, which contradicts the example above.
    pub fn is_beyond(&self, version: NetworkVersion, height: u64) -> bool {
        let (min, _) = self.versions_for_height(height);
        self.floor(min) > self.ceil(version)
    }

    /// True if `current` is at least one fork beyond the fork that enabled
    /// `version`: `floor(current) > floor(version)`.
    pub fn is_beyond_version(&self, version: NetworkVersion, current: NetworkVersion) -> bool {
        self.floor(current) > self.floor(version)
    }

    /// Hard-fork granular `given >= needed`: `needed` rounds up to its enabling
    /// fork, `given` rounds down to its active fork.
    ///
    /// With a fork at 20.32, `needed = 20.33` is *not* enabled at 20.34: 20.33
    /// features are only guaranteed from the following fork.
    pub fn is_enabled(&self, needed: NetworkVersion, given: NetworkVersion) -> bool {
        self.ceil(needed) <= self.floor(given)
    }

    /// True if `needed` is enabled and `given` is still on the same fork.
    pub fn is_only(&self, needed: NetworkVersion, given: NetworkVersion) -> bool {
        self.floor(needed) == self.floor(given)
    }

    /// Version to put on blocks we produce at `height`.
    ///
    /// Test networks use the band maximum. Mainnet on its top known fork uses
    /// the release minor (`32 * minor + patch`); before a known fork it uses
    /// the band maximum (e.g. 20.127).
    pub fn ideal_version(&self, height: u64, release: ReleaseVersion) -> NetworkVersion {
        let (min, max) = self.versions_for_height(height);
        if !self.is_mainnet() {
            return max;
        }
        match self.forks.last() {
            Some(top) if top.version == min => {
                NetworkVersion::new(min.major, min.minor.max(release.block_minor()))
            }
            _ => max,
        }
    }

    /// True if both versions resolve to the same known height band.
    ///
    /// Meant for block acceptance, not feature tests: feature versions often
    /// sit below the first fork of their major and never resolve.
    pub fn is_same_hard_fork(&self, a: NetworkVersion, b: NetworkVersion) -> bool {
        let a_heights = self.heights(a);
        let b_heights = self.heights(b);
        a_heights.0.is_some() && b_heights.0.is_some() && a_heights == b_heights
    }

    /// The fork entry whose rules are active for `version`, if known
    pub fn fork_for(&self, version: NetworkVersion) -> Option<&'a HardFork> {
        let (first, _) = self.heights(version);
        let first = first?;
        self.forks.iter().find(|hf| hf.height == first)
    }
}

/// Band returned below the first fork height
const FIRST_BAND_MIN: NetworkVersion = table::FIRST_VERSION;
