//! Network version ordering primitive

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest minor version we put in a block header.
///
/// Block versions are varint encoded; anything above 127 costs an extra byte,
/// so `x.127` is used to mean "waiting for the next major hard fork".
pub const MAX_MINOR: u16 = 127;

/// Protocol version `(major, minor)` active at some point of the chain.
///
/// Ordering compares `major` first, then `minor` (field order matters for the
/// derived `Ord`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct NetworkVersion {
    /// Major version; at most one mainnet hard fork per major version
    pub major: u16,
    /// Minor version
    pub minor: u16,
}

impl NetworkVersion {
    /// Smallest representable version, below every tabled fork
    pub const ZERO: NetworkVersion = NetworkVersion::new(0, 0);

    /// Create a version
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }

    /// Packed `(major, minor)` key for comparisons inside `const fn`
    pub(crate) const fn key(self) -> u32 {
        ((self.major as u32) << 16) | self.minor as u32
    }

    /// Const-evaluable `self < other`
    pub(crate) const fn precedes(self, other: NetworkVersion) -> bool {
        self.key() < other.key()
    }
}

impl From<(u16, u16)> for NetworkVersion {
    fn from((major, minor): (u16, u16)) -> Self {
        Self::new(major, minor)
    }
}

impl fmt::Display for NetworkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for NetworkVersion {
    type Err = Error;

    /// Parses `"19"` or `"19.32"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidVersion(s.to_string());
        let (major, minor) = match s.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (s, "0"),
        };
        Ok(Self::new(
            major.trim().parse().map_err(|_| invalid())?,
            minor.trim().parse().map_err(|_| invalid())?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_major_dominates_minor() {
        assert!(NetworkVersion::new(19, 127) < NetworkVersion::new(20, 0));
        assert!(NetworkVersion::new(20, 33) > NetworkVersion::new(20, 32));
        assert!(NetworkVersion::new(7, 0).precedes(NetworkVersion::new(7, 1)));
        assert!(!NetworkVersion::new(8, 0).precedes(NetworkVersion::new(7, 200)));
    }

    #[test]
    fn test_parse_and_display() {
        let v: NetworkVersion = "19.32".parse().unwrap();
        assert_eq!(v, NetworkVersion::new(19, 32));
        assert_eq!(v.to_string(), "19.32");
        assert_eq!("18".parse::<NetworkVersion>().unwrap(), NetworkVersion::new(18, 0));
        assert!("nineteen".parse::<NetworkVersion>().is_err());
        assert!("19.x".parse::<NetworkVersion>().is_err());
    }
}
