//! Hard-fork rules
//!
//! Decides which protocol rules apply at which height of each network.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐
//! │   Feature gating     │ ← network_dependent_value, gated limits
//! └──────────┬───────────┘
//!            │
//! ┌──────────▼───────────┐
//! │    Query engine      │ ← ceil / floor / heights / version bands
//! └──────────┬───────────┘
//!            │
//! ┌──────────▼───────────┐
//! │   Hard-fork tables   │ ← const-validated mainnet/testnet/devnet,
//! └──────────────────────┘   configured fakechain
//! ```
//!
//! # Invariants
//!
//! - Tables have strictly increasing heights and non-decreasing times
//! - Mainnet has at most one fork per major version
//! - Every query is a pure function of `(ChainConfig, network, version/height)`

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod chain;
pub mod config;
pub mod error;
pub mod feature;
pub mod info;
pub mod limits;
pub mod network;
pub mod schedule;
pub mod table;
pub mod version;

// Re-exports
pub use chain::{ChainConfig, ChainConfigBuilder};
pub use config::Config;
pub use error::{Error, Result};
pub use feature::{network_dependent_value, Feature};
pub use info::HardForkInfo;
pub use network::{NetworkState, NetworkType};
pub use schedule::{ForkSchedule, ReleaseVersion};
pub use table::HardFork;
pub use version::{NetworkVersion, MAX_MINOR};
