//! Service node staking rules
//!
//! Staking requirement, portion arithmetic and contribution limits, all gated
//! on the hard-fork rules of the [`hardfork`] crate.
//!
//! # Units
//!
//! - Amounts are atomic units ([`constants::COIN`] per coin)
//! - Shares of a stake are portions out of [`constants::STAKING_PORTIONS`]

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod constants;
pub mod contribution;
pub mod error;
pub mod portions;
pub mod registration;
pub mod requirement;

// Re-exports
pub use contribution::{
    check_service_node_portions, get_max_node_contribution, get_min_node_contribution,
    get_min_node_contribution_in_portions,
};
pub use error::{Error, Result};
pub use portions::{
    get_amount_to_make_portions, get_portions_from_percent_str, get_portions_to_make_amount,
    microportion, portions_to_amount,
};
pub use registration::{RegistrationPlan, StakeReservation};
pub use requirement::{get_staking_requirement, registration_staking_requirement};
