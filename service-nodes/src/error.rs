//! Error types for service node staking rules

use thiserror::Error;

/// Result type for staking operations
pub type Result<T> = std::result::Result<T, Error>;

/// Staking errors
#[derive(Error, Debug)]
pub enum Error {
    /// Portion list rejected
    #[error("Invalid portions: {0}")]
    InvalidPortions(String),

    /// Contribution below the minimum for its slot
    #[error("Contribution {amount} is below the minimum {minimum}")]
    ContributionTooSmall {
        /// Requested amount in atomic units
        amount: u64,
        /// Minimum for the slot in atomic units
        minimum: u64,
    },

    /// Every contributor slot is taken
    #[error("All {max} contributor slots are reserved")]
    ContributorSlotsExhausted {
        /// Maximum number of contributors
        max: usize,
    },

    /// Operator fee is not a percentage in [0, 100]
    #[error("Invalid operator fee: {0}")]
    InvalidOperatorFee(String),

    /// Contributors reserved before the operator
    #[error("Operator stake must be reserved first")]
    OperatorNotReserved,

    /// Operator reserved twice
    #[error("Operator stake is already reserved")]
    OperatorAlreadyReserved,
}
