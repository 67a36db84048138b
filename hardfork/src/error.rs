//! Error types for hard-fork configuration

use thiserror::Error;

/// Result type for hard-fork operations
pub type Result<T> = std::result::Result<T, Error>;

/// Hard-fork errors
///
/// Queries never fail; these only surface while building a table or loading
/// configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// Hard-fork table violates its ordering rules
    #[error("Invalid {network} hard fork table: {reason}")]
    InvalidHardForkTable {
        /// Network the table was built for
        network: String,
        /// Which rule was broken
        reason: String,
    },

    /// Unrecognised network name
    #[error("Unknown network type: {0}")]
    UnknownNetwork(String),

    /// Unparseable version string
    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
