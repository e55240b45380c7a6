//! Domain error types

use thiserror::Error;

/// Errors raised by scoring and allocation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Malformed or referentially inconsistent input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unknown policy type
    #[error("Unsupported policy: {0}")]
    UnsupportedPolicy(String),

    /// Missing or out-of-range policy parameters
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Rounding drift could not be absorbed without a negative holding
    #[error("Reconciliation error: drift {drift} exceeds largest holding {largest}")]
    Reconciliation {
        /// Shares that had to be added (negative: removed)
        drift: i64,
        /// Shares held by the largest holder before adjustment
        largest: u64,
    },
}
