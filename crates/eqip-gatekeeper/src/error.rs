//! Gatekeeper error types

use crate::validator::RejectionReason;
use thiserror::Error;

/// Errors that can occur during gatekeeper operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatekeeperError {
    /// Evidence failed validation; every problem found is listed
    #[error("Validation error: {}", join_reasons(.0))]
    Rejected(Vec<RejectionReason>),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl GatekeeperError {
    /// Rejection reasons, empty for configuration errors
    pub fn reasons(&self) -> &[RejectionReason] {
        match self {
            GatekeeperError::Rejected(reasons) => reasons,
            GatekeeperError::Config(_) => &[],
        }
    }
}

fn join_reasons(reasons: &[RejectionReason]) -> String {
    reasons
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
