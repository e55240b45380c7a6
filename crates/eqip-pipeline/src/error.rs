//! Error types for the pipeline

use eqip_domain::DomainError;
use eqip_gatekeeper::GatekeeperError;
use thiserror::Error;

/// Errors that can occur while running the pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Evidence rejected by the gatekeeper
    #[error(transparent)]
    Evidence(#[from] GatekeeperError),

    /// Scoring or allocation failure
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PipelineError {
    /// Whether the error was caused by malformed or inconsistent input
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PipelineError::Evidence(GatekeeperError::Rejected(_))
                | PipelineError::Domain(DomainError::Validation(_))
        )
    }

    /// Whether the error was caused by an unknown policy or bad parameters
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            PipelineError::Config(_)
                | PipelineError::Evidence(GatekeeperError::Config(_))
                | PipelineError::Domain(DomainError::UnsupportedPolicy(_))
                | PipelineError::Domain(DomainError::Configuration(_))
        )
    }
}
