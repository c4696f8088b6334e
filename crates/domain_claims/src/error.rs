//! Claims domain errors

use thiserror::Error;

use core_kernel::{CoreError, PortError};

/// A stage could not score the claim it was given
///
/// This is the only failure the pipeline knows about. The runner catches it
/// and degrades the run to a manual review; it never reaches the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{stage} stage failed: {message}")]
pub struct StageFailure {
    /// Name of the stage that raised
    pub stage: &'static str,
    /// Human-readable cause
    pub message: String,
}

impl StageFailure {
    pub fn new(stage: &'static str, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
        }
    }

    pub fn missing_field(stage: &'static str, field: &str) -> Self {
        Self::new(stage, format!("missing required field `{}`", field))
    }
}

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Claim not found: {0}")]
    ClaimNotFound(String),

    #[error("No analysis found for claim {0}")]
    AnalysisNotFound(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid claim amount: {0}")]
    InvalidAmount(String),

    #[error("Cannot update claim in status {0}; only submitted claims can be changed")]
    NotEditable(String),

    #[error("No fields to update")]
    EmptyUpdate,

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Port(#[from] PortError),
}

impl ClaimError {
    /// Returns true when the claim (or its analysis) does not exist for the caller
    pub fn is_not_found(&self) -> bool {
        match self {
            ClaimError::ClaimNotFound(_) | ClaimError::AnalysisNotFound(_) => true,
            ClaimError::Port(e) => e.is_not_found(),
            _ => false,
        }
    }

    /// Returns true when the claim's current state does not allow the request
    pub fn is_rejected(&self) -> bool {
        matches!(self, ClaimError::NotEditable(_) | ClaimError::EmptyUpdate)
    }

    /// Returns true when the request itself was malformed
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ClaimError::MissingField(_)
                | ClaimError::InvalidAmount(_)
                | ClaimError::Core(CoreError::Validation(_))
                | ClaimError::Port(PortError::Validation { .. })
        )
    }
}
