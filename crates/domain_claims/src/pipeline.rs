//! Runs the stages in order and shapes the caller-facing result

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info_span, warn};

use core_kernel::Score;

use crate::analysis::{AnalysisResults, NextAction};
use crate::claim::ClaimInput;
use crate::error::StageFailure;
use crate::stages::STAGES;
use crate::state::AnalysisState;

/// Version tag carried on every result
pub const WORKFLOW_VERSION: &str = "1.0";

/// Recommendation attached to a result when the run could not complete
pub const DEGRADED_RECOMMENDATION: &str = "Manual review required due to processing error";

/// Outcome of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingResult {
    pub analysis: AnalysisResults,
    pub recommendations: Vec<String>,
    pub confidence: Score,
    pub next_action: NextAction,
    pub processed_at: DateTime<Utc>,
    pub workflow_version: String,
    /// Present only on a degraded result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProcessingResult {
    fn completed(state: AnalysisState, processed_at: DateTime<Utc>) -> Self {
        Self {
            analysis: state.analysis_results,
            recommendations: state.recommendations,
            confidence: state.confidence,
            next_action: state.next_action.unwrap_or(NextAction::ManualReview),
            processed_at,
            workflow_version: WORKFLOW_VERSION.to_string(),
            error: None,
        }
    }

    /// The result returned when a stage fails
    pub fn degraded(error: impl Into<String>, processed_at: DateTime<Utc>) -> Self {
        Self {
            analysis: AnalysisResults::default(),
            recommendations: vec![DEGRADED_RECOMMENDATION.to_string()],
            confidence: Score::ZERO,
            next_action: NextAction::ManualReview,
            processed_at,
            workflow_version: WORKFLOW_VERSION.to_string(),
            error: Some(error.into()),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}

/// Stateless driver for the scoring stages
///
/// Holds nothing between calls, so a single runner can serve any number of
/// concurrent callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineRunner;

impl PipelineRunner {
    pub fn new() -> Self {
        Self
    }

    /// Scores a claim, stamping the result with the current time
    pub fn process(&self, claim: ClaimInput) -> ProcessingResult {
        self.process_at(claim, Utc::now())
    }

    /// Scores a claim with an explicit timestamp
    ///
    /// Never fails: a stage failure becomes a degraded `manual_review` result
    /// carrying the error text.
    pub fn process_at(&self, claim: ClaimInput, now: DateTime<Utc>) -> ProcessingResult {
        let span = info_span!("claim_pipeline", claim_type = %claim.claim_type);
        let _guard = span.enter();

        match self.run(AnalysisState::new(claim)) {
            Ok(state) => {
                debug!(
                    next_action = ?state.next_action,
                    confidence = %state.confidence,
                    "Claim pipeline completed"
                );
                ProcessingResult::completed(state, now)
            }
            Err(failure) => {
                warn!(stage = failure.stage, error = %failure.message, "Claim pipeline aborted");
                ProcessingResult::degraded(failure.to_string(), now)
            }
        }
    }

    /// Runs every stage in order, stopping at the first failure
    pub fn run(&self, state: AnalysisState) -> Result<AnalysisState, StageFailure> {
        STAGES.iter().try_fold(state, |state, stage| {
            debug!(stage = stage.name(), "Running stage");
            stage.apply(state)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_completed_run_populates_all_entries() {
        let result = PipelineRunner::new().process(ClaimInput::new("health", dec!(800)));

        assert_eq!(
            result.analysis.stage_names(),
            vec!["classification", "validation", "risk_assessment", "fraud_detection", "recommendation"]
        );
        assert_eq!(result.workflow_version, "1.0");
        assert!(!result.is_degraded());
    }

    #[test]
    fn test_failed_run_keeps_prefix_in_state() {
        let mut claim = ClaimInput::new("auto", dec!(0));
        claim.amount = None;

        let err = PipelineRunner::new().run(AnalysisState::new(claim)).unwrap_err();
        assert_eq!(err.stage, "risk_assessment");
    }

    #[test]
    fn test_degraded_result_shape() {
        let result = ProcessingResult::degraded("boom", Utc::now());
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["analysis"], serde_json::json!({}));
        assert_eq!(json["next_action"], "manual_review");
        assert_eq!(json["confidence"], 0.0);
        assert_eq!(json["error"], "boom");
    }
}
