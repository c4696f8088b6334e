//! The scoring stages and their fixed execution order
//!
//! Every stage is a pure function of the state it is handed. A stage moves
//! the state in, records its output, and moves it back out; a stage that
//! cannot score its input returns a [`StageFailure`] and the run ends there.
//!
//! ```text
//! classification -> validation -> risk_assessment -> fraud_detection
//!                -> recommendation -> finalization
//! ```

mod classification;
mod finalization;
mod fraud;
mod recommendation;
mod risk;
mod validation;

pub use classification::ClassificationStage;
pub use finalization::FinalizationStage;
pub use fraud::FraudDetectionStage;
pub use recommendation::RecommendationStage;
pub use risk::RiskAssessmentStage;
pub use validation::ValidationStage;

use crate::error::StageFailure;
use crate::state::AnalysisState;

/// One step of the triage pipeline
pub trait Stage: Send + Sync {
    /// Name under which the stage records its output
    fn name(&self) -> &'static str;

    /// Consumes the state and returns it with this stage's output recorded
    fn apply(&self, state: AnalysisState) -> Result<AnalysisState, StageFailure>;
}

/// All stages, in execution order
pub const STAGES: [&dyn Stage; 6] = [
    &ClassificationStage,
    &ValidationStage,
    &RiskAssessmentStage,
    &FraudDetectionStage,
    &RecommendationStage,
    &FinalizationStage,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order() {
        let names: Vec<_> = STAGES.iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec![
                "classification",
                "validation",
                "risk_assessment",
                "fraud_detection",
                "recommendation",
                "finalization",
            ]
        );
    }
}
