use rust_decimal_macros::dec;

use core_kernel::Score;

use super::Stage;
use crate::analysis::{NextAction, RiskLevel};
use crate::error::StageFailure;
use crate::state::AnalysisState;

#[derive(Debug, Clone, Copy, Default)]
pub struct FinalizationStage;

impl FinalizationStage {
    /// First matching rule wins
    pub fn decide(risk_level: RiskLevel, fraud_probability: Score) -> NextAction {
        let fraud = fraud_probability.value();

        if fraud > dec!(0.7) {
            NextAction::Investigate
        } else if risk_level == RiskLevel::High {
            NextAction::ManualReview
        } else if risk_level == RiskLevel::Low && fraud < dec!(0.3) {
            NextAction::AutoApprove
        } else {
            NextAction::StandardReview
        }
    }
}

impl Stage for FinalizationStage {
    fn name(&self) -> &'static str {
        "finalization"
    }

    fn apply(&self, mut state: AnalysisState) -> Result<AnalysisState, StageFailure> {
        let results = &state.analysis_results;
        let fraud = results.fraud_detection.as_ref();

        let fraud_confidence = fraud.map(|f| f.confidence).unwrap_or(Score::new(dec!(0.5)));
        let fraud_probability = fraud.map(|f| f.fraud_probability).unwrap_or(Score::ZERO);
        let risk_level = results
            .risk_assessment
            .as_ref()
            .map(|r| r.risk_level)
            .unwrap_or(RiskLevel::Medium);

        // 0.9 is the baseline confidence of the rule set itself
        let confidence = Score::mean([state.confidence, fraud_confidence, Score::new(dec!(0.9))])
            .unwrap_or(state.confidence);

        state.confidence = confidence;
        state.next_action = Some(Self::decide(risk_level, fraud_probability));
        Ok(state)
    }
}
