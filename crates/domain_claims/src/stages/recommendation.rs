use rust_decimal_macros::dec;

use core_kernel::Score;

use super::Stage;
use crate::analysis::{RecommendationSummary, RiskLevel};
use crate::error::StageFailure;
use crate::state::AnalysisState;

#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendationStage;

impl RecommendationStage {
    /// Recommendation lines for a risk band and fraud probability
    ///
    /// The band lines come first; the fraud lines are added on top of any band.
    pub fn recommend(risk_level: RiskLevel, fraud_probability: Score) -> Vec<String> {
        let fraud = fraud_probability.value();

        let mut items: Vec<&str> = if risk_level == RiskLevel::Low && fraud < dec!(0.3) {
            vec!["Fast-track approval recommended", "Standard verification process sufficient"]
        } else if risk_level == RiskLevel::Medium {
            vec!["Standard review process", "Additional documentation may be required"]
        } else {
            vec!["Detailed manual review required", "Consider specialist evaluation"]
        };

        if fraud > dec!(0.5) {
            items.push("Fraud investigation recommended");
            items.push("Hold payment pending investigation");
        }

        items.into_iter().map(String::from).collect()
    }
}

impl Stage for RecommendationStage {
    fn name(&self) -> &'static str {
        "recommendation"
    }

    fn apply(&self, mut state: AnalysisState) -> Result<AnalysisState, StageFailure> {
        let results = &state.analysis_results;
        let risk_level = results
            .risk_assessment
            .as_ref()
            .map(|r| r.risk_level)
            .unwrap_or(RiskLevel::Medium);
        let fraud_probability = results
            .fraud_detection
            .as_ref()
            .map(|f| f.fraud_probability)
            .unwrap_or(Score::ZERO);

        let items = Self::recommend(risk_level, fraud_probability);

        state.recommendations.extend(items.iter().cloned());
        state.analysis_results.recommendation = Some(RecommendationSummary {
            risk_level,
            fraud_probability,
            items,
        });
        Ok(state)
    }
}
