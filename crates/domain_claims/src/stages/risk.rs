use rust_decimal_macros::dec;

use core_kernel::Score;

use super::Stage;
use crate::analysis::{RiskAssessment, RiskLevel};
use crate::claim::ClaimType;
use crate::error::StageFailure;
use crate::state::AnalysisState;

#[derive(Debug, Clone, Copy, Default)]
pub struct RiskAssessmentStage;

impl Stage for RiskAssessmentStage {
    fn name(&self) -> &'static str {
        "risk_assessment"
    }

    fn apply(&self, mut state: AnalysisState) -> Result<AnalysisState, StageFailure> {
        let amount = state.claim.require_amount(self.name())?;
        let description = state.claim.description_lower();

        let mut raw = dec!(0.3);
        let mut risk_factors = Vec::new();

        if amount > dec!(50000) {
            raw += dec!(0.2);
            risk_factors.push("High claim amount".to_string());
        }

        if state.claim.claim_type == ClaimType::Auto && description.contains("accident") {
            raw += dec!(0.1);
            risk_factors.push("Vehicle accident claim".to_string());
        }

        let risk_score = Score::new(raw);

        state.analysis_results.risk_assessment = Some(RiskAssessment {
            risk_score,
            risk_level: RiskLevel::from_score(risk_score),
            risk_factors,
            approval_probability: risk_score.complement(),
        });
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::ClaimInput;

    fn assess(claim: ClaimInput) -> RiskAssessment {
        RiskAssessmentStage
            .apply(AnalysisState::new(claim))
            .unwrap()
            .analysis_results
            .risk_assessment
            .unwrap()
    }

    #[test]
    fn test_baseline_risk() {
        let risk = assess(ClaimInput::new("health", dec!(1200)));

        assert_eq!(risk.risk_score.value(), dec!(0.3));
        assert_eq!(risk.risk_level, RiskLevel::Medium);
        assert!(risk.risk_factors.is_empty());
        assert_eq!(risk.approval_probability.value(), dec!(0.7));
    }

    #[test]
    fn test_factors_accumulate_in_rule_order() {
        let risk = assess(
            ClaimInput::new("auto", dec!(60000)).with_description("Highway ACCIDENT, car written off"),
        );

        assert_eq!(risk.risk_score.value(), dec!(0.6));
        assert_eq!(risk.risk_factors, vec!["High claim amount", "Vehicle accident claim"]);
    }

    #[test]
    fn test_accident_keyword_only_counts_for_auto() {
        let risk = assess(ClaimInput::new("property", dec!(100)).with_description("accident"));
        assert!(risk.risk_factors.is_empty());
    }

    #[test]
    fn test_amount_at_threshold_adds_nothing() {
        let risk = assess(ClaimInput::new("health", dec!(50000)));
        assert_eq!(risk.risk_score.value(), dec!(0.3));
    }

    #[test]
    fn test_missing_amount_fails_the_stage() {
        let mut claim = ClaimInput::new("auto", dec!(0));
        claim.amount = None;

        let failure = RiskAssessmentStage.apply(AnalysisState::new(claim)).unwrap_err();
        assert_eq!(failure.stage, "risk_assessment");
    }
}
