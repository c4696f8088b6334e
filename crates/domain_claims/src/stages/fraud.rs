use rust_decimal_macros::dec;

use core_kernel::Score;

use super::Stage;
use crate::analysis::FraudDetection;
use crate::error::StageFailure;
use crate::state::AnalysisState;

/// In-pipeline fraud screen
///
/// Deliberately narrower than [`crate::fraud_check::detect_fraud`]; the two
/// rule sets are maintained separately.
#[derive(Debug, Clone, Copy, Default)]
pub struct FraudDetectionStage;

impl Stage for FraudDetectionStage {
    fn name(&self) -> &'static str {
        "fraud_detection"
    }

    fn apply(&self, mut state: AnalysisState) -> Result<AnalysisState, StageFailure> {
        let amount = state.claim.require_amount(self.name())?;
        let description = state.claim.description_lower();

        let mut raw = dec!(0.1);
        let mut fraud_indicators = Vec::new();

        if description.contains("total loss") && amount > dec!(100000) {
            raw += dec!(0.3);
            fraud_indicators.push("High-value total loss claim".to_string());
        }

        let fraud_probability = Score::new(raw);

        state.analysis_results.fraud_detection = Some(FraudDetection {
            fraud_probability,
            fraud_indicators,
            investigation_required: fraud_probability.value() > dec!(0.5),
            confidence: Score::new(dec!(0.88)),
        });
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::ClaimInput;

    fn screen(claim: ClaimInput) -> FraudDetection {
        FraudDetectionStage
            .apply(AnalysisState::new(claim))
            .unwrap()
            .analysis_results
            .fraud_detection
            .unwrap()
    }

    #[test]
    fn test_baseline_probability() {
        let fraud = screen(ClaimInput::new("auto", dec!(5000)).with_description("fender bender"));

        assert_eq!(fraud.fraud_probability.value(), dec!(0.1));
        assert!(!fraud.investigation_required);
        assert_eq!(fraud.confidence.value(), dec!(0.88));
    }

    #[test]
    fn test_high_value_total_loss() {
        let fraud = screen(ClaimInput::new("property", dec!(250000)).with_description("Total Loss after fire"));

        assert_eq!(fraud.fraud_probability.value(), dec!(0.4));
        assert_eq!(fraud.fraud_indicators, vec!["High-value total loss claim"]);
        assert!(!fraud.investigation_required);
    }

    #[test]
    fn test_total_loss_below_threshold_is_ignored() {
        let fraud = screen(ClaimInput::new("auto", dec!(100000)).with_description("total loss"));
        assert_eq!(fraud.fraud_probability.value(), dec!(0.1));
    }

    #[test]
    fn test_negative_amount_fails_the_stage() {
        let failure = FraudDetectionStage
            .apply(AnalysisState::new(ClaimInput::new("auto", dec!(-10))))
            .unwrap_err();
        assert_eq!(failure.stage, "fraud_detection");
    }
}
