use rust_decimal_macros::dec;

use core_kernel::Score;

use super::Stage;
use crate::analysis::{Classification, Complexity, ProcessingPriority};
use crate::claim::{ClaimInput, ClaimType};
use crate::error::StageFailure;
use crate::state::AnalysisState;

/// Assigns priority and the document checklist for the claim's line of business
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassificationStage;

impl ClassificationStage {
    /// High above 100k or for life claims, medium above 25k, else low
    pub fn priority(claim: &ClaimInput) -> ProcessingPriority {
        let amount = claim.amount_or_zero();

        if amount > dec!(100000) || claim.claim_type == ClaimType::Life {
            ProcessingPriority::High
        } else if amount > dec!(25000) {
            ProcessingPriority::Medium
        } else {
            ProcessingPriority::Low
        }
    }

    pub fn required_documents(claim_type: &ClaimType) -> Vec<String> {
        let documents: &[&str] = match claim_type {
            ClaimType::Auto => &["Police report", "Vehicle photos", "Repair estimates"],
            ClaimType::Health => &["Medical records", "Bills", "Doctor's statement"],
            ClaimType::Property => &["Photos", "Repair estimates", "Police report (if applicable)"],
            ClaimType::Life => &["Death certificate", "Policy documents", "Beneficiary forms"],
            ClaimType::Other(_) => &["Standard claim form"],
        };
        documents.iter().map(|d| d.to_string()).collect()
    }
}

impl Stage for ClassificationStage {
    fn name(&self) -> &'static str {
        "classification"
    }

    fn apply(&self, mut state: AnalysisState) -> Result<AnalysisState, StageFailure> {
        let claim = &state.claim;

        let classification = Classification {
            primary_type: claim.claim_type.clone(),
            // Every claim is treated as medium complexity until document review exists
            complexity: Complexity::Medium,
            estimated_value: claim.amount_or_zero(),
            processing_priority: Self::priority(claim),
            required_documents: Self::required_documents(&claim.claim_type),
        };

        state.analysis_results.classification = Some(classification);
        state.confidence = Score::new(dec!(0.85));
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(claim: ClaimInput) -> AnalysisState {
        ClassificationStage.apply(AnalysisState::new(claim)).unwrap()
    }

    #[test]
    fn test_priority_thresholds_are_strict() {
        assert_eq!(
            ClassificationStage::priority(&ClaimInput::new("auto", dec!(100000))),
            ProcessingPriority::Medium
        );
        assert_eq!(
            ClassificationStage::priority(&ClaimInput::new("auto", dec!(100000.01))),
            ProcessingPriority::High
        );
        assert_eq!(
            ClassificationStage::priority(&ClaimInput::new("auto", dec!(25000))),
            ProcessingPriority::Low
        );
    }

    #[test]
    fn test_life_claims_are_always_high_priority() {
        assert_eq!(
            ClassificationStage::priority(&ClaimInput::new("life", dec!(10))),
            ProcessingPriority::High
        );
    }

    #[test]
    fn test_unknown_type_gets_standard_form() {
        let state = classify(ClaimInput::new("marine", dec!(500)));
        let classification = state.analysis_results.classification.unwrap();

        assert_eq!(classification.required_documents, vec!["Standard claim form"]);
        assert_eq!(classification.primary_type, ClaimType::Other("marine".into()));
    }

    #[test]
    fn test_missing_amount_reads_as_zero() {
        let mut claim = ClaimInput::new("health", dec!(0));
        claim.amount = None;
        let state = classify(claim);
        let classification = state.analysis_results.classification.unwrap();

        assert_eq!(classification.estimated_value, dec!(0));
        assert_eq!(classification.processing_priority, ProcessingPriority::Low);
    }

    #[test]
    fn test_sets_stage_confidence() {
        let state = classify(ClaimInput::new("auto", dec!(1000)));
        assert_eq!(state.confidence.value(), dec!(0.85));
    }
}
