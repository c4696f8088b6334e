//! Standalone fraud check exposed to adjusters
//!
//! Uses its own thresholds, independent of the pipeline's fraud stage.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::Score;

use crate::claim::ClaimInput;
use crate::error::ClaimError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FraudRecommendation {
    Approve,
    Investigate,
    Reject,
}

impl FraudRecommendation {
    /// Decided on the unclamped score
    pub fn from_raw_score(score: Decimal) -> Self {
        if score > dec!(0.7) {
            FraudRecommendation::Reject
        } else if score > dec!(0.4) {
            FraudRecommendation::Investigate
        } else {
            FraudRecommendation::Approve
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudCheck {
    pub fraud_probability: Score,
    pub risk_factors: Vec<String>,
    pub recommendation: FraudRecommendation,
    pub confidence: Score,
}

/// Scores a claim against the standalone fraud rules
///
/// A claim without an amount, or with a negative one, is an error.
pub fn detect_fraud(claim: &ClaimInput) -> Result<FraudCheck, ClaimError> {
    let amount = match claim.amount {
        None => return Err(ClaimError::MissingField("amount".to_string())),
        Some(a) if a < Decimal::ZERO => {
            return Err(ClaimError::InvalidAmount(format!(
                "amount must be non-negative, got {}",
                a
            )))
        }
        Some(a) => a,
    };
    let description = claim.description_lower();

    let mut raw = dec!(0.1);
    let mut risk_factors = Vec::new();

    if amount > dec!(200000) {
        raw += dec!(0.3);
        risk_factors.push("Unusually high claim amount".to_string());
    }

    if description.contains("total loss") && amount > dec!(50000) {
        raw += dec!(0.2);
        risk_factors.push("High-value total loss claim".to_string());
    }

    if description.contains("emergency") {
        raw += dec!(0.1);
        risk_factors.push("Emergency claim - requires verification".to_string());
    }

    Ok(FraudCheck {
        fraud_probability: Score::new(raw),
        risk_factors,
        recommendation: FraudRecommendation::from_raw_score(raw),
        confidence: Score::new(dec!(0.85)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_value_claim_is_approved() {
        let check = detect_fraud(&ClaimInput::new("auto", dec!(2000))).unwrap();

        assert_eq!(check.fraud_probability.value(), dec!(0.1));
        assert_eq!(check.recommendation, FraudRecommendation::Approve);
        assert!(check.risk_factors.is_empty());
        assert_eq!(check.confidence.value(), dec!(0.85));
    }

    #[test]
    fn test_all_rules_fire() {
        let claim = ClaimInput::new("property", dec!(300000))
            .with_description("Emergency: house is a total loss");
        let check = detect_fraud(&claim).unwrap();

        assert_eq!(check.fraud_probability.value(), dec!(0.7));
        assert_eq!(check.recommendation, FraudRecommendation::Investigate);
        assert_eq!(
            check.risk_factors,
            vec![
                "Unusually high claim amount",
                "High-value total loss claim",
                "Emergency claim - requires verification",
            ]
        );
    }

    #[test]
    fn test_differs_from_pipeline_thresholds() {
        let claim = ClaimInput::new("property", dec!(80000)).with_description("total loss");
        let check = detect_fraud(&claim).unwrap();
        assert_eq!(check.fraud_probability.value(), dec!(0.3));
    }

    #[test]
    fn test_recommendation_bands() {
        assert_eq!(FraudRecommendation::from_raw_score(dec!(0.71)), FraudRecommendation::Reject);
        assert_eq!(FraudRecommendation::from_raw_score(dec!(0.5)), FraudRecommendation::Investigate);
        assert_eq!(FraudRecommendation::from_raw_score(dec!(0.4)), FraudRecommendation::Approve);
    }

    #[test]
    fn test_missing_amount_is_an_error() {
        let mut claim = ClaimInput::new("auto", dec!(0));
        claim.amount = None;
        assert!(matches!(detect_fraud(&claim), Err(ClaimError::MissingField(_))));
    }
}
