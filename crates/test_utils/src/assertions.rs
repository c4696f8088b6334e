//! Custom Test Assertions
//!
//! Assertion helpers for scores and pipeline results that report which field
//! broke an invariant.

use core_kernel::Score;
use domain_claims::{NextAction, ProcessingResult};
use rust_decimal::Decimal;

/// Asserts that a score lies in `[0, 1]`
pub fn assert_score_bounded(score: Score, field: &str) {
    let value = score.value();
    assert!(
        value >= Decimal::ZERO && value <= Decimal::ONE,
        "{} out of bounds: {}",
        field,
        value
    );
}

/// Asserts every score carried by a result lies in `[0, 1]`
pub fn assert_result_scores_bounded(result: &ProcessingResult) {
    assert_score_bounded(result.confidence, "confidence");

    let analysis = &result.analysis;
    if let Some(validation) = &analysis.validation {
        assert_score_bounded(validation.authenticity_score, "authenticity_score");
    }
    if let Some(risk) = &analysis.risk_assessment {
        assert_score_bounded(risk.risk_score, "risk_score");
        assert_score_bounded(risk.approval_probability, "approval_probability");
    }
    if let Some(fraud) = &analysis.fraud_detection {
        assert_score_bounded(fraud.fraud_probability, "fraud_probability");
        assert_score_bounded(fraud.confidence, "fraud confidence");
    }
    if let Some(summary) = &analysis.recommendation {
        assert_score_bounded(summary.fraud_probability, "recommendation fraud_probability");
    }
}

/// Asserts the result is the degraded manual-review fallback
pub fn assert_degraded(result: &ProcessingResult) {
    assert!(result.error.is_some(), "Expected an error on a degraded result");
    assert!(result.analysis.is_empty(), "Degraded result must carry no analysis");
    assert_eq!(
        result.recommendations,
        vec!["Manual review required due to processing error".to_string()]
    );
    assert_eq!(result.confidence, Score::ZERO);
    assert_eq!(result.next_action, NextAction::ManualReview);
}
