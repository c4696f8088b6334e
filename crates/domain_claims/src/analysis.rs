//! Records produced by the triage stages

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::Score;
use crate::claim::ClaimType;

/// Handling complexity of a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

/// Queue priority derived from amount and type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingPriority {
    Low,
    Medium,
    High,
}

/// Perceived quality of submitted documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentQuality {
    Poor,
    Fair,
    Good,
    Excellent,
}

/// Risk band of a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Bands a risk score: below 0.3 is low, below 0.7 is medium
    pub fn from_score(score: Score) -> Self {
        let value = score.value();
        if value < dec!(0.3) {
            RiskLevel::Low
        } else if value < dec!(0.7) {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}

/// Routing decision for downstream handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextAction {
    AutoApprove,
    StandardReview,
    ManualReview,
    Investigate,
}

impl NextAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            NextAction::AutoApprove => "auto_approve",
            NextAction::StandardReview => "standard_review",
            NextAction::ManualReview => "manual_review",
            NextAction::Investigate => "investigate",
        }
    }
}

impl fmt::Display for NextAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub primary_type: ClaimType,
    pub complexity: Complexity,
    #[serde(with = "rust_decimal::serde::float")]
    pub estimated_value: Decimal,
    pub processing_priority: ProcessingPriority,
    pub required_documents: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentValidation {
    pub documents_complete: bool,
    pub missing_documents: Vec<String>,
    pub document_quality: DocumentQuality,
    pub authenticity_score: Score,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_score: Score,
    pub risk_level: RiskLevel,
    /// Triggered reasons, in the order the rules are checked
    pub risk_factors: Vec<String>,
    pub approval_probability: Score,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudDetection {
    pub fraud_probability: Score,
    pub fraud_indicators: Vec<String>,
    pub investigation_required: bool,
    pub confidence: Score,
}

/// What the recommendation stage saw and produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSummary {
    pub risk_level: RiskLevel,
    pub fraud_probability: Score,
    pub items: Vec<String>,
}

/// Stage outputs keyed by stage name
///
/// Field order is execution order, so the serialized map lists stages in the
/// order they ran. Stages that did not run are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<DocumentValidation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_assessment: Option<RiskAssessment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fraud_detection: Option<FraudDetection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<RecommendationSummary>,
}

impl AnalysisResults {
    /// Names of the populated entries, in execution order
    pub fn stage_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.classification.is_some() {
            names.push("classification");
        }
        if self.validation.is_some() {
            names.push("validation");
        }
        if self.risk_assessment.is_some() {
            names.push("risk_assessment");
        }
        if self.fraud_detection.is_some() {
            names.push("fraud_detection");
        }
        if self.recommendation.is_some() {
            names.push("recommendation");
        }
        names
    }

    pub fn is_empty(&self) -> bool {
        self.stage_names().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_bands() {
        assert_eq!(RiskLevel::from_score(Score::new(dec!(0.29))), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(Score::new(dec!(0.3))), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(Score::new(dec!(0.69))), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(Score::new(dec!(0.7))), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(Score::ONE), RiskLevel::High);
    }

    #[test]
    fn test_empty_results_serialize_to_empty_object() {
        let json = serde_json::to_string(&AnalysisResults::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_next_action_wire_names() {
        let json = serde_json::to_string(&NextAction::AutoApprove).unwrap();
        assert_eq!(json, "\"auto_approve\"");
        assert_eq!(NextAction::Investigate.to_string(), "investigate");
    }
}
