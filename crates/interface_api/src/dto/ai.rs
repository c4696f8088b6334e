//! Triage DTOs

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{ClaimId, Score};
use domain_claims::{AnalysisResults, FraudCheck, FraudRecommendation, NextAction, ProcessingResult};

/// Analysis of one claim
#[derive(Debug, Serialize)]
pub struct AiAnalysisResponse {
    pub claim_id: Uuid,
    pub analysis: AnalysisResults,
    pub confidence: Score,
    pub recommendations: Vec<String>,
    pub next_action: NextAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AiAnalysisResponse {
    pub fn new(claim_id: ClaimId, result: ProcessingResult) -> Self {
        Self {
            claim_id: *claim_id.as_uuid(),
            analysis: result.analysis,
            confidence: result.confidence,
            recommendations: result.recommendations,
            next_action: result.next_action,
            error: result.error,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ClassifyDocumentRequest {
    #[validate(length(min = 1, message = "document_content is required"))]
    pub document_content: String,
    #[serde(default)]
    pub document_type: String,
}

#[derive(Debug, Serialize)]
pub struct FraudCheckResponse {
    pub claim_id: Uuid,
    pub fraud_probability: Score,
    pub risk_factors: Vec<String>,
    pub recommendation: FraudRecommendation,
    pub confidence: Score,
}

impl FraudCheckResponse {
    pub fn new(claim_id: ClaimId, check: FraudCheck) -> Self {
        Self {
            claim_id: *claim_id.as_uuid(),
            fraud_probability: check.fraud_probability,
            risk_factors: check.risk_factors,
            recommendation: check.recommendation,
            confidence: check.confidence,
        }
    }
}
