//! Triage handlers

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::ClaimId;
use domain_claims::DocumentClassification;

use crate::auth::Claims;
use crate::dto::ai::*;
use crate::{error::ApiError, AppState};

/// Runs the scoring pipeline on a claim and stores the result
///
/// A run that could not complete still answers 200; the body carries the
/// manual-review fallback and its `error`.
pub async fn process_claim(
    State(state): State<AppState>,
    Extension(auth): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<Json<AiAnalysisResponse>, ApiError> {
    let owner = auth.user_id().map_err(|_| ApiError::Unauthorized)?;
    let claim_id = ClaimId::from_uuid(id);

    let result = state.triage.process_claim(owner, claim_id).await?;
    Ok(Json(AiAnalysisResponse::new(claim_id, result)))
}

/// Returns the stored analysis of a claim
pub async fn get_analysis(
    State(state): State<AppState>,
    Extension(auth): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<Json<AiAnalysisResponse>, ApiError> {
    let owner = auth.user_id().map_err(|_| ApiError::Unauthorized)?;
    let claim_id = ClaimId::from_uuid(id);

    let result = state.triage.get_analysis(owner, claim_id).await?;
    Ok(Json(AiAnalysisResponse::new(claim_id, result)))
}

pub async fn classify_document(
    State(state): State<AppState>,
    Json(request): Json<ClassifyDocumentRequest>,
) -> Result<Json<DocumentClassification>, ApiError> {
    request.validate()?;

    Ok(Json(state.triage.classify_document(
        &request.document_content,
        &request.document_type,
    )))
}

pub async fn fraud_check(
    State(state): State<AppState>,
    Extension(auth): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<Json<FraudCheckResponse>, ApiError> {
    let owner = auth.user_id().map_err(|_| ApiError::Unauthorized)?;
    let claim_id = ClaimId::from_uuid(id);

    let check = state.triage.fraud_check(owner, claim_id).await?;
    Ok(Json(FraudCheckResponse::new(claim_id, check)))
}
