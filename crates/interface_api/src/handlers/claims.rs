//! Claims handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::ClaimId;

use crate::auth::Claims;
use crate::dto::claims::*;
use crate::{error::ApiError, AppState};

/// Submits a new claim for the caller
pub async fn create_claim(
    State(state): State<AppState>,
    Extension(auth): Extension<Claims>,
    Json(request): Json<CreateClaimRequest>,
) -> Result<(StatusCode, Json<ClaimResponse>), ApiError> {
    request.validate()?;
    let owner = auth.user_id().map_err(|_| ApiError::Unauthorized)?;

    let claim = state.intake.submit(owner, request.into()).await?;
    Ok((StatusCode::CREATED, Json(claim.into())))
}

/// Lists the caller's claims, newest first
pub async fn list_claims(
    State(state): State<AppState>,
    Extension(auth): Extension<Claims>,
    Query(params): Query<ListClaimsParams>,
) -> Result<Json<ClaimListResponse>, ApiError> {
    params.validate()?;
    let owner = auth.user_id().map_err(|_| ApiError::Unauthorized)?;

    let page = state.intake.list(owner, params.into_query()?).await?;
    Ok(Json(page.into()))
}

/// Gets one of the caller's claims
pub async fn get_claim(
    State(state): State<AppState>,
    Extension(auth): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let owner = auth.user_id().map_err(|_| ApiError::Unauthorized)?;

    let claim = state.intake.get(owner, ClaimId::from_uuid(id)).await?;
    Ok(Json(claim.into()))
}

/// Edits one of the caller's claims while it is still `submitted`
pub async fn update_claim(
    State(state): State<AppState>,
    Extension(auth): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateClaimRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    request.validate()?;
    let owner = auth.user_id().map_err(|_| ApiError::Unauthorized)?;

    let claim = state
        .intake
        .update(owner, ClaimId::from_uuid(id), request.into())
        .await?;
    Ok(Json(claim.into()))
}

/// Lifecycle history of one of the caller's claims, newest first
pub async fn claim_history(
    State(state): State<AppState>,
    Extension(auth): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ClaimHistoryResponse>>, ApiError> {
    let owner = auth.user_id().map_err(|_| ApiError::Unauthorized)?;

    let entries = state.intake.history(owner, ClaimId::from_uuid(id)).await?;
    Ok(Json(entries.into_iter().map(ClaimHistoryResponse::from).collect()))
}
