//! Claim intake DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use domain_claims::{
    ClaimHistoryEntry, ClaimPage, ClaimPriority, ClaimQuery, ClaimRecord, ClaimStatus, ClaimType,
    ClaimUpdate, NewClaim, ProcessingResult,
};

use crate::error::ApiError;

fn non_negative(amount: &Decimal) -> Result<(), ValidationError> {
    if *amount < Decimal::ZERO {
        let mut err = ValidationError::new("non_negative");
        err.message = Some("amount must be non-negative".into());
        return Err(err);
    }
    Ok(())
}

/// Request to submit a claim
#[derive(Debug, Deserialize, Validate)]
pub struct CreateClaimRequest {
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "type is required"))]
    pub claim_type: String,
    #[serde(default)]
    pub priority: ClaimPriority,
    #[serde(with = "rust_decimal::serde::float")]
    #[validate(custom(function = "non_negative"))]
    pub amount: Decimal,
    #[validate(length(min = 1, max = 5000, message = "description must be 1 to 5000 characters"))]
    pub description: String,
    pub incident_date: NaiveDate,
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl From<CreateClaimRequest> for NewClaim {
    fn from(req: CreateClaimRequest) -> Self {
        NewClaim {
            claim_type: ClaimType::from(req.claim_type),
            priority: req.priority,
            amount: req.amount,
            description: req.description,
            incident_date: req.incident_date,
            metadata: req.metadata.unwrap_or_else(|| Value::Object(Default::default())),
        }
    }
}

/// Request to edit a claim that is still `submitted`
///
/// Every field is optional; an empty body is rejected by the service.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateClaimRequest {
    #[serde(default, rename = "type")]
    #[validate(length(min = 1, message = "type must not be empty"))]
    pub claim_type: Option<String>,
    #[serde(default)]
    pub priority: Option<ClaimPriority>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[validate(custom(function = "non_negative"))]
    pub amount: Option<Decimal>,
    #[serde(default)]
    #[validate(length(min = 1, max = 5000, message = "description must be 1 to 5000 characters"))]
    pub description: Option<String>,
    #[serde(default)]
    pub incident_date: Option<NaiveDate>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl From<UpdateClaimRequest> for ClaimUpdate {
    fn from(req: UpdateClaimRequest) -> Self {
        ClaimUpdate {
            claim_type: req.claim_type.map(ClaimType::from),
            priority: req.priority,
            amount: req.amount,
            description: req.description,
            incident_date: req.incident_date,
            metadata: req.metadata,
        }
    }
}

/// Query string for listing claims
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListClaimsParams {
    #[validate(range(min = 1))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 100))]
    pub per_page: Option<u32>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub claim_type: Option<String>,
}

impl ListClaimsParams {
    pub fn into_query(self) -> Result<ClaimQuery, ApiError> {
        let defaults = ClaimQuery::default();
        let mut query = ClaimQuery::page(
            self.page.unwrap_or(defaults.page),
            self.per_page.unwrap_or(defaults.per_page),
        );

        if let Some(status) = self.status.as_deref() {
            let status: ClaimStatus = status
                .parse()
                .map_err(|e: domain_claims::ClaimError| ApiError::BadRequest(e.to_string()))?;
            query = query.with_status(status);
        }
        if let Some(claim_type) = self.claim_type {
            query = query.with_type(ClaimType::from(claim_type));
        }

        Ok(query)
    }
}

/// A stored claim as returned to its owner
#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub claim_number: String,
    #[serde(rename = "type")]
    pub claim_type: String,
    pub status: ClaimStatus,
    pub priority: ClaimPriority,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub description: String,
    pub incident_date: NaiveDate,
    pub submitted_at: DateTime<Utc>,
    pub metadata: Value,
    pub ai_analysis: Option<ProcessingResult>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ClaimRecord> for ClaimResponse {
    fn from(claim: ClaimRecord) -> Self {
        Self {
            id: *claim.id.as_uuid(),
            user_id: *claim.owner_id.as_uuid(),
            claim_number: claim.claim_number,
            claim_type: claim.claim_type.to_string(),
            status: claim.status,
            priority: claim.priority,
            amount: claim.amount,
            description: claim.description,
            incident_date: claim.incident_date,
            submitted_at: claim.submitted_at,
            metadata: claim.metadata,
            ai_analysis: claim.ai_analysis,
            created_at: claim.created_at,
            updated_at: claim.updated_at,
        }
    }
}

/// One page of the caller's claims
#[derive(Debug, Serialize)]
pub struct ClaimListResponse {
    pub claims: Vec<ClaimResponse>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
}

impl From<ClaimPage> for ClaimListResponse {
    fn from(page: ClaimPage) -> Self {
        Self {
            claims: page.claims.into_iter().map(ClaimResponse::from).collect(),
            total: page.total,
            page: page.page,
            per_page: page.per_page,
            total_pages: page.total_pages,
        }
    }
}

/// One lifecycle entry of a claim
#[derive(Debug, Serialize)]
pub struct ClaimHistoryResponse {
    pub id: Uuid,
    pub claim_id: Uuid,
    pub action: String,
    pub old_status: Option<ClaimStatus>,
    pub new_status: Option<ClaimStatus>,
    pub performed_by: Uuid,
    pub performed_at: DateTime<Utc>,
    pub notes: Option<String>,
}

impl From<ClaimHistoryEntry> for ClaimHistoryResponse {
    fn from(entry: ClaimHistoryEntry) -> Self {
        Self {
            id: *entry.id.as_uuid(),
            claim_id: *entry.claim_id.as_uuid(),
            action: entry.action,
            old_status: entry.old_status,
            new_status: entry.new_status,
            performed_by: *entry.performed_by.as_uuid(),
            performed_at: entry.performed_at,
            notes: entry.notes,
        }
    }
}
