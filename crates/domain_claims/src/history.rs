//! Lifecycle trail of a claim, as shown to its owner

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimHistoryId, ClaimId, UserId};

use crate::claim::{ClaimRecord, ClaimStatus};

pub const SUBMITTED_ACTION: &str = "Claim submitted";
pub const UPDATED_ACTION: &str = "Claim updated";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimHistoryEntry {
    pub id: ClaimHistoryId,
    pub claim_id: ClaimId,
    pub action: String,
    pub old_status: Option<ClaimStatus>,
    pub new_status: Option<ClaimStatus>,
    pub performed_by: UserId,
    pub performed_at: DateTime<Utc>,
    pub notes: Option<String>,
}

impl ClaimHistoryEntry {
    pub fn submitted(claim: &ClaimRecord) -> Self {
        Self {
            id: ClaimHistoryId::new_v7(),
            claim_id: claim.id,
            action: SUBMITTED_ACTION.to_string(),
            old_status: None,
            new_status: Some(claim.status),
            performed_by: claim.owner_id,
            performed_at: claim.submitted_at,
            notes: None,
        }
    }

    /// Owner edits never move the status
    pub fn updated(claim: &ClaimRecord, by: UserId) -> Self {
        Self {
            id: ClaimHistoryId::new_v7(),
            claim_id: claim.id,
            action: UPDATED_ACTION.to_string(),
            old_status: Some(claim.status),
            new_status: Some(claim.status),
            performed_by: by,
            performed_at: claim.updated_at,
            notes: None,
        }
    }
}
