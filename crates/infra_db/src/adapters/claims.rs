//! PostgreSQL Claim Adapter
//!
//! Implements `ClaimRecordPort` and `ProcessingLogPort` with the claims,
//! history and processing log repositories. Enumerations are stored as their wire
//! strings; the triage result is stored as JSONB.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{
    AdapterHealth, ClaimHistoryId, ClaimId, DomainPort, HealthCheckResult, HealthCheckable, PortError,
    ProcessingLogId, UserId,
};
use domain_claims::{
    ClaimHistoryEntry, ClaimPage, ClaimPriority, ClaimQuery, ClaimRecord, ClaimRecordPort,
    ClaimStatus, ProcessingLogEntry, ProcessingLogPort, ProcessingResult, ProcessingStatus,
};

use crate::repositories::claim_history::{ClaimHistoryRepository, ClaimHistoryRow};
use crate::repositories::claims::{ClaimFilter, ClaimRow, ClaimsRepository};
use crate::repositories::processing_logs::{ProcessingLogRepository, ProcessingLogRow};

const ADAPTER_ID: &str = "postgres-claim-adapter";

/// PostgreSQL-backed claim store
#[derive(Debug, Clone)]
pub struct PostgresClaimAdapter {
    claims: ClaimsRepository,
    history: ClaimHistoryRepository,
    logs: ProcessingLogRepository,
    pool: PgPool,
}

impl PostgresClaimAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            claims: ClaimsRepository::new(pool.clone()),
            history: ClaimHistoryRepository::new(pool.clone()),
            logs: ProcessingLogRepository::new(pool.clone()),
            pool,
        }
    }

    pub fn claims_repository(&self) -> &ClaimsRepository {
        &self.claims
    }
}

impl DomainPort for PostgresClaimAdapter {}

#[async_trait]
impl HealthCheckable for PostgresClaimAdapter {
    /// Runs `SELECT 1` against the pool
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        let (status, message) = match result {
            Ok(_) => (AdapterHealth::Healthy, None),
            Err(e) => (AdapterHealth::Unhealthy, Some(format!("Database error: {}", e))),
        };

        HealthCheckResult {
            adapter_id: ADAPTER_ID.to_string(),
            status,
            latency_ms,
            message,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl ClaimRecordPort for PostgresClaimAdapter {
    #[instrument(skip(self, claim), fields(claim_id = %claim.id, claim_number = %claim.claim_number))]
    async fn create(&self, claim: ClaimRecord) -> Result<ClaimRecord, PortError> {
        debug!("Inserting claim");
        let row = self.claims.insert(&claim_to_row(&claim)?).await?;
        row_to_claim(row)
    }

    #[instrument(skip(self), fields(claim_id = %id, owner = %owner))]
    async fn find_owned(&self, id: ClaimId, owner: UserId) -> Result<ClaimRecord, PortError> {
        debug!("Fetching owned claim");
        let row = self.claims.find_owned(*id.as_uuid(), *owner.as_uuid()).await?;
        row_to_claim(row)
    }

    #[instrument(skip(self, query), fields(owner = %owner, page = query.page, per_page = query.per_page))]
    async fn list(&self, owner: UserId, query: ClaimQuery) -> Result<ClaimPage, PortError> {
        let filter = ClaimFilter {
            status: query.status.map(|s| s.as_str().to_string()),
            claim_type: query.claim_type.as_ref().map(|t| t.as_str().to_string()),
        };
        let offset = i64::try_from(query.offset())
            .map_err(|_| PortError::validation("page out of range"))?;

        let total = self.claims.count_for_user(*owner.as_uuid(), &filter).await?;
        let rows = self
            .claims
            .list_for_user(*owner.as_uuid(), &filter, i64::from(query.per_page), offset)
            .await?;
        debug!(total, returned = rows.len(), "Listed claims");

        let claims = rows.into_iter().map(row_to_claim).collect::<Result<Vec<_>, _>>()?;
        Ok(ClaimPage::new(claims, u64::try_from(total).unwrap_or_default(), &query))
    }

    #[instrument(skip(self, claim), fields(claim_id = %claim.id))]
    async fn update(&self, claim: &ClaimRecord) -> Result<ClaimRecord, PortError> {
        match self.claims.update_editable(&claim_to_row(claim)?).await? {
            Some(row) => row_to_claim(row),
            None => Err(PortError::conflict(format!(
                "claim {} is no longer in submitted status",
                claim.id
            ))),
        }
    }

    #[instrument(skip(self, result), fields(claim_id = %id, next_action = %result.next_action))]
    async fn save_analysis(&self, id: ClaimId, result: &ProcessingResult) -> Result<(), PortError> {
        let analysis = serde_json::to_value(result)
            .map_err(|e| PortError::transformation(e.to_string()))?;
        self.claims.update_analysis(*id.as_uuid(), &analysis).await?;
        Ok(())
    }

    #[instrument(skip(self, entry), fields(claim_id = %entry.claim_id, action = %entry.action))]
    async fn append_history(&self, entry: ClaimHistoryEntry) -> Result<(), PortError> {
        self.history.insert(&history_to_row(entry)).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(claim_id = %claim_id))]
    async fn history(&self, claim_id: ClaimId) -> Result<Vec<ClaimHistoryEntry>, PortError> {
        self.history
            .find_by_claim(*claim_id.as_uuid())
            .await?
            .into_iter()
            .map(row_to_history)
            .collect()
    }
}

#[async_trait]
impl ProcessingLogPort for PostgresClaimAdapter {
    #[instrument(skip(self, entry), fields(claim_id = %entry.claim_id, status = entry.status.as_str()))]
    async fn append(&self, entry: ProcessingLogEntry) -> Result<(), PortError> {
        self.logs.insert(&entry_to_row(entry)).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(claim_id = %claim_id))]
    async fn entries_for(&self, claim_id: ClaimId) -> Result<Vec<ProcessingLogEntry>, PortError> {
        self.logs
            .find_by_claim(*claim_id.as_uuid())
            .await?
            .into_iter()
            .map(row_to_entry)
            .collect()
    }
}

// ============================================================================
// Row mapping
// ============================================================================

fn claim_to_row(claim: &ClaimRecord) -> Result<ClaimRow, PortError> {
    let ai_analysis = claim
        .ai_analysis
        .as_ref()
        .map(serde_json::to_value)
        .transpose()
        .map_err(|e| PortError::transformation(e.to_string()))?;

    Ok(ClaimRow {
        id: *claim.id.as_uuid(),
        user_id: *claim.owner_id.as_uuid(),
        claim_number: claim.claim_number.clone(),
        claim_type: claim.claim_type.as_str().to_string(),
        status: claim.status.as_str().to_string(),
        priority: claim.priority.as_str().to_string(),
        amount: claim.amount,
        description: claim.description.clone(),
        incident_date: claim.incident_date,
        submitted_at: claim.submitted_at,
        metadata: claim.metadata.clone(),
        ai_analysis,
        created_at: claim.created_at,
        updated_at: claim.updated_at,
    })
}

fn row_to_claim(row: ClaimRow) -> Result<ClaimRecord, PortError> {
    let status = parse_status(&row.status)?;
    let priority = row
        .priority
        .parse::<ClaimPriority>()
        .map_err(|e| PortError::transformation(e.to_string()))?;
    let ai_analysis = row
        .ai_analysis
        .map(serde_json::from_value::<ProcessingResult>)
        .transpose()
        .map_err(|e| PortError::transformation(format!("stored analysis: {}", e)))?;

    Ok(ClaimRecord {
        id: ClaimId::from_uuid(row.id),
        owner_id: UserId::from_uuid(row.user_id),
        claim_number: row.claim_number,
        claim_type: row.claim_type.into(),
        status,
        priority,
        amount: row.amount,
        description: row.description,
        incident_date: row.incident_date,
        submitted_at: row.submitted_at,
        metadata: row.metadata,
        ai_analysis,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn parse_status(value: &str) -> Result<ClaimStatus, PortError> {
    value
        .parse::<ClaimStatus>()
        .map_err(|e| PortError::transformation(e.to_string()))
}

fn history_to_row(entry: ClaimHistoryEntry) -> ClaimHistoryRow {
    ClaimHistoryRow {
        id: *entry.id.as_uuid(),
        claim_id: *entry.claim_id.as_uuid(),
        action: entry.action,
        old_status: entry.old_status.map(|s| s.as_str().to_string()),
        new_status: entry.new_status.map(|s| s.as_str().to_string()),
        performed_by: *entry.performed_by.as_uuid(),
        performed_at: entry.performed_at,
        notes: entry.notes,
    }
}

fn row_to_history(row: ClaimHistoryRow) -> Result<ClaimHistoryEntry, PortError> {
    Ok(ClaimHistoryEntry {
        id: ClaimHistoryId::from_uuid(row.id),
        claim_id: ClaimId::from_uuid(row.claim_id),
        action: row.action,
        old_status: row.old_status.as_deref().map(parse_status).transpose()?,
        new_status: row.new_status.as_deref().map(parse_status).transpose()?,
        performed_by: UserId::from_uuid(row.performed_by),
        performed_at: row.performed_at,
        notes: row.notes,
    })
}

fn entry_to_row(entry: ProcessingLogEntry) -> ProcessingLogRow {
    ProcessingLogRow {
        id: *entry.id.as_uuid(),
        claim_id: *entry.claim_id.as_uuid(),
        workflow_name: entry.workflow_name,
        node_name: entry.node_name,
        input_data: entry.input,
        output_data: entry.output,
        status: entry.status.as_str().to_string(),
        error_message: entry.error_message,
        processed_at: entry.processed_at,
    }
}

fn row_to_entry(row: ProcessingLogRow) -> Result<ProcessingLogEntry, PortError> {
    let status = match row.status.as_str() {
        "success" => ProcessingStatus::Success,
        "error" => ProcessingStatus::Error,
        other => {
            return Err(PortError::transformation(format!(
                "unknown processing status '{}'",
                other
            )))
        }
    };

    Ok(ProcessingLogEntry {
        id: ProcessingLogId::from_uuid(row.id),
        claim_id: ClaimId::from_uuid(row.claim_id),
        workflow_name: row.workflow_name,
        node_name: row.node_name,
        input: row.input_data,
        output: row.output_data,
        status,
        error_message: row.error_message,
        processed_at: row.processed_at,
    })
}
