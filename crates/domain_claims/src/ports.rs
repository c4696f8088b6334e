//! Claim Domain Ports
//!
//! The services in this crate talk to storage only through the traits defined
//! here. `infra_db` provides the PostgreSQL adapter; the [`mock`] module
//! provides an in-memory one for tests.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_claims::ports::{ClaimRecordPort, ProcessingLogPort};
//! use std::sync::Arc;
//!
//! let store = Arc::new(PostgresClaimAdapter::new(pool));
//! let triage = TriageService::new(store.clone(), store);
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use core_kernel::{ClaimId, DomainPort, HealthCheckable, PortError, ProcessingLogId, UserId};

use crate::claim::{ClaimInput, ClaimRecord, ClaimStatus, ClaimType};
use crate::history::ClaimHistoryEntry;
use crate::pipeline::ProcessingResult;

/// Workflow name recorded on every processing log entry
pub const WORKFLOW_NAME: &str = "claim_processing";

/// Node name for a full pipeline run
pub const FULL_ANALYSIS_NODE: &str = "full_analysis";

/// Largest page a caller may request
pub const MAX_PER_PAGE: u32 = 100;

/// Filter and pagination for listing a user's claims
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimQuery {
    pub status: Option<ClaimStatus>,
    pub claim_type: Option<ClaimType>,
    /// 1-based page number
    pub page: u32,
    pub per_page: u32,
}

impl Default for ClaimQuery {
    fn default() -> Self {
        Self {
            status: None,
            claim_type: None,
            page: 1,
            per_page: 10,
        }
    }
}

impl ClaimQuery {
    /// Creates a query for one page, clamping out-of-range values
    pub fn page(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: ClaimStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_type(mut self, claim_type: ClaimType) -> Self {
        self.claim_type = Some(claim_type);
        self
    }

    /// Number of rows to skip
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page)
    }

    /// Returns true if the claim passes the filters
    pub fn matches(&self, claim: &ClaimRecord) -> bool {
        self.status.map_or(true, |s| claim.status == s)
            && self.claim_type.as_ref().map_or(true, |t| &claim.claim_type == t)
    }
}

/// One page of claims, newest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimPage {
    pub claims: Vec<ClaimRecord>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
}

impl ClaimPage {
    pub fn new(claims: Vec<ClaimRecord>, total: u64, query: &ClaimQuery) -> Self {
        let per_page = u64::from(query.per_page.max(1));
        let total_pages = total.div_ceil(per_page);

        Self {
            claims,
            total,
            page: query.page,
            per_page: query.per_page,
            total_pages: u32::try_from(total_pages).unwrap_or(u32::MAX),
        }
    }
}

/// Outcome recorded for one processing attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingStatus {
    Success,
    Error,
}

impl ProcessingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingStatus::Success => "success",
            ProcessingStatus::Error => "error",
        }
    }
}

/// Audit record of one pipeline invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingLogEntry {
    pub id: ProcessingLogId,
    pub claim_id: ClaimId,
    pub workflow_name: String,
    pub node_name: String,
    pub input: Value,
    /// Absent when the run failed
    pub output: Option<Value>,
    pub status: ProcessingStatus,
    pub error_message: Option<String>,
    pub processed_at: DateTime<Utc>,
}

impl ProcessingLogEntry {
    /// Log entry for a finished run; degraded results are logged as errors
    pub fn for_result(
        claim_id: ClaimId,
        input: &ClaimInput,
        result: &ProcessingResult,
    ) -> Result<Self, PortError> {
        let input = to_json(input)?;

        let (output, status) = match result.error {
            Some(_) => (None, ProcessingStatus::Error),
            None => (Some(to_json(result)?), ProcessingStatus::Success),
        };

        Ok(Self {
            id: ProcessingLogId::new_v7(),
            claim_id,
            workflow_name: WORKFLOW_NAME.to_string(),
            node_name: FULL_ANALYSIS_NODE.to_string(),
            input,
            output,
            status,
            error_message: result.error.clone(),
            processed_at: result.processed_at,
        })
    }

    /// Log entry for a run that could not be completed or stored
    pub fn failure(claim_id: ClaimId, input: Value, message: impl Into<String>) -> Self {
        Self {
            id: ProcessingLogId::new_v7(),
            claim_id,
            workflow_name: WORKFLOW_NAME.to_string(),
            node_name: FULL_ANALYSIS_NODE.to_string(),
            input,
            output: None,
            status: ProcessingStatus::Error,
            error_message: Some(message.into()),
            processed_at: Utc::now(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, PortError> {
    serde_json::to_value(value).map_err(|e| PortError::transformation(e.to_string()))
}

/// Storage of submitted claims
///
/// Every read is scoped to an owner: a claim that exists but belongs to
/// someone else is reported as `NotFound`.
#[async_trait]
pub trait ClaimRecordPort: DomainPort + HealthCheckable {
    /// Stores a new claim
    async fn create(&self, claim: ClaimRecord) -> Result<ClaimRecord, PortError>;

    /// Loads a claim owned by `owner`
    async fn find_owned(&self, id: ClaimId, owner: UserId) -> Result<ClaimRecord, PortError>;

    /// Lists the owner's claims, newest first
    async fn list(&self, owner: UserId, query: ClaimQuery) -> Result<ClaimPage, PortError>;

    /// Writes the owner-editable fields of a claim
    ///
    /// Fails with `Conflict` if the stored claim has left `submitted` status.
    async fn update(&self, claim: &ClaimRecord) -> Result<ClaimRecord, PortError>;

    /// Replaces the stored analysis of a claim
    async fn save_analysis(&self, id: ClaimId, result: &ProcessingResult) -> Result<(), PortError>;

    async fn append_history(&self, entry: ClaimHistoryEntry) -> Result<(), PortError>;

    /// History of a claim, newest first
    async fn history(&self, claim_id: ClaimId) -> Result<Vec<ClaimHistoryEntry>, PortError>;
}

/// Append-only audit trail of pipeline runs
#[async_trait]
pub trait ProcessingLogPort: DomainPort {
    async fn append(&self, entry: ProcessingLogEntry) -> Result<(), PortError>;

    /// Entries for a claim, oldest first
    async fn entries_for(&self, claim_id: ClaimId) -> Result<Vec<ProcessingLogEntry>, PortError>;
}

/// In-memory adapter for tests
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use core_kernel::{AdapterHealth, HealthCheckResult};

    /// Implements both claim ports over shared in-memory maps
    #[derive(Debug, Default, Clone)]
    pub struct MockClaimStore {
        claims: Arc<RwLock<HashMap<ClaimId, ClaimRecord>>>,
        logs: Arc<RwLock<Vec<ProcessingLogEntry>>>,
        history: Arc<RwLock<Vec<ClaimHistoryEntry>>>,
        fail_analysis_saves: Arc<AtomicBool>,
        fail_log_appends: Arc<AtomicBool>,
    }

    impl MockClaimStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates the store
        pub async fn with_claims(claims: Vec<ClaimRecord>) -> Self {
            let store = Self::new();
            for claim in claims {
                store.claims.write().await.insert(claim.id, claim);
            }
            store
        }

        /// All log entries, in append order
        pub async fn logs(&self) -> Vec<ProcessingLogEntry> {
            self.logs.read().await.clone()
        }

        /// Makes every later `save_analysis` fail as if the store were down
        pub fn fail_analysis_saves(&self, fail: bool) {
            self.fail_analysis_saves.store(fail, Ordering::SeqCst);
        }

        /// Makes every later log `append` fail as if the store were down
        pub fn fail_log_appends(&self, fail: bool) {
            self.fail_log_appends.store(fail, Ordering::SeqCst);
        }

        /// Moves a claim along its lifecycle, as a reviewer would
        pub async fn set_status(&self, id: ClaimId, status: ClaimStatus) {
            if let Some(claim) = self.claims.write().await.get_mut(&id) {
                claim.status = status;
            }
        }
    }

    impl DomainPort for MockClaimStore {}

    #[async_trait]
    impl HealthCheckable for MockClaimStore {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                adapter_id: "mock-claim-store".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms: 0,
                message: Some("Mock adapter always healthy".to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl ClaimRecordPort for MockClaimStore {
        async fn create(&self, claim: ClaimRecord) -> Result<ClaimRecord, PortError> {
            let mut claims = self.claims.write().await;
            if claims.values().any(|c| c.claim_number == claim.claim_number) {
                return Err(PortError::conflict(format!(
                    "claim number {} already exists",
                    claim.claim_number
                )));
            }
            claims.insert(claim.id, claim.clone());
            Ok(claim)
        }

        async fn find_owned(&self, id: ClaimId, owner: UserId) -> Result<ClaimRecord, PortError> {
            self.claims
                .read()
                .await
                .get(&id)
                .filter(|c| c.is_owned_by(owner))
                .cloned()
                .ok_or_else(|| PortError::not_found("Claim", id))
        }

        async fn list(&self, owner: UserId, query: ClaimQuery) -> Result<ClaimPage, PortError> {
            let claims = self.claims.read().await;
            let mut matching: Vec<_> = claims
                .values()
                .filter(|c| c.is_owned_by(owner) && query.matches(c))
                .cloned()
                .collect();
            matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

            let total = matching.len() as u64;
            let page: Vec<_> = matching
                .into_iter()
                .skip(usize::try_from(query.offset()).unwrap_or(usize::MAX))
                .take(query.per_page as usize)
                .collect();

            Ok(ClaimPage::new(page, total, &query))
        }

        async fn update(&self, claim: &ClaimRecord) -> Result<ClaimRecord, PortError> {
            let mut claims = self.claims.write().await;
            let stored = claims
                .get_mut(&claim.id)
                .ok_or_else(|| PortError::not_found("Claim", claim.id))?;
            if stored.status != ClaimStatus::Submitted {
                return Err(PortError::conflict(format!(
                    "claim {} is {}",
                    claim.id,
                    stored.status.as_str()
                )));
            }

            stored.claim_type = claim.claim_type.clone();
            stored.priority = claim.priority;
            stored.amount = claim.amount;
            stored.description = claim.description.clone();
            stored.incident_date = claim.incident_date;
            stored.metadata = claim.metadata.clone();
            stored.updated_at = claim.updated_at;
            Ok(stored.clone())
        }

        async fn save_analysis(&self, id: ClaimId, result: &ProcessingResult) -> Result<(), PortError> {
            if self.fail_analysis_saves.load(Ordering::SeqCst) {
                return Err(PortError::unavailable("mock store is down"));
            }
            let mut claims = self.claims.write().await;
            let claim = claims
                .get_mut(&id)
                .ok_or_else(|| PortError::not_found("Claim", id))?;
            claim.ai_analysis = Some(result.clone());
            claim.updated_at = Utc::now();
            Ok(())
        }

        async fn append_history(&self, entry: ClaimHistoryEntry) -> Result<(), PortError> {
            self.history.write().await.push(entry);
            Ok(())
        }

        async fn history(&self, claim_id: ClaimId) -> Result<Vec<ClaimHistoryEntry>, PortError> {
            let mut entries: Vec<_> = self
                .history
                .read()
                .await
                .iter()
                .filter(|e| e.claim_id == claim_id)
                .cloned()
                .collect();
            entries.sort_by(|a, b| b.performed_at.cmp(&a.performed_at).then(b.id.cmp(&a.id)));
            Ok(entries)
        }
    }

    #[async_trait]
    impl ProcessingLogPort for MockClaimStore {
        async fn append(&self, entry: ProcessingLogEntry) -> Result<(), PortError> {
            if self.fail_log_appends.load(Ordering::SeqCst) {
                return Err(PortError::unavailable("mock store is down"));
            }
            self.logs.write().await.push(entry);
            Ok(())
        }

        async fn entries_for(&self, claim_id: ClaimId) -> Result<Vec<ProcessingLogEntry>, PortError> {
            Ok(self
                .logs
                .read()
                .await
                .iter()
                .filter(|e| e.claim_id == claim_id)
                .cloned()
                .collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_clamps_page_size() {
        let query = ClaimQuery::page(0, 500);
        assert_eq!(query.page, 1);
        assert_eq!(query.per_page, MAX_PER_PAGE);
        assert_eq!(query.offset(), 0);
    }

    #[test]
    fn test_offset() {
        assert_eq!(ClaimQuery::page(3, 20).offset(), 40);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let page = ClaimPage::new(Vec::new(), 21, &ClaimQuery::page(1, 10));
        assert_eq!(page.total_pages, 3);

        let empty = ClaimPage::new(Vec::new(), 0, &ClaimQuery::page(1, 10));
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn test_degraded_result_logs_as_error() {
        let result = ProcessingResult::degraded("risk_assessment stage failed", Utc::now());
        let input = ClaimInput::new("auto", rust_decimal::Decimal::ONE);
        let entry = ProcessingLogEntry::for_result(ClaimId::new(), &input, &result).unwrap();

        assert_eq!(entry.status, ProcessingStatus::Error);
        assert!(entry.output.is_none());
        assert_eq!(entry.workflow_name, "claim_processing");
        assert_eq!(entry.node_name, "full_analysis");
    }

    #[test]
    fn test_logged_output_keeps_stage_order() {
        let mut input = ClaimInput::new("auto", rust_decimal::Decimal::from(1200));
        input.description = Some("Rear-ended at a stop light".to_string());
        let result = crate::pipeline::PipelineRunner::new().process(input.clone());
        let entry = ProcessingLogEntry::for_result(ClaimId::new(), &input, &result).unwrap();

        let output = entry.output.unwrap();
        let stages: Vec<&str> = output["analysis"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(
            stages,
            vec!["classification", "validation", "risk_assessment", "fraud_detection", "recommendation"]
        );
    }
}
