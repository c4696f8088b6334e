//! Claim services
//!
//! Async orchestration around the synchronous pipeline. Services hold their
//! ports behind `Arc<dyn ...>` so the same service runs against PostgreSQL in
//! production and against [`crate::ports::mock::MockClaimStore`] in tests.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::{error, info, instrument, warn};

use core_kernel::{ClaimId, PortError, UserId};

use crate::claim::{ClaimInput, ClaimRecord, ClaimUpdate, NewClaim};
use crate::documents::{classify_document, DocumentClassification};
use crate::error::ClaimError;
use crate::fraud_check::{detect_fraud, FraudCheck};
use crate::history::ClaimHistoryEntry;
use crate::pipeline::{PipelineRunner, ProcessingResult};
use crate::ports::{ClaimPage, ClaimQuery, ClaimRecordPort, ProcessingLogEntry, ProcessingLogPort};

/// Maps a port miss on a claim lookup to the domain error
fn lookup_error(id: ClaimId) -> impl FnOnce(PortError) -> ClaimError {
    move |e| {
        if e.is_not_found() {
            ClaimError::ClaimNotFound(id.to_string())
        } else {
            ClaimError::Port(e)
        }
    }
}

/// A stored claim that left `submitted` between our read and the write
fn update_error(id: ClaimId) -> impl FnOnce(PortError) -> ClaimError {
    move |e| match e {
        PortError::Conflict { .. } => ClaimError::NotEditable(format!("{} (changed concurrently)", id)),
        other => lookup_error(id)(other),
    }
}

/// Submission, owner edits and retrieval of claims
pub struct ClaimIntakeService {
    claims: Arc<dyn ClaimRecordPort>,
}

impl ClaimIntakeService {
    pub fn new(claims: Arc<dyn ClaimRecordPort>) -> Self {
        Self { claims }
    }

    /// Validates and stores a new claim in `submitted` status
    #[instrument(skip(self, new_claim), fields(owner = %owner, claim_type = %new_claim.claim_type))]
    pub async fn submit(&self, owner: UserId, new_claim: NewClaim) -> Result<ClaimRecord, ClaimError> {
        new_claim.validate()?;

        let stored = self.claims.create(ClaimRecord::submit(owner, new_claim)).await?;
        self.claims.append_history(ClaimHistoryEntry::submitted(&stored)).await?;

        info!(claim_id = %stored.id, claim_number = %stored.claim_number, "Claim submitted");
        Ok(stored)
    }

    /// Edits a claim that has not yet been picked up for review
    #[instrument(skip(self, update), fields(owner = %owner, claim_id = %id))]
    pub async fn update(&self, owner: UserId, id: ClaimId, update: ClaimUpdate) -> Result<ClaimRecord, ClaimError> {
        let mut claim = self.get(owner, id).await?;
        claim.apply_update(update, Utc::now())?;

        let stored = self.claims.update(&claim).await.map_err(update_error(id))?;
        self.claims.append_history(ClaimHistoryEntry::updated(&stored, owner)).await?;

        info!("Claim updated");
        Ok(stored)
    }

    /// Lifecycle entries of an owned claim, newest first
    #[instrument(skip(self), fields(owner = %owner, claim_id = %id))]
    pub async fn history(&self, owner: UserId, id: ClaimId) -> Result<Vec<ClaimHistoryEntry>, ClaimError> {
        self.get(owner, id).await?;
        Ok(self.claims.history(id).await?)
    }

    #[instrument(skip(self), fields(owner = %owner, claim_id = %id))]
    pub async fn get(&self, owner: UserId, id: ClaimId) -> Result<ClaimRecord, ClaimError> {
        self.claims.find_owned(id, owner).await.map_err(lookup_error(id))
    }

    #[instrument(skip(self, query), fields(owner = %owner, page = query.page))]
    pub async fn list(&self, owner: UserId, query: ClaimQuery) -> Result<ClaimPage, ClaimError> {
        Ok(self.claims.list(owner, query).await?)
    }
}

/// Runs the triage pipeline on stored claims and keeps the audit trail
pub struct TriageService {
    claims: Arc<dyn ClaimRecordPort>,
    logs: Arc<dyn ProcessingLogPort>,
    runner: PipelineRunner,
}

impl TriageService {
    pub fn new(claims: Arc<dyn ClaimRecordPort>, logs: Arc<dyn ProcessingLogPort>) -> Self {
        Self {
            claims,
            logs,
            runner: PipelineRunner::new(),
        }
    }

    /// Scores an owned claim, stores the result on it and logs the run
    ///
    /// A degraded result is stored and returned like any other; only storage
    /// failures surface as errors.
    #[instrument(skip(self), fields(owner = %owner, claim_id = %id))]
    pub async fn process_claim(&self, owner: UserId, id: ClaimId) -> Result<ProcessingResult, ClaimError> {
        let claim = self.claims.find_owned(id, owner).await.map_err(lookup_error(id))?;
        let input = claim.to_input();

        let result = self.runner.process(input.clone());

        if let Err(e) = self.claims.save_analysis(id, &result).await {
            error!(error = %e, "Failed to store claim analysis");
            self.record_failure(id, &input, &e.to_string()).await;
            return Err(e.into());
        }

        let entry = ProcessingLogEntry::for_result(id, &input, &result)?;
        self.logs.append(entry).await?;

        match &result.error {
            Some(message) => warn!(error = %message, "Claim processed with degraded result"),
            None => info!(next_action = %result.next_action, "Claim processed"),
        }

        Ok(result)
    }

    /// The most recent stored analysis of an owned claim
    #[instrument(skip(self), fields(owner = %owner, claim_id = %id))]
    pub async fn get_analysis(&self, owner: UserId, id: ClaimId) -> Result<ProcessingResult, ClaimError> {
        let claim = self.claims.find_owned(id, owner).await.map_err(lookup_error(id))?;
        claim
            .ai_analysis
            .ok_or_else(|| ClaimError::AnalysisNotFound(id.to_string()))
    }

    /// Runs the standalone fraud rules on an owned claim
    #[instrument(skip(self), fields(owner = %owner, claim_id = %id))]
    pub async fn fraud_check(&self, owner: UserId, id: ClaimId) -> Result<FraudCheck, ClaimError> {
        let claim = self.claims.find_owned(id, owner).await.map_err(lookup_error(id))?;
        detect_fraud(&claim.to_input())
    }

    pub fn classify_document(&self, content: &str, doc_type: &str) -> DocumentClassification {
        classify_document(content, doc_type)
    }

    /// Best effort: a failure to log the failure is only traced
    async fn record_failure(&self, id: ClaimId, input: &ClaimInput, message: &str) {
        let input = serde_json::to_value(input).unwrap_or(Value::Null);
        let entry = ProcessingLogEntry::failure(id, input, message);

        if let Err(e) = self.logs.append(entry).await {
            warn!(error = %e, "Could not record processing failure");
        }
    }
}
