//! Port plumbing shared by the claim crates
//!
//! `domain_claims` declares its storage ports against the types in this
//! module; `infra_db` and the in-memory test store implement them.
//!
//! ```text
//!        TriageService / ClaimIntakeService
//!                       │
//!                       ▼
//!        ClaimRecordPort, ProcessingLogPort      (domain_claims)
//!             ▲                        ▲
//!             │                        │
//!   PostgresClaimAdapter        MockClaimStore
//!       (infra_db)           (domain_claims, tests)
//! ```

use std::fmt;
use thiserror::Error;
use serde::{Deserialize, Serialize};

/// Failure reported by a storage adapter
#[derive(Debug, Error)]
pub enum PortError {
    #[error("{entity_type} {id} not found")]
    NotFound {
        entity_type: String,
        id: String,
    },

    /// The store refused the data
    #[error("Rejected by store: {message}")]
    Validation { message: String },

    /// A uniqueness or state precondition did not hold
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// The store could not be reached in time; retrying may succeed
    #[error("Store unavailable: {message}")]
    Unavailable { message: String },

    /// Stored data does not map onto the domain record
    #[error("Malformed stored data: {message}")]
    Transformation { message: String },

    #[error("Store error: {message}")]
    Internal { message: String },
}

impl PortError {
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        PortError::Validation { message: message.into() }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict { message: message.into() }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        PortError::Unavailable { message: message.into() }
    }

    pub fn transformation(message: impl Into<String>) -> Self {
        PortError::Transformation { message: message.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal { message: message.into() }
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, PortError::Unavailable { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}

/// Implemented by every port trait's adapters; lets services hold them as
/// `Arc<dyn Port>` across tasks
pub trait DomainPort: Send + Sync + 'static {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Outcome of probing one adapter, reported by the readiness endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    pub adapter_id: String,
    pub status: AdapterHealth,
    pub latency_ms: u64,
    pub message: Option<String>,
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

impl HealthCheckResult {
    /// Degraded still serves traffic
    pub fn is_operational(&self) -> bool {
        self.status != AdapterHealth::Unhealthy
    }
}

#[async_trait::async_trait]
pub trait HealthCheckable: Send + Sync {
    async fn health_check(&self) -> HealthCheckResult;
}
