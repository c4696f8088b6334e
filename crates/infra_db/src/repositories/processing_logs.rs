//! Triage audit log repository

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;

/// A row of the `ai_processing_logs` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProcessingLogRow {
    pub id: Uuid,
    pub claim_id: Uuid,
    pub workflow_name: String,
    pub node_name: String,
    pub input_data: Value,
    pub output_data: Option<Value>,
    pub status: String,
    pub error_message: Option<String>,
    pub processed_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ProcessingLogRepository {
    pool: PgPool,
}

impl ProcessingLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, row: &ProcessingLogRow) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO ai_processing_logs \
             (id, claim_id, workflow_name, node_name, input_data, output_data, status, error_message, processed_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(row.id)
        .bind(row.claim_id)
        .bind(&row.workflow_name)
        .bind(&row.node_name)
        .bind(&row.input_data)
        .bind(&row.output_data)
        .bind(&row.status)
        .bind(&row.error_message)
        .bind(row.processed_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// All entries for a claim, oldest first
    pub async fn find_by_claim(&self, claim_id: Uuid) -> Result<Vec<ProcessingLogRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ProcessingLogRow>(
            "SELECT id, claim_id, workflow_name, node_name, input_data, output_data, status, error_message, processed_at \
             FROM ai_processing_logs WHERE claim_id = $1 ORDER BY processed_at, id",
        )
        .bind(claim_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
