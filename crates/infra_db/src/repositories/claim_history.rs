//! Claim lifecycle history repository

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;

/// A row of the `claim_history` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClaimHistoryRow {
    pub id: Uuid,
    pub claim_id: Uuid,
    pub action: String,
    pub old_status: Option<String>,
    pub new_status: Option<String>,
    pub performed_by: Uuid,
    pub performed_at: DateTime<Utc>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ClaimHistoryRepository {
    pool: PgPool,
}

impl ClaimHistoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, row: &ClaimHistoryRow) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO claim_history \
             (id, claim_id, action, old_status, new_status, performed_by, performed_at, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(row.id)
        .bind(row.claim_id)
        .bind(&row.action)
        .bind(&row.old_status)
        .bind(&row.new_status)
        .bind(row.performed_by)
        .bind(row.performed_at)
        .bind(&row.notes)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// All entries for a claim, newest first
    pub async fn find_by_claim(&self, claim_id: Uuid) -> Result<Vec<ClaimHistoryRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ClaimHistoryRow>(
            "SELECT id, claim_id, action, old_status, new_status, performed_by, performed_at, notes \
             FROM claim_history WHERE claim_id = $1 ORDER BY performed_at DESC, id DESC",
        )
        .bind(claim_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
