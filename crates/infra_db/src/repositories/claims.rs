//! Claims repository

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DatabaseError;

const CLAIM_COLUMNS: &str = "id, user_id, claim_number, claim_type, status, priority, amount, \
     description, incident_date, submitted_at, metadata, ai_analysis, created_at, updated_at";

/// A row of the `claims` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClaimRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub claim_number: String,
    pub claim_type: String,
    pub status: String,
    pub priority: String,
    pub amount: Decimal,
    pub description: String,
    pub incident_date: NaiveDate,
    pub submitted_at: DateTime<Utc>,
    pub metadata: Value,
    pub ai_analysis: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Optional filters for listing a user's claims
#[derive(Debug, Clone, Default)]
pub struct ClaimFilter {
    pub status: Option<String>,
    pub claim_type: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ClaimsRepository {
    pool: PgPool,
}

impl ClaimsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a claim row as given
    pub async fn insert(&self, row: &ClaimRow) -> Result<ClaimRow, DatabaseError> {
        let sql = format!(
            "INSERT INTO claims ({CLAIM_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             RETURNING {CLAIM_COLUMNS}"
        );

        let inserted = sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(row.id)
            .bind(row.user_id)
            .bind(&row.claim_number)
            .bind(&row.claim_type)
            .bind(&row.status)
            .bind(&row.priority)
            .bind(row.amount)
            .bind(&row.description)
            .bind(row.incident_date)
            .bind(row.submitted_at)
            .bind(&row.metadata)
            .bind(&row.ai_analysis)
            .bind(row.created_at)
            .bind(row.updated_at)
            .fetch_one(&self.pool)
            .await?;

        debug!(claim_id = %inserted.id, "Inserted claim");
        Ok(inserted)
    }

    /// Fetches a claim only if it belongs to `user_id`
    pub async fn find_owned(&self, id: Uuid, user_id: Uuid) -> Result<ClaimRow, DatabaseError> {
        let sql = format!("SELECT {CLAIM_COLUMNS} FROM claims WHERE id = $1 AND user_id = $2");

        sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Claim", id))
    }

    /// One page of a user's claims, newest first
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        filter: &ClaimFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ClaimRow>, DatabaseError> {
        let sql = format!(
            "SELECT {CLAIM_COLUMNS} FROM claims \
             WHERE user_id = $1 \
               AND ($2::text IS NULL OR status = $2) \
               AND ($3::text IS NULL OR claim_type = $3) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $4 OFFSET $5"
        );

        let rows = sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(user_id)
            .bind(&filter.status)
            .bind(&filter.claim_type)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Number of a user's claims matching the filter
    pub async fn count_for_user(&self, user_id: Uuid, filter: &ClaimFilter) -> Result<i64, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM claims \
             WHERE user_id = $1 \
               AND ($2::text IS NULL OR status = $2) \
               AND ($3::text IS NULL OR claim_type = $3)",
        )
        .bind(user_id)
        .bind(&filter.status)
        .bind(&filter.claim_type)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Writes the owner-editable columns while the claim is still `submitted`
    ///
    /// Returns `None` when no submitted claim with that id exists.
    pub async fn update_editable(&self, row: &ClaimRow) -> Result<Option<ClaimRow>, DatabaseError> {
        let sql = format!(
            "UPDATE claims \
             SET claim_type = $2, priority = $3, amount = $4, description = $5, \
                 incident_date = $6, metadata = $7, updated_at = $8 \
             WHERE id = $1 AND status = 'submitted' \
             RETURNING {CLAIM_COLUMNS}"
        );

        let updated = sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(row.id)
            .bind(&row.claim_type)
            .bind(&row.priority)
            .bind(row.amount)
            .bind(&row.description)
            .bind(row.incident_date)
            .bind(&row.metadata)
            .bind(row.updated_at)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(ref r) = updated {
            debug!(claim_id = %r.id, "Updated claim");
        }
        Ok(updated)
    }

    /// Replaces the stored analysis and bumps `updated_at`
    pub async fn update_analysis(&self, id: Uuid, analysis: &Value) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE claims SET ai_analysis = $2, updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .bind(analysis)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Claim", id));
        }
        Ok(())
    }
}
