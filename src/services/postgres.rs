use crate::models::{AdoptionRequest, CompatibilityResult, RequestStatus};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when persisting adoption requests
#[derive(Debug, Error)]
pub enum RequestStoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Postgres-backed store for adoption requests
///
/// Owns the only mutable state in the system: request rows and their
/// status. Status updates are guarded on the current status so concurrent
/// transitions serialize per request and a double-approval loses the race.
pub struct RequestStore {
    pool: PgPool,
}

impl RequestStore {
    /// Create a new store from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, RequestStoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new store from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, RequestStoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Persist a newly submitted request
    pub async fn save(&self, request: &AdoptionRequest) -> Result<(), RequestStoreError> {
        let query = r#"
            INSERT INTO adoption_requests
                (request_id, adopter_id, pet_id, status, score, compatibility, created_at, decided_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#;

        let compatibility = serde_json::to_value(&request.compatibility)?;

        sqlx::query(query)
            .bind(&request.request_id)
            .bind(&request.adopter_id)
            .bind(&request.pet_id)
            .bind(request.status)
            .bind(request.compatibility.score)
            .bind(compatibility)
            .bind(request.created_at)
            .bind(request.decided_at)
            .execute(&self.pool)
            .await?;

        tracing::debug!(
            "Saved request {} ({} -> {}, score {:.3})",
            request.request_id,
            request.adopter_id,
            request.pet_id,
            request.compatibility.score
        );

        Ok(())
    }

    /// Fetch a request by id
    pub async fn get_request(&self, request_id: &str) -> Result<AdoptionRequest, RequestStoreError> {
        let query = r#"
            SELECT request_id, adopter_id, pet_id, status, compatibility, created_at, decided_at
            FROM adoption_requests
            WHERE request_id = $1
        "#;

        let row = sqlx::query(query)
            .bind(request_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| RequestStoreError::NotFound(format!("request {}", request_id)))?;

        Self::row_to_request(&row)
    }

    /// Persist a status transition already validated by the state machine
    ///
    /// The update is guarded on the row still being pending; losing that
    /// race (another admin decided first) surfaces as a Conflict.
    pub async fn update_status(
        &self,
        request_id: &str,
        status: RequestStatus,
        decided_at: Option<chrono::DateTime<chrono::Utc>>,
    ) -> Result<(), RequestStoreError> {
        let query = r#"
            UPDATE adoption_requests
            SET status = $2, decided_at = $3
            WHERE request_id = $1 AND status = 'pending'
        "#;

        let result = sqlx::query(query)
            .bind(request_id)
            .bind(status)
            .bind(decided_at)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            // Either the row is gone or someone else already decided it
            return match self.get_request(request_id).await {
                Ok(current) => Err(RequestStoreError::Conflict(format!(
                    "request {} is already {}",
                    request_id,
                    current.status.as_str()
                ))),
                Err(e) => Err(e),
            };
        }

        tracing::info!("Request {} -> {}", request_id, status.as_str());

        Ok(())
    }

    /// Pending requests ordered by compatibility, best fit first
    ///
    /// This is the admin review queue; the score column mirrors the stored
    /// compatibility snapshot so the sort happens in SQL.
    pub async fn list_pending(&self) -> Result<Vec<AdoptionRequest>, RequestStoreError> {
        let query = r#"
            SELECT request_id, adopter_id, pet_id, status, compatibility, created_at, decided_at
            FROM adoption_requests
            WHERE status = 'pending'
            ORDER BY score DESC, created_at ASC
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        rows.iter().map(Self::row_to_request).collect()
    }

    /// All requests submitted by one adopter, newest first
    pub async fn list_for_adopter(
        &self,
        adopter_id: &str,
    ) -> Result<Vec<AdoptionRequest>, RequestStoreError> {
        let query = r#"
            SELECT request_id, adopter_id, pet_id, status, compatibility, created_at, decided_at
            FROM adoption_requests
            WHERE adopter_id = $1
            ORDER BY created_at DESC
        "#;

        let rows = sqlx::query(query)
            .bind(adopter_id)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::row_to_request).collect()
    }

    /// Request counts by status
    pub async fn stats(&self) -> Result<RequestStats, RequestStoreError> {
        let query = r#"
            SELECT
                COUNT(*) as total,
                COUNT(*) FILTER (WHERE status = 'pending') as pending,
                COUNT(*) FILTER (WHERE status = 'approved') as approved,
                COUNT(*) FILTER (WHERE status = 'rejected') as rejected,
                COUNT(*) FILTER (WHERE status = 'withdrawn') as withdrawn
            FROM adoption_requests
        "#;

        let row = sqlx::query(query).fetch_one(&self.pool).await?;

        Ok(RequestStats {
            total: row.get("total"),
            pending: row.get("pending"),
            approved: row.get("approved"),
            rejected: row.get("rejected"),
            withdrawn: row.get("withdrawn"),
        })
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, RequestStoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }

    fn row_to_request(row: &sqlx::postgres::PgRow) -> Result<AdoptionRequest, RequestStoreError> {
        let compatibility: CompatibilityResult =
            serde_json::from_value(row.get::<serde_json::Value, _>("compatibility"))?;

        Ok(AdoptionRequest {
            request_id: row.get("request_id"),
            adopter_id: row.get("adopter_id"),
            pet_id: row.get("pet_id"),
            status: row.get("status"),
            compatibility,
            created_at: row.get("created_at"),
            decided_at: row.get("decided_at"),
        })
    }
}

/// Request counts by status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestStats {
    pub total: i64,
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
    pub withdrawn: i64,
}
