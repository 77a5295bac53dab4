//! PostgreSQL-backed submission storage

use async_trait::async_trait;
use deadpool_postgres::Pool;
use tokio_postgres::types::Json;
use tokio_postgres::Row;
use top20_core::{StoredSubmission, SubmissionRequest};
use crate::db::{DbError, SubmissionStore};

const CREATE_SUBMISSIONS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS submissions (
        id SERIAL PRIMARY KEY,
        players JSONB NOT NULL,
        submitted_by TEXT NOT NULL,
        ip_address TEXT NOT NULL UNIQUE,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    );
    ALTER TABLE submissions
        ALTER COLUMN submitted_by TYPE TEXT,
        ALTER COLUMN ip_address TYPE TEXT;
"#;

pub struct PgStore {
    pool: Pool,
}

impl PgStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

fn read_submission(row: &Row) -> Result<StoredSubmission, tokio_postgres::Error> {
    Ok(StoredSubmission {
        id: row.try_get("id")?,
        players: row.try_get("players")?,
        submitted_by: row.try_get("submitted_by")?,
        ip_address: row.try_get("ip_address")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl SubmissionStore for PgStore {
    async fn ping(&self) -> Result<(), DbError> {
        let client = self.pool.get().await?;
        client.simple_query("SELECT 1").await?;
        Ok(())
    }

    async fn ensure_schema(&self) -> Result<(), DbError> {
        let client = self.pool.get().await?;
        client.batch_execute(CREATE_SUBMISSIONS_TABLE).await?;
        Ok(())
    }

    async fn address_exists(&self, address: &str) -> Result<bool, DbError> {
        let client = self.pool.get().await?;

        let row = client.query_opt(
            "SELECT id FROM submissions WHERE ip_address = $1",
            &[&address]
        ).await?;

        Ok(row.is_some())
    }

    async fn insert(&self, request: &SubmissionRequest, address: &str) -> Result<i32, DbError> {
        let client = self.pool.get().await?;

        let row = client.query_one(
            r#"
            INSERT INTO submissions (players, submitted_by, ip_address)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
            &[&Json(&request.players), &request.submitted_by, &address]
        ).await.map_err(DbError::from_insert)?;

        Ok(row.get("id"))
    }

    async fn list(&self, submitted_by: Option<&str>) -> Result<Vec<StoredSubmission>, DbError> {
        let client = self.pool.get().await?;

        let rows = match submitted_by {
            Some(name) => client.query(
                r#"
                SELECT id, players, submitted_by, ip_address, created_at
                FROM submissions
                WHERE submitted_by = $1
                ORDER BY created_at DESC, id DESC
                "#,
                &[&name]
            ).await?,
            None => client.query(
                r#"
                SELECT id, players, submitted_by, ip_address, created_at
                FROM submissions
                ORDER BY created_at DESC, id DESC
                "#,
                &[]
            ).await?,
        };

        let mut submissions = Vec::with_capacity(rows.len());
        for row in &rows {
            match read_submission(row) {
                Ok(submission) => submissions.push(submission),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable submission row");
                }
            }
        }

        Ok(submissions)
    }
}
