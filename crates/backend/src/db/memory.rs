//! In-memory store used by the route and bootstrap tests

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use tokio::time::Instant;
use deadpool_postgres::PoolError;
use top20_core::{StoredSubmission, SubmissionRequest};
use crate::db::{DbError, SubmissionStore};

#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<StoredSubmission>>,
    /// Simulates a dropped database connection
    pub offline: AtomicBool,
    /// Number of upcoming pings that fail before the store answers
    pub failing_pings: AtomicU32,
    pub pings: AtomicU32,
    /// When each ping arrived, on the tokio clock
    pub ping_times: Mutex<Vec<Instant>>,
    /// Makes the duplicate pre-check miss, as if a concurrent insert won the race
    pub hide_existing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a row verbatim, bypassing validation
    pub fn push_raw(&self, players: serde_json::Value, submitted_by: &str, address: &str) {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.len() as i32 + 1;
        rows.push(StoredSubmission {
            id,
            players,
            submitted_by: submitted_by.to_string(),
            ip_address: address.to_string(),
            created_at: Utc::now().naive_utc(),
        });
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn check_online(&self) -> Result<(), DbError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(DbError::Pool(PoolError::Closed));
        }
        Ok(())
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn ping(&self) -> Result<(), DbError> {
        self.pings.fetch_add(1, Ordering::SeqCst);
        self.ping_times.lock().unwrap().push(Instant::now());
        let failing = self.failing_pings.load(Ordering::SeqCst);
        if failing > 0 {
            self.failing_pings.store(failing - 1, Ordering::SeqCst);
            return Err(DbError::Pool(PoolError::Closed));
        }
        self.check_online()
    }

    async fn ensure_schema(&self) -> Result<(), DbError> {
        self.check_online()
    }

    async fn address_exists(&self, address: &str) -> Result<bool, DbError> {
        self.check_online()?;
        if self.hide_existing.load(Ordering::SeqCst) {
            return Ok(false);
        }
        Ok(self.rows.lock().unwrap().iter().any(|r| r.ip_address == address))
    }

    async fn insert(&self, request: &SubmissionRequest, address: &str) -> Result<i32, DbError> {
        self.check_online()?;
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|r| r.ip_address == address) {
            return Err(DbError::DuplicateAddress);
        }

        let id = rows.len() as i32 + 1;
        rows.push(StoredSubmission {
            id,
            players: serde_json::to_value(&request.players).unwrap(),
            submitted_by: request.submitted_by.clone(),
            ip_address: address.to_string(),
            created_at: Utc::now().naive_utc(),
        });
        Ok(id)
    }

    async fn list(&self, submitted_by: Option<&str>) -> Result<Vec<StoredSubmission>, DbError> {
        self.check_online()?;
        let mut rows: Vec<StoredSubmission> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| submitted_by.map_or(true, |name| r.submitted_by == name))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }
}
