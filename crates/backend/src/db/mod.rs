//! Submission storage
//!
//! Handlers only see the [`SubmissionStore`] trait; production uses the
//! PostgreSQL implementation in `submissions`.

mod error;
mod submissions;
#[cfg(test)]
pub mod memory;

pub use error::*;
pub use submissions::*;

use async_trait::async_trait;
use top20_core::{StoredSubmission, SubmissionRequest};

#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Lightweight liveness probe
    async fn ping(&self) -> Result<(), DbError>;

    /// Create the submissions table if it is missing
    async fn ensure_schema(&self) -> Result<(), DbError>;

    /// Whether a submission already exists for this canonical address
    async fn address_exists(&self, address: &str) -> Result<bool, DbError>;

    /// Store a validated submission and return its id.
    /// Fails with [`DbError::DuplicateAddress`] if the address is taken.
    async fn insert(&self, request: &SubmissionRequest, address: &str) -> Result<i32, DbError>;

    /// Submissions newest first, optionally only those by `submitted_by`
    async fn list(&self, submitted_by: Option<&str>) -> Result<Vec<StoredSubmission>, DbError>;
}
