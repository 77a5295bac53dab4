//! Database bootstrap: pool creation, wait-for-ready, schema

use std::time::Duration;

use deadpool_postgres::Runtime;
use tokio::time::Instant;
use tokio_postgres::NoTls;

use crate::config::Config;
use crate::db::{PgStore, SubmissionStore};
use crate::error::StartupError;

/// Capped exponential backoff bounded by an overall deadline
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub initial: Duration,
    pub max: Duration,
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial: Duration::from_secs(1),
            max: Duration::from_secs(10),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Open the pool, wait until the database answers and make sure the table exists
pub async fn connect(config: &Config, policy: &RetryPolicy) -> Result<PgStore, StartupError> {
    let pool = config.pool_config().create_pool(Some(Runtime::Tokio1), NoTls)?;
    let store = PgStore::new(pool);

    wait_for_database(&store, policy).await?;
    tracing::info!("Database connected successfully");

    store.ensure_schema().await.map_err(StartupError::Schema)?;
    Ok(store)
}

/// Ping until the store answers or `policy.timeout` runs out
pub async fn wait_for_database(
    store: &dyn SubmissionStore,
    policy: &RetryPolicy,
) -> Result<(), StartupError> {
    let started = Instant::now();
    let deadline = started + policy.timeout;
    let mut backoff = policy.initial;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        let last_error = match tokio::time::timeout(remaining, store.ping()).await {
            Ok(Ok(())) => return Ok(()),
            Ok(Err(e)) => e.to_string(),
            Err(_) => "ping timed out".to_string(),
        };

        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(StartupError::DatabaseUnavailable {
                waited: started.elapsed(),
                last_error,
            });
        }

        tracing::info!(error = %last_error, "Waiting for database (retrying in {:?})...", backoff);
        tokio::time::sleep(backoff.min(remaining)).await;
        backoff = (backoff * 2).min(policy.max);
    }
}
