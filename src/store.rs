use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use crate::db;
use crate::models::{NewSubmission, Submission};

#[derive(Debug)]
pub struct StoreError {
    pub message: String,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError {
            message: err.to_string(),
        }
    }
}

impl From<String> for StoreError {
    fn from(message: String) -> Self {
        StoreError { message }
    }
}

impl From<&str> for StoreError {
    fn from(s: &str) -> Self {
        StoreError {
            message: s.to_string(),
        }
    }
}

/// Durable storage for accepted submissions.
///
/// `insert` appends exactly one record per call and never deduplicates.
/// The store assigns `id` and `created_at`.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn insert(&self, submission: &NewSubmission) -> Result<Submission, StoreError>;
    async fn find(&self, id: Uuid) -> Result<Option<Submission>, StoreError>;
}

pub struct PgSubmissionStore {
    pool: PgPool,
}

impl PgSubmissionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build a pool that connects on first use and reuses the connection afterwards.
    pub fn connect_lazy(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_lazy(database_url)?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl SubmissionStore for PgSubmissionStore {
    async fn insert(&self, submission: &NewSubmission) -> Result<Submission, StoreError> {
        Ok(db::submissions::create(&self.pool, submission).await?)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Submission>, StoreError> {
        Ok(db::submissions::find_by_id(&self.pool, id).await?)
    }
}
