//! Vote ledger: append-only, uniqueness-constrained vote storage with
//! read-side aggregation, behind one trait with interchangeable Postgres and
//! SQLite backends.

pub mod postgres;
pub mod sqlite;

pub use postgres::PgVoteStore;
pub use sqlite::SqliteVoteStore;

use crate::config::DatabaseConfig;
use crate::error::AppError;
use crate::models::{ModelName, ModelScore, Vote};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoteError {
    #[error("session has already voted")]
    DuplicateVote,

    #[error("vote storage failed: {0}")]
    Storage(#[from] sqlx::Error),
}

/// The four ledger operations plus a health probe.
///
/// Read paths degrade to safe defaults on storage failure (logged, never
/// raised); the write path surfaces every failure, because silently dropping
/// a vote is worse than a 500.
#[async_trait]
pub trait VoteStore: Send + Sync {
    async fn health_check(&self) -> Result<(), VoteError>;

    /// Advisory existence check. The UNIQUE constraint, not this check, is
    /// the duplicate guard; storage failure reads as "not voted".
    async fn has_voted(&self, session_id: &str) -> bool;

    /// Insert the session's single ballot. A uniqueness violation becomes
    /// `VoteError::DuplicateVote`; anything else is `VoteError::Storage`.
    async fn record_vote(&self, model_name: &str, session_id: &str) -> Result<Vote, VoteError>;

    /// Per-model counts: every known model present (zero-filled), sorted by
    /// votes descending, ties in fixed enumeration order.
    async fn get_scores(&self) -> Vec<ModelScore>;

    /// Total ballot count, including votes for unknown model names.
    async fn get_total_votes(&self) -> i64;
}

/// Select a backend from the database URL scheme and initialize its schema.
pub async fn connect(config: &DatabaseConfig) -> Result<Arc<dyn VoteStore>, AppError> {
    if config.url.starts_with("postgres") {
        Ok(Arc::new(PgVoteStore::connect(config).await?))
    } else {
        Ok(Arc::new(SqliteVoteStore::connect(&config.url).await?))
    }
}

/// Insert-then-classify: the storage constraint is the only race-safe
/// duplicate detector.
pub(crate) fn classify_insert_error(e: sqlx::Error) -> VoteError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            VoteError::DuplicateVote
        }
        _ => VoteError::Storage(e),
    }
}

/// Overlay grouped counts onto the zero-filled known-model list and sort by
/// votes descending. The sort is stable, so equal counts keep the fixed
/// enumeration order across calls.
pub(crate) fn overlay_scores(rows: Vec<(String, i64)>) -> Vec<ModelScore> {
    let mut scores = zero_scores();

    for (model_name, votes) in rows {
        if let Some(model) = ModelName::parse(&model_name) {
            if let Some(score) = scores.iter_mut().find(|s| s.model == model) {
                score.votes = votes;
            }
        }
    }

    scores.sort_by(|a, b| b.votes.cmp(&a.votes));
    scores
}

/// All known models mapped to zero, in enumeration order.
pub(crate) fn zero_scores() -> Vec<ModelScore> {
    ModelName::ALL
        .iter()
        .map(|model| ModelScore {
            model: *model,
            votes: 0,
        })
        .collect()
}
