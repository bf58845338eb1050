//! SQLite vote store for local development and tests.

use super::{classify_insert_error, overlay_scores, zero_scores, VoteError, VoteStore};
use crate::error::AppError;
use crate::models::{ModelScore, Vote};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{error, info, instrument};

const CREATE_VOTES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS votes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    model_name TEXT NOT NULL,
    session_id TEXT NOT NULL UNIQUE,
    voted_utc TEXT NOT NULL
)
"#;

#[derive(Clone)]
pub struct SqliteVoteStore {
    pool: SqlitePool,
}

impl SqliteVoteStore {
    #[instrument]
    pub async fn connect(url: &str) -> Result<Self, AppError> {
        info!("Opening SQLite vote store");

        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Invalid SQLite URL: {}", e)))?
            .create_if_missing(true);

        // SQLite serializes writers anyway; a single long-lived pooled
        // connection also keeps `:memory:` databases stable across calls.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        sqlx::query(CREATE_VOTES_TABLE)
            .execute(&pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to create votes table: {}", e))
            })?;

        info!("SQLite vote store ready");

        Ok(Self { pool })
    }
}

#[async_trait]
impl VoteStore for SqliteVoteStore {
    async fn health_check(&self) -> Result<(), VoteError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn has_voted(&self, session_id: &str) -> bool {
        let count: Result<i64, sqlx::Error> =
            sqlx::query_scalar("SELECT COUNT(*) FROM votes WHERE session_id = ?")
                .bind(session_id)
                .fetch_one(&self.pool)
                .await;

        match count {
            Ok(count) => count > 0,
            Err(e) => {
                error!(error = %e, "Vote existence check failed; treating as not voted");
                false
            }
        }
    }

    #[instrument(skip(self))]
    async fn record_vote(&self, model_name: &str, session_id: &str) -> Result<Vote, VoteError> {
        let vote = sqlx::query_as::<_, Vote>(
            r#"
            INSERT INTO votes (model_name, session_id, voted_utc)
            VALUES (?, ?, ?)
            RETURNING id, model_name, session_id, voted_utc
            "#,
        )
        .bind(model_name)
        .bind(session_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(classify_insert_error)?;

        info!(model = %vote.model_name, session_id = %vote.session_id, "Vote recorded");

        Ok(vote)
    }

    #[instrument(skip(self))]
    async fn get_scores(&self) -> Vec<ModelScore> {
        let rows: Result<Vec<(String, i64)>, sqlx::Error> = sqlx::query_as(
            r#"
            SELECT model_name, COUNT(*) AS vote_count
            FROM votes
            GROUP BY model_name
            ORDER BY vote_count DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await;

        match rows {
            Ok(rows) => overlay_scores(rows),
            Err(e) => {
                error!(error = %e, "Score read failed; returning zeroed scores");
                zero_scores()
            }
        }
    }

    #[instrument(skip(self))]
    async fn get_total_votes(&self) -> i64 {
        let count: Result<i64, sqlx::Error> = sqlx::query_scalar("SELECT COUNT(*) FROM votes")
            .fetch_one(&self.pool)
            .await;

        match count {
            Ok(count) => count,
            Err(e) => {
                error!(error = %e, "Total vote count failed; returning 0");
                0
            }
        }
    }
}
