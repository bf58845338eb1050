//! HTTP handlers for the Joke Battles API.

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::error::AppError;
use crate::models::ModelName;
use crate::services::votes::VoteError;
use crate::startup::AppState;

// ============================================================================
// Request/Response DTOs
// ============================================================================

/// Joke generation request.
#[derive(Debug, Deserialize, Validate)]
pub struct JokeRequest {
    #[validate(length(min = 1, max = 500))]
    pub context: String,
    #[validate(length(min = 1, max = 100))]
    pub session_id: String,
}

/// Vote submission request.
#[derive(Debug, Deserialize, Validate)]
pub struct VoteRequest {
    #[validate(length(min = 1, max = 50))]
    pub model: String,
    #[validate(length(min = 1, max = 100))]
    pub session_id: String,
}

/// One generated joke, in fixed provider order; `id` is the ordinal.
#[derive(Debug, Serialize)]
pub struct JokeResponse {
    pub id: usize,
    pub content: String,
    pub model: ModelName,
    pub fallback: bool,
}

/// Scoreboard entry.
#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub model: ModelName,
    pub votes: i64,
    pub icon: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /
pub async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Joke Battles API is running!" }))
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "service": "joke-battles",
                "version": env!("CARGO_PKG_VERSION")
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unhealthy",
                "service": "joke-battles",
                "error": e.to_string()
            })),
        ),
    }
}

/// Generate jokes from all providers.
///
/// POST /api/generate-jokes
///
/// Always succeeds with one entry per provider; failed branches carry
/// fallback content flagged as such.
pub async fn generate_jokes(
    State(state): State<AppState>,
    Json(req): Json<JokeRequest>,
) -> Result<Json<Vec<JokeResponse>>, AppError> {
    req.validate()?;

    tracing::info!(context = %req.context, "Generating jokes");

    let results = state.aggregator.generate_all(&req.context).await;

    let response: Vec<JokeResponse> = results
        .into_iter()
        .enumerate()
        .map(|(id, joke)| JokeResponse {
            id,
            content: joke.content,
            model: joke.provider,
            fallback: joke.fallback,
        })
        .collect();

    tracing::info!(count = response.len(), "Jokes generated");

    Ok(Json(response))
}

/// Submit a vote for a model.
///
/// POST /api/vote
pub async fn submit_vote(
    State(state): State<AppState>,
    Json(req): Json<VoteRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    req.validate()?;

    // No pre-check: the insert's UNIQUE constraint is the duplicate guard,
    // and classification of its violation is the only detection path.
    match state.store.record_vote(&req.model, &req.session_id).await {
        Ok(_) => Ok(Json(MessageResponse {
            message: "Vote recorded successfully".to_string(),
        })),
        Err(VoteError::DuplicateVote) => Err(AppError::BadRequest(anyhow::anyhow!(
            "Already voted for this session"
        ))),
        Err(VoteError::Storage(e)) => Err(AppError::DatabaseError(anyhow::anyhow!(
            "Failed to record vote: {}",
            e
        ))),
    }
}

/// Get current vote counts for all models, highest first.
///
/// GET /api/scores
pub async fn get_scores(State(state): State<AppState>) -> Json<Vec<ScoreResponse>> {
    let scores = state.store.get_scores().await;

    Json(
        scores
            .into_iter()
            .map(|score| ScoreResponse {
                model: score.model,
                votes: score.votes,
                icon: score.model.icon(),
            })
            .collect(),
    )
}
