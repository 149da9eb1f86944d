use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};
use uuid::Uuid;

use crate::{
    dto::{
        common::MessageResponse,
        matches::{MatchCreatedResponse, MatchSummary, SubmitMatchRequest},
    },
    error::AppError,
    services::{ledger, match_service},
    state::SharedState,
};

/// Match record routes. Submission and retraction are admin-gated by the
/// `/api` guard and go through the ledger.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/matches", get(list_matches).post(submit_match))
        .route("/matches/history", get(match_history))
        .route("/matches/{id}", delete(retract_match))
}

/// List every recorded match.
#[utoipa::path(
    get,
    path = "/api/matches",
    tag = "matches",
    responses((status = 200, description = "All recorded matches", body = [MatchSummary]))
)]
pub async fn list_matches(
    State(state): State<SharedState>,
) -> Result<Json<Vec<MatchSummary>>, AppError> {
    Ok(Json(match_service::list_matches(&state).await?))
}

/// List every recorded match in chronological order.
#[utoipa::path(
    get,
    path = "/api/matches/history",
    tag = "matches",
    responses((status = 200, description = "Matches ordered by date, oldest first", body = [MatchSummary]))
)]
pub async fn match_history(
    State(state): State<SharedState>,
) -> Result<Json<Vec<MatchSummary>>, AppError> {
    Ok(Json(match_service::match_history(&state).await?))
}

/// Record a match and credit every fielded player's counters.
#[utoipa::path(
    post,
    path = "/api/matches",
    tag = "matches",
    request_body = SubmitMatchRequest,
    responses(
        (status = 201, description = "Match recorded", body = MatchCreatedResponse),
        (status = 400, description = "Malformed submission"),
        (status = 404, description = "A roster player is not registered")
    )
)]
pub async fn submit_match(
    State(state): State<SharedState>,
    Json(payload): Json<SubmitMatchRequest>,
) -> Result<(StatusCode, Json<MatchCreatedResponse>), AppError> {
    let id = ledger::submit_match(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(MatchCreatedResponse { id })))
}

/// Retract a recorded match, rolling its counter credits back.
#[utoipa::path(
    delete,
    path = "/api/matches/{id}",
    tag = "matches",
    params(("id" = String, Path, description = "Identifier of the match to retract")),
    responses(
        (status = 200, description = "Match retracted", body = MessageResponse),
        (status = 404, description = "No such match")
    )
)]
pub async fn retract_match(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    ledger::retract_match(&state, id).await?;
    Ok(Json(MessageResponse::new("match retracted")))
}
