use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::stats::LeaderboardsResponse, error::AppError, services::stats_service, state::SharedState,
};

/// Aggregate statistics routes.
pub fn router() -> Router<SharedState> {
    Router::new().route("/players/stats", get(player_stats))
}

/// The goal, win and appearance leaderboards.
#[utoipa::path(
    get,
    path = "/api/players/stats",
    tag = "stats",
    responses((status = 200, description = "Player leaderboards", body = LeaderboardsResponse))
)]
pub async fn player_stats(
    State(state): State<SharedState>,
) -> Result<Json<LeaderboardsResponse>, AppError> {
    Ok(Json(stats_service::leaderboards(&state).await?))
}
