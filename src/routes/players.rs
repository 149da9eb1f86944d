use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::{
        common::MessageResponse,
        player::{CreatePlayerRequest, PlayerSummary, UpdatePlayerRequest},
    },
    error::AppError,
    services::player_service,
    state::SharedState,
};

/// Player roster routes. Mutations are admin-gated by the `/api` guard.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/players", get(list_players).post(create_player))
        .route(
            "/players/{name}",
            get(get_player).patch(update_player).delete(delete_player),
        )
}

/// List every registered player.
#[utoipa::path(
    get,
    path = "/api/players",
    tag = "players",
    responses((status = 200, description = "All registered players", body = [PlayerSummary]))
)]
pub async fn list_players(
    State(state): State<SharedState>,
) -> Result<Json<Vec<PlayerSummary>>, AppError> {
    Ok(Json(player_service::list_players(&state).await?))
}

/// Fetch one player by name.
#[utoipa::path(
    get,
    path = "/api/players/{name}",
    tag = "players",
    params(("name" = String, Path, description = "Player name")),
    responses(
        (status = 200, description = "Player record", body = PlayerSummary),
        (status = 404, description = "No such player")
    )
)]
pub async fn get_player(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Result<Json<PlayerSummary>, AppError> {
    Ok(Json(player_service::get_player(&state, name).await?))
}

/// Register a new player.
#[utoipa::path(
    post,
    path = "/api/players",
    tag = "players",
    request_body = CreatePlayerRequest,
    responses(
        (status = 201, description = "Player registered", body = PlayerSummary),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn create_player(
    State(state): State<SharedState>,
    Json(payload): Json<CreatePlayerRequest>,
) -> Result<(StatusCode, Json<PlayerSummary>), AppError> {
    let summary = player_service::create_player(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

/// Edit a player's counters.
#[utoipa::path(
    patch,
    path = "/api/players/{name}",
    tag = "players",
    params(("name" = String, Path, description = "Player name")),
    request_body = UpdatePlayerRequest,
    responses(
        (status = 200, description = "Player updated", body = MessageResponse),
        (status = 404, description = "No such player")
    )
)]
pub async fn update_player(
    State(state): State<SharedState>,
    Path(name): Path<String>,
    Json(payload): Json<UpdatePlayerRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    player_service::update_player(&state, name, payload).await?;
    Ok(Json(MessageResponse::new("player updated")))
}

/// Remove a player. Recorded matches keep their roster snapshots.
#[utoipa::path(
    delete,
    path = "/api/players/{name}",
    tag = "players",
    params(("name" = String, Path, description = "Player name")),
    responses(
        (status = 200, description = "Player deleted", body = MessageResponse),
        (status = 404, description = "No such player")
    )
)]
pub async fn delete_player(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    player_service::delete_player(&state, name).await?;
    Ok(Json(MessageResponse::new("player deleted")))
}
