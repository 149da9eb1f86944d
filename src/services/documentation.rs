use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Futebolada Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::players::list_players,
        crate::routes::players::get_player,
        crate::routes::players::create_player,
        crate::routes::players::update_player,
        crate::routes::players::delete_player,
        crate::routes::matches::list_matches,
        crate::routes::matches::match_history,
        crate::routes::matches::submit_match,
        crate::routes::matches::retract_match,
        crate::routes::stats::player_stats,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::common::MessageResponse,
            crate::dto::auth::RegisterRequest,
            crate::dto::auth::LoginRequest,
            crate::dto::auth::TokenResponse,
            crate::dto::player::CreatePlayerRequest,
            crate::dto::player::UpdatePlayerRequest,
            crate::dto::player::PlayerSummary,
            crate::dto::matches::SubmitMatchRequest,
            crate::dto::matches::TeamSheetInput,
            crate::dto::matches::PlayerSnapshotInput,
            crate::dto::matches::GoalTallyInput,
            crate::dto::matches::MatchCreatedResponse,
            crate::dto::matches::MatchSummary,
            crate::dto::matches::TeamSheetSummary,
            crate::dto::matches::GoalTallySummary,
            crate::dto::stats::LeaderboardsResponse,
            crate::dto::stats::LeaderboardRow,
            crate::dao::models::Role,
        )
    ),
    tags(
        (name = "auth", description = "Account registration and login"),
        (name = "players", description = "Player roster management"),
        (name = "matches", description = "Match records and the counter ledger"),
        (name = "stats", description = "Aggregate player statistics"),
    )
)]
pub struct ApiDoc;
