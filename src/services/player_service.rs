//! Player roster operations.

use tracing::info;
use validator::Validate;

use crate::{
    dto::player::{CreatePlayerRequest, PlayerSummary, UpdatePlayerRequest},
    error::ServiceError,
    state::SharedState,
};

/// Every registered player.
pub async fn list_players(state: &SharedState) -> Result<Vec<PlayerSummary>, ServiceError> {
    let store = state.require_store().await?;
    let players = store.list_players().await?;
    Ok(players.into_iter().map(Into::into).collect())
}

/// Look up a single player by name.
pub async fn get_player(state: &SharedState, name: String) -> Result<PlayerSummary, ServiceError> {
    let store = state.require_store().await?;
    store
        .find_player(name.clone())
        .await?
        .map(Into::into)
        .ok_or_else(|| ServiceError::NotFound(format!("player `{name}` not found")))
}

/// Register a new player. The store's unique index on the name turns a
/// concurrent duplicate registration into a conflict.
pub async fn create_player(
    state: &SharedState,
    request: CreatePlayerRequest,
) -> Result<PlayerSummary, ServiceError> {
    request.validate()?;

    let store = state.require_store().await?;
    let player: crate::dao::models::PlayerEntity = request.into();
    let summary = PlayerSummary::from(player.clone());
    store.insert_player(player).await?;
    info!(name = %summary.name, "player registered");
    Ok(summary)
}

/// Apply a partial counter edit to a player.
pub async fn update_player(
    state: &SharedState,
    name: String,
    request: UpdatePlayerRequest,
) -> Result<(), ServiceError> {
    let update: crate::dao::models::PlayerUpdateEntity = request.into();
    if update.is_empty() {
        return Err(ServiceError::InvalidInput(
            "update must set at least one field".into(),
        ));
    }

    let store = state.require_store().await?;
    if !store.update_player(name.clone(), update).await? {
        return Err(ServiceError::NotFound(format!("player `{name}` not found")));
    }
    info!(%name, "player updated");
    Ok(())
}

/// Remove a player record. Recorded matches that reference the player are
/// left untouched.
pub async fn delete_player(state: &SharedState, name: String) -> Result<(), ServiceError> {
    let store = state.require_store().await?;
    if !store.delete_player(name.clone()).await? {
        return Err(ServiceError::NotFound(format!("player `{name}` not found")));
    }
    info!(%name, "player deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::AppConfig,
        dao::league_store::testing::MemoryLeagueStore,
        state::{AppState, SharedState},
    };

    async fn state_with(store: &MemoryLeagueStore) -> SharedState {
        let state = AppState::new(AppConfig::for_tests());
        state.install_store(Arc::new(store.clone())).await;
        state
    }

    fn create_request(name: &str) -> CreatePlayerRequest {
        CreatePlayerRequest {
            name: name.to_owned(),
            goals: 0,
            wins: 0,
            losses: 0,
            draws: 0,
            matches_played: 0,
        }
    }

    #[tokio::test]
    async fn creates_and_fetches_a_player() {
        let store = MemoryLeagueStore::new();
        let state = state_with(&store).await;

        create_player(&state, create_request("Marta")).await.unwrap();

        let fetched = get_player(&state, "Marta".to_owned()).await.unwrap();
        assert_eq!(fetched.name, "Marta");
        assert_eq!(fetched.matches_played, 0);
    }

    #[tokio::test]
    async fn duplicate_name_is_a_conflict() {
        let store = MemoryLeagueStore::new();
        let state = state_with(&store).await;

        create_player(&state, create_request("Marta")).await.unwrap();
        let result = create_player(&state, create_request("Marta")).await;

        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[tokio::test]
    async fn invalid_name_is_rejected() {
        let store = MemoryLeagueStore::new();
        let state = state_with(&store).await;

        let result = create_player(&state, create_request("1nvalid")).await;

        assert!(matches!(result, Err(ServiceError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn update_requires_at_least_one_field() {
        let store = MemoryLeagueStore::new();
        let state = state_with(&store).await;
        create_player(&state, create_request("Marta")).await.unwrap();

        let result = update_player(
            &state,
            "Marta".to_owned(),
            UpdatePlayerRequest::default(),
        )
        .await;

        assert!(matches!(result, Err(ServiceError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn updating_or_deleting_an_unknown_player_is_not_found() {
        let store = MemoryLeagueStore::new();
        let state = state_with(&store).await;

        let update = UpdatePlayerRequest {
            goals: Some(3),
            ..Default::default()
        };
        assert!(matches!(
            update_player(&state, "Ghost".to_owned(), update).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            delete_player(&state, "Ghost".to_owned()).await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn partial_update_leaves_other_counters_alone() {
        let store = MemoryLeagueStore::new();
        let state = state_with(&store).await;
        let mut request = create_request("Marta");
        request.wins = 5;
        create_player(&state, request).await.unwrap();

        update_player(
            &state,
            "Marta".to_owned(),
            UpdatePlayerRequest {
                goals: Some(7),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let player = store.player("Marta").unwrap();
        assert_eq!(player.goals, 7);
        assert_eq!(player.wins, 5);
    }
}
