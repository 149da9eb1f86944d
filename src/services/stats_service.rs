//! Aggregate player statistics.

use crate::{dto::stats::LeaderboardsResponse, error::ServiceError, state::SharedState};

/// Rows kept per leaderboard.
const LEADERBOARD_LIMIT: u32 = 10;

/// The three leaderboards shown on the stats page, each capped at ten rows.
pub async fn leaderboards(state: &SharedState) -> Result<LeaderboardsResponse, ServiceError> {
    let store = state.require_store().await?;
    let boards = store.player_leaderboards(LEADERBOARD_LIMIT).await?;
    Ok(boards.into())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::AppConfig,
        dao::{
            league_store::{LeagueStore, testing::MemoryLeagueStore},
            models::PlayerEntity,
        },
        state::AppState,
    };

    #[tokio::test]
    async fn leaderboards_rank_by_the_right_counters() {
        let store = MemoryLeagueStore::new();
        let seed = [("Ana", 9, 2, 4), ("Bia", 3, 7, 8), ("Carla", 6, 1, 2)];
        for (name, goals, wins, played) in seed {
            let mut player = PlayerEntity::new(name.to_owned());
            player.goals = goals;
            player.wins = wins;
            player.matches_played = played;
            store.insert_player(player).await.unwrap();
        }
        let state = AppState::new(AppConfig::for_tests());
        state.install_store(Arc::new(store.clone())).await;

        let boards = leaderboards(&state).await.unwrap();

        assert_eq!(boards.top_scorers[0].name, "Ana");
        assert_eq!(boards.top_scorers[0].value, 9);
        assert_eq!(boards.top_winners[0].name, "Bia");
        assert_eq!(boards.most_appearances[0].name, "Bia");
        assert_eq!(boards.most_appearances[0].value, 8);
    }
}
