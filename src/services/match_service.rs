//! Read-side match queries. Mutations go through the ledger.

use crate::{
    dao::models::MatchSort, dto::matches::MatchSummary, error::ServiceError, state::SharedState,
};

/// Every recorded match, in storage order.
pub async fn list_matches(state: &SharedState) -> Result<Vec<MatchSummary>, ServiceError> {
    fetch(state, MatchSort::Unsorted).await
}

/// Every recorded match in chronological order, oldest first.
pub async fn match_history(state: &SharedState) -> Result<Vec<MatchSummary>, ServiceError> {
    fetch(state, MatchSort::DateAscending).await
}

async fn fetch(state: &SharedState, sort: MatchSort) -> Result<Vec<MatchSummary>, ServiceError> {
    let store = state.require_store().await?;
    let matches = store.list_matches(sort).await?;
    Ok(matches.into_iter().map(Into::into).collect())
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
        dto::matches::{PlayerSnapshotInput, SubmitMatchRequest, TeamSheetInput},
        services::ledger,
        state::AppState,
    };

    fn submission(date: &str, left: &str, right: &str) -> SubmitMatchRequest {
        let snapshot = |name: &str| {
            Some(PlayerSnapshotInput {
                name: name.to_owned(),
                goals: 0,
                wins: 0,
                losses: 0,
                draws: 0,
                matches_played: 0,
            })
        };
        SubmitMatchRequest {
            date: Some(date.to_owned()),
            team_a: Some(TeamSheetInput {
                players: vec![snapshot(left)],
                score: Some(1),
            }),
            team_b: Some(TeamSheetInput {
                players: vec![snapshot(right)],
                score: Some(0),
            }),
            goals: vec![],
        }
    }

    #[tokio::test]
    async fn history_is_sorted_by_date_ascending() {
        let store = MemoryLeagueStore::new();
        for name in ["Ana", "Bia", "Carla", "Dora"] {
            store
                .insert_player(PlayerEntity::new(name.to_owned()))
                .await
                .unwrap();
        }
        let state = AppState::new(AppConfig::for_tests());
        state.install_store(Arc::new(store.clone())).await;

        ledger::submit_match(&state, submission("2024-03-10", "Ana", "Bia"))
            .await
            .unwrap();
        ledger::submit_match(&state, submission("2024-01-05", "Carla", "Dora"))
            .await
            .unwrap();

        let history = match_history(&state).await.unwrap();
        let dates: Vec<_> = history.iter().map(|m| m.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-05", "2024-03-10"]);

        assert_eq!(list_matches(&state).await.unwrap().len(), 2);
    }
}
