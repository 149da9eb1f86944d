use serde::Serialize;
use utoipa::ToSchema;

use crate::dao::models::{LeaderboardRowEntity, LeaderboardsEntity};

/// One leaderboard row.
#[derive(Debug, Serialize, ToSchema)]
pub struct LeaderboardRow {
    /// Player name.
    pub name: String,
    /// Value of the ranked counter.
    pub value: u32,
}

impl From<LeaderboardRowEntity> for LeaderboardRow {
    fn from(value: LeaderboardRowEntity) -> Self {
        Self {
            name: value.name,
            value: value.value,
        }
    }
}

/// Aggregate player statistics: the boards shown on the stats page.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardsResponse {
    /// Players ranked by goals scored.
    pub top_scorers: Vec<LeaderboardRow>,
    /// Players ranked by matches won.
    pub top_winners: Vec<LeaderboardRow>,
    /// Players ranked by matches played.
    pub most_appearances: Vec<LeaderboardRow>,
}

impl From<LeaderboardsEntity> for LeaderboardsResponse {
    fn from(value: LeaderboardsEntity) -> Self {
        Self {
            top_scorers: value.top_scorers.into_iter().map(Into::into).collect(),
            top_winners: value.top_winners.into_iter().map(Into::into).collect(),
            most_appearances: value
                .most_appearances
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}
