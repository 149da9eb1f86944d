use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::{
    dao::models::{PlayerEntity, PlayerUpdateEntity},
    dto::validation::validate_player_name,
};

/// Payload used to register a new player, optionally seeding its counters
/// (e.g. when importing historical data).
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlayerRequest {
    /// Unique player name.
    pub name: String,
    /// Initial goals total.
    #[serde(default)]
    pub goals: u32,
    /// Initial wins total.
    #[serde(default)]
    pub wins: u32,
    /// Initial losses total.
    #[serde(default)]
    pub losses: u32,
    /// Initial draws total.
    #[serde(default)]
    pub draws: u32,
    /// Initial matches-played total.
    #[serde(default)]
    pub matches_played: u32,
}

impl Validate for CreatePlayerRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_player_name(&self.name) {
            errors.add("name", e);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl From<CreatePlayerRequest> for PlayerEntity {
    fn from(value: CreatePlayerRequest) -> Self {
        Self {
            name: value.name.trim().to_owned(),
            goals: value.goals,
            wins: value.wins,
            losses: value.losses,
            draws: value.draws,
            matches_played: value.matches_played,
        }
    }
}

/// Partial player edit; omitted fields are left untouched.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlayerRequest {
    /// New goals total.
    pub goals: Option<u32>,
    /// New wins total.
    pub wins: Option<u32>,
    /// New losses total.
    pub losses: Option<u32>,
    /// New draws total.
    pub draws: Option<u32>,
    /// New matches-played total.
    pub matches_played: Option<u32>,
}

impl From<UpdatePlayerRequest> for PlayerUpdateEntity {
    fn from(value: UpdatePlayerRequest) -> Self {
        Self {
            goals: value.goals,
            wins: value.wins,
            losses: value.losses,
            draws: value.draws,
            matches_played: value.matches_played,
        }
    }
}

/// Public projection of a player record.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummary {
    /// Unique player name.
    pub name: String,
    /// Career goals scored.
    pub goals: u32,
    /// Matches won.
    pub wins: u32,
    /// Matches lost.
    pub losses: u32,
    /// Matches drawn.
    pub draws: u32,
    /// Total matches played.
    pub matches_played: u32,
}

impl From<PlayerEntity> for PlayerSummary {
    fn from(value: PlayerEntity) -> Self {
        Self {
            name: value.name,
            goals: value.goals,
            wins: value.wins,
            losses: value.losses,
            draws: value.draws,
            matches_played: value.matches_played,
        }
    }
}
