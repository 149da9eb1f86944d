use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dao::models::{GoalTallyEntity, MatchEntity, PlayerEntity, TeamSheetEntity, match_date};

/// Match submission payload.
///
/// Required fields are modelled as `Option` so their absence surfaces as an
/// invalid-input error from the ledger instead of a deserialization failure.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitMatchRequest {
    /// Day the match was played, as `YYYY-MM-DD`.
    #[serde(default)]
    pub date: Option<String>,
    /// First team's roster and score.
    #[serde(default)]
    pub team_a: Option<TeamSheetInput>,
    /// Second team's roster and score.
    #[serde(default)]
    pub team_b: Option<TeamSheetInput>,
    /// Per-scorer goal tally; players without an entry scored zero.
    #[serde(default)]
    pub goals: Vec<GoalTallyInput>,
}

/// One team's submitted roster and score.
///
/// The roster arrives as a fixed-size array with unfilled slots sent as
/// `null` (a front-end artifact); the ledger filters the nulls out.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TeamSheetInput {
    /// Roster slots; `null` marks an unfilled position.
    #[serde(default)]
    pub players: Vec<Option<PlayerSnapshotInput>>,
    /// Goals scored by this team.
    #[serde(default)]
    pub score: Option<i32>,
}

/// Player snapshot embedded in a submitted roster. Only `name` is used for
/// scoring math; the counters are kept as a point-in-time display record.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshotInput {
    /// Player name, referencing the live player record.
    pub name: String,
    /// Goals total at submission time.
    #[serde(default)]
    pub goals: u32,
    /// Wins total at submission time.
    #[serde(default)]
    pub wins: u32,
    /// Losses total at submission time.
    #[serde(default)]
    pub losses: u32,
    /// Draws total at submission time.
    #[serde(default)]
    pub draws: u32,
    /// Matches-played total at submission time.
    #[serde(default)]
    pub matches_played: u32,
}

impl From<PlayerSnapshotInput> for PlayerEntity {
    fn from(value: PlayerSnapshotInput) -> Self {
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

/// Goals credited to one scorer in the submitted match.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GoalTallyInput {
    /// Name of the scoring player.
    pub scorer: String,
    /// How many goals they scored.
    pub count: u32,
}

impl From<GoalTallyInput> for GoalTallyEntity {
    fn from(value: GoalTallyInput) -> Self {
        Self {
            scorer: value.scorer,
            count: value.count,
        }
    }
}

/// Identifier of a freshly recorded match.
#[derive(Debug, Serialize, ToSchema)]
pub struct MatchCreatedResponse {
    /// Store-assigned match identifier.
    pub id: Uuid,
}

/// One team's roster and score as stored.
#[derive(Debug, Serialize, ToSchema)]
pub struct TeamSheetSummary {
    /// Names of the fielded players.
    pub players: Vec<String>,
    /// Goals scored by this team.
    pub score: i32,
}

impl From<TeamSheetEntity> for TeamSheetSummary {
    fn from(value: TeamSheetEntity) -> Self {
        Self {
            players: value.players.into_iter().map(|p| p.name).collect(),
            score: value.score,
        }
    }
}

/// Goal tally entry as stored.
#[derive(Debug, Serialize, ToSchema)]
pub struct GoalTallySummary {
    /// Name of the scoring player.
    pub scorer: String,
    /// How many goals they scored.
    pub count: u32,
}

impl From<GoalTallyEntity> for GoalTallySummary {
    fn from(value: GoalTallyEntity) -> Self {
        Self {
            scorer: value.scorer,
            count: value.count,
        }
    }
}

/// Public projection of a recorded match.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    /// Match identifier.
    pub id: Uuid,
    /// Day the match was played, as `YYYY-MM-DD`.
    pub date: String,
    /// First team.
    pub team_a: TeamSheetSummary,
    /// Second team.
    pub team_b: TeamSheetSummary,
    /// Per-scorer goal tally.
    pub goals: Vec<GoalTallySummary>,
}

impl From<MatchEntity> for MatchSummary {
    fn from(value: MatchEntity) -> Self {
        Self {
            id: value.id,
            date: value
                .date
                .format(&match_date::FORMAT)
                .unwrap_or_else(|_| "invalid-date".into()),
            team_a: value.team_a.into(),
            team_b: value.team_b.into(),
            goals: value.goals.into_iter().map(Into::into).collect(),
        }
    }
}
