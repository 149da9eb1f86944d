use serde::{Deserialize, Serialize};
use time::Date;
use utoipa::ToSchema;
use uuid::Uuid;

/// Player record with cumulative counters, keyed by unique name.
///
/// The same shape is embedded by value inside match rosters as a point-in-time
/// snapshot; only `name` is treated as a stable reference by the ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerEntity {
    /// Unique human-assigned name, acting as the primary key.
    pub name: String,
    /// Career goals scored.
    pub goals: u32,
    /// Matches won.
    pub wins: u32,
    /// Matches lost.
    pub losses: u32,
    /// Matches drawn.
    pub draws: u32,
    /// Total matches played; `wins + losses + draws` after every ledger operation.
    pub matches_played: u32,
}

impl PlayerEntity {
    /// Fresh player record with all counters at zero.
    pub fn new(name: String) -> Self {
        Self {
            name,
            goals: 0,
            wins: 0,
            losses: 0,
            draws: 0,
            matches_played: 0,
        }
    }
}

/// Partial update applied to a player record; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerUpdateEntity {
    /// New goals total, if set.
    pub goals: Option<u32>,
    /// New wins total, if set.
    pub wins: Option<u32>,
    /// New losses total, if set.
    pub losses: Option<u32>,
    /// New draws total, if set.
    pub draws: Option<u32>,
    /// New matches-played total, if set.
    pub matches_played: Option<u32>,
}

impl PlayerUpdateEntity {
    /// Whether the update would touch any field at all.
    pub fn is_empty(&self) -> bool {
        self.goals.is_none()
            && self.wins.is_none()
            && self.losses.is_none()
            && self.draws.is_none()
            && self.matches_played.is_none()
    }
}

/// One team's roster and final score inside a match record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamSheetEntity {
    /// Player snapshots taken at submission time, nulls already filtered out.
    pub players: Vec<PlayerEntity>,
    /// Goals scored by this team.
    pub score: i32,
}

/// Goals credited to a single scorer within one match. Absence of an entry
/// means zero goals for that player.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GoalTallyEntity {
    /// Name of the scoring player.
    pub scorer: String,
    /// How many goals that player scored in the match.
    pub count: u32,
}

/// Match record persisted by the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MatchEntity {
    /// Primary key of the match.
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Day the match was played.
    #[serde(with = "match_date")]
    pub date: Date,
    /// First team's roster and score.
    pub team_a: TeamSheetEntity,
    /// Second team's roster and score.
    pub team_b: TeamSheetEntity,
    /// Per-scorer goal tally for the match.
    pub goals: Vec<GoalTallyEntity>,
}

/// Non-negative per-player counter increments derived from one match outcome.
///
/// Exactly one of `wins`, `losses`, `draws` is 1 and `matches_played` is
/// always 1; the ledger constructs these from a tagged outcome so the
/// exclusivity is structural.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerDeltaEntity {
    /// Player the increments apply to.
    pub name: String,
    /// Goals credited by the match tally.
    pub goals: u32,
    /// 1 when the player's team won.
    pub wins: u32,
    /// 1 when the player's team lost.
    pub losses: u32,
    /// 1 when the match was drawn.
    pub draws: u32,
    /// Always 1 for a participating player.
    pub matches_played: u32,
}

/// Ordering applied when listing matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSort {
    /// Storage order, no explicit sort.
    Unsorted,
    /// Oldest match first.
    DateAscending,
}

/// Privilege level attached to an account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May create, edit and delete players and matches.
    Admin,
    /// Read-only beyond the public surface.
    User,
}

/// Credential record backing the session provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserEntity {
    /// Login identifier, unique across accounts.
    pub email: String,
    /// bcrypt hash of the account password.
    pub hashed_password: String,
    /// Privilege level of the account.
    pub role: Role,
}

/// One leaderboard row pairing a player with the ranked counter value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeaderboardRowEntity {
    /// Player name.
    pub name: String,
    /// Value of the counter the board is ranked by.
    pub value: u32,
}

/// Aggregate statistics across all players.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardsEntity {
    /// Players ranked by goals scored.
    pub top_scorers: Vec<LeaderboardRowEntity>,
    /// Players ranked by matches won.
    pub top_winners: Vec<LeaderboardRowEntity>,
    /// Players ranked by matches played.
    pub most_appearances: Vec<LeaderboardRowEntity>,
}

/// Serde representation of match dates as `YYYY-MM-DD` strings, matching the
/// wire and document format used by the application.
pub mod match_date {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};
    use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

    /// Calendar-date format shared by the API and the stored documents.
    pub const FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

    /// Serialize a date as `YYYY-MM-DD`.
    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let formatted = date
            .format(&FORMAT)
            .map_err(|err| serde::ser::Error::custom(err.to_string()))?;
        serializer.serialize_str(&formatted)
    }

    /// Deserialize a date from `YYYY-MM-DD`.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Date::parse(&raw, &FORMAT).map_err(|err| D::Error::custom(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    #[test]
    fn match_date_round_trips_through_json() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            #[serde(with = "match_date")]
            date: Date,
        }

        let json = serde_json::to_string(&Wrapper {
            date: date!(2024 - 01 - 15),
        })
        .unwrap();
        assert_eq!(json, r#"{"date":"2024-01-15"}"#);

        let back: Wrapper = serde_json::from_str(&json).unwrap();
        assert_eq!(back.date, date!(2024 - 01 - 15));
    }

    #[test]
    fn player_entity_uses_camel_case_field_names() {
        let json = serde_json::to_value(PlayerEntity::new("Ana".into())).unwrap();
        assert!(json.get("matchesPlayed").is_some());
        assert!(json.get("matches_played").is_none());
    }

    #[test]
    fn empty_player_update_is_detected() {
        assert!(PlayerUpdateEntity::default().is_empty());
        assert!(
            !PlayerUpdateEntity {
                goals: Some(3),
                ..Default::default()
            }
            .is_empty()
        );
    }
}
