//! The match ledger: the only place where match records and player counters
//! change together.
//!
//! Submission validates the payload, derives one delta per participating
//! player and hands both the normalized match and the deltas to the store's
//! atomic `apply_match`. Retraction re-derives the deltas from the stored
//! match with the very same computation and applies their clamped inverse
//! through `revert_match`. Keeping one derivation function shared by both
//! paths is what makes deletion the exact inverse of creation.

use std::collections::HashSet;

use time::Date;
use tracing::info;
use uuid::Uuid;

use crate::{
    dao::models::{MatchEntity, PlayerDeltaEntity, PlayerEntity, TeamSheetEntity, match_date},
    dto::matches::{SubmitMatchRequest, TeamSheetInput},
    error::ServiceError,
    state::SharedState,
};

/// Outcome of a match from one team's perspective.
///
/// Computed once per team from the two scores, so each player receives
/// exactly one of win/loss/draw by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// This team scored more than the opposition.
    Win,
    /// This team scored less than the opposition.
    Loss,
    /// Both teams scored the same.
    Draw,
}

impl MatchOutcome {
    fn from_scores(own: i32, opposing: i32) -> Self {
        match own.cmp(&opposing) {
            std::cmp::Ordering::Greater => MatchOutcome::Win,
            std::cmp::Ordering::Less => MatchOutcome::Loss,
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
        }
    }

    fn reversed(self) -> Self {
        match self {
            MatchOutcome::Win => MatchOutcome::Loss,
            MatchOutcome::Loss => MatchOutcome::Win,
            MatchOutcome::Draw => MatchOutcome::Draw,
        }
    }
}

fn delta_for(name: &str, outcome: MatchOutcome, goals: u32) -> PlayerDeltaEntity {
    let (wins, losses, draws) = match outcome {
        MatchOutcome::Win => (1, 0, 0),
        MatchOutcome::Loss => (0, 1, 0),
        MatchOutcome::Draw => (0, 0, 1),
    };
    PlayerDeltaEntity {
        name: name.to_owned(),
        goals,
        wins,
        losses,
        draws,
        matches_played: 1,
    }
}

/// Derive the per-player counter increments implied by a match record.
///
/// Used unchanged by both submission and retraction; retraction negates the
/// result inside the store.
pub fn compute_deltas(record: &MatchEntity) -> Vec<PlayerDeltaEntity> {
    let outcome_a = MatchOutcome::from_scores(record.team_a.score, record.team_b.score);
    let sides = [
        (&record.team_a, outcome_a),
        (&record.team_b, outcome_a.reversed()),
    ];

    let mut deltas =
        Vec::with_capacity(record.team_a.players.len() + record.team_b.players.len());
    for (sheet, outcome) in sides {
        for player in &sheet.players {
            let goals = record
                .goals
                .iter()
                .find(|tally| tally.scorer == player.name)
                .map(|tally| tally.count)
                .unwrap_or(0);
            deltas.push(delta_for(&player.name, outcome, goals));
        }
    }
    deltas
}

/// Record a submitted match: validate, derive deltas and apply everything
/// atomically. Returns the identifier of the stored match.
pub async fn submit_match(
    state: &SharedState,
    request: SubmitMatchRequest,
) -> Result<Uuid, ServiceError> {
    // Validation happens before the store is even looked up, so a rejected
    // payload can never leave partial state behind.
    let record = normalize(request)?;
    let deltas = compute_deltas(&record);

    let store = state.require_store().await?;
    let id = store.apply_match(record, deltas).await?;
    info!(%id, "match recorded");
    Ok(id)
}

/// Retract a recorded match: re-derive its deltas and apply the clamped
/// inverse atomically together with the match deletion.
pub async fn retract_match(state: &SharedState, id: Uuid) -> Result<(), ServiceError> {
    let store = state.require_store().await?;

    let Some(record) = store.find_match(id).await? else {
        return Err(ServiceError::NotFound(format!("match `{id}` not found")));
    };

    let deltas = compute_deltas(&record);
    store.revert_match(id, deltas).await?;
    info!(%id, "match retracted");
    Ok(())
}

/// Validate a submission and turn it into a persistable match record with
/// null-free rosters. Fails fast with invalid-input on the first violation.
fn normalize(request: SubmitMatchRequest) -> Result<MatchEntity, ServiceError> {
    let raw_date = request
        .date
        .ok_or_else(|| ServiceError::InvalidInput("match date is required".into()))?;
    let date = Date::parse(&raw_date, &match_date::FORMAT).map_err(|_| {
        ServiceError::InvalidInput(format!(
            "match date `{raw_date}` is not a valid YYYY-MM-DD date"
        ))
    })?;

    let team_a = normalize_sheet(request.team_a, "teamA")?;
    let team_b = normalize_sheet(request.team_b, "teamB")?;

    if team_a.players.len() != team_b.players.len() {
        return Err(ServiceError::InvalidInput(format!(
            "rosters must have the same size (teamA has {}, teamB has {})",
            team_a.players.len(),
            team_b.players.len()
        )));
    }

    let mut seen = HashSet::new();
    for player in team_a.players.iter().chain(team_b.players.iter()) {
        if !seen.insert(player.name.as_str()) {
            return Err(ServiceError::InvalidInput(format!(
                "player `{}` appears more than once in the rosters",
                player.name
            )));
        }
    }

    // A tally for a non-roster name would be stored but never credited to
    // anyone, so the match record would claim goals no counter reflects.
    for tally in &request.goals {
        if !seen.contains(tally.scorer.as_str()) {
            return Err(ServiceError::InvalidInput(format!(
                "goal tally names `{}`, who is on neither roster",
                tally.scorer
            )));
        }
    }

    Ok(MatchEntity {
        id: Uuid::new_v4(),
        date,
        team_a,
        team_b,
        goals: request.goals.into_iter().map(Into::into).collect(),
    })
}

fn normalize_sheet(
    sheet: Option<TeamSheetInput>,
    label: &str,
) -> Result<TeamSheetEntity, ServiceError> {
    let sheet = sheet
        .ok_or_else(|| ServiceError::InvalidInput(format!("{label} is required")))?;
    let score = sheet
        .score
        .ok_or_else(|| ServiceError::InvalidInput(format!("{label}.score is required")))?;
    if score < 0 {
        return Err(ServiceError::InvalidInput(format!(
            "{label}.score must not be negative"
        )));
    }

    // Unfilled roster slots arrive as nulls; only the filled ones count.
    let players: Vec<PlayerEntity> = sheet
        .players
        .into_iter()
        .flatten()
        .map(Into::into)
        .collect();
    if players.is_empty() {
        return Err(ServiceError::InvalidInput(format!(
            "{label} roster must not be empty"
        )));
    }

    Ok(TeamSheetEntity { players, score })
}
