//! In-memory [`LeagueStore`] used by unit tests. Mirrors the MongoDB
//! backend's atomicity: ledger operations either apply fully or not at all.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

use futures::future::BoxFuture;
use uuid::Uuid;

use crate::dao::{
    league_store::LeagueStore,
    models::{
        LeaderboardRowEntity, LeaderboardsEntity, MatchEntity, MatchSort, PlayerDeltaEntity,
        PlayerEntity, PlayerUpdateEntity, UserEntity,
    },
    storage::{StorageError, StorageResult},
};

/// Mutex-guarded map-backed store standing in for MongoDB in tests.
#[derive(Clone, Default)]
pub struct MemoryLeagueStore {
    inner: Arc<Mutex<MemoryInner>>,
}

#[derive(Default)]
struct MemoryInner {
    players: BTreeMap<String, PlayerEntity>,
    matches: Vec<MatchEntity>,
    users: BTreeMap<String, UserEntity>,
}

impl MemoryLeagueStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot a player's record outside the trait, for assertions.
    pub fn player(&self, name: &str) -> Option<PlayerEntity> {
        self.inner.lock().unwrap().players.get(name).cloned()
    }

    /// Number of stored matches, for assertions.
    pub fn match_count(&self) -> usize {
        self.inner.lock().unwrap().matches.len()
    }
}

fn ranked_by<F: Fn(&PlayerEntity) -> u32>(
    players: &BTreeMap<String, PlayerEntity>,
    limit: u32,
    counter: F,
) -> Vec<LeaderboardRowEntity> {
    let mut rows: Vec<LeaderboardRowEntity> = players
        .values()
        .map(|player| LeaderboardRowEntity {
            name: player.name.clone(),
            value: counter(player),
        })
        .collect();
    rows.sort_by(|a, b| b.value.cmp(&a.value));
    rows.truncate(limit as usize);
    rows
}

impl LeagueStore for MemoryLeagueStore {
    fn find_player(&self, name: String) -> BoxFuture<'static, StorageResult<Option<PlayerEntity>>> {
        let result = Ok(self.player(&name));
        Box::pin(async move { result })
    }

    fn insert_player(&self, player: PlayerEntity) -> BoxFuture<'static, StorageResult<()>> {
        let mut inner = self.inner.lock().unwrap();
        let result = if inner.players.contains_key(&player.name) {
            Err(StorageError::Conflict {
                message: format!("player `{}` already exists", player.name),
            })
        } else {
            inner.players.insert(player.name.clone(), player);
            Ok(())
        };
        Box::pin(async move { result })
    }

    fn update_player(
        &self,
        name: String,
        update: PlayerUpdateEntity,
    ) -> BoxFuture<'static, StorageResult<bool>> {
        let mut inner = self.inner.lock().unwrap();
        let matched = match inner.players.get_mut(&name) {
            Some(player) => {
                if let Some(goals) = update.goals {
                    player.goals = goals;
                }
                if let Some(wins) = update.wins {
                    player.wins = wins;
                }
                if let Some(losses) = update.losses {
                    player.losses = losses;
                }
                if let Some(draws) = update.draws {
                    player.draws = draws;
                }
                if let Some(matches_played) = update.matches_played {
                    player.matches_played = matches_played;
                }
                true
            }
            None => false,
        };
        Box::pin(async move { Ok(matched) })
    }

    fn delete_player(&self, name: String) -> BoxFuture<'static, StorageResult<bool>> {
        let existed = self.inner.lock().unwrap().players.remove(&name).is_some();
        Box::pin(async move { Ok(existed) })
    }

    fn list_players(&self) -> BoxFuture<'static, StorageResult<Vec<PlayerEntity>>> {
        let players = self
            .inner
            .lock()
            .unwrap()
            .players
            .values()
            .cloned()
            .collect();
        Box::pin(async move { Ok(players) })
    }

    fn find_match(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<MatchEntity>>> {
        let found = self
            .inner
            .lock()
            .unwrap()
            .matches
            .iter()
            .find(|m| m.id == id)
            .cloned();
        Box::pin(async move { Ok(found) })
    }

    fn list_matches(&self, sort: MatchSort) -> BoxFuture<'static, StorageResult<Vec<MatchEntity>>> {
        let mut matches = self.inner.lock().unwrap().matches.clone();
        if sort == MatchSort::DateAscending {
            matches.sort_by_key(|m| m.date);
        }
        Box::pin(async move { Ok(matches) })
    }

    fn apply_match(
        &self,
        match_record: MatchEntity,
        deltas: Vec<PlayerDeltaEntity>,
    ) -> BoxFuture<'static, StorageResult<Uuid>> {
        let mut inner = self.inner.lock().unwrap();

        // Validate before mutating so a failure leaves no partial state,
        // matching the MongoDB backend's transaction semantics.
        let missing = deltas
            .iter()
            .find(|delta| !inner.players.contains_key(&delta.name));
        let result = match missing {
            Some(delta) => Err(StorageError::MissingPlayer {
                name: delta.name.clone(),
            }),
            None => {
                for delta in &deltas {
                    let player = inner
                        .players
                        .get_mut(&delta.name)
                        .expect("existence checked above");
                    player.goals += delta.goals;
                    player.wins += delta.wins;
                    player.losses += delta.losses;
                    player.draws += delta.draws;
                    player.matches_played += delta.matches_played;
                }
                let id = match_record.id;
                inner.matches.push(match_record);
                Ok(id)
            }
        };
        Box::pin(async move { result })
    }

    fn revert_match(
        &self,
        id: Uuid,
        deltas: Vec<PlayerDeltaEntity>,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let mut inner = self.inner.lock().unwrap();

        let result = match inner.matches.iter().position(|m| m.id == id) {
            None => Err(StorageError::MissingMatch { id }),
            Some(index) => {
                for delta in &deltas {
                    // Deleted players are skipped; counters clamp at zero.
                    if let Some(player) = inner.players.get_mut(&delta.name) {
                        player.goals = player.goals.saturating_sub(delta.goals);
                        player.wins = player.wins.saturating_sub(delta.wins);
                        player.losses = player.losses.saturating_sub(delta.losses);
                        player.draws = player.draws.saturating_sub(delta.draws);
                        player.matches_played =
                            player.matches_played.saturating_sub(delta.matches_played);
                    }
                }
                inner.matches.remove(index);
                Ok(())
            }
        };
        Box::pin(async move { result })
    }

    fn player_leaderboards(
        &self,
        limit: u32,
    ) -> BoxFuture<'static, StorageResult<LeaderboardsEntity>> {
        let inner = self.inner.lock().unwrap();
        let boards = LeaderboardsEntity {
            top_scorers: ranked_by(&inner.players, limit, |p| p.goals),
            top_winners: ranked_by(&inner.players, limit, |p| p.wins),
            most_appearances: ranked_by(&inner.players, limit, |p| p.matches_played),
        };
        Box::pin(async move { Ok(boards) })
    }

    fn find_user(&self, email: String) -> BoxFuture<'static, StorageResult<Option<UserEntity>>> {
        let found = self.inner.lock().unwrap().users.get(&email).cloned();
        Box::pin(async move { Ok(found) })
    }

    fn insert_user(&self, user: UserEntity) -> BoxFuture<'static, StorageResult<()>> {
        let mut inner = self.inner.lock().unwrap();
        let result = if inner.users.contains_key(&user.email) {
            Err(StorageError::Conflict {
                message: format!("email `{}` already in use", user.email),
            })
        } else {
            inner.users.insert(user.email.clone(), user);
            Ok(())
        };
        Box::pin(async move { result })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}
