//! Storage abstraction over the player, match and user collections.

pub mod mongodb;
#[cfg(test)]
pub mod testing;

use futures::future::BoxFuture;
use uuid::Uuid;

use crate::dao::models::{
    LeaderboardsEntity, MatchEntity, MatchSort, PlayerDeltaEntity, PlayerEntity,
    PlayerUpdateEntity, UserEntity,
};
use crate::dao::storage::StorageResult;

/// Abstraction over the persistence layer for players, matches and accounts.
///
/// `apply_match` and `revert_match` are the two cross-entity operations; each
/// backend must make them atomic so player counters and match records never
/// diverge.
pub trait LeagueStore: Send + Sync {
    /// Point lookup of a player by name.
    fn find_player(&self, name: String) -> BoxFuture<'static, StorageResult<Option<PlayerEntity>>>;
    /// Insert a new player; duplicate names yield a conflict.
    fn insert_player(&self, player: PlayerEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Apply a partial update to a player, returning whether a record matched.
    fn update_player(
        &self,
        name: String,
        update: PlayerUpdateEntity,
    ) -> BoxFuture<'static, StorageResult<bool>>;
    /// Remove a player record, returning whether one existed.
    fn delete_player(&self, name: String) -> BoxFuture<'static, StorageResult<bool>>;
    /// All player records.
    fn list_players(&self) -> BoxFuture<'static, StorageResult<Vec<PlayerEntity>>>;

    /// Point lookup of a match by id.
    fn find_match(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<MatchEntity>>>;
    /// All match records, optionally sorted.
    fn list_matches(&self, sort: MatchSort) -> BoxFuture<'static, StorageResult<Vec<MatchEntity>>>;
    /// Atomically increment every delta against the player collection and
    /// insert the match record; a player missing from the collection aborts
    /// the whole operation.
    fn apply_match(
        &self,
        match_record: MatchEntity,
        deltas: Vec<PlayerDeltaEntity>,
    ) -> BoxFuture<'static, StorageResult<Uuid>>;
    /// Atomically decrement every delta (clamped at zero) and delete the
    /// match record. Players deleted since the match was recorded are
    /// skipped; a missing match aborts with no counter mutation.
    fn revert_match(
        &self,
        id: Uuid,
        deltas: Vec<PlayerDeltaEntity>,
    ) -> BoxFuture<'static, StorageResult<()>>;

    /// Aggregate leaderboards over the player collection.
    fn player_leaderboards(
        &self,
        limit: u32,
    ) -> BoxFuture<'static, StorageResult<LeaderboardsEntity>>;

    /// Point lookup of an account by email.
    fn find_user(&self, email: String) -> BoxFuture<'static, StorageResult<Option<UserEntity>>>;
    /// Insert a new account; duplicate emails yield a conflict.
    fn insert_user(&self, user: UserEntity) -> BoxFuture<'static, StorageResult<()>>;

    /// Ping the backend to confirm connectivity.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}
