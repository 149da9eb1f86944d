use std::sync::Arc;

use futures::{TryStreamExt, future::BoxFuture};
use mongodb::{
    Client, ClientSession, Collection, Database,
    bson::{Document, doc},
    options::{ClientOptions, IndexOptions},
};
use tokio::sync::RwLock;
use tracing::warn;
use uuid::Uuid;

use super::{
    connection::establish_connection,
    error::{MongoDaoError, MongoResult},
    models::{doc_id, is_duplicate_key},
};
use crate::dao::{
    league_store::LeagueStore,
    models::{
        LeaderboardRowEntity, LeaderboardsEntity, MatchEntity, MatchSort, PlayerDeltaEntity,
        PlayerEntity, PlayerUpdateEntity, UserEntity,
    },
    storage::StorageResult,
};

const PLAYER_COLLECTION: &str = "players";
const MATCH_COLLECTION: &str = "matches";
const USER_COLLECTION: &str = "users";

const DEFAULT_DB: &str = "futebolada";

/// MongoDB-backed [`LeagueStore`] using one database with `players`,
/// `matches` and `users` collections.
#[derive(Clone)]
pub struct MongoLeagueStore {
    inner: Arc<MongoInner>,
}

struct MongoInner {
    state: RwLock<MongoState>,
}

struct MongoState {
    client: Client,
    database: Database,
}

/// Connect to MongoDB, ensure the application indexes and return the store.
pub async fn connect(uri: &str, db_name: Option<&str>) -> MongoResult<MongoLeagueStore> {
    let database_name = db_name.unwrap_or(DEFAULT_DB).to_owned();
    let options = ClientOptions::parse(uri)
        .await
        .map_err(|source| MongoDaoError::InvalidUri {
            uri: uri.to_owned(),
            source,
        })?;

    let (client, database) = establish_connection(&options, &database_name).await?;

    let store = MongoLeagueStore {
        inner: Arc::new(MongoInner {
            state: RwLock::new(MongoState { client, database }),
        }),
    };
    store.ensure_indexes().await?;
    Ok(store)
}

impl MongoLeagueStore {
    /// Ensure the indexes required by the application are present.
    ///
    /// The unique index on `players.name` is what actually enforces the
    /// unique-name invariant; the service-level existence check only exists
    /// to produce a friendlier error message.
    async fn ensure_indexes(&self) -> MongoResult<()> {
        let database = self.database().await;

        let players = database.collection::<Document>(PLAYER_COLLECTION);
        let player_index = mongodb::IndexModel::builder()
            .keys(doc! {"name": 1})
            .options(
                IndexOptions::builder()
                    .name(Some("player_name_idx".to_owned()))
                    .unique(Some(true))
                    .build(),
            )
            .build();
        players
            .create_index(player_index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: PLAYER_COLLECTION,
                index: "name",
                source,
            })?;

        let users = database.collection::<Document>(USER_COLLECTION);
        let user_index = mongodb::IndexModel::builder()
            .keys(doc! {"email": 1})
            .options(
                IndexOptions::builder()
                    .name(Some("user_email_idx".to_owned()))
                    .unique(Some(true))
                    .build(),
            )
            .build();
        users
            .create_index(user_index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: USER_COLLECTION,
                index: "email",
                source,
            })?;

        let matches = database.collection::<Document>(MATCH_COLLECTION);
        let match_index = mongodb::IndexModel::builder()
            .keys(doc! {"date": 1})
            .options(
                IndexOptions::builder()
                    .name(Some("match_date_idx".to_owned()))
                    .build(),
            )
            .build();
        matches
            .create_index(match_index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: MATCH_COLLECTION,
                index: "date",
                source,
            })?;

        Ok(())
    }

    async fn database(&self) -> Database {
        let guard = self.inner.state.read().await;
        guard.database.clone()
    }

    async fn handles(&self) -> (Client, Database) {
        let guard = self.inner.state.read().await;
        (guard.client.clone(), guard.database.clone())
    }

    async fn players(&self) -> Collection<PlayerEntity> {
        self.database()
            .await
            .collection::<PlayerEntity>(PLAYER_COLLECTION)
    }

    async fn matches(&self) -> Collection<MatchEntity> {
        self.database()
            .await
            .collection::<MatchEntity>(MATCH_COLLECTION)
    }

    async fn users(&self) -> Collection<UserEntity> {
        self.database()
            .await
            .collection::<UserEntity>(USER_COLLECTION)
    }

    async fn ping(&self) -> MongoResult<()> {
        let database = self.database().await;
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| MongoDaoError::HealthPing { source })?;
        Ok(())
    }

    async fn find_player(&self, name: &str) -> MongoResult<Option<PlayerEntity>> {
        self.players()
            .await
            .find_one(doc! {"name": name})
            .await
            .map_err(|source| MongoDaoError::LoadPlayer {
                name: name.to_owned(),
                source,
            })
    }

    async fn insert_player(&self, player: PlayerEntity) -> MongoResult<()> {
        let name = player.name.clone();
        self.players()
            .await
            .insert_one(&player)
            .await
            .map_err(|source| {
                if is_duplicate_key(&source) {
                    MongoDaoError::DuplicatePlayer { name: name.clone() }
                } else {
                    MongoDaoError::SavePlayer {
                        name: name.clone(),
                        source,
                    }
                }
            })?;
        Ok(())
    }

    async fn update_player(&self, name: &str, update: PlayerUpdateEntity) -> MongoResult<bool> {
        let mut set = Document::new();
        if let Some(goals) = update.goals {
            set.insert("goals", goals as i64);
        }
        if let Some(wins) = update.wins {
            set.insert("wins", wins as i64);
        }
        if let Some(losses) = update.losses {
            set.insert("losses", losses as i64);
        }
        if let Some(draws) = update.draws {
            set.insert("draws", draws as i64);
        }
        if let Some(matches_played) = update.matches_played {
            set.insert("matchesPlayed", matches_played as i64);
        }

        let result = self
            .players()
            .await
            .update_one(doc! {"name": name}, doc! {"$set": set})
            .await
            .map_err(|source| MongoDaoError::SavePlayer {
                name: name.to_owned(),
                source,
            })?;
        Ok(result.matched_count > 0)
    }

    async fn delete_player(&self, name: &str) -> MongoResult<bool> {
        let result = self
            .players()
            .await
            .delete_one(doc! {"name": name})
            .await
            .map_err(|source| MongoDaoError::DeletePlayer {
                name: name.to_owned(),
                source,
            })?;
        Ok(result.deleted_count > 0)
    }

    async fn list_players(&self) -> MongoResult<Vec<PlayerEntity>> {
        self.players()
            .await
            .find(doc! {})
            .sort(doc! {"name": 1})
            .await
            .map_err(|source| MongoDaoError::ListPlayers { source })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::ListPlayers { source })
    }

    async fn find_match(&self, id: Uuid) -> MongoResult<Option<MatchEntity>> {
        self.matches()
            .await
            .find_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::LoadMatch { id, source })
    }

    async fn list_matches(&self, sort: MatchSort) -> MongoResult<Vec<MatchEntity>> {
        let collection = self.matches().await;
        let find = match sort {
            MatchSort::Unsorted => collection.find(doc! {}),
            MatchSort::DateAscending => collection.find(doc! {}).sort(doc! {"date": 1}),
        };

        find.await
            .map_err(|source| MongoDaoError::ListMatches { source })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::ListMatches { source })
    }

    /// Apply the per-player increments and insert the match inside one
    /// multi-document transaction. Any failure aborts the transaction so no
    /// partial state is observable.
    async fn apply_match(
        &self,
        match_record: MatchEntity,
        deltas: Vec<PlayerDeltaEntity>,
    ) -> MongoResult<Uuid> {
        let (client, database) = self.handles().await;
        let mut session = client
            .start_session()
            .await
            .map_err(|source| MongoDaoError::StartSession { source })?;
        session
            .start_transaction()
            .await
            .map_err(|source| MongoDaoError::Transaction {
                action: "start",
                source,
            })?;

        match apply_match_in_txn(&database, &mut session, &match_record, &deltas).await {
            Ok(id) => {
                session
                    .commit_transaction()
                    .await
                    .map_err(|source| MongoDaoError::Transaction {
                        action: "commit",
                        source,
                    })?;
                Ok(id)
            }
            Err(err) => {
                abort_quietly(&mut session, "apply match").await;
                Err(err)
            }
        }
    }

    /// Apply the clamped inverse of the per-player increments and delete the
    /// match inside one transaction.
    ///
    /// Unlike creation, players missing from the collection are skipped: a
    /// deleted player must not block retracting the matches they played in.
    async fn revert_match(&self, id: Uuid, deltas: Vec<PlayerDeltaEntity>) -> MongoResult<()> {
        let (client, database) = self.handles().await;
        let mut session = client
            .start_session()
            .await
            .map_err(|source| MongoDaoError::StartSession { source })?;
        session
            .start_transaction()
            .await
            .map_err(|source| MongoDaoError::Transaction {
                action: "start",
                source,
            })?;

        match revert_match_in_txn(&database, &mut session, id, &deltas).await {
            Ok(()) => session
                .commit_transaction()
                .await
                .map_err(|source| MongoDaoError::Transaction {
                    action: "commit",
                    source,
                }),
            Err(err) => {
                abort_quietly(&mut session, "revert match").await;
                Err(err)
            }
        }
    }

    async fn player_leaderboards(&self, limit: u32) -> MongoResult<LeaderboardsEntity> {
        let database = self.database().await;
        Ok(LeaderboardsEntity {
            top_scorers: ranked_by(&database, "goals", limit).await?,
            top_winners: ranked_by(&database, "wins", limit).await?,
            most_appearances: ranked_by(&database, "matchesPlayed", limit).await?,
        })
    }

    async fn find_user(&self, email: &str) -> MongoResult<Option<UserEntity>> {
        self.users()
            .await
            .find_one(doc! {"email": email})
            .await
            .map_err(|source| MongoDaoError::LoadUser {
                email: email.to_owned(),
                source,
            })
    }

    async fn insert_user(&self, user: UserEntity) -> MongoResult<()> {
        let email = user.email.clone();
        self.users()
            .await
            .insert_one(&user)
            .await
            .map_err(|source| {
                if is_duplicate_key(&source) {
                    MongoDaoError::DuplicateUser {
                        email: email.clone(),
                    }
                } else {
                    MongoDaoError::SaveUser {
                        email: email.clone(),
                        source,
                    }
                }
            })?;
        Ok(())
    }
}

async fn apply_match_in_txn(
    database: &Database,
    session: &mut ClientSession,
    match_record: &MatchEntity,
    deltas: &[PlayerDeltaEntity],
) -> MongoResult<Uuid> {
    let players = database.collection::<PlayerEntity>(PLAYER_COLLECTION);

    for delta in deltas {
        let update = doc! {
            "$inc": {
                "goals": delta.goals as i64,
                "wins": delta.wins as i64,
                "losses": delta.losses as i64,
                "draws": delta.draws as i64,
                "matchesPlayed": delta.matches_played as i64,
            }
        };
        let result = players
            .update_one(doc! {"name": &delta.name}, update)
            .session(&mut *session)
            .await
            .map_err(|source| MongoDaoError::SavePlayer {
                name: delta.name.clone(),
                source,
            })?;
        if result.matched_count == 0 {
            return Err(MongoDaoError::MissingPlayer {
                name: delta.name.clone(),
            });
        }
    }

    let matches = database.collection::<MatchEntity>(MATCH_COLLECTION);
    matches
        .insert_one(match_record)
        .session(session)
        .await
        .map_err(|source| MongoDaoError::SaveMatch {
            id: match_record.id,
            source,
        })?;

    Ok(match_record.id)
}

async fn revert_match_in_txn(
    database: &Database,
    session: &mut ClientSession,
    id: Uuid,
    deltas: &[PlayerDeltaEntity],
) -> MongoResult<()> {
    let players = database.collection::<PlayerEntity>(PLAYER_COLLECTION);

    for delta in deltas {
        // Pipeline update so each counter is clamped at zero instead of
        // underflowing when the record was edited out-of-band.
        let update = vec![doc! {
            "$set": {
                "goals": clamped_sub("goals", delta.goals),
                "wins": clamped_sub("wins", delta.wins),
                "losses": clamped_sub("losses", delta.losses),
                "draws": clamped_sub("draws", delta.draws),
                "matchesPlayed": clamped_sub("matchesPlayed", delta.matches_played),
            }
        }];
        players
            .update_one(doc! {"name": &delta.name}, update)
            .session(&mut *session)
            .await
            .map_err(|source| MongoDaoError::SavePlayer {
                name: delta.name.clone(),
                source,
            })?;
    }

    let matches = database.collection::<MatchEntity>(MATCH_COLLECTION);
    let result = matches
        .delete_one(doc_id(id))
        .session(session)
        .await
        .map_err(|source| MongoDaoError::DeleteMatch { id, source })?;
    if result.deleted_count == 0 {
        return Err(MongoDaoError::MissingMatch { id });
    }

    Ok(())
}

/// `$max(0, $field - amount)` expression for pipeline updates.
fn clamped_sub(field: &str, amount: u32) -> Document {
    doc! { "$max": [0, { "$subtract": [format!("${field}"), amount as i64] }] }
}

async fn ranked_by(
    database: &Database,
    field: &'static str,
    limit: u32,
) -> MongoResult<Vec<LeaderboardRowEntity>> {
    let pipeline = vec![
        doc! { "$sort": { field: -1 } },
        doc! { "$limit": limit as i64 },
        doc! { "$project": { "_id": 0, "name": 1, "value": format!("${field}") } },
    ];

    database
        .collection::<Document>(PLAYER_COLLECTION)
        .aggregate(pipeline)
        .await
        .map_err(|source| MongoDaoError::Leaderboards { source })?
        .with_type::<LeaderboardRowEntity>()
        .try_collect()
        .await
        .map_err(|source| MongoDaoError::Leaderboards { source })
}

async fn abort_quietly(session: &mut ClientSession, operation: &str) {
    if let Err(err) = session.abort_transaction().await {
        warn!(error = %err, operation, "failed to abort MongoDB transaction");
    }
}

impl LeagueStore for MongoLeagueStore {
    fn find_player(&self, name: String) -> BoxFuture<'static, StorageResult<Option<PlayerEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_player(&name).await.map_err(Into::into) })
    }

    fn insert_player(&self, player: PlayerEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.insert_player(player).await.map_err(Into::into) })
    }

    fn update_player(
        &self,
        name: String,
        update: PlayerUpdateEntity,
    ) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { store.update_player(&name, update).await.map_err(Into::into) })
    }

    fn delete_player(&self, name: String) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { store.delete_player(&name).await.map_err(Into::into) })
    }

    fn list_players(&self) -> BoxFuture<'static, StorageResult<Vec<PlayerEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_players().await.map_err(Into::into) })
    }

    fn find_match(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<MatchEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_match(id).await.map_err(Into::into) })
    }

    fn list_matches(&self, sort: MatchSort) -> BoxFuture<'static, StorageResult<Vec<MatchEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_matches(sort).await.map_err(Into::into) })
    }

    fn apply_match(
        &self,
        match_record: MatchEntity,
        deltas: Vec<PlayerDeltaEntity>,
    ) -> BoxFuture<'static, StorageResult<Uuid>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .apply_match(match_record, deltas)
                .await
                .map_err(Into::into)
        })
    }

    fn revert_match(
        &self,
        id: Uuid,
        deltas: Vec<PlayerDeltaEntity>,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.revert_match(id, deltas).await.map_err(Into::into) })
    }

    fn player_leaderboards(
        &self,
        limit: u32,
    ) -> BoxFuture<'static, StorageResult<LeaderboardsEntity>> {
        let store = self.clone();
        Box::pin(async move { store.player_leaderboards(limit).await.map_err(Into::into) })
    }

    fn find_user(&self, email: String) -> BoxFuture<'static, StorageResult<Option<UserEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_user(&email).await.map_err(Into::into) })
    }

    fn insert_user(&self, user: UserEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.insert_user(user).await.map_err(Into::into) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.ping().await.map_err(Into::into) })
    }
}
