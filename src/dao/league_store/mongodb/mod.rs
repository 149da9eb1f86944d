//! MongoDB backend for the [`LeagueStore`](super::LeagueStore) abstraction.

mod connection;
pub mod error;
mod models;
mod store;

pub use store::{MongoLeagueStore, connect};
