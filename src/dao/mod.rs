//! Persistence layer: domain entities, the storage abstraction, and backends.

pub mod league_store;
pub mod models;
pub mod storage;
