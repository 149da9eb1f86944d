//! Domain services sitting between the HTTP routes and the storage layer.

pub mod auth_service;
pub mod documentation;
pub mod health_service;
pub mod ledger;
pub mod match_service;
pub mod player_service;
pub mod stats_service;
pub mod storage_supervisor;
