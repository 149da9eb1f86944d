//! Request and response types exposed over HTTP.

pub mod auth;
pub mod common;
pub mod health;
pub mod matches;
pub mod player;
pub mod stats;
pub mod validation;
