//! Keeps the MongoDB connection alive in the background.
//!
//! The server starts serving before storage is reachable; while no store is
//! installed every data route answers 503 and `/healthcheck` reports
//! `degraded`. The supervisor connects with exponential backoff, then keeps
//! pinging the installed store and drops it again when the ping fails.

use std::{sync::Arc, time::Duration};

use tokio::time::sleep;
use tracing::{info, warn};

use crate::{dao::league_store::mongodb, state::SharedState};

const INITIAL_DELAY: Duration = Duration::from_millis(1_000);
const MAX_DELAY: Duration = Duration::from_secs(10);
const HEALTH_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Supervise the MongoDB connection, toggling degraded mode as connectivity
/// changes. Runs forever; spawn it once at startup.
pub async fn run(state: SharedState, uri: String, db_name: Option<String>) {
    let mut delay = INITIAL_DELAY;

    loop {
        if let Some(store) = state.store().await {
            match store.health_check().await {
                Ok(()) => {
                    // Healthy connection: reset the backoff and avoid
                    // hammering the database with pings.
                    delay = INITIAL_DELAY;
                    sleep(HEALTH_POLL_INTERVAL).await;
                }
                Err(err) => {
                    warn!(error = %err, "MongoDB ping failed; entering degraded mode");
                    state.clear_store().await;
                    sleep(delay).await;
                    delay = (delay * 2).min(MAX_DELAY);
                }
            }
            continue;
        }

        match mongodb::connect(&uri, db_name.as_deref()).await {
            Ok(store) => {
                info!("connected to MongoDB; leaving degraded mode");
                state.install_store(Arc::new(store)).await;
                delay = INITIAL_DELAY;
            }
            Err(err) => {
                warn!(error = %err, "MongoDB connection attempt failed");
                sleep(delay).await;
                delay = (delay * 2).min(MAX_DELAY);
            }
        }
    }
}
