//! Liveness probe backed by a storage ping.

use crate::{dto::health::HealthResponse, state::SharedState};

/// Report `ok` when a storage backend is installed and answers a ping,
/// `degraded` otherwise.
pub async fn health(state: &SharedState) -> HealthResponse {
    match state.store().await {
        Some(store) if store.health_check().await.is_ok() => HealthResponse::ok(),
        _ => HealthResponse::degraded(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::AppConfig, dao::league_store::testing::MemoryLeagueStore, state::AppState,
    };

    #[tokio::test]
    async fn reports_degraded_without_a_store_and_ok_with_one() {
        let state = AppState::new(AppConfig::for_tests());
        assert_eq!(health(&state).await.status, "degraded");

        state
            .install_store(Arc::new(MemoryLeagueStore::new()))
            .await;
        assert_eq!(health(&state).await.status, "ok");

        state.clear_store().await;
        assert_eq!(health(&state).await.status, "degraded");
    }
}
