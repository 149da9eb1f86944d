//! Shared application state: the storage slot and the request rate limiter.
//! An empty storage slot is what "degraded mode" means.

mod rate_limit;

use std::{sync::Arc, time::Duration};

use tokio::sync::RwLock;

use crate::{config::AppConfig, dao::league_store::LeagueStore, error::ServiceError};

pub use self::rate_limit::RateLimiter;

/// Cheaply clonable handle to the process-wide [`AppState`].
pub type SharedState = Arc<AppState>;

/// Window length for the per-IP mutation counters.
const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);
/// Upper bound on tracked rate-limit keys.
const RATE_LIMIT_MAX_ENTRIES: usize = 5000;

/// Central application state storing the database handle and cross-cutting
/// runtime facilities.
pub struct AppState {
    store: RwLock<Option<Arc<dyn LeagueStore>>>,
    config: AppConfig,
    rate_limiter: RateLimiter,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The application starts in degraded mode until a storage backend is installed.
    pub fn new(config: AppConfig) -> SharedState {
        Arc::new(Self {
            store: RwLock::new(None),
            config,
            rate_limiter: RateLimiter::new(RATE_LIMIT_WINDOW, RATE_LIMIT_MAX_ENTRIES),
        })
    }

    /// Obtain a handle to the current store, if one is installed.
    pub async fn store(&self) -> Option<Arc<dyn LeagueStore>> {
        let guard = self.store.read().await;
        guard.as_ref().cloned()
    }

    /// Obtain the current store or fail with a degraded-mode error.
    pub async fn require_store(&self) -> Result<Arc<dyn LeagueStore>, ServiceError> {
        self.store().await.ok_or(ServiceError::Degraded)
    }

    /// Install a new store implementation and leave degraded mode.
    pub async fn install_store(&self, store: Arc<dyn LeagueStore>) {
        let mut guard = self.store.write().await;
        *guard = Some(store);
    }

    /// Remove the current store and enter degraded mode.
    pub async fn clear_store(&self) {
        let mut guard = self.store.write().await;
        guard.take();
    }

    /// Runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Per-IP mutation counters.
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }
}
