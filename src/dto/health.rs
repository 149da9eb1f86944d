use serde::Serialize;
use utoipa::ToSchema;

/// Body of the `/healthcheck` probe: `ok` when the MongoDB ping answers,
/// `degraded` while the league store is unavailable.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Either `ok` or `degraded`.
    pub status: String,
}

impl HealthResponse {
    /// Storage is installed and answered the last ping.
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }

    /// No storage backend is reachable; data routes answer 503.
    pub fn degraded() -> Self {
        Self {
            status: "degraded".to_string(),
        }
    }
}
