use axum::{Router, middleware};

use crate::state::SharedState;

pub mod auth;
pub mod docs;
pub mod guard;
pub mod health;
pub mod matches;
pub mod players;
pub mod stats;

/// Compose all route trees, wiring in shared state and documentation routes.
///
/// The admin guard and mutation throttle cover the `/api` subtree only;
/// `/healthcheck` and the docs stay open.
pub fn router(state: SharedState) -> Router<()> {
    let api = auth::router()
        .merge(players::router())
        .merge(matches::router())
        .merge(stats::router());

    let guarded_api = Router::new()
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            guard::require_admin_for_mutations,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            guard::throttle_mutations,
        ));

    guarded_api
        .merge(health::router())
        .merge(docs::router(state.clone()))
        .with_state(state)
}
