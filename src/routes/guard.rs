//! Request guards applied to the `/api` subtree: admin gating of mutations
//! and a coarse per-IP mutation throttle.

use std::{net::SocketAddr, time::Instant};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderMap, Method, Request, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

use crate::{
    dao::models::Role,
    error::AppError,
    services::auth_service::{self, Claims},
    state::SharedState,
};

/// Require a valid admin bearer token on every mutating request.
///
/// Reads stay public and the `/api/auth` routes handle their own
/// authentication, so both pass through untouched.
pub async fn require_admin_for_mutations(
    State(state): State<SharedState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    if !is_mutation(req.method()) || is_auth_route(req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let claims = claims_from_headers(&state, req.headers())?;
    ensure_admin(&claims)?;
    Ok(next.run(req).await)
}

/// Count mutating requests per `ip:path` and reject callers over budget.
///
/// Admins get a larger budget than ordinary callers; an invalid or missing
/// token just means the smaller budget, rejection is left to the admin guard.
pub async fn throttle_mutations(
    State(state): State<SharedState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    if !is_mutation(req.method()) || is_auth_route(req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let budget = match claims_from_headers(&state, req.headers()) {
        Ok(claims) if claims.role == Role::Admin => state.config().admin_rate_limit(),
        _ => state.config().user_rate_limit(),
    };

    let ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_owned());
    let key = format!("{ip}:{}", req.uri().path());

    let hits = state.rate_limiter().register_hit(&key, Instant::now());
    if hits > budget {
        return Err(AppError::TooManyRequests(
            "mutation budget exhausted, retry in a minute".into(),
        ));
    }

    Ok(next.run(req).await)
}

fn is_mutation(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PATCH | Method::DELETE)
}

fn is_auth_route(path: &str) -> bool {
    path.starts_with("/api/auth")
}

/// Extract and verify the bearer token carried by a request.
fn claims_from_headers(state: &SharedState, headers: &HeaderMap) -> Result<Claims, AppError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("missing `Authorization` header".into()))?;
    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("expected a bearer token".into()))?;
    auth_service::verify_token(state.config(), token)
}

fn ensure_admin(claims: &Claims) -> Result<(), AppError> {
    if claims.role == Role::Admin {
        Ok(())
    } else {
        Err(AppError::Forbidden("admin role required".into()))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;
    use crate::{config::AppConfig, state::AppState};

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn missing_or_malformed_headers_are_unauthorized() {
        let state = AppState::new(AppConfig::for_tests());

        assert!(matches!(
            claims_from_headers(&state, &HeaderMap::new()),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            claims_from_headers(&state, &headers_with("Basic abc")),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            claims_from_headers(&state, &headers_with("Bearer garbage")),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn admin_tokens_pass_and_user_tokens_are_forbidden() {
        let state = AppState::new(AppConfig::for_tests());

        let admin = auth_service::issue_token(state.config(), "boss@example.com", Role::Admin)
            .unwrap()
            .token;
        let claims =
            claims_from_headers(&state, &headers_with(&format!("Bearer {admin}"))).unwrap();
        assert!(ensure_admin(&claims).is_ok());

        let user = auth_service::issue_token(state.config(), "fan@example.com", Role::User)
            .unwrap()
            .token;
        let claims =
            claims_from_headers(&state, &headers_with(&format!("Bearer {user}"))).unwrap();
        assert!(matches!(ensure_admin(&claims), Err(AppError::Forbidden(_))));
    }

    #[test]
    fn only_mutating_methods_outside_auth_are_gated() {
        assert!(is_mutation(&Method::POST));
        assert!(is_mutation(&Method::PATCH));
        assert!(is_mutation(&Method::DELETE));
        assert!(!is_mutation(&Method::GET));

        assert!(is_auth_route("/api/auth/login"));
        assert!(!is_auth_route("/api/players"));
    }
}
