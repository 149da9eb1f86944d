//! Account registration, credential login and session token handling.
//!
//! Tokens are HS256 JWTs signed with the configured secret. The role claim
//! is what the admin guard checks, so tampering with it invalidates the
//! signature.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::info;
use validator::Validate;

use crate::{
    config::AppConfig,
    dao::models::{Role, UserEntity},
    dto::auth::{LoginRequest, RegisterRequest, TokenResponse},
    error::{AppError, ServiceError},
    state::SharedState,
};

/// Claims embedded in a session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Account email.
    pub sub: String,
    /// Account role, checked by the admin guard.
    pub role: Role,
    /// Expiry as a unix timestamp.
    pub exp: i64,
    /// Issued-at as a unix timestamp.
    pub iat: i64,
}

/// Create a new account with the ordinary `user` role and log it in.
pub async fn register(
    state: &SharedState,
    request: RegisterRequest,
) -> Result<TokenResponse, AppError> {
    request.validate().map_err(ServiceError::from)?;

    let hashed_password = hash_password(state.config(), &request.password)?;
    let user = UserEntity {
        email: request.email.trim().to_ascii_lowercase(),
        hashed_password,
        role: Role::User,
    };
    let email = user.email.clone();
    let role = user.role;

    let store = state.require_store().await?;
    store
        .insert_user(user)
        .await
        .map_err(ServiceError::from)?;
    info!(%email, "account registered");

    issue_token(state.config(), &email, role)
}

/// Verify credentials and issue a session token.
pub async fn login(state: &SharedState, request: LoginRequest) -> Result<TokenResponse, AppError> {
    let store = state.require_store().await?;
    let email = request.email.trim().to_ascii_lowercase();

    let Some(user) = store
        .find_user(email.clone())
        .await
        .map_err(ServiceError::from)?
    else {
        return Err(AppError::Unauthorized("invalid credentials".into()));
    };

    let valid = bcrypt::verify(&request.password, &user.hashed_password)
        .map_err(|_| AppError::Unauthorized("invalid credentials".into()))?;
    if !valid {
        return Err(AppError::Unauthorized("invalid credentials".into()));
    }

    info!(%email, "login succeeded");
    issue_token(state.config(), &email, user.role)
}

/// Hash a plaintext password with the configured bcrypt work factor.
pub fn hash_password(config: &AppConfig, password: &str) -> Result<String, AppError> {
    bcrypt::hash(password, config.bcrypt_cost())
        .map_err(|err| AppError::Internal(format!("failed to hash password: {err}")))
}

/// Sign a session token for the given account.
pub fn issue_token(config: &AppConfig, email: &str, role: Role) -> Result<TokenResponse, AppError> {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let claims = Claims {
        sub: email.to_owned(),
        role,
        exp: now + config.token_ttl().as_secs() as i64,
        iat: now,
    };

    let token = jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret().as_bytes()),
    )
    .map_err(|err| AppError::Internal(format!("failed to sign token: {err}")))?;

    Ok(TokenResponse { token, role })
}

/// Decode and verify a session token, checking signature and expiry.
pub fn verify_token(config: &AppConfig, token: &str) -> Result<Claims, AppError> {
    jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret().as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized("invalid or expired token".into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::AppConfig,
        dao::league_store::testing::MemoryLeagueStore,
        state::{AppState, SharedState},
    };

    async fn fresh_state() -> SharedState {
        let state = AppState::new(AppConfig::for_tests());
        state
            .install_store(Arc::new(MemoryLeagueStore::new()))
            .await;
        state
    }

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_owned(),
            password: "correct horse".to_owned(),
        }
    }

    #[tokio::test]
    async fn register_then_login_round_trips() {
        let state = fresh_state().await;

        register(&state, register_request("ana@example.com"))
            .await
            .unwrap();

        let session = login(
            &state,
            LoginRequest {
                email: "ana@example.com".to_owned(),
                password: "correct horse".to_owned(),
            },
        )
        .await
        .unwrap();

        assert_eq!(session.role, Role::User);
        let claims = verify_token(state.config(), &session.token).unwrap();
        assert_eq!(claims.sub, "ana@example.com");
        assert_eq!(claims.role, Role::User);
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let state = fresh_state().await;
        register(&state, register_request("ana@example.com"))
            .await
            .unwrap();

        let result = login(
            &state,
            LoginRequest {
                email: "ana@example.com".to_owned(),
                password: "battery staple".to_owned(),
            },
        )
        .await;

        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn unknown_email_is_unauthorized() {
        let state = fresh_state().await;

        let result = login(
            &state,
            LoginRequest {
                email: "nobody@example.com".to_owned(),
                password: "whatever!".to_owned(),
            },
        )
        .await;

        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let state = fresh_state().await;
        register(&state, register_request("ana@example.com"))
            .await
            .unwrap();

        let result = register(&state, register_request("Ana@Example.com")).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn weak_or_malformed_registrations_are_rejected() {
        let state = fresh_state().await;

        let short = RegisterRequest {
            email: "ana@example.com".to_owned(),
            password: "short".to_owned(),
        };
        assert!(matches!(
            register(&state, short).await,
            Err(AppError::BadRequest(_))
        ));

        let bad_email = RegisterRequest {
            email: "not-an-email".to_owned(),
            password: "correct horse".to_owned(),
        };
        assert!(matches!(
            register(&state, bad_email).await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn tampered_tokens_are_rejected() {
        let config = AppConfig::for_tests();
        let session = issue_token(&config, "ana@example.com", Role::Admin).unwrap();

        let mut tampered = session.token.clone();
        tampered.pop();
        assert!(verify_token(&config, &tampered).is_err());
        assert!(verify_token(&config, "not-a-token").is_err());

        // The untouched token still verifies and keeps its role.
        let claims = verify_token(&config, &session.token).unwrap();
        assert_eq!(claims.role, Role::Admin);
    }
}
