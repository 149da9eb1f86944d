//! Application-level configuration loaded from the environment.

use std::{env, time::Duration};

use tracing::warn;

/// Environment variable holding the secret used to sign session tokens.
const JWT_SECRET_ENV: &str = "FUTEBOLADA_JWT_SECRET";
/// Environment variable overriding the session token lifetime in seconds.
const TOKEN_TTL_ENV: &str = "FUTEBOLADA_TOKEN_TTL_SECS";
/// Environment variable overriding the bcrypt work factor for new passwords.
const BCRYPT_COST_ENV: &str = "FUTEBOLADA_BCRYPT_COST";
/// Environment variable overriding the per-minute mutation budget for admins.
const ADMIN_RATE_LIMIT_ENV: &str = "FUTEBOLADA_RATE_LIMIT_ADMIN";
/// Environment variable overriding the per-minute mutation budget for everyone else.
const USER_RATE_LIMIT_ENV: &str = "FUTEBOLADA_RATE_LIMIT_USER";

/// Fallback signing secret used when [`JWT_SECRET_ENV`] is unset.
const DEV_JWT_SECRET: &str = "dev-secret-change-me";
const DEFAULT_TOKEN_TTL_SECS: u64 = 86_400;
const DEFAULT_ADMIN_RATE_LIMIT: u32 = 200;
const DEFAULT_USER_RATE_LIMIT: u32 = 100;

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    jwt_secret: String,
    token_ttl: Duration,
    bcrypt_cost: u32,
    admin_rate_limit: u32,
    user_rate_limit: u32,
}

impl AppConfig {
    /// Load the configuration from environment variables, warning on fallbacks
    /// that matter in production.
    pub fn load() -> Self {
        let jwt_secret = match env::var(JWT_SECRET_ENV) {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                warn!(
                    "{JWT_SECRET_ENV} is not set; using a built-in development secret. \
                     Tokens signed with it are forgeable."
                );
                DEV_JWT_SECRET.to_owned()
            }
        };

        Self {
            jwt_secret,
            token_ttl: Duration::from_secs(parse_env(TOKEN_TTL_ENV, DEFAULT_TOKEN_TTL_SECS)),
            bcrypt_cost: parse_env(BCRYPT_COST_ENV, bcrypt::DEFAULT_COST),
            admin_rate_limit: parse_env(ADMIN_RATE_LIMIT_ENV, DEFAULT_ADMIN_RATE_LIMIT),
            user_rate_limit: parse_env(USER_RATE_LIMIT_ENV, DEFAULT_USER_RATE_LIMIT),
        }
    }

    /// Secret used to sign and verify session tokens.
    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    /// Lifetime of issued session tokens.
    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// bcrypt work factor applied when hashing new passwords.
    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost
    }

    /// Mutations allowed per IP and path per minute for admin callers.
    pub fn admin_rate_limit(&self) -> u32 {
        self.admin_rate_limit
    }

    /// Mutations allowed per IP and path per minute for non-admin callers.
    pub fn user_rate_limit(&self) -> u32 {
        self.user_rate_limit
    }

    /// Configuration with fast, deterministic settings for unit tests.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            jwt_secret: "unit-test-secret".to_owned(),
            token_ttl: Duration::from_secs(3600),
            // Minimum bcrypt cost keeps password tests fast.
            bcrypt_cost: 4,
            admin_rate_limit: DEFAULT_ADMIN_RATE_LIMIT,
            user_rate_limit: DEFAULT_USER_RATE_LIMIT,
        }
    }
}

/// Parse an environment variable, falling back to `default` with a warning on
/// malformed values.
fn parse_env<T: std::str::FromStr + Copy>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(variable = name, value = %raw, "failed to parse environment override; using default");
            default
        }),
        Err(_) => default,
    }
}
