use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::dao::models::Role;

/// Payload for creating a new account. New accounts always receive the
/// ordinary `user` role; admins are provisioned out of band.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RegisterRequest {
    /// Login email, unique across accounts.
    #[validate(email)]
    pub email: String,
    /// Plaintext password, hashed before storage.
    #[validate(length(min = 8))]
    pub password: String,
}

/// Credential login payload.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Session token issued after a successful login.
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// Signed bearer token carrying the account's role.
    pub token: String,
    /// Role embedded in the token, for the front end's convenience.
    pub role: Role,
}
