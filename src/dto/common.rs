use serde::Serialize;
use utoipa::ToSchema;

/// Generic acknowledgement payload for mutations without a richer response.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Human readable outcome description.
    pub message: String,
}

impl MessageResponse {
    /// Build a response from any displayable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
