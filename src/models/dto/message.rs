use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of every error response
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Message {
    #[schema(example = 404)]
    pub status: u16,
    #[schema(example = "Not Found")]
    pub error: String,
    #[schema(example = "Account with id '7' was not found.")]
    pub message: String,
}

impl Message {
    pub fn new(code: StatusCode, message: &str) -> Self {
        Self {
            status: code.as_u16(),
            error: code.canonical_reason().unwrap_or("Unknown").to_string(),
            message: message.to_string(),
        }
    }
}
