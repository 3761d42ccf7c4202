use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use thiserror::Error as ThisError;

use super::dto::Message;

/// Error returned from request handlers, rendered as a JSON [`Message`]
#[derive(Debug)]
pub struct Error {
    pub code: StatusCode,
    pub body: Json<Message>,
}

impl Error {
    pub fn new(code: StatusCode, message: &str) -> Self {
        Self {
            code,
            body: Json(Message::new(code, message)),
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn unsupported_media_type(message: &str) -> Self {
        Self::new(StatusCode::UNSUPPORTED_MEDIA_TYPE, message)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (self.code, self.body).into_response()
    }
}

/// A client payload that cannot be turned into an Account
#[derive(Debug, ThisError)]
pub enum ValidationError {
    #[error("Invalid Account: body of request contained bad or no data")]
    EmptyBody,
    #[error("Invalid Account: body of request is not valid JSON: {0}")]
    Malformed(String),
    #[error("Invalid Account: body of request must be a JSON object")]
    NotAnObject,
    #[error("Invalid Account: {0}")]
    InvalidField(String),
}

impl From<ValidationError> for Error {
    fn from(error: ValidationError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, &error.to_string())
    }
}

/// Failure reported by a storage backend
#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("unsupported storage backend: {0}")]
    UnsupportedBackend(String),
}

impl From<StoreError> for Error {
    fn from(error: StoreError) -> Self {
        tracing::error!("Storage failure: {}", error);
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, &error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_maps_to_bad_request() {
        let err: Error = ValidationError::EmptyBody.into();
        assert_eq!(err.code, StatusCode::BAD_REQUEST);
        assert_eq!(err.body.status, 400);
        assert_eq!(err.body.error, "Bad Request");
        assert!(err.body.message.starts_with("Invalid Account"));
    }

    #[test]
    fn store_error_maps_to_internal_error() {
        let err: Error = StoreError::Database(sqlx::Error::PoolTimedOut).into();
        assert_eq!(err.code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body.error, "Internal Server Error");
    }
}
