use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::errors::ModelError;
use service::auth::errors::AuthError;
use service::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

/// Error body shared by every endpoint: `{"message": ...}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, error = %self.message, "request failed");
        }
        (self.status, Json(serde_json::json!({ "message": self.message }))).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        let status = match &e {
            ServiceError::Validation(_) | ServiceError::Model(ModelError::Validation(_)) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ServiceError::Db(_) | ServiceError::Model(ModelError::Db(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, e.to_string())
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        let status = match &e {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::Conflict => StatusCode::CONFLICT,
            AuthError::NotFound => StatusCode::NOT_FOUND,
            AuthError::Unauthorized | AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::HashError(_) | AuthError::TokenError(_) | AuthError::Repository(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_client_error() {
            warn!(code = e.code(), error = %e, "auth rejected");
        }
        Self::new(status, e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (ServiceError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ServiceError::Conflict("x".into()), StatusCode::CONFLICT),
            (ServiceError::Db("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(JsonApiError::from(err).status, status);
        }
    }

    #[test]
    fn auth_errors_keep_their_message() {
        let e = JsonApiError::from(AuthError::Conflict);
        assert_eq!(e.status, StatusCode::CONFLICT);
        assert_eq!(e.message, "User already exists!");
        assert_eq!(JsonApiError::from(AuthError::InvalidToken).status, StatusCode::UNAUTHORIZED);
    }
}
