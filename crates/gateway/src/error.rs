//! Error types for the gateway layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Gateway error types
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("{0}")]
    InvalidRequest(String),

    // Same wording and status for unknown email and wrong password.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidRequest(_) | GatewayError::InvalidCredentials => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::AuthenticationFailed(_) => StatusCode::UNAUTHORIZED,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::DatabaseError(_) | GatewayError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 500s are logged with detail server-side; the caller gets a
        // generic message.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
            "Internal Server Error".to_string()
        } else {
            self.to_string()
        };

        let error_response = json!({
            "error": status.as_str(),
            "message": message,
        });

        (status, Json(error_response)).into_response()
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

impl From<roster_users::UserError> for GatewayError {
    fn from(error: roster_users::UserError) -> Self {
        use roster_users::UserError;

        match error {
            UserError::UserNotFound => GatewayError::NotFound("User not found".to_string()),
            UserError::EmailAlreadyExists => {
                GatewayError::InvalidRequest("User already exists".to_string())
            }
            UserError::MissingFields => {
                GatewayError::InvalidRequest("All fields are required".to_string())
            }
            UserError::InvalidCredentials => GatewayError::InvalidCredentials,
            UserError::TokenExpired | UserError::InvalidToken => {
                GatewayError::AuthenticationFailed("Invalid or expired token".to_string())
            }
            UserError::PasswordHashingFailed => {
                GatewayError::InternalError("password hashing failed".to_string())
            }
            UserError::MissingSecret => {
                GatewayError::InternalError("token signing secret is not configured".to_string())
            }
            UserError::TokenCreationFailed(msg) => {
                GatewayError::InternalError(format!("token creation failed: {msg}"))
            }
            UserError::DatabaseError(msg) => GatewayError::DatabaseError(msg),
        }
    }
}
