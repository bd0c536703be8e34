//! Error types for the account service.

use thiserror::Error;

/// User-related errors
#[derive(Debug, Error, Clone)]
pub enum UserError {
    #[error("User not found")]
    UserNotFound,

    #[error("User already exists")]
    EmailAlreadyExists,

    #[error("All fields are required")]
    MissingFields,

    // Deliberately identical for unknown email and wrong password.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Password hashing failed")]
    PasswordHashingFailed,

    #[error("Signing secret is missing or empty")]
    MissingSecret,

    #[error("Token creation failed: {0}")]
    TokenCreationFailed(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Result type for user operations
pub type UserResult<T> = Result<T, UserError>;

/// Convert driver errors to our error types.
///
/// A duplicate-key write on the unique email index is the store telling
/// us the account already exists; everything else is unexpected.
impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        if is_duplicate_key(&err) {
            UserError::EmailAlreadyExists
        } else {
            UserError::DatabaseError(err.to_string())
        }
    }
}

/// Whether the driver error is a unique-index violation (code 11000).
pub fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};

    matches!(
        *err.kind,
        ErrorKind::Write(WriteFailure::WriteError(ref write_error)) if write_error.code == 11000
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(UserError::UserNotFound.to_string(), "User not found");
        assert_eq!(
            UserError::InvalidCredentials.to_string(),
            "Invalid email or password"
        );
        assert_eq!(
            UserError::MissingFields.to_string(),
            "All fields are required"
        );
    }
}
