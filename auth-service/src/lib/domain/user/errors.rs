use auth::AuthenticationError;
use auth::PasswordError;
use auth::PasswordPolicy;
use auth::RefreshTokenError;
use auth::TokenError;
use thiserror::Error;

use crate::domain::user::models::UserId;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Caller input or business rule violations.
///
/// Always safe to surface to the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{}", PasswordPolicy::REQUIREMENTS)]
    WeakPassword,

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Email already exists: {0}")]
    EmailTaken(String),

    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Token cannot be empty")]
    EmptyToken,

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Invalid access token")]
    InvalidAccessToken,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Refresh token expired")]
    RefreshTokenExpired,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),
}

/// Failures reported by a user directory implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("Email already exists: {0}")]
    EmailTaken(String),

    #[error("User not found: {0}")]
    NotFound(UserId),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Top-level error for authentication operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Token(#[from] TokenError),

    // Infrastructure errors
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DirectoryError> for AuthError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::EmailTaken(email) => ValidationError::EmailTaken(email).into(),
            DirectoryError::NotFound(id) => ValidationError::UserNotFound(id.to_string()).into(),
            DirectoryError::Storage(message) => AuthError::Storage(message),
        }
    }
}

impl From<PasswordError> for AuthError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::RandomSource(message) => AuthError::Internal(message),
            other => ValidationError::Password(other).into(),
        }
    }
}

impl From<RefreshTokenError> for AuthError {
    fn from(err: RefreshTokenError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<AuthenticationError> for AuthError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials => ValidationError::InvalidPassword.into(),
            AuthenticationError::Password(e) => e.into(),
            AuthenticationError::Token(e) => e.into(),
            AuthenticationError::RefreshToken(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_errors_map_to_validation() {
        assert_eq!(
            AuthError::from(DirectoryError::EmailTaken("a@x.com".to_string())),
            AuthError::Validation(ValidationError::EmailTaken("a@x.com".to_string()))
        );
        assert_eq!(
            AuthError::from(DirectoryError::NotFound(UserId(4))),
            AuthError::Validation(ValidationError::UserNotFound("4".to_string()))
        );
        assert_eq!(
            AuthError::from(DirectoryError::Storage("down".to_string())),
            AuthError::Storage("down".to_string())
        );
    }

    #[test]
    fn test_authentication_errors_keep_their_kind() {
        assert_eq!(
            AuthError::from(AuthenticationError::InvalidCredentials),
            AuthError::Validation(ValidationError::InvalidPassword)
        );
        assert_eq!(
            AuthError::from(AuthenticationError::Token(TokenError::InvalidToken)),
            AuthError::Token(TokenError::InvalidToken)
        );
        assert_eq!(
            AuthError::from(AuthenticationError::Password(PasswordError::EmptyPassword)),
            AuthError::Validation(ValidationError::Password(PasswordError::EmptyPassword))
        );
    }

    #[test]
    fn test_weak_password_message() {
        assert!(ValidationError::WeakPassword
            .to_string()
            .contains("at least 8 characters"));
    }
}
