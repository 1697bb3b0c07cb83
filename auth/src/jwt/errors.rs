use thiserror::Error;

/// Error type for access token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Claim name is reserved: {0}")]
    ReservedClaim(String),

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}
