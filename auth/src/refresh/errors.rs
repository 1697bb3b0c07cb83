use thiserror::Error;

/// Error type for refresh token generation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RefreshTokenError {
    #[error("Random source failure: {0}")]
    RandomSource(String),
}
