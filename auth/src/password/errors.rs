use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password cannot be empty or whitespace only")]
    EmptyPassword,

    #[error("Invalid length of password hash ({expected} bytes expected, got {actual})")]
    InvalidHashLength { expected: usize, actual: usize },

    #[error("Invalid length of password salt ({expected} bytes expected, got {actual})")]
    InvalidSaltLength { expected: usize, actual: usize },

    #[error("Random source failure: {0}")]
    RandomSource(String),
}
