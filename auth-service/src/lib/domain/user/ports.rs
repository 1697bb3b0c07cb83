use async_trait::async_trait;

use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::TokenPair;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::AuthError;
use crate::user::errors::DirectoryError;

/// Port for authentication operations exposed to callers.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user and sign them in.
    ///
    /// # Arguments
    /// * `command` - Raw names, email and password
    ///
    /// # Returns
    /// Access token and the user's first refresh token
    ///
    /// # Errors
    /// * `WeakPassword` - Password does not satisfy the password policy
    /// * `InvalidEmail` - Email is not syntactically valid
    /// * `EmailTaken` - Email is already registered (case-insensitive)
    async fn register(&self, command: RegisterCommand) -> Result<TokenPair, AuthError>;

    /// Verify credentials and rotate the user's refresh token.
    ///
    /// # Arguments
    /// * `email` - Email address (case-insensitive)
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// Access token and a newly generated refresh token
    ///
    /// # Errors
    /// * `EmptyEmail` - Email is empty
    /// * `UserNotFound` - No user with this email
    /// * `InvalidPassword` - Password does not match
    async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AuthError>;

    /// Exchange an access token (possibly expired) and the current refresh token
    /// for a new pair.
    ///
    /// The presented refresh token is consumed.
    ///
    /// # Errors
    /// * `EmptyToken` - Either token is empty
    /// * `Token(InvalidToken)` - Access token is malformed or wrongly signed
    /// * `InvalidAccessToken` - Access token carries no integer `id`
    /// * `UserNotFound` - User referenced by the access token does not exist
    /// * `InvalidRefreshToken` - Refresh token is not the user's current one
    /// * `RefreshTokenExpired` - Refresh token lifetime has passed
    async fn refresh(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<TokenPair, AuthError>;
}

/// Storage operations for user records.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    /// Retrieve user by email address, ignoring case.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Storage` - Storage operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DirectoryError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Storage` - Storage operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DirectoryError>;

    /// Persist a new user.
    ///
    /// # Errors
    /// * `EmailTaken` - Email is already registered
    /// * `Storage` - Storage operation failed
    async fn insert(&self, user: User) -> Result<User, DirectoryError>;

    /// Replace an existing user record.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Storage` - Storage operation failed
    async fn update(&self, user: User) -> Result<User, DirectoryError>;

    /// Reserve a fresh, never reused user identifier.
    async fn next_id(&self) -> Result<UserId, DirectoryError>;
}
