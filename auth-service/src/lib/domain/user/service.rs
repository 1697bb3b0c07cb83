use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::PasswordPolicy;
use chrono::Utc;
use tokio::sync::Mutex;
use tokio::sync::OwnedMutexGuard;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::TokenPair;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::AuthError;
use crate::user::errors::ValidationError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::UserDirectory;

/// Domain service implementation for authentication operations.
///
/// Mutations of a user's refresh token are serialized per user, so only one
/// of several concurrent refreshes presenting the same token can succeed.
pub struct AuthService<D>
where
    D: UserDirectory,
{
    directory: Arc<D>,
    authenticator: Arc<Authenticator>,
    user_locks: Mutex<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl<D> AuthService<D>
where
    D: UserDirectory,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `directory` - User storage implementation
    /// * `authenticator` - Password and token primitives
    pub fn new(directory: Arc<D>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            directory,
            authenticator,
            user_locks: Mutex::new(HashMap::new()),
        }
    }

    async fn lock_user(&self, id: UserId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.user_locks.lock().await;
            // Entries nobody holds or waits on are dropped
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(id).or_default())
        };

        lock.lock_owned().await
    }
}

#[async_trait]
impl<D> AuthServicePort for AuthService<D>
where
    D: UserDirectory,
{
    async fn register(&self, command: RegisterCommand) -> Result<TokenPair, AuthError> {
        if !PasswordPolicy::is_valid(&command.password) {
            return Err(ValidationError::WeakPassword.into());
        }

        let email = EmailAddress::new(command.email).map_err(ValidationError::from)?;

        if self.directory.find_by_email(email.as_str()).await?.is_some() {
            return Err(ValidationError::EmailTaken(email.to_string()).into());
        }

        let id = self.directory.next_id().await?;
        let password = self.authenticator.hash_password(&command.password)?;
        let refresh_token = self.authenticator.generate_refresh_token()?;

        let user = User {
            id,
            first_name: command.first_name,
            last_name: command.last_name,
            email,
            password,
            refresh_token: Some(refresh_token.clone()),
            created_at: Utc::now(),
        };

        // Insert re-checks the email under the directory's write lock
        let user = self.directory.insert(user).await?;

        let access_token =
            self.authenticator
                .generate_token(user.id.0, user.email.as_str(), &HashMap::new())?;

        tracing::info!(user_id = %user.id, email = %user.email, "User registered");

        Ok(TokenPair {
            access_token,
            refresh_token: refresh_token.secret,
        })
    }

    async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AuthError> {
        if email.trim().is_empty() {
            return Err(ValidationError::EmptyEmail.into());
        }

        let user = self
            .directory
            .find_by_email(&EmailAddress::normalize(email))
            .await?
            .ok_or_else(|| ValidationError::UserNotFound(email.to_string()))?;

        let _guard = self.lock_user(user.id).await;

        let issued = self.authenticator.authenticate(
            password,
            &user.password,
            user.id.0,
            user.email.as_str(),
        )?;

        let user = self
            .directory
            .update(User {
                refresh_token: Some(issued.refresh_token.clone()),
                ..user
            })
            .await?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(TokenPair {
            access_token: issued.access_token,
            refresh_token: issued.refresh_token.secret,
        })
    }

    async fn refresh(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<TokenPair, AuthError> {
        if access_token.trim().is_empty() || refresh_token.trim().is_empty() {
            return Err(ValidationError::EmptyToken.into());
        }

        // Expired access tokens are accepted here, forged ones are not
        let claims = self.authenticator.validate_token(access_token, true)?;

        let user_id = claims
            .user_id()
            .map(UserId)
            .ok_or(ValidationError::InvalidAccessToken)?;

        let _guard = self.lock_user(user_id).await;

        let mut user = self
            .directory
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| ValidationError::UserNotFound(user_id.to_string()))?;

        let current = match &user.refresh_token {
            Some(current) if current.secret == refresh_token => current,
            _ => {
                tracing::warn!(user_id = %user.id, "Refresh token mismatch");
                return Err(ValidationError::InvalidRefreshToken.into());
            }
        };

        if current.is_expired_at(Utc::now()) {
            return Err(ValidationError::RefreshTokenExpired.into());
        }

        let new_refresh_token = self.authenticator.generate_refresh_token()?;
        let new_access_token = self.authenticator.refresh_access_token(access_token)?;

        user.refresh_token = Some(new_refresh_token.clone());
        self.directory.update(user).await?;

        tracing::info!(user_id = %user_id, "Refresh token rotated");

        Ok(TokenPair {
            access_token: new_access_token,
            refresh_token: new_refresh_token.secret,
        })
    }
}
