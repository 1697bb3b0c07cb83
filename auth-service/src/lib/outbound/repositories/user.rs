use std::collections::HashMap;
use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserDirectory;
use crate::user::errors::DirectoryError;

/// Process-local user directory.
///
/// Records live for the lifetime of the process. Email uniqueness is checked
/// under the write lock, so two concurrent inserts of the same address cannot
/// both succeed.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<UserId, User>>,
    last_id: AtomicI64,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

fn email_matches(user: &User, email: &str) -> bool {
    user.email.as_str() == EmailAddress::normalize(email)
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DirectoryError> {
        let users = self.users.read().await;

        Ok(users
            .values()
            .find(|user| email_matches(user, email))
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DirectoryError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, DirectoryError> {
        let mut users = self.users.write().await;

        if users
            .values()
            .any(|existing| email_matches(existing, user.email.as_str()))
        {
            return Err(DirectoryError::EmailTaken(user.email.to_string()));
        }

        users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DirectoryError> {
        let mut users = self.users.write().await;

        match users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(user)
            }
            None => Err(DirectoryError::NotFound(user.id)),
        }
    }

    async fn next_id(&self) -> Result<UserId, DirectoryError> {
        Ok(UserId(self.last_id.fetch_add(1, Ordering::SeqCst) + 1))
    }
}
