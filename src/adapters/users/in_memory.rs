//! In-memory user repository for development and testing.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::User;
use crate::ports::UserRepository;

/// User directory held in process memory, indexed by id.
///
/// Names are unique; adding a user whose name is taken replaces the
/// previous holder.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of `add_user` for test setup.
    pub fn with_user(self, user: User) -> Self {
        // Freshly built repositories are never contended.
        if let Ok(mut users) = self.users.try_write() {
            users.retain(|_, u| u.name() != user.name());
            users.insert(user.id(), user);
        }
        self
    }

    /// Adds or replaces a user.
    pub async fn add_user(&self, user: User) {
        let mut users = self.users.write().await;
        users.retain(|_, u| u.name() != user.name());
        users.insert(user.id(), user);
    }

    /// Removes a user by id.
    pub async fn remove_user(&self, id: &UserId) {
        self.users.write().await.remove(id);
    }

    /// Returns the number of stored users.
    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_by_name(&self, name: &str) -> Result<User, DomainError> {
        self.users
            .read()
            .await
            .values()
            .find(|u| u.name() == name)
            .cloned()
            .ok_or_else(|| DomainError::user_not_found(name))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(id).cloned())
    }
}
