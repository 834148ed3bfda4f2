//! User repository port.
//!
//! The login flow looks users up by their unique name; the current-user
//! middleware resolves the id stored in a session.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::User;

/// Read access to user accounts.
///
/// # Contract
///
/// Implementations must:
/// - Match names exactly (no case folding, no trimming)
/// - Return `USER_NOT_FOUND` from `get_by_name` when no user has that name
/// - Return `DATABASE_ERROR` for storage failures
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Get a user by exact name.
    async fn get_by_name(&self, name: &str) -> Result<User, DomainError>;

    /// Find a user by id, `None` if it no longer exists.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;
}
