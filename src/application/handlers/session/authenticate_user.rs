//! AuthenticateUserHandler - resolves login credentials to a user.
//!
//! Every domain failure on this path (unknown name, wrong password, invalid
//! input) collapses into `AuthenticationError::Failed` so callers cannot
//! tell which one happened. Infrastructure failures are not collapsed.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::domain::foundation::DomainError;
use crate::domain::user::User;
use crate::ports::{PasswordHasher, UserRepository};

/// Command carrying login credentials.
#[derive(Debug)]
pub struct AuthenticateUserCommand {
    pub name: String,
    pub password: SecretString,
}

/// Login failure as seen by the HTTP layer.
#[derive(Debug, Clone, Error)]
pub enum AuthenticationError {
    /// Credentials were rejected. Deliberately carries no cause.
    #[error("Authentication failed")]
    Failed,

    /// A collaborator failed; not a statement about the credentials.
    #[error(transparent)]
    Infrastructure(DomainError),
}

impl AuthenticationError {
    /// Maps a domain failure from lookup or authentication.
    fn from_domain(err: DomainError) -> Self {
        if err.code.is_infrastructure() {
            return AuthenticationError::Infrastructure(err);
        }
        tracing::debug!(code = %err.code, "Login rejected");
        AuthenticationError::Failed
    }
}

/// Handler for authenticating a user by name and password.
pub struct AuthenticateUserHandler {
    users: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl AuthenticateUserHandler {
    pub fn new(users: Arc<dyn UserRepository>, password_hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            users,
            password_hasher,
        }
    }

    pub async fn handle(&self, cmd: AuthenticateUserCommand) -> Result<User, AuthenticationError> {
        // 1. Look up by exact name
        let user = self
            .users
            .get_by_name(&cmd.name)
            .await
            .map_err(AuthenticationError::from_domain)?;

        // 2. Verify the password
        user.authenticate(cmd.password.expose_secret(), self.password_hasher.as_ref())
            .await
            .map_err(AuthenticationError::from_domain)?;

        Ok(user)
    }
}
