//! User entity.

use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode, UserId, ValidationError};
use crate::ports::PasswordHasher;

/// Maximum length of a login name.
const NAME_MAX_LEN: usize = 64;

/// A user account that can log in with a name and password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: String,
    email: Option<String>,
    password_hash: String,
}

/// Client-safe view of a user. Never carries credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExposedUser {
    pub id: UserId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl User {
    /// Creates a user, validating the login name.
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: Option<String>,
        password_hash: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if name.len() > NAME_MAX_LEN {
            return Err(ValidationError::invalid_format(
                "name",
                format!("longer than {} characters", NAME_MAX_LEN),
            ));
        }
        Ok(Self {
            id,
            name,
            email,
            password_hash: password_hash.into(),
        })
    }

    /// Rebuilds a user from persisted state without re-validating.
    pub fn reconstitute(
        id: UserId,
        name: String,
        email: Option<String>,
        password_hash: String,
    ) -> Self {
        Self {
            id,
            name,
            email,
            password_hash,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Checks a plaintext password against this user's stored hash.
    ///
    /// A mismatch fails with `INVALID_CREDENTIALS`; hasher failures are
    /// returned as-is.
    pub async fn authenticate(
        &self,
        password: &str,
        hasher: &dyn PasswordHasher,
    ) -> Result<(), DomainError> {
        if hasher.verify(password, &self.password_hash).await? {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::InvalidCredentials,
                format!("Password mismatch for user {}", self.id),
            ))
        }
    }

    /// Returns the redacted public representation.
    pub fn expose(&self) -> ExposedUser {
        ExposedUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}
