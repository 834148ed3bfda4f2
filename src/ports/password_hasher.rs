//! Password hashing port.
//!
//! The hashing scheme is owned by the adapter; the domain only asks whether
//! a plaintext password matches a stored hash.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// Hashes and verifies user passwords.
///
/// # Contract
///
/// Implementations must:
/// - Return `Ok(false)` when the password does not match the hash
/// - Return an `INTERNAL_ERROR` domain error when the stored hash is unusable
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Produce a storable hash for a plaintext password.
    async fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Check a plaintext password against a stored hash.
    async fn verify(&self, password: &str, password_hash: &str) -> Result<bool, DomainError>;
}
