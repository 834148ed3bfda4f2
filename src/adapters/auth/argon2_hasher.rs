//! Argon2id implementation of the `PasswordHasher` port.
//!
//! Hashes are PHC strings (`$argon2id$v=19$...`). Hashing and verification
//! are CPU-bound, so both run on tokio's blocking pool.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher as _, PasswordVerifier as _};
use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::PasswordHasher;

/// Argon2id password hasher with default parameters.
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

fn hash_blocking(password: &str) -> Result<String, DomainError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| DomainError::new(ErrorCode::InternalError, format!("hash error: {}", e)))
}

fn verify_blocking(password: &str, password_hash: &str) -> Result<bool, DomainError> {
    let parsed = PasswordHash::new(password_hash).map_err(|e| {
        DomainError::new(
            ErrorCode::InternalError,
            format!("invalid hash format: {}", e),
        )
    })?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(DomainError::new(
            ErrorCode::InternalError,
            format!("verify error: {}", e),
        )),
    }
}

fn join_error(e: tokio::task::JoinError) -> DomainError {
    DomainError::new(ErrorCode::InternalError, format!("hashing task failed: {}", e))
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, DomainError> {
        let password = password.to_string();
        tokio::task::spawn_blocking(move || hash_blocking(&password))
            .await
            .map_err(join_error)?
    }

    async fn verify(&self, password: &str, password_hash: &str) -> Result<bool, DomainError> {
        let password = password.to_string();
        let password_hash = password_hash.to_string();
        tokio::task::spawn_blocking(move || verify_blocking(&password, &password_hash))
            .await
            .map_err(join_error)?
    }
}
