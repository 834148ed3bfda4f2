//! Authentication adapters.
//!
//! Implementations of the `PasswordHasher` port:
//!
//! - `Argon2PasswordHasher` - Argon2id PHC hashes

mod argon2_hasher;

pub use argon2_hasher::Argon2PasswordHasher;
