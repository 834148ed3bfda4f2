//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `UserRepository` - User lookup by name and id
//! - `PasswordHasher` - Password hashing and verification
//! - `SessionStore` - Server-side session persistence

mod password_hasher;
mod session_store;
mod user_repository;

pub use password_hasher::PasswordHasher;
pub use session_store::SessionStore;
pub use user_repository::UserRepository;
