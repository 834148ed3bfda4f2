//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Password hashing (Argon2)
//! - `http` - axum router, session middleware and handlers
//! - `postgres` - PostgreSQL user directory
//! - `session_store` - Session persistence (in-memory, Redis)
//! - `users` - In-memory user directory

pub mod auth;
pub mod http;
pub mod postgres;
pub mod session_store;
pub mod users;

pub use auth::Argon2PasswordHasher;
pub use postgres::PostgresUserRepository;
pub use session_store::{InMemorySessionStore, RedisSessionStore};
pub use users::InMemoryUserRepository;
