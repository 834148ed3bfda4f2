//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresUserRepository` - User accounts for login and current-user lookup

mod user_repository;

pub use user_repository::PostgresUserRepository;
