//! User repository adapters.
//!
//! - `InMemoryUserRepository` - Process-local directory for tests and development
//!
//! The PostgreSQL implementation lives in `adapters::postgres`.

mod in_memory;

pub use in_memory::InMemoryUserRepository;
