//! Session store adapters.
//!
//! Implementations of the SessionStore port for different backends.
//!
//! ## Available Adapters
//!
//! - `InMemorySessionStore` - In-memory for testing and single-server
//! - `RedisSessionStore` - Redis-backed for production multi-server
//!
//! ## Usage
//!
//! ```ignore
//! use session_api::adapters::session_store::{InMemorySessionStore, RedisSessionStore};
//!
//! // For testing
//! let store = InMemorySessionStore::new();
//!
//! // For production
//! let conn = redis::Client::open(url)?.get_multiplexed_tokio_connection().await?;
//! let store = RedisSessionStore::new(conn);
//! ```

mod in_memory;
mod redis;

pub use in_memory::InMemorySessionStore;
pub use self::redis::{RedisSessionStore, DEFAULT_KEY_PREFIX};
