//! Session domain module.
//!
//! A session binds a client (through an opaque identifier carried in a
//! cookie) to an optional authenticated user. Records live in a
//! `SessionStore` and expire after a configured time to live.

mod errors;
mod record;

pub use errors::SessionStoreError;
pub use record::SessionRecord;
