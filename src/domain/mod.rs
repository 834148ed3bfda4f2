//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `user` - User accounts, authentication and exposure
//! - `session` - Server-side session records and store failures

pub mod foundation;
pub mod session;
pub mod user;
