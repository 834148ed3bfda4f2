//! HTTP middleware for axum.
//!
//! - `session` - Cookie-backed session loading and committing
//! - `current_user` - Resolves the session's user and guards routes that need one
//!
//! `session_middleware` must wrap `current_user_middleware`.

pub mod current_user;
pub mod session;

pub use current_user::{current_user_middleware, AuthRejection, CurrentUser};
pub use session::{session_middleware, SessionCommit, SessionHandle, SessionRejection};
