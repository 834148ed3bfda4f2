//! HTTP adapters - REST API implementation.
//!
//! - `session` - login, logout and current-session endpoints
//! - `middleware` - session cookie handling and current-user resolution

pub mod error;
pub mod middleware;
pub mod router;
pub mod session;
pub mod state;

pub use error::{ApiError, ApiErrorCode, ErrorResponse};
pub use router::app_router;
pub use state::AppState;
