//! HTTP routes for session endpoints.

use axum::{
    routing::{delete, get},
    Router,
};

use super::handlers::{create_session, delete_session, get_session};
use crate::adapters::http::state::AppState;

/// Creates the session router, mounted at `/api/session`.
///
/// Relies on `session_middleware` and `current_user_middleware` being applied
/// by the enclosing router.
pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_session).post(create_session))
        .route("/:session_id", delete(delete_session))
}
