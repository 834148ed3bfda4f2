//! Application router.

use axum::{middleware, routing::get, Router};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use super::middleware::{current_user_middleware, session_middleware};
use super::session::session_routes;
use super::state::AppState;

/// Builds the full application router.
///
/// Layers, outermost first: tracing, timeout, session, current user.
pub fn app_router(state: AppState) -> Router {
    let api = Router::new().nest("/session", session_routes());

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            current_user_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
        .layer(TimeoutLayer::new(state.request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health
async fn health() -> &'static str {
    "ok"
}
