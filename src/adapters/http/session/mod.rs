//! HTTP adapter for session endpoints (login, logout, current session).

mod dto;
mod handlers;
mod routes;

pub use dto::{CreateSessionRequest, EmptyResponse, SessionResponse};
pub use handlers::{create_session, delete_session, get_session, SessionRouteError};
pub use routes::session_routes;
