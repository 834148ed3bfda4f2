//! Shared application state for the HTTP layer.

use std::sync::Arc;
use std::time::Duration;

use crate::application::AuthenticateUserHandler;
use crate::config::SessionConfig;
use crate::ports::{PasswordHasher, SessionStore, UserRepository};

/// Shared application state containing all dependencies.
///
/// This struct is cloned for each request and contains Arc-wrapped dependencies
/// for efficient sharing across handlers and middleware.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub sessions: Arc<dyn SessionStore>,
    pub session_config: SessionConfig,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        sessions: Arc<dyn SessionStore>,
        session_config: SessionConfig,
    ) -> Self {
        Self {
            users,
            password_hasher,
            sessions,
            session_config,
            request_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Create the login handler from the shared state.
    pub fn authenticate_user_handler(&self) -> AuthenticateUserHandler {
        AuthenticateUserHandler::new(self.users.clone(), self.password_hasher.clone())
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("session_config", &self.session_config)
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}
