//! Cookie-backed session middleware and the `SessionHandle` extractor.
//!
//! ```text
//! Request → session_middleware → loads record by cookie id, injects SessionHandle
//!                                        ↓
//!                                 Handler mutates the handle
//!                                        ↓
//!           session_middleware ← commits: save + Set-Cookie, or clear cookie
//! ```
//!
//! A request with no cookie, an unparseable id, or an id the store no longer
//! knows gets a fresh anonymous record. Fresh records are only written to the
//! store (and only get a cookie) once a handler modifies them.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http::{header, HeaderMap, HeaderValue};
use subtle::ConstantTimeEq;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;
use crate::config::SessionConfig;
use crate::domain::foundation::{SessionId, UserId};
use crate::domain::session::{SessionRecord, SessionStoreError};
use crate::ports::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Clean,
    Modified,
    Destroyed,
}

#[derive(Debug)]
struct HandleState {
    record: SessionRecord,
    lifecycle: Lifecycle,
}

/// Outcome of committing a session after the handler ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommit {
    /// Nothing changed, no cookie is sent.
    Unchanged,
    /// The record was written under this id.
    Saved(SessionId),
    /// The record was destroyed and the cookie must be cleared.
    Destroyed,
}

/// The current request's session.
///
/// Cloning yields another handle to the same session; the middleware keeps
/// one clone to commit changes once the handler returns.
#[derive(Clone)]
pub struct SessionHandle {
    state: Arc<Mutex<HandleState>>,
    store: Arc<dyn SessionStore>,
    ttl_secs: u64,
}

impl SessionHandle {
    pub fn new(record: SessionRecord, store: Arc<dyn SessionStore>, ttl_secs: u64) -> Self {
        Self {
            state: Arc::new(Mutex::new(HandleState {
                record,
                lifecycle: Lifecycle::Clean,
            })),
            store,
            ttl_secs,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HandleState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn id(&self) -> SessionId {
        self.lock().record.id.clone()
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.lock().record.user_id
    }

    /// Binds the session to a user. Persisted on commit.
    pub fn set_user_id(&self, user_id: UserId) {
        let mut state = self.lock();
        state.record.user_id = Some(user_id);
        state.lifecycle = Lifecycle::Modified;
    }

    /// Compares `candidate` with the session id in constant time.
    pub fn matches(&self, candidate: &str) -> bool {
        self.id()
            .as_str()
            .as_bytes()
            .ct_eq(candidate.as_bytes())
            .into()
    }

    pub fn is_modified(&self) -> bool {
        self.lock().lifecycle == Lifecycle::Modified
    }

    pub fn is_destroyed(&self) -> bool {
        self.lock().lifecycle == Lifecycle::Destroyed
    }

    /// Replaces the session with a fresh anonymous one under a new id.
    ///
    /// The old record is removed from the store first; if that fails the
    /// session is left untouched.
    pub async fn regenerate(&self) -> Result<(), SessionStoreError> {
        let previous = self.id();
        self.store.destroy(&previous).await?;

        let mut state = self.lock();
        state.record = SessionRecord::generate(self.ttl_secs);
        state.lifecycle = Lifecycle::Modified;
        Ok(())
    }

    /// Removes the session from the store.
    pub async fn destroy(&self) -> Result<(), SessionStoreError> {
        let id = self.id();
        self.store.destroy(&id).await?;
        self.lock().lifecycle = Lifecycle::Destroyed;
        Ok(())
    }

    /// Persists pending changes, refreshing the expiry of modified records.
    pub async fn commit(&self) -> Result<SessionCommit, SessionStoreError> {
        let (record, lifecycle) = {
            let mut state = self.lock();
            if state.lifecycle == Lifecycle::Modified {
                state.record.touch(self.ttl_secs);
            }
            (state.record.clone(), state.lifecycle)
        };

        match lifecycle {
            Lifecycle::Clean => Ok(SessionCommit::Unchanged),
            Lifecycle::Destroyed => Ok(SessionCommit::Destroyed),
            Lifecycle::Modified => {
                self.store.save(&record).await?;
                self.lock().lifecycle = Lifecycle::Clean;
                Ok(SessionCommit::Saved(record.id))
            }
        }
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("SessionHandle")
            .field("user_id", &state.record.user_id)
            .field("lifecycle", &state.lifecycle)
            .finish_non_exhaustive()
    }
}

/// Session middleware.
///
/// Loads the session named by the cookie, hands it to the handler through
/// request extensions, then commits whatever the handler changed. A store
/// failure while loading is logged and the request proceeds with a fresh
/// session; a failure while saving turns the response into a 500.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let config = &state.session_config;

    let record = match session_id_from_cookies(request.headers(), &config.cookie_name) {
        Some(id) => match state.sessions.load(&id).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                tracing::debug!("Unknown or expired session id, starting a new session");
                SessionRecord::generate(config.ttl_secs)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load session, starting a new session");
                SessionRecord::generate(config.ttl_secs)
            }
        },
        None => SessionRecord::generate(config.ttl_secs),
    };

    let session = SessionHandle::new(record, state.sessions.clone(), config.ttl_secs);
    request.extensions_mut().insert(session.clone());

    let mut response = next.run(request).await;

    let cookie = match session.commit().await {
        Ok(SessionCommit::Unchanged) => return response,
        Ok(SessionCommit::Saved(id)) => session_cookie(config, &id),
        Ok(SessionCommit::Destroyed) => cleared_cookie(config),
        Err(e) => {
            tracing::error!(error = %e, "Failed to save session");
            return ApiError::internal().into_response();
        }
    };

    match HeaderValue::from_str(&cookie) {
        Ok(value) => {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
        Err(e) => tracing::error!(error = %e, "Session cookie is not a valid header value"),
    }
    response
}

/// Finds the first well-formed session id under `cookie_name`.
pub fn session_id_from_cookies(headers: &HeaderMap, cookie_name: &str) -> Option<SessionId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .filter(|(name, _)| *name == cookie_name)
        .find_map(|(_, value)| SessionId::parse(value.trim_matches('"')).ok())
}

fn session_cookie(config: &SessionConfig, id: &SessionId) -> String {
    cookie_with_max_age(config, id.as_str(), config.ttl_secs)
}

fn cleared_cookie(config: &SessionConfig) -> String {
    cookie_with_max_age(config, "", 0)
}

fn cookie_with_max_age(config: &SessionConfig, value: &str, max_age: u64) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        config.cookie_name, value, max_age
    );
    if config.secure_cookie {
        cookie.push_str("; Secure");
    }
    cookie
}

impl<S> axum::extract::FromRequestParts<S> for SessionHandle
where
    S: Send + Sync,
{
    type Rejection = SessionRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<SessionHandle>()
                .cloned()
                .ok_or(SessionRejection::MissingMiddleware)
        })
    }
}

/// Rejection when a handler asks for a session outside `session_middleware`.
#[derive(Debug, Clone)]
pub enum SessionRejection {
    MissingMiddleware,
}

impl IntoResponse for SessionRejection {
    fn into_response(self) -> Response {
        tracing::error!("SessionHandle requested on a route without session middleware");
        ApiError::internal().into_response()
    }
}
