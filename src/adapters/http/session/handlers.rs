//! HTTP handlers for session endpoints.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::{CurrentUser, SessionHandle};
use crate::adapters::http::state::AppState;
use crate::application::{AuthenticateUserCommand, AuthenticationError};
use crate::domain::foundation::DomainError;
use crate::domain::session::SessionStoreError;

use super::dto::{CreateSessionRequest, EmptyResponse, SessionResponse};

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/session - The caller's session and user
pub async fn get_session(
    session: SessionHandle,
    CurrentUser(user): CurrentUser,
) -> Json<SessionResponse> {
    Json(SessionResponse {
        id: session.id().to_string(),
        user: user.expose(),
    })
}

/// POST /api/session - Log in
///
/// On success the session id is rotated before the user is bound to it.
pub async fn create_session(
    State(state): State<AppState>,
    session: SessionHandle,
    Json(req): Json<CreateSessionRequest>,
) -> Result<Json<SessionResponse>, SessionRouteError> {
    let cmd = AuthenticateUserCommand {
        name: req.name,
        password: req.password,
    };

    let user = state.authenticate_user_handler().handle(cmd).await?;

    session.regenerate().await?;
    session.set_user_id(user.id());
    tracing::info!(user_id = %user.id(), "User logged in");

    Ok(Json(SessionResponse {
        id: session.id().to_string(),
        user: user.expose(),
    }))
}

/// DELETE /api/session/:session_id - Log out
///
/// Only the caller's own session can be deleted; any other id is reported
/// as not found.
pub async fn delete_session(
    session: SessionHandle,
    Path(session_id): Path<String>,
) -> Result<Json<EmptyResponse>, SessionRouteError> {
    if !session.matches(&session_id) {
        return Err(ApiError::session_not_found().into());
    }

    let user_id = session.user_id();
    session.destroy().await?;
    tracing::info!(user_id = ?user_id, "Session destroyed");

    Ok(Json(EmptyResponse {}))
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

/// Failure of a session route.
///
/// `Api` errors reach the client as-is. Store and infrastructure failures are
/// logged and reported as a generic internal error.
#[derive(Debug, Error)]
pub enum SessionRouteError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Session(#[from] SessionStoreError),

    #[error(transparent)]
    Infrastructure(DomainError),
}

impl From<AuthenticationError> for SessionRouteError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::Failed => ApiError::authentication_failed().into(),
            AuthenticationError::Infrastructure(e) => SessionRouteError::Infrastructure(e),
        }
    }
}

impl IntoResponse for SessionRouteError {
    fn into_response(self) -> Response {
        match self {
            SessionRouteError::Api(err) => err.into_response(),
            SessionRouteError::Session(err) => {
                tracing::error!(error = %err, "Session store failure");
                ApiError::internal().into_response()
            }
            SessionRouteError::Infrastructure(err) => {
                tracing::error!(error = %err, "Infrastructure failure");
                ApiError::internal().into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::http::StatusCode;
    use secrecy::SecretString;

    use crate::adapters::http::error::ApiErrorCode;
    use crate::adapters::session_store::InMemorySessionStore;
    use crate::adapters::users::InMemoryUserRepository;
    use crate::config::SessionConfig;
    use crate::domain::foundation::{ErrorCode, SessionId, UserId};
    use crate::domain::session::SessionRecord;
    use crate::domain::user::User;
    use crate::ports::{PasswordHasher, SessionStore, UserRepository};

    const TTL: u64 = 3600;

    // ════════════════════════════════════════════════════════════════════════════
    // Test doubles
    // ════════════════════════════════════════════════════════════════════════════

    /// Hasher that treats the hash as `plain:<password>`.
    struct PlainHasher;

    #[async_trait]
    impl PasswordHasher for PlainHasher {
        async fn hash(&self, password: &str) -> Result<String, DomainError> {
            Ok(format!("plain:{}", password))
        }

        async fn verify(&self, password: &str, password_hash: &str) -> Result<bool, DomainError> {
            Ok(password_hash == format!("plain:{}", password))
        }
    }

    /// In-memory store that counts destroys and can be told to fail them.
    #[derive(Default)]
    struct RecordingStore {
        inner: InMemorySessionStore,
        destroy_calls: AtomicUsize,
        fail_destroy: bool,
    }

    impl RecordingStore {
        fn failing_destroy() -> Self {
            Self {
                fail_destroy: true,
                ..Default::default()
            }
        }

        fn destroy_calls(&self) -> usize {
            self.destroy_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SessionStore for RecordingStore {
        async fn load(&self, id: &SessionId) -> Result<Option<SessionRecord>, SessionStoreError> {
            self.inner.load(id).await
        }

        async fn save(&self, record: &SessionRecord) -> Result<(), SessionStoreError> {
            self.inner.save(record).await
        }

        async fn destroy(&self, id: &SessionId) -> Result<(), SessionStoreError> {
            self.destroy_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_destroy {
                return Err(SessionStoreError::unavailable("error"));
            }
            self.inner.destroy(id).await
        }
    }

    struct FailingUserRepository;

    #[async_trait]
    impl UserRepository for FailingUserRepository {
        async fn get_by_name(&self, _name: &str) -> Result<User, DomainError> {
            Err(DomainError::new(ErrorCode::DatabaseError, "connection refused"))
        }

        async fn find_by_id(&self, _id: &UserId) -> Result<Option<User>, DomainError> {
            Err(DomainError::new(ErrorCode::DatabaseError, "connection refused"))
        }
    }

    fn test_user() -> User {
        User::new(
            UserId::new(1).unwrap(),
            "test",
            Some("test@example.com".to_string()),
            "plain:password1",
        )
        .unwrap()
    }

    fn state_with(users: Arc<dyn UserRepository>, store: Arc<dyn SessionStore>) -> AppState {
        AppState::new(users, Arc::new(PlainHasher), store, SessionConfig::default())
    }

    fn default_state(store: Arc<RecordingStore>) -> AppState {
        let users = InMemoryUserRepository::new().with_user(test_user());
        state_with(Arc::new(users), store)
    }

    fn session_in(store: Arc<RecordingStore>) -> SessionHandle {
        SessionHandle::new(SessionRecord::generate(TTL), store, TTL)
    }

    fn login(name: &str, password: &str) -> Json<CreateSessionRequest> {
        Json(CreateSessionRequest {
            name: name.to_string(),
            password: SecretString::new(password.to_string()),
        })
    }

    fn api_code(err: SessionRouteError) -> ApiErrorCode {
        match err {
            SessionRouteError::Api(api) => api.code,
            other => panic!("expected API error, got {:?}", other),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // get_session
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn get_returns_session_id_and_exposed_user() {
        let store = Arc::new(RecordingStore::default());
        let session = session_in(store);

        let Json(response) = get_session(session.clone(), CurrentUser(test_user())).await;

        assert_eq!(response.id, session.id().to_string());
        assert_eq!(response.user, test_user().expose());
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("password"));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // create_session
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn create_logs_in_and_rotates_session() {
        let store = Arc::new(RecordingStore::default());
        let session = session_in(store.clone());
        let original_id = session.id();

        let Json(response) = create_session(
            State(default_state(store.clone())),
            session.clone(),
            login("test", "password1"),
        )
        .await
        .unwrap();

        assert_ne!(session.id(), original_id);
        assert_eq!(response.id, session.id().to_string());
        assert_eq!(response.user.name, "test");
        assert_eq!(session.user_id(), Some(UserId::new(1).unwrap()));
        assert_eq!(store.destroy_calls(), 1);
        assert!(session.is_modified());
    }

    #[tokio::test]
    async fn create_with_wrong_password_fails_without_touching_session() {
        let store = Arc::new(RecordingStore::default());
        let session = session_in(store.clone());
        let original_id = session.id();

        let err = create_session(
            State(default_state(store.clone())),
            session.clone(),
            login("test", "wrong"),
        )
        .await
        .unwrap_err();

        assert_eq!(api_code(err), ApiErrorCode::AuthenticationFailed);
        assert_eq!(session.id(), original_id);
        assert!(session.user_id().is_none());
        assert_eq!(store.destroy_calls(), 0);
    }

    #[tokio::test]
    async fn create_with_unknown_user_fails_the_same_way() {
        let store = Arc::new(RecordingStore::default());
        let session = session_in(store.clone());

        let err = create_session(
            State(default_state(store.clone())),
            session,
            login("nobody", "password1"),
        )
        .await
        .unwrap_err();

        assert_eq!(api_code(err), ApiErrorCode::AuthenticationFailed);
    }

    #[tokio::test]
    async fn create_passes_regenerate_failure_through() {
        let store = Arc::new(RecordingStore::failing_destroy());
        let session = session_in(store.clone());

        let err = create_session(
            State(default_state(store.clone())),
            session.clone(),
            login("test", "password1"),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            SessionRouteError::Session(SessionStoreError::Unavailable(ref msg)) if msg == "error"
        ));
        assert!(session.user_id().is_none());
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn create_reports_repository_outage_as_internal() {
        let store = Arc::new(RecordingStore::default());
        let state = state_with(Arc::new(FailingUserRepository), store.clone());

        let err = create_session(State(state), session_in(store), login("test", "password1"))
            .await
            .unwrap_err();

        assert!(matches!(err, SessionRouteError::Infrastructure(_)));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn create_on_logged_in_session_switches_user() {
        let store = Arc::new(RecordingStore::default());
        let other = User::new(UserId::new(2).unwrap(), "other", None, "plain:pw2").unwrap();
        let users = InMemoryUserRepository::new()
            .with_user(test_user())
            .with_user(other);
        let state = state_with(Arc::new(users), store.clone());
        let session = session_in(store.clone());
        session.set_user_id(UserId::new(1).unwrap());

        create_session(State(state), session.clone(), login("other", "pw2"))
            .await
            .unwrap();

        assert_eq!(session.user_id(), Some(UserId::new(2).unwrap()));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // delete_session
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn delete_destroys_matching_session() {
        let store = Arc::new(RecordingStore::default());
        let session = session_in(store.clone());
        let id = session.id().to_string();

        let Json(response) = delete_session(session.clone(), Path(id)).await.unwrap();

        assert_eq!(response, EmptyResponse {});
        assert!(session.is_destroyed());
        assert_eq!(store.destroy_calls(), 1);
    }

    #[tokio::test]
    async fn delete_with_other_id_is_not_found() {
        let store = Arc::new(RecordingStore::default());
        let session = session_in(store.clone());

        let err = delete_session(session.clone(), Path("otherId".to_string()))
            .await
            .unwrap_err();

        assert_eq!(api_code(err), ApiErrorCode::SessionNotFound);
        assert!(!session.is_destroyed());
        assert_eq!(store.destroy_calls(), 0);
    }

    #[tokio::test]
    async fn delete_passes_store_failure_through() {
        let store = Arc::new(RecordingStore::failing_destroy());
        let session = session_in(store.clone());
        let id = session.id().to_string();

        let err = delete_session(session.clone(), Path(id)).await.unwrap_err();

        assert!(matches!(err, SessionRouteError::Session(_)));
        assert!(!session.is_destroyed());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Error mapping
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn authentication_failure_maps_to_401() {
        let err: SessionRouteError = AuthenticationError::Failed.into();
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn not_found_maps_to_404() {
        let err: SessionRouteError = ApiError::session_not_found().into();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
