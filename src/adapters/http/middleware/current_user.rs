//! Current-user resolution and the `CurrentUser` extractor.
//!
//! Runs inside `session_middleware`. When the session carries a user id, the
//! user is looked up once and injected into request extensions; handlers that
//! need a logged-in caller take `CurrentUser`, which rejects with 401
//! otherwise.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::session::SessionHandle;
use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;
use crate::domain::user::User;

/// Resolves the session's user into a `CurrentUser` extension.
///
/// A session pointing at a user that no longer exists, or a failed lookup,
/// leaves the request anonymous.
pub async fn current_user_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let user_id = request
        .extensions()
        .get::<SessionHandle>()
        .and_then(SessionHandle::user_id);

    if let Some(user_id) = user_id {
        match state.users.find_by_id(&user_id).await {
            Ok(Some(user)) => {
                request.extensions_mut().insert(CurrentUser(user));
            }
            Ok(None) => {
                tracing::warn!(%user_id, "Session refers to a user that no longer exists");
            }
            Err(e) => {
                tracing::warn!(%user_id, error = %e, "Failed to resolve session user");
            }
        }
    }

    next.run(request).await
}

/// Extractor that requires a logged-in user.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

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
                .get::<CurrentUser>()
                .cloned()
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

/// Rejection type for routes that need a logged-in user.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Unauthenticated => ApiError::unauthenticated().into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{body::Body, http::StatusCode, middleware, routing::get, Router};
    use tower::ServiceExt;

    use crate::adapters::auth::Argon2PasswordHasher;
    use crate::adapters::session_store::InMemorySessionStore;
    use crate::adapters::users::InMemoryUserRepository;
    use crate::config::SessionConfig;
    use crate::domain::foundation::{DomainError, ErrorCode, UserId};
    use crate::domain::session::SessionRecord;
    use crate::ports::{SessionStore, UserRepository};

    fn test_user() -> User {
        User::new(UserId::new(1).unwrap(), "ada", None, "hash".to_string()).unwrap()
    }

    struct FailingUserRepository;

    #[async_trait]
    impl UserRepository for FailingUserRepository {
        async fn get_by_name(&self, _name: &str) -> Result<User, DomainError> {
            Err(DomainError::new(ErrorCode::DatabaseError, "down"))
        }

        async fn find_by_id(&self, _id: &UserId) -> Result<Option<User>, DomainError> {
            Err(DomainError::new(ErrorCode::DatabaseError, "down"))
        }
    }

    /// Router with a `/me` route answering the current user's name.
    fn app(users: Arc<dyn UserRepository>, store: InMemorySessionStore) -> Router {
        let state = AppState::new(
            users,
            Arc::new(Argon2PasswordHasher::default()),
            Arc::new(store),
            SessionConfig::default(),
        );
        Router::new()
            .route(
                "/me",
                get(|CurrentUser(user): CurrentUser| async move { user.name().to_string() }),
            )
            .layer(middleware::from_fn_with_state(
                state.clone(),
                current_user_middleware,
            ))
            .layer(middleware::from_fn_with_state(
                state.clone(),
                super::super::session::session_middleware,
            ))
            .with_state(state)
    }

    async fn logged_in_cookie(store: &InMemorySessionStore, user_id: i64) -> String {
        let mut record = SessionRecord::generate(3600);
        record.user_id = Some(UserId::new(user_id).unwrap());
        store.save(&record).await.unwrap();
        format!("sid={}", record.id)
    }

    fn me_request(cookie: Option<&str>) -> axum::http::Request<Body> {
        let mut builder = axum::http::Request::builder().uri("/me");
        if let Some(cookie) = cookie {
            builder = builder.header("cookie", cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn logged_in_session_resolves_user() {
        let store = InMemorySessionStore::new();
        let users = InMemoryUserRepository::new().with_user(test_user());
        let cookie = logged_in_cookie(&store, 1).await;

        let response = app(Arc::new(users), store)
            .oneshot(me_request(Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"ada");
    }

    #[tokio::test]
    async fn anonymous_request_is_rejected() {
        let users = InMemoryUserRepository::new().with_user(test_user());

        let response = app(Arc::new(users), InMemorySessionStore::new())
            .oneshot(me_request(None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn dangling_user_id_is_treated_as_anonymous() {
        let store = InMemorySessionStore::new();
        let cookie = logged_in_cookie(&store, 99).await;

        let response = app(Arc::new(InMemoryUserRepository::new()), store)
            .oneshot(me_request(Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn lookup_failure_is_treated_as_anonymous() {
        let store = InMemorySessionStore::new();
        let cookie = logged_in_cookie(&store, 1).await;

        let response = app(Arc::new(FailingUserRepository), store)
            .oneshot(me_request(Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn auth_rejection_returns_401() {
        let response = AuthRejection::Unauthenticated.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
