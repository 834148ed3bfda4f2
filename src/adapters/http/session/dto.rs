//! HTTP DTOs for session endpoints.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::domain::user::ExposedUser;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Login credentials.
#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub name: String,
    pub password: SecretString,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// The caller's session and the user it belongs to.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SessionResponse {
    pub id: String,
    pub user: ExposedUser,
}

/// Empty JSON object, returned on logout.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct EmptyResponse {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use secrecy::ExposeSecret;

    #[test]
    fn create_request_deserializes_credentials() {
        let req: CreateSessionRequest =
            serde_json::from_str(r#"{"name":"ada","password":"pw"}"#).unwrap();
        assert_eq!(req.name, "ada");
        assert_eq!(req.password.expose_secret(), "pw");
    }

    #[test]
    fn create_request_debug_redacts_password() {
        let req: CreateSessionRequest =
            serde_json::from_str(r#"{"name":"ada","password":"hunter2"}"#).unwrap();
        assert!(!format!("{:?}", req).contains("hunter2"));
    }

    #[test]
    fn session_response_serializes_id_and_user() {
        let response = SessionResponse {
            id: "abc".to_string(),
            user: ExposedUser {
                id: UserId::new(1).unwrap(),
                name: "ada".to_string(),
                email: None,
            },
        };
        assert_eq!(
            serde_json::to_value(response).unwrap(),
            serde_json::json!({ "id": "abc", "user": { "id": 1, "name": "ada" } })
        );
    }

    #[test]
    fn empty_response_is_empty_object() {
        assert_eq!(serde_json::to_string(&EmptyResponse {}).unwrap(), "{}");
    }
}
