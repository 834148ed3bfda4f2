//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Maximum accepted length of a session identifier.
const SESSION_ID_MAX_LEN: usize = 128;

/// Unique identifier for a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Creates a UserId, rejecting non-positive values.
    pub fn new(id: i64) -> Result<Self, ValidationError> {
        if id < 1 {
            return Err(ValidationError::out_of_range("user_id", 1, i64::MAX, id));
        }
        Ok(Self(id))
    }

    /// Returns the numeric value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s
            .parse::<i64>()
            .map_err(|e| ValidationError::invalid_format("user_id", e.to_string()))?;
        Self::new(id)
    }
}

/// Opaque identifier of a server-side session.
///
/// Identifiers travel in cookies and store keys, so only URL-safe
/// characters are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionId(String);

impl SessionId {
    /// Generates a new random SessionId (32 lowercase hex chars).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Parses an identifier received from a client.
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::empty_field("session_id"));
        }
        if value.len() > SESSION_ID_MAX_LEN {
            return Err(ValidationError::invalid_format(
                "session_id",
                format!("longer than {} characters", SESSION_ID_MAX_LEN),
            ));
        }
        if let Some(c) = value
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(ValidationError::invalid_format(
                "session_id",
                format!("unexpected character {:?}", c),
            ));
        }
        Ok(Self(value))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SessionId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SessionId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<SessionId> for String {
    fn from(id: SessionId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn user_id_rejects_non_positive() {
        assert!(UserId::new(0).is_err());
        assert!(UserId::new(-7).is_err());
        assert_eq!(UserId::new(1).unwrap().as_i64(), 1);
    }

    #[test]
    fn user_id_parses_from_string() {
        let id: UserId = "42".parse().unwrap();
        assert_eq!(id.as_i64(), 42);
        assert!("abc".parse::<UserId>().is_err());
    }

    #[test]
    fn generated_session_ids_are_unique_and_parseable() {
        let a = SessionId::generate();
        let b = SessionId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 32);
        assert_eq!(SessionId::parse(a.as_str()).unwrap(), a);
    }

    #[test]
    fn session_id_accepts_url_safe_tokens() {
        let id = SessionId::parse("qPbv74LGpgcOIZ_JsneaIIXGQAy0TRRe").unwrap();
        assert_eq!(id.to_string(), "qPbv74LGpgcOIZ_JsneaIIXGQAy0TRRe");
    }

    #[test]
    fn session_id_rejects_empty_and_unsafe_values() {
        assert!(matches!(
            SessionId::parse(""),
            Err(ValidationError::EmptyField { .. })
        ));
        assert!(SessionId::parse("wrong id").is_err());
        assert!(SessionId::parse("a;b").is_err());
        assert!(SessionId::parse("x".repeat(129)).is_err());
    }

    #[test]
    fn session_id_serializes_as_plain_string() {
        let id = SessionId::parse("abc_123").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc_123\"");
        let back: SessionId = serde_json::from_str("\"abc_123\"").unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<SessionId>("\"a b\"").is_err());
    }

    proptest! {
        #[test]
        fn session_id_parse_accepts_exactly_the_safe_alphabet(s in "[A-Za-z0-9_-]{1,128}") {
            let parsed = SessionId::parse(s.clone()).unwrap();
            prop_assert_eq!(parsed.as_str(), s.as_str());
        }

        #[test]
        fn session_id_parse_rejects_any_space(prefix in "[a-z]{0,10}", suffix in "[a-z]{0,10}") {
            let candidate = format!("{} {}", prefix, suffix);
            prop_assert!(SessionId::parse(candidate).is_err());
        }
    }
}
