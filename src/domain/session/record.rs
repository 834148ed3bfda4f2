//! Server-side session record.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SessionId, Timestamp, UserId};

/// A session as persisted by a session store.
///
/// A record without a `user_id` belongs to an anonymous client. Records are
/// never read back after `expires_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: SessionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

impl SessionRecord {
    /// Creates an anonymous record that lives for `ttl_secs`.
    pub fn new(id: SessionId, ttl_secs: u64) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            user_id: None,
            created_at: now,
            expires_at: now.plus_secs(ttl_secs),
        }
    }

    /// Creates an anonymous record with a freshly generated identifier.
    pub fn generate(ttl_secs: u64) -> Self {
        Self::new(SessionId::generate(), ttl_secs)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    pub fn is_expired_at(&self, now: &Timestamp) -> bool {
        !self.expires_at.is_after(now)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(&Timestamp::now())
    }

    /// Pushes the expiry out to `ttl_secs` from now.
    pub fn touch(&mut self, ttl_secs: u64) {
        self.expires_at = Timestamp::now().plus_secs(ttl_secs);
    }

    /// Seconds left before expiry, zero once expired.
    pub fn remaining_secs(&self) -> u64 {
        self.expires_at
            .duration_since(&Timestamp::now())
            .num_seconds()
            .max(0) as u64
    }
}
