//! Redis-backed session store for multi-server deployments.
//!
//! Each record is stored as JSON under `<prefix><session id>` with a Redis
//! TTL matching the record's remaining lifetime, so Redis evicts expired
//! sessions on its own.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::domain::foundation::SessionId;
use crate::domain::session::{SessionRecord, SessionStoreError};
use crate::ports::SessionStore;

/// Default key prefix for session records.
pub const DEFAULT_KEY_PREFIX: &str = "session:";

/// Redis-backed session store.
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: MultiplexedConnection,
    key_prefix: String,
}

impl RedisSessionStore {
    /// Create a new Redis session store.
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self {
            conn,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }

    /// Use a custom key prefix (for sharing a Redis between apps).
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    fn key(&self, id: &SessionId) -> String {
        format!("{}{}", self.key_prefix, id)
    }
}

fn unavailable(e: redis::RedisError) -> SessionStoreError {
    SessionStoreError::Unavailable(e.to_string())
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, id: &SessionId) -> Result<Option<SessionRecord>, SessionStoreError> {
        let mut conn = self.conn.clone();

        let payload: Option<String> = conn.get(self.key(id)).await.map_err(unavailable)?;

        let record = match payload {
            Some(payload) => serde_json::from_str::<SessionRecord>(&payload)?,
            None => return Ok(None),
        };

        // Redis TTLs have second granularity; double-check the record itself
        if record.is_expired() {
            return Ok(None);
        }
        Ok(Some(record))
    }

    async fn save(&self, record: &SessionRecord) -> Result<(), SessionStoreError> {
        let ttl = record.remaining_secs();
        if ttl == 0 {
            return self.destroy(&record.id).await;
        }

        let payload = serde_json::to_string(record)?;
        let mut conn = self.conn.clone();

        redis::cmd("SET")
            .arg(self.key(&record.id))
            .arg(payload)
            .arg("EX")
            .arg(ttl)
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(unavailable)?;

        Ok(())
    }

    async fn destroy(&self, id: &SessionId) -> Result<(), SessionStoreError> {
        let mut conn = self.conn.clone();

        conn.del::<_, ()>(self.key(id)).await.map_err(unavailable)?;

        Ok(())
    }
}

impl std::fmt::Debug for RedisSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisSessionStore")
            .field("key_prefix", &self.key_prefix)
            .finish_non_exhaustive()
    }
}
