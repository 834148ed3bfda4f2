//! Session store port.
//!
//! Persists `SessionRecord`s between requests. The HTTP session middleware
//! is the only caller; handlers go through a `SessionHandle`.
//!
//! # Example
//!
//! ```ignore
//! let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
//!
//! let record = SessionRecord::generate(3600);
//! store.save(&record).await?;
//! assert!(store.load(&record.id).await?.is_some());
//! ```

use async_trait::async_trait;

use crate::domain::foundation::SessionId;
use crate::domain::session::{SessionRecord, SessionStoreError};

/// Server-side storage for session records.
///
/// # Contract
///
/// Implementations must:
/// - Never return a record whose `expires_at` has passed
/// - Treat `save` as an upsert keyed by `record.id`
/// - Treat `destroy` of an unknown id as success
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load a live record.
    async fn load(&self, id: &SessionId) -> Result<Option<SessionRecord>, SessionStoreError>;

    /// Insert or replace a record.
    async fn save(&self, record: &SessionRecord) -> Result<(), SessionStoreError>;

    /// Remove a record.
    async fn destroy(&self, id: &SessionId) -> Result<(), SessionStoreError>;
}
