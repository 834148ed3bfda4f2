//! In-memory session store for testing and single-server deployments.
//!
//! Expired records are dropped lazily when they are looked up, and in bulk
//! by `purge_expired`, which `run_purge` calls on a fixed interval. Not
//! suitable for multi-server deployments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tokio::time::{self, MissedTickBehavior};

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::session::{SessionRecord, SessionStoreError};
use crate::ports::SessionStore;

/// In-memory session store.
#[derive(Debug, Default, Clone)]
pub struct InMemorySessionStore {
    records: Arc<RwLock<HashMap<SessionId, SessionRecord>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, expired ones included.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Removes every expired record, returning how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        let now = Timestamp::now();
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| !record.is_expired_at(&now));
        before - records.len()
    }

    /// Purges expired records every `period` until shutdown is signalled.
    ///
    /// Stops when `shutdown` turns true or its sender is dropped.
    pub async fn run_purge(&self, period: Duration, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::debug!("Session purge stopped");
                        return;
                    }
                }

                _ = interval.tick() => {
                    let purged = self.purge_expired().await;
                    if purged > 0 {
                        tracing::debug!(purged, "Purged expired sessions");
                    }
                }
            }
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, id: &SessionId) -> Result<Option<SessionRecord>, SessionStoreError> {
        {
            let records = self.records.read().await;
            match records.get(id) {
                None => return Ok(None),
                Some(record) if !record.is_expired() => return Ok(Some(record.clone())),
                Some(_) => {}
            }
        }

        // Expired: drop it under the write lock
        self.records.write().await.remove(id);
        Ok(None)
    }

    async fn save(&self, record: &SessionRecord) -> Result<(), SessionStoreError> {
        self.records
            .write()
            .await
            .insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn destroy(&self, id: &SessionId) -> Result<(), SessionStoreError> {
        self.records.write().await.remove(id);
        Ok(())
    }
}
