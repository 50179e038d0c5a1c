//! In-memory session store for token records.
//!
//! Each session id maps to at most one record, and a record is always
//! inserted or replaced whole. A record expires `ttl` after it was last
//! written; expired records are dropped on read and by the sweep daemon.

use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::crypto::SessionId;
use crate::providers::TokenRecord;

struct Entry {
    record: TokenRecord,
    stored_at: Instant,
}

/// Session-id → token record map shared by all handlers.
pub struct SessionStore {
    records: RwLock<HashMap<SessionId, Entry>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Store a record for the session, replacing any previous one.
    pub async fn put(&self, id: &SessionId, record: TokenRecord) {
        let entry = Entry {
            record,
            stored_at: Instant::now(),
        };
        self.records.write().await.insert(id.clone(), entry);
    }

    /// Record for the session, unless it is missing or expired.
    ///
    /// An expired record is removed.
    pub async fn get(&self, id: &SessionId) -> Option<TokenRecord> {
        {
            let records = self.records.read().await;
            match records.get(id) {
                None => return None,
                Some(entry) if !self.is_expired(entry) => return Some(entry.record.clone()),
                Some(_) => {}
            }
        }

        let mut records = self.records.write().await;
        // Re-check: a concurrent put may have refreshed the entry.
        match records.get(id) {
            Some(entry) if !self.is_expired(entry) => Some(entry.record.clone()),
            Some(_) => {
                records.remove(id);
                tracing::debug!("dropped expired session on read");
                None
            }
            None => None,
        }
    }

    /// Remove every expired record. Returns how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, entry| !self.is_expired(entry));
        before - records.len()
    }

    /// Number of sessions currently holding a record, expired or not.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn is_expired(&self, entry: &Entry) -> bool {
        entry.stored_at.elapsed() >= self.ttl
    }
}
