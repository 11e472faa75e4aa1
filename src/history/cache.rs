//! History cache - bounded, most-recent-first list of successful crawls
//!
//! The whole list is kept in one slot of the backing store. `save` is a
//! read-modify-write of that slot; the backend sits behind an async mutex so
//! saves from the same process never overwrite each other.

use crate::client::CrawlResult;
use crate::history::traits::{HistoryStore, StorageError, StorageResult};
use crate::history::HistoryEntry;
use crate::request::CrawlRequest;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Slot holding the serialized history list
pub const HISTORY_KEY: &str = "crawl-history";

/// Maximum number of entries kept
pub const HISTORY_LIMIT: usize = 20;

/// Durable, capacity-bounded history of successful crawl results
pub struct HistoryCache<S> {
    store: Mutex<S>,
    key: String,
    limit: usize,
}

impl<S: HistoryStore> HistoryCache<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Mutex::new(store),
            key: HISTORY_KEY.to_string(),
            limit: HISTORY_LIMIT,
        }
    }

    /// All entries, most recent first
    ///
    /// Never fails: a missing, unreadable or corrupt slot reads as empty.
    pub async fn list(&self) -> Vec<HistoryEntry> {
        let store = self.store.lock().await;
        self.read(&*store)
    }

    /// Looks up one entry by id
    pub async fn get(&self, id: &str) -> Option<HistoryEntry> {
        self.list().await.into_iter().find(|entry| entry.id == id)
    }

    /// Records a successful crawl at the front of the history
    ///
    /// Assigns a fresh id and timestamp, prepends the entry, truncates to the
    /// limit and rewrites the whole list.
    pub async fn save(
        &self,
        url: &str,
        request_options: &CrawlRequest,
        result: &CrawlResult,
    ) -> StorageResult<HistoryEntry> {
        if !result.success {
            return Err(StorageError::UnsuccessfulResult(url.to_string()));
        }

        let entry = HistoryEntry {
            id: Uuid::new_v4().to_string(),
            url: url.to_string(),
            created_at: Utc::now(),
            request_options: request_options.clone(),
            result: result.clone(),
        };

        let mut store = self.store.lock().await;
        let mut entries = self.read(&*store);
        entries.insert(0, entry.clone());
        entries.truncate(self.limit);

        let encoded = serde_json::to_string(&entries)?;
        store.set(&self.key, &encoded)?;

        tracing::debug!(
            "Saved history entry {} for {} ({} entries)",
            entry.id,
            entry.url,
            entries.len()
        );
        Ok(entry)
    }

    /// Removes every entry
    pub async fn clear(&self) -> StorageResult<()> {
        let mut store = self.store.lock().await;
        store.set(&self.key, "[]")?;
        tracing::debug!("Cleared history");
        Ok(())
    }

    fn read(&self, store: &S) -> Vec<HistoryEntry> {
        let raw = match store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("History unavailable, treating as empty: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("History slot is corrupt, treating as empty: {}", e);
                Vec::new()
            }
        }
    }
}
