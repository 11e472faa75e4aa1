//! History module for persisting past crawl results
//!
//! This module handles:
//! - The `HistoryStore` backend interface (named value slots)
//! - SQLite and in-memory backends
//! - The capacity-bounded, most-recent-first `HistoryCache`

mod cache;
mod memory;
mod schema;
mod sqlite;
mod traits;

pub use cache::{HistoryCache, HISTORY_KEY, HISTORY_LIMIT};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{HistoryStore, StorageError, StorageResult};

use crate::client::CrawlResult;
use crate::request::CrawlRequest;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Opens the SQLite-backed history cache at `path`
///
/// Missing parent directories are created.
pub fn open_history(path: &Path) -> crate::Result<HistoryCache<SqliteStore>> {
    Ok(HistoryCache::new(SqliteStore::new(path)?))
}

/// A successful crawl as stored in history
///
/// The crawl result is flattened into the record; entries are never edited
/// after they are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub request_options: CrawlRequest,
    #[serde(flatten)]
    pub result: CrawlResult,
}
