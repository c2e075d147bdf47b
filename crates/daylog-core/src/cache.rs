//! Memoized analysis keyed by the content of the log.
//!
//! # Thread Safety
//!
//! [`ParseCache`] is `Sync`. Lookups share a read lock; a miss takes the
//! write lock and checks again before analysing, so each distinct text is
//! analysed at most once no matter how many callers race on it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use sha2::{Digest, Sha256};

use crate::category::CategoryTable;
use crate::timeline::Timeline;

/// SHA-256 of the text, hex encoded.
pub fn content_key(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

/// Timelines shared across callers, one per distinct input text.
#[derive(Debug)]
pub struct ParseCache {
    table: CategoryTable,
    entries: RwLock<HashMap<String, Arc<Timeline>>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl ParseCache {
    pub fn new(table: CategoryTable) -> Self {
        Self {
            table,
            entries: RwLock::new(HashMap::new()),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    pub fn table(&self) -> &CategoryTable {
        &self.table
    }

    /// Returns the timeline for `text`, analysing it on first sight.
    pub fn get_or_parse(&self, text: &str) -> Arc<Timeline> {
        let key = content_key(text);

        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(timeline) = entries.get(&key) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::trace!(%key, "parse cache hit");
                return Arc::clone(timeline);
            }
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(timeline) = entries.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Arc::clone(timeline);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(%key, bytes = text.len(), "parse cache miss");
        let timeline = Arc::new(Timeline::from_text(text, &self.table));
        entries.insert(key, Arc::clone(&timeline));
        timeline
    }

    /// Number of distinct texts held.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }
}

impl Default for ParseCache {
    fn default() -> Self {
        Self::new(CategoryTable::standard())
    }
}
