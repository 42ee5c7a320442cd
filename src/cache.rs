//! In-memory news cache keyed by topic.
//!
//! Entries are never refreshed in place. A stale entry stays readable through [`NewsCache::get`]
//! until the next fetch for its key overwrites it. The cache does not expire anything on its
//! own unless a size cap is configured.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::{BoxFuture, FutureExt, Shared};
use tracing::{debug, info};

use crate::api::models::NewsItem;
use crate::config::Config;
use crate::error::Result;

pub type NewsList = Arc<Vec<NewsItem>>;

type InFlight = Shared<BoxFuture<'static, Result<NewsList>>>;

pub fn cache_key(topic: &str) -> String {
    format!("news_{topic}")
}

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub data: NewsList,
    pub timestamp: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(data: NewsList) -> Self {
        Self {
            data,
            timestamp: Utc::now(),
        }
    }

    /// Fresh while strictly younger than `ttl`.
    pub fn is_fresh(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        match chrono::Duration::from_std(ttl) {
            Ok(ttl) => now.signed_duration_since(self.timestamp) < ttl,
            Err(_) => true,
        }
    }
}

struct Inner {
    ttl: Duration,
    max_entries: Option<usize>,
    entries: Mutex<HashMap<String, CacheEntry>>,
    in_flight: Mutex<HashMap<String, InFlight>>,
}

#[derive(Clone)]
pub struct NewsCache {
    inner: Arc<Inner>,
}

impl NewsCache {
    pub fn new(ttl: Duration, max_entries: Option<usize>) -> Self {
        Self {
            inner: Arc::new(Inner {
                ttl,
                max_entries,
                entries: Mutex::new(HashMap::new()),
                in_flight: Mutex::new(HashMap::new()),
            }),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.cache_ttl, config.cache_max_entries)
    }

    pub fn ttl(&self) -> Duration {
        self.inner.ttl
    }

    /// Returns the stored entry whether or not it is still fresh.
    pub fn get(&self, key: &str) -> Option<CacheEntry> {
        lock(&self.inner.entries).get(key).cloned()
    }

    pub fn set(&self, key: impl Into<String>, entry: CacheEntry) {
        self.inner.insert(key.into(), entry);
    }

    pub fn is_fresh(&self, entry: &CacheEntry) -> bool {
        entry.is_fresh(self.inner.ttl, Utc::now())
    }

    pub fn get_fresh(&self, key: &str) -> Option<CacheEntry> {
        self.get(key).filter(|entry| self.is_fresh(entry))
    }

    pub fn len(&self) -> usize {
        lock(&self.inner.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every stale entry and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let mut entries = lock(&self.inner.entries);
        self.inner.purge_expired_locked(&mut entries, Utc::now())
    }

    /// Runs `fetch` for `key` unless a fetch for the same key is already running, in which
    /// case the caller waits on that one instead. A successful result is stored, stamped with
    /// the time the fetch started, before any waiter sees it; a failure is handed to every
    /// waiter and not stored.
    pub async fn get_or_fetch<F, Fut>(&self, key: &str, fetch: F) -> Result<NewsList>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<NewsItem>>> + Send + 'static,
    {
        let flight = {
            let mut in_flight = lock(&self.inner.in_flight);

            if let Some(existing) = in_flight.get(key) {
                debug!(key, "joining in-flight fetch");
                existing.clone()
            } else {
                // a flight may have landed between the caller's lookup and this lock
                if let Some(entry) = self.get_fresh(key) {
                    return Ok(entry.data);
                }

                let inner = Arc::clone(&self.inner);
                let owned_key = key.to_string();
                // entries age from the miss, not from when the upstream answered
                let requested_at = Utc::now();
                let pending = fetch();
                let flight = async move {
                    let result = pending.await.map(Arc::new);
                    if let Ok(data) = &result {
                        let entry = CacheEntry {
                            data: Arc::clone(data),
                            timestamp: requested_at,
                        };
                        inner.insert(owned_key.clone(), entry);
                    }
                    lock(&inner.in_flight).remove(&owned_key);
                    result
                }
                .boxed()
                .shared();

                in_flight.insert(key.to_string(), flight.clone());
                flight
            }
        };

        flight.await
    }
}

impl Inner {
    fn insert(&self, key: String, entry: CacheEntry) {
        let mut entries = lock(&self.entries);
        entries.insert(key, entry);

        let Some(max) = self.max_entries else {
            return;
        };
        if entries.len() <= max {
            return;
        }

        let purged = self.purge_expired_locked(&mut entries, Utc::now());
        let mut evicted = 0;
        while entries.len() > max {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.timestamp)
                .map(|(key, _)| key.clone());
            match oldest {
                Some(key) => {
                    entries.remove(&key);
                    evicted += 1;
                }
                None => break,
            }
        }
        info!(purged, evicted, remaining = entries.len(), "news cache over capacity");
    }

    fn purge_expired_locked(
        &self,
        entries: &mut HashMap<String, CacheEntry>,
        now: DateTime<Utc>,
    ) -> usize {
        let before = entries.len();
        entries.retain(|_, entry| entry.is_fresh(self.ttl, now));
        before - entries.len()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
