//! Keyed query cache with in-flight de-duplication.
//!
//! Each key holds one [`Slot`]. While a load is running the slot keeps a shared
//! handle to it, so concurrent readers of the same key await the same request
//! instead of issuing their own. Every load carries a ticket; a result is only
//! stored if the slot still holds that ticket when the load finishes, so a key
//! invalidated mid-flight is never repopulated with the stale result.

use crate::error::SdkResult;
use dashmap::DashMap;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

use super::key::QueryKey;

/// Default time a successful read stays fresh.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Configuration for the synchronization layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// How long a cached value is served before the next read refetches it.
    /// `None` keeps values until they are invalidated.
    pub ttl: Option<Duration>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            ttl: Some(DEFAULT_TTL),
        }
    }
}

impl SyncConfig {
    pub fn with_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Observable state of one key.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    /// Never read, or invalidated since.
    Idle,
    Loading,
    Success(T),
    /// The last read failed with this message.
    Error(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            LoadState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> LoadState<U> {
        match self {
            LoadState::Idle => LoadState::Idle,
            LoadState::Loading => LoadState::Loading,
            LoadState::Success(value) => LoadState::Success(f(value)),
            LoadState::Error(message) => LoadState::Error(message),
        }
    }
}

/// How reads were served.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Served from a fresh cached value.
    pub hits: u64,
    /// Started a new load.
    pub misses: u64,
    /// Awaited a load another reader had already started.
    pub joins: u64,
}

impl CacheStats {
    /// Fraction of reads that did not start a request.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses + self.joins;
        if total == 0 {
            0.0
        } else {
            (self.hits + self.joins) as f64 / total as f64
        }
    }
}

impl std::ops::Add for CacheStats {
    type Output = CacheStats;

    fn add(self, other: CacheStats) -> CacheStats {
        CacheStats {
            hits: self.hits + other.hits,
            misses: self.misses + other.misses,
            joins: self.joins + other.joins,
        }
    }
}

type SharedLoad<T> = Shared<BoxFuture<'static, SdkResult<T>>>;

enum Slot<T> {
    Idle,
    Loading { load: SharedLoad<T>, ticket: u64 },
    Ready { value: T, fetched_at: Instant },
    Failed { message: String },
}

/// Cache of values of one type, keyed by [`QueryKey`].
pub struct QueryCache<T> {
    entries: DashMap<QueryKey, Slot<T>>,
    ttl: Option<Duration>,
    next_ticket: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    joins: AtomicU64,
}

impl<T> std::fmt::Debug for QueryCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("entries", &self.entries.len())
            .field("ttl", &self.ttl)
            .field("stats", &self.stats())
            .finish()
    }
}

impl<T> Default for QueryCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(&SyncConfig::default())
    }
}

impl<T> QueryCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(config: &SyncConfig) -> Self {
        Self {
            entries: DashMap::new(),
            ttl: config.ttl,
            next_ticket: AtomicU64::new(1),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            joins: AtomicU64::new(0),
        }
    }

    /// Serve `key` from cache, join its in-flight load, or start `loader`.
    ///
    /// A failed load is recorded as [`LoadState::Error`] and the next read for
    /// the key starts a fresh load.
    pub async fn get_or_fetch<F, Fut>(&self, key: QueryKey, loader: F) -> SdkResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = SdkResult<T>> + Send + 'static,
    {
        let (load, ticket) = {
            let mut slot = self.entries.entry(key.clone()).or_insert(Slot::Idle);
            let claimed = match &*slot {
                Slot::Ready { value, fetched_at } if self.is_fresh(*fetched_at) => {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    trace!(%key, "Cache hit");
                    return Ok(value.clone());
                }
                Slot::Loading { load, ticket } => {
                    self.joins.fetch_add(1, Ordering::Relaxed);
                    trace!(%key, "Joining in-flight load");
                    (load.clone(), *ticket)
                }
                _ => {
                    self.misses.fetch_add(1, Ordering::Relaxed);
                    debug!(%key, "Cache miss, fetching");
                    let (load, ticket) = self.start(loader);
                    *slot = Slot::Loading {
                        load: load.clone(),
                        ticket,
                    };
                    (load, ticket)
                }
            };
            claimed
        };

        let result = load.await;
        self.settle(&key, ticket, &result);
        result
    }

    /// Start a new load for `key` even if a fresh value or a load already exists.
    pub async fn refetch<F, Fut>(&self, key: QueryKey, loader: F) -> SdkResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = SdkResult<T>> + Send + 'static,
    {
        let (load, ticket) = self.start(loader);
        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(%key, "Forced refetch");
        self.entries.insert(
            key.clone(),
            Slot::Loading {
                load: load.clone(),
                ticket,
            },
        );

        let result = load.await;
        self.settle(&key, ticket, &result);
        result
    }

    pub fn state(&self, key: &QueryKey) -> LoadState<T> {
        match self.entries.get(key).as_deref() {
            None | Some(Slot::Idle) => LoadState::Idle,
            Some(Slot::Loading { .. }) => LoadState::Loading,
            Some(Slot::Ready { value, .. }) => LoadState::Success(value.clone()),
            Some(Slot::Failed { message }) => LoadState::Error(message.clone()),
        }
    }

    /// Cached value regardless of freshness.
    pub fn peek(&self, key: &QueryKey) -> Option<T> {
        self.state(key).value().cloned()
    }

    /// Store a value directly, as if it had just been fetched.
    pub fn set(&self, key: QueryKey, value: T) {
        self.entries.insert(
            key,
            Slot::Ready {
                value,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Drop exactly one key. Returns whether it was present.
    pub fn invalidate_key(&self, key: &QueryKey) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            debug!(%key, "Invalidated");
        }
        removed
    }

    /// Drop every key matching `prefix` segment-wise. Returns how many were dropped.
    pub fn invalidate(&self, prefix: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.matches_prefix(prefix));
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            debug!(prefix, removed, "Invalidated by prefix");
        }
        removed
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            joins: self.joins.load(Ordering::Relaxed),
        }
    }

    fn start<F, Fut>(&self, loader: F) -> (SharedLoad<T>, u64)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = SdkResult<T>> + Send + 'static,
    {
        let ticket = self.next_ticket.fetch_add(1, Ordering::Relaxed);
        (loader().boxed().shared(), ticket)
    }

    fn is_fresh(&self, fetched_at: Instant) -> bool {
        self.ttl.map_or(true, |ttl| fetched_at.elapsed() < ttl)
    }

    /// Record the outcome of load `ticket`, unless the key moved on meanwhile.
    fn settle(&self, key: &QueryKey, ticket: u64, result: &SdkResult<T>) {
        let Some(mut slot) = self.entries.get_mut(key) else {
            trace!(%key, "Key invalidated during load, result not stored");
            return;
        };
        if !matches!(&*slot, Slot::Loading { ticket: current, .. } if *current == ticket) {
            return;
        }
        *slot = match result {
            Ok(value) => Slot::Ready {
                value: value.clone(),
                fetched_at: Instant::now(),
            },
            Err(err) => {
                warn!(%key, error = %err, "Load failed");
                Slot::Failed {
                    message: err.to_string(),
                }
            }
        };
    }
}
