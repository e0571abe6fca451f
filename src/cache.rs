// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Query/mutation cache.
//!
//! Holds the last successful result per [`QueryKey`] so views can render
//! immediately, coalesces concurrent reads of the same key into one
//! request, and marks a key stale after every successful write so the next
//! reader refetches. Results are swapped in whole; readers see the old or
//! the new collection, never a mix.

use crate::error::Result;
use crate::models::Resource;
use crate::services::DataAccess;
use dashmap::DashMap;
use std::any::Any;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Cache keys, one per remote query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Members,
    MembersCount,
    Ministries,
    Roles,
}

impl QueryKey {
    pub fn as_str(self) -> &'static str {
        match self {
            QueryKey::Members => "members",
            QueryKey::MembersCount => "members-count",
            QueryKey::Ministries => "ministries",
            QueryKey::Roles => "roles",
        }
    }

    /// Keys whose data is derived from this one.
    fn dependents(self) -> &'static [QueryKey] {
        match self {
            QueryKey::Members => &[QueryKey::MembersCount],
            _ => &[],
        }
    }
}

type CachedValue = Arc<dyn Any + Send + Sync>;

#[derive(Default)]
struct Slot {
    data: Option<CachedValue>,
    stale: bool,
    /// Bumped by every invalidation; a read that started under an older
    /// generation must not mark the slot fresh.
    generation: u64,
    in_flight: usize,
}

/// What a view can render right now for one key.
#[derive(Debug)]
pub struct QueryState<T> {
    pub data: Option<Arc<T>>,
    /// No data has been loaded yet.
    pub is_loading: bool,
    /// A read is in progress.
    pub is_fetching: bool,
    /// The data (if any) is known to be outdated.
    pub is_stale: bool,
}

/// Counts one in-progress read of `key`; released on drop, so a read whose
/// future is cancelled mid-request still clears `is_fetching`.
struct InFlightGuard<'a> {
    slots: &'a DashMap<QueryKey, Slot>,
    key: QueryKey,
}

impl<'a> InFlightGuard<'a> {
    fn enter(slots: &'a DashMap<QueryKey, Slot>, key: QueryKey) -> (Self, u64) {
        let mut slot = slots.entry(key).or_default();
        slot.in_flight += 1;
        let generation = slot.generation;
        drop(slot);
        (Self { slots, key }, generation)
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if let Some(mut slot) = self.slots.get_mut(&self.key) {
            slot.in_flight = slot.in_flight.saturating_sub(1);
        }
    }
}

/// Per-key locks used to coalesce concurrent reads.
pub type FetchLocks = Arc<DashMap<QueryKey, Arc<Mutex<()>>>>;

/// Read-through cache in front of a [`DataAccess`] implementation.
#[derive(Clone)]
pub struct QueryCache<D> {
    source: D,
    slots: Arc<DashMap<QueryKey, Slot>>,
    fetch_locks: FetchLocks,
}

impl<D: DataAccess> QueryCache<D> {
    pub fn new(source: D) -> Self {
        Self {
            source,
            slots: Arc::new(DashMap::new()),
            fetch_locks: Arc::new(DashMap::new()),
        }
    }

    /// The underlying data access layer.
    pub fn source(&self) -> &D {
        &self.source
    }

    // ─── Reads ───────────────────────────────────────────────────────────

    /// Collection for `R`, from cache when fresh.
    pub async fn fetch<R: Resource>(&self) -> Result<Arc<Vec<R::Record>>> {
        self.query(R::KEY, || self.source.list::<R>()).await
    }

    /// Member count, from cache when fresh.
    pub async fn member_count(&self) -> Result<u64> {
        let count = self
            .query(QueryKey::MembersCount, || self.source.member_count())
            .await?;
        Ok(*count)
    }

    /// Current state of the collection for `R` without any I/O.
    pub fn snapshot<R: Resource>(&self) -> QueryState<Vec<R::Record>> {
        self.state(R::KEY)
    }

    /// Current state of `key` without any I/O.
    pub fn state<T: Send + Sync + 'static>(&self, key: QueryKey) -> QueryState<T> {
        match self.slots.get(&key) {
            Some(slot) => {
                let data = slot.data.clone().and_then(|d| d.downcast::<T>().ok());
                QueryState {
                    is_loading: data.is_none(),
                    is_fetching: slot.in_flight > 0,
                    is_stale: slot.stale,
                    data,
                }
            }
            None => QueryState {
                data: None,
                is_loading: true,
                is_fetching: false,
                is_stale: false,
            },
        }
    }

    /// Return the cached value for `key` if fresh, otherwise run `load`.
    ///
    /// Concurrent callers for the same key wait on a per-key lock and reuse
    /// the result of whichever call performed the request.
    async fn query<T, F, Fut>(&self, key: QueryKey, load: F) -> Result<Arc<T>>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        // Fast path - no I/O
        if let Some(data) = self.fresh::<T>(key) {
            return Ok(data);
        }

        let lock = self
            .fetch_locks
            .entry(key)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = lock.lock().await;

        // Another task may have loaded while we were waiting.
        if let Some(data) = self.fresh::<T>(key) {
            return Ok(data);
        }

        let (in_flight, generation) = InFlightGuard::enter(&self.slots, key);
        tracing::debug!(key = key.as_str(), "Fetching query");

        let result = load().await;
        // Release before re-locking the same shard below.
        drop(in_flight);

        let mut slot = self.slots.entry(key).or_default();
        match result {
            Ok(value) => {
                let value = Arc::new(value);
                slot.data = Some(value.clone() as CachedValue);
                if slot.generation == generation {
                    slot.stale = false;
                } else {
                    tracing::debug!(key = key.as_str(), "Query invalidated during fetch");
                }
                Ok(value)
            }
            Err(e) => {
                tracing::debug!(key = key.as_str(), error = %e, "Query failed, keeping previous data");
                Err(e)
            }
        }
    }

    fn fresh<T: Send + Sync + 'static>(&self, key: QueryKey) -> Option<Arc<T>> {
        let slot = self.slots.get(&key)?;
        if slot.stale {
            return None;
        }
        slot.data.clone()?.downcast::<T>().ok()
    }

    // ─── Writes ──────────────────────────────────────────────────────────

    /// Mark `key` (and keys derived from it) stale. Cached data stays
    /// available for rendering until the refetch completes.
    pub fn invalidate(&self, key: QueryKey) {
        for key in std::iter::once(key).chain(key.dependents().iter().copied()) {
            let mut slot = self.slots.entry(key).or_default();
            slot.stale = true;
            slot.generation += 1;
            tracing::debug!(key = key.as_str(), "Query invalidated");
        }
    }

    /// Run a write; on success invalidate `key`. A failed write leaves the
    /// cache untouched.
    pub async fn mutate<T, Fut>(&self, key: QueryKey, op: Fut) -> Result<T>
    where
        Fut: Future<Output = Result<T>>,
    {
        let value = op.await?;
        self.invalidate(key);
        Ok(value)
    }

    pub async fn create<R: Resource>(&self, draft: &R::Draft) -> Result<R::Record> {
        self.mutate(R::KEY, self.source.create::<R>(draft)).await
    }

    pub async fn update<R: Resource>(&self, id: &str, draft: &R::Draft) -> Result<R::Record> {
        self.mutate(R::KEY, self.source.update::<R>(id, draft)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{Member, MemberDraft, Members, Ministries, MinistryDraft};
    use crate::services::MemoryStore;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    /// Wraps the in-memory store, counting reads and optionally failing writes.
    #[derive(Clone, Default)]
    struct CountingStore {
        inner: MemoryStore,
        lists: Arc<AtomicUsize>,
        fail_writes: Arc<AtomicBool>,
    }

    impl DataAccess for CountingStore {
        async fn list<R: Resource>(&self) -> Result<Vec<R::Record>> {
            self.lists.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.inner.list::<R>().await
        }

        async fn create<R: Resource>(&self, draft: &R::Draft) -> Result<R::Record> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(AppError::fetch(R::MESSAGES.create_failed, "HTTP 500"));
            }
            self.inner.create::<R>(draft).await
        }

        async fn update<R: Resource>(&self, id: &str, draft: &R::Draft) -> Result<R::Record> {
            self.inner.update::<R>(id, draft).await
        }

        async fn delete<R: Resource>(&self, id: &str) -> Result<()> {
            self.inner.delete::<R>(id).await
        }

        async fn member_count(&self) -> Result<u64> {
            self.inner.member_count().await
        }
    }

    fn ministry(name: &str) -> MinistryDraft {
        MinistryDraft {
            name: name.to_string(),
            ..MinistryDraft::default()
        }
    }

    #[tokio::test]
    async fn test_concurrent_reads_are_coalesced() {
        let store = CountingStore::default();
        let cache = QueryCache::new(store.clone());

        let (a, b, c) = tokio::join!(
            cache.fetch::<Ministries>(),
            cache.fetch::<Ministries>(),
            cache.fetch::<Ministries>()
        );
        assert!(a.is_ok() && b.is_ok() && c.is_ok());
        assert_eq!(store.lists.load(Ordering::SeqCst), 1);

        // Fresh data is served without another request.
        cache.fetch::<Ministries>().await.unwrap();
        assert_eq!(store.lists.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_successful_write_forces_refetch() {
        let store = CountingStore::default();
        let cache = QueryCache::new(store.clone());

        assert!(cache.fetch::<Ministries>().await.unwrap().is_empty());
        cache.create::<Ministries>(&ministry("Alabanza")).await.unwrap();

        let state = cache.snapshot::<Ministries>();
        assert!(state.is_stale);
        assert!(state.data.unwrap().is_empty(), "old data kept for rendering");

        let fresh = cache.fetch::<Ministries>().await.unwrap();
        assert_eq!(fresh.len(), 1);
        assert_eq!(store.lists.load(Ordering::SeqCst), 2);
        assert!(!cache.snapshot::<Ministries>().is_stale);
    }

    #[tokio::test]
    async fn test_failed_write_leaves_cache_untouched() {
        let store = CountingStore::default();
        let cache = QueryCache::new(store.clone());
        let before = cache.fetch::<Ministries>().await.unwrap();

        store.fail_writes.store(true, Ordering::SeqCst);
        let err = cache.create::<Ministries>(&ministry("Damas")).await.unwrap_err();
        assert_eq!(err.to_string(), "Error al crear el ministerio");

        assert!(!cache.snapshot::<Ministries>().is_stale);
        let after = cache.fetch::<Ministries>().await.unwrap();
        assert!(Arc::ptr_eq(&before, &after));
        assert_eq!(store.lists.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_member_write_invalidates_count() {
        let store = CountingStore::default();
        let cache = QueryCache::new(store.clone());
        assert_eq!(cache.member_count().await.unwrap(), 0);

        let draft = MemberDraft {
            names: "Ana".to_string(),
            ..MemberDraft::default()
        };
        cache.create::<Members>(&draft).await.unwrap();

        assert!(cache.state::<u64>(QueryKey::MembersCount).is_stale);
        assert_eq!(cache.member_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_invalidation_during_fetch_keeps_key_stale() {
        let store = CountingStore::default();
        let cache = QueryCache::new(store.clone());

        let reader = {
            let cache = cache.clone();
            tokio::spawn(async move { cache.fetch::<Ministries>().await })
        };
        tokio::time::sleep(Duration::from_millis(5)).await;
        cache.invalidate(QueryKey::Ministries);
        reader.await.unwrap().unwrap();

        let state = cache.snapshot::<Ministries>();
        assert!(state.data.is_some());
        assert!(state.is_stale);
    }

    #[tokio::test]
    async fn test_cancelled_fetch_clears_fetching_flag() {
        let store = CountingStore::default();
        let cache = QueryCache::new(store.clone());

        let timed_out =
            tokio::time::timeout(Duration::from_millis(5), cache.fetch::<Ministries>()).await;
        assert!(timed_out.is_err());

        let state = cache.snapshot::<Ministries>();
        assert!(!state.is_fetching);
        assert!(state.is_loading);

        // The key is still usable afterwards.
        assert!(cache.fetch::<Ministries>().await.unwrap().is_empty());
        assert_eq!(store.lists.load(Ordering::SeqCst), 2);
        assert!(!cache.snapshot::<Ministries>().is_fetching);
    }

    #[test]
    fn test_snapshot_before_first_load_is_loading() {
        let cache = QueryCache::new(MemoryStore::new());
        let state: QueryState<Vec<Member>> = cache.snapshot::<Members>();
        assert!(state.is_loading);
        assert!(state.data.is_none());
        assert!(!state.is_fetching);
    }
}
