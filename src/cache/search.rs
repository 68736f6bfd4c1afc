//! Search-result cache (in-memory).
//!
//! Keys are the normalized query text plus the requested limit. Catalogs never
//! change after startup, so entries never go stale; moka only bounds the size.

use moka::sync::Cache;
use std::sync::Arc;

use crate::catalog::Ingredient;
use crate::constants::DEFAULT_SEARCH_CACHE_CAPACITY;
use crate::search::SearchQuery;

type SearchKey = (String, usize);

/// Resolved ingredient lists keyed by `(query, limit)`.
pub struct SearchCache {
    entries: Cache<SearchKey, Arc<Vec<Ingredient>>>,
    enabled: bool,
}

impl SearchCache {
    /// Creates a cache with the default capacity.
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_SEARCH_CACHE_CAPACITY)
    }

    /// Creates a cache holding at most `capacity` results. `0` disables insertion.
    #[inline]
    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            entries: Cache::builder().max_capacity(capacity).build(),
            enabled: capacity > 0,
        }
    }

    #[inline]
    pub fn lookup(&self, query: &SearchQuery, limit: usize) -> Option<Arc<Vec<Ingredient>>> {
        self.entries.get(&Self::key(query, limit))
    }

    /// Stores `results` and returns the shared copy.
    pub fn insert(
        &self,
        query: &SearchQuery,
        limit: usize,
        results: Vec<Ingredient>,
    ) -> Arc<Vec<Ingredient>> {
        let results = Arc::new(results);
        if self.enabled {
            self.entries
                .insert(Self::key(query, limit), Arc::clone(&results));
        }
        results
    }

    /// Returns the cached results, computing and storing them on a miss.
    pub fn get_or_insert_with<F>(
        &self,
        query: &SearchQuery,
        limit: usize,
        compute: F,
    ) -> Arc<Vec<Ingredient>>
    where
        F: FnOnce() -> Vec<Ingredient>,
    {
        if let Some(hit) = self.lookup(query, limit) {
            return hit;
        }
        self.insert(query, limit, compute())
    }

    #[inline]
    pub fn contains(&self, query: &SearchQuery, limit: usize) -> bool {
        self.entries.contains_key(&Self::key(query, limit))
    }

    /// Returns the number of cached entries (after pending maintenance).
    #[inline]
    pub fn len(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn clear(&self) {
        self.entries.invalidate_all();
    }

    fn key(query: &SearchQuery, limit: usize) -> SearchKey {
        (query.as_str().to_string(), limit)
    }
}

impl Default for SearchCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SearchCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchCache")
            .field("entries", &self.entries.entry_count())
            .field("enabled", &self.enabled)
            .finish()
    }
}

#[derive(Clone)]
/// Shared handle to a [`SearchCache`].
pub struct SearchCacheHandle {
    inner: Arc<SearchCache>,
}

impl SearchCacheHandle {
    #[inline]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SearchCache::new()),
        }
    }

    #[inline]
    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            inner: Arc::new(SearchCache::with_capacity(capacity)),
        }
    }

    #[inline]
    pub fn lookup(&self, query: &SearchQuery, limit: usize) -> Option<Arc<Vec<Ingredient>>> {
        self.inner.lookup(query, limit)
    }

    #[inline]
    pub fn get_or_insert_with<F>(
        &self,
        query: &SearchQuery,
        limit: usize,
        compute: F,
    ) -> Arc<Vec<Ingredient>>
    where
        F: FnOnce() -> Vec<Ingredient>,
    {
        self.inner.get_or_insert_with(query, limit, compute)
    }

    #[inline]
    pub fn len(&self) -> u64 {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[inline]
    pub fn clear(&self) {
        self.inner.clear();
    }

    /// Returns the number of strong references to the underlying cache.
    #[inline]
    pub fn strong_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

impl Default for SearchCacheHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SearchCacheHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchCacheHandle")
            .field("strong_count", &self.strong_count())
            .finish()
    }
}
