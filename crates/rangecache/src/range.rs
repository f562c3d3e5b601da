//! Range-sum cache with update invalidation
//!
//! Sums are keyed on their inclusive `(left, right)` bounds. A point update
//! writes through to the caller's array first and then drops every cached
//! range that covers the written index, so a later query can never return a
//! sum computed from the old value.

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::lru::LruStore;
use crate::stats::CacheStats;

/// Element type of the summarized array
pub type Value = i64;

/// Sum of a range of [`Value`]s
///
/// Wide enough that summing `i64` elements cannot overflow for any array that
/// fits in memory.
pub type Sum = i128;

/// Inclusive `(left, right)` bounds of a cached range
pub type RangeKey = (usize, usize);

/// One step of a query/update workload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Sum `array[left..=right]`
    Range {
        /// Left bound (inclusive)
        left: usize,
        /// Right bound (inclusive)
        right: usize,
    },
    /// Set `array[index] = value`
    Update {
        /// Position to overwrite
        index: usize,
        /// New element value
        value: Value,
    },
}

/// Check `left <= right < len`
fn check_range(len: usize, left: usize, right: usize) -> Result<()> {
    if left > right || right >= len {
        return Err(Error::OutOfRange { left, right, len });
    }
    Ok(())
}

fn sum_inclusive(array: &[Value], left: usize, right: usize) -> Sum {
    array[left..=right].iter().map(|&v| Sum::from(v)).sum()
}

/// Sum `array[left..=right]` directly, without any caching
pub fn range_sum(array: &[Value], left: usize, right: usize) -> Result<Sum> {
    check_range(array.len(), left, right)?;
    Ok(sum_inclusive(array, left, right))
}

/// LRU-memoized range sums over an externally owned array
///
/// The cache never copies the array. Every call receives the array by
/// reference, and callers must route all writes through [`RangeCache::update`]
/// for cached sums to stay coherent.
pub struct RangeCache {
    store: LruStore<RangeKey, Sum>,
    stats: CacheStats,
}

impl RangeCache {
    /// Create a cache holding at most `capacity` range sums
    ///
    /// # Returns
    /// * `Err(Error::InvalidCapacity)` if `capacity` is zero
    pub fn new(capacity: usize) -> Result<Self> {
        let store = LruStore::new(capacity)?;
        debug!(capacity, "range cache created");

        Ok(Self {
            store,
            stats: CacheStats::new(),
        })
    }

    /// Sum `array[left..=right]`, answering from the cache when possible
    ///
    /// # Arguments
    /// * `array` - Current contents of the summarized array
    /// * `left` - Left bound (inclusive)
    /// * `right` - Right bound (inclusive)
    ///
    /// # Returns
    /// * `Err(Error::OutOfRange)` unless `left <= right < array.len()`
    pub fn query(&mut self, array: &[Value], left: usize, right: usize) -> Result<Sum> {
        check_range(array.len(), left, right)?;
        let key = (left, right);

        if let Some(&sum) = self.store.get(&key) {
            self.stats.record_hit();
            return Ok(sum);
        }

        self.stats.record_miss();
        let sum = sum_inclusive(array, left, right);

        self.stats.record_insert();
        if let Some((evicted, _)) = self.store.put(key, sum) {
            self.stats.record_eviction();
            trace!(?evicted, "evicted least recently used range");
        }

        Ok(sum)
    }

    /// Write `value` at `array[index]` and drop every cached range covering it
    ///
    /// # Returns
    /// * `Err(Error::IndexOutOfRange)` if `index >= array.len()`; nothing is
    ///   written and no entry is removed in that case
    pub fn update(&mut self, array: &mut [Value], index: usize, value: Value) -> Result<()> {
        if index >= array.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: array.len(),
            });
        }

        array[index] = value;
        let removed = self.invalidate(index);
        if removed > 0 {
            trace!(index, removed, "invalidated cached ranges");
        }

        Ok(())
    }

    /// Apply one workload step
    ///
    /// # Returns
    /// * `Some(sum)` for [`Operation::Range`], `None` for [`Operation::Update`]
    pub fn apply(&mut self, array: &mut [Value], op: Operation) -> Result<Option<Sum>> {
        match op {
            Operation::Range { left, right } => self.query(array, left, right).map(Some),
            Operation::Update { index, value } => self.update(array, index, value).map(|_| None),
        }
    }

    /// Remove every cached range with `left <= index <= right`
    fn invalidate(&mut self, index: usize) -> usize {
        let stale: Vec<RangeKey> = self
            .store
            .keys()
            .into_iter()
            .filter(|&(left, right)| left <= index && index <= right)
            .collect();

        for key in &stale {
            self.store.remove(key);
        }

        self.stats.record_invalidations(stale.len() as u64);
        stale.len()
    }

    /// Current number of cached ranges
    pub fn size(&self) -> usize {
        self.store.len()
    }

    /// Check if nothing is cached
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Maximum number of cached ranges
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Snapshot of the cached ranges, in no particular order
    pub fn keys(&self) -> Vec<RangeKey> {
        self.store.keys()
    }

    /// Check whether a range is cached, without touching recency
    pub fn contains(&self, left: usize, right: usize) -> bool {
        self.store.contains(&(left, right))
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Drop all cached ranges and reset statistics
    pub fn clear(&mut self) {
        self.store.clear();
        self.stats.reset();
    }
}
