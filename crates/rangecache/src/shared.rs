//! Thread-safe range cache that owns its array

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Result;
use crate::range::{Operation, RangeCache, RangeKey, Sum, Value};
use crate::stats::StatsSnapshot;

/// Array and cache guarded together
struct Inner {
    array: Vec<Value>,
    cache: RangeCache,
}

/// Cloneable handle to a range cache shared between threads
///
/// A single lock covers both the array and the cache, so an update's write
/// and its invalidation sweep happen as one step. No query can see the new
/// element while still being served a sum cached before the write.
#[derive(Clone)]
pub struct SharedRangeCache {
    inner: Arc<Mutex<Inner>>,
}

impl SharedRangeCache {
    /// Take ownership of `array` and cache up to `capacity` range sums over it
    pub fn new(array: Vec<Value>, capacity: usize) -> Result<Self> {
        let cache = RangeCache::new(capacity)?;

        Ok(Self {
            inner: Arc::new(Mutex::new(Inner { array, cache })),
        })
    }

    /// Sum `array[left..=right]`
    pub fn query(&self, left: usize, right: usize) -> Result<Sum> {
        let mut inner = self.inner.lock();
        let Inner { array, cache } = &mut *inner;
        cache.query(array, left, right)
    }

    /// Set `array[index] = value` and invalidate covering ranges
    pub fn update(&self, index: usize, value: Value) -> Result<()> {
        let mut inner = self.inner.lock();
        let Inner { array, cache } = &mut *inner;
        cache.update(array, index, value)
    }

    /// Apply one workload step under the lock
    pub fn apply(&self, op: Operation) -> Result<Option<Sum>> {
        let mut inner = self.inner.lock();
        let Inner { array, cache } = &mut *inner;
        cache.apply(array, op)
    }

    /// Current number of cached ranges
    pub fn size(&self) -> usize {
        self.inner.lock().cache.size()
    }

    /// Snapshot of the cached ranges
    pub fn keys(&self) -> Vec<RangeKey> {
        self.inner.lock().cache.keys()
    }

    /// Length of the owned array
    pub fn len(&self) -> usize {
        self.inner.lock().array.len()
    }

    /// Check if the owned array is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().array.is_empty()
    }

    /// Copy of the owned array
    pub fn to_vec(&self) -> Vec<Value> {
        self.inner.lock().array.clone()
    }

    /// Copy the cache statistics
    pub fn stats_snapshot(&self) -> StatsSnapshot {
        self.inner.lock().cache.stats().snapshot()
    }
}
