//! # rangecache
//!
//! Memoized range-sum queries over a mutable array.
//!
//! ## Architecture
//! - **LruStore**: AHash index over an arena-backed recency list, O(1) get/put/remove
//! - **RangeCache**: `(left, right)` → sum, invalidated by point updates that
//!   fall inside a cached range
//! - **SharedRangeCache**: array and cache behind one lock for multi-threaded use
//!
//! ## Example
//! ```
//! use rangecache::RangeCache;
//!
//! let mut array = vec![1, 2, 3, 4, 5];
//! let mut cache = RangeCache::new(10)?;
//!
//! assert_eq!(cache.query(&array, 0, 2)?, 6);
//! cache.update(&mut array, 1, 10)?;
//! assert_eq!(cache.query(&array, 0, 2)?, 14);
//! # Ok::<(), rangecache::Error>(())
//! ```

#![warn(missing_docs)]

mod error;
mod lru;
mod range;
mod shared;
mod stats;

pub use error::{Error, Result};
pub use lru::LruStore;
pub use range::{range_sum, Operation, RangeCache, RangeKey, Sum, Value};
pub use shared::SharedRangeCache;
pub use stats::{CacheStats, StatsSnapshot};
