//! Runs one workload through the cached and the uncached path

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use rangecache::{range_sum, Operation, RangeCache, StatsSnapshot, Sum, Value};
use serde::Serialize;
use tracing::{debug, info};

/// Outcome of a cached run
#[derive(Debug, Clone, Copy)]
pub struct CachedRun {
    /// Total of every range result
    pub total: Sum,
    /// Final cache counters
    pub stats: StatsSnapshot,
}

/// Cache counters as reported
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatsReport {
    /// Queries served from the cache
    pub hits: u64,
    /// Queries that recomputed the sum
    pub misses: u64,
    /// Entries dropped for capacity
    pub evictions: u64,
    /// Entries dropped by updates
    pub invalidations: u64,
    /// Fraction of range queries served from the cache
    pub hit_ratio: f64,
}

impl From<StatsSnapshot> for StatsReport {
    fn from(s: StatsSnapshot) -> Self {
        Self {
            hits: s.hits,
            misses: s.misses,
            evictions: s.evictions,
            invalidations: s.invalidations,
            hit_ratio: s.hit_ratio,
        }
    }
}

/// Side-by-side comparison of both paths over the same workload
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Number of operations executed
    pub operations: usize,
    /// Cache capacity of the cached run
    pub capacity: usize,
    /// Total of range results without caching (as a string, i128 is not JSON-safe)
    #[serde(serialize_with = "serialize_sum")]
    pub uncached_total: Sum,
    /// Total of range results through the cache
    #[serde(serialize_with = "serialize_sum")]
    pub cached_total: Sum,
    /// Wall time of the uncached run, in seconds
    #[serde(serialize_with = "serialize_secs")]
    pub uncached_time: Duration,
    /// Wall time of the cached run, in seconds
    #[serde(serialize_with = "serialize_secs")]
    pub cached_time: Duration,
    /// `uncached_time / cached_time`
    pub speedup: f64,
    /// Whether both totals agree
    pub matches: bool,
    /// Cache counters of the cached run
    pub stats: StatsReport,
}

fn serialize_sum<S>(sum: &Sum, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(sum)
}

fn serialize_secs<S>(d: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_f64(d.as_secs_f64())
}

/// Execute `ops` against `array` by recomputing every range
pub fn run_uncached(array: &mut [Value], ops: &[Operation]) -> Result<Sum> {
    let mut total: Sum = 0;
    for (step, op) in ops.iter().enumerate() {
        match *op {
            Operation::Range { left, right } => {
                total += range_sum(array, left, right)
                    .with_context(|| format!("uncached step {}", step))?;
            }
            Operation::Update { index, value } => {
                let len = array.len();
                let slot = array
                    .get_mut(index)
                    .with_context(|| format!("uncached step {}: index {} >= {}", step, index, len))?;
                *slot = value;
            }
        }
    }
    Ok(total)
}

/// Execute `ops` against `array` through a fresh cache of `capacity` entries
pub fn run_cached(array: &mut [Value], ops: &[Operation], capacity: usize) -> Result<CachedRun> {
    let mut cache = RangeCache::new(capacity)?;
    let mut total: Sum = 0;

    for (step, op) in ops.iter().enumerate() {
        if let Some(sum) = cache
            .apply(array, *op)
            .with_context(|| format!("cached step {}", step))?
        {
            total += sum;
        }
    }

    debug!(size = cache.size(), "cached run finished");
    Ok(CachedRun {
        total,
        stats: cache.stats().snapshot(),
    })
}

/// Run both paths on independent copies of `array` and compare them
pub fn compare(array: &[Value], ops: &[Operation], capacity: usize) -> Result<Report> {
    info!("Running without cache...");
    let mut uncached_array = array.to_vec();
    let start = Instant::now();
    let uncached_total = run_uncached(&mut uncached_array, ops)?;
    let uncached_time = start.elapsed();

    info!("Running with LRU cache...");
    let mut cached_array = array.to_vec();
    let start = Instant::now();
    let cached = run_cached(&mut cached_array, ops, capacity)?;
    let cached_time = start.elapsed();

    let speedup = if cached_time.is_zero() {
        f64::INFINITY
    } else {
        uncached_time.as_secs_f64() / cached_time.as_secs_f64()
    };

    Ok(Report {
        operations: ops.len(),
        capacity,
        uncached_total,
        cached_total: cached.total,
        uncached_time,
        cached_time,
        speedup,
        matches: uncached_total == cached.total && uncached_array == cached_array,
        stats: cached.stats.into(),
    })
}
