//! Mixed range/update workload generator with a hot-range bias

use anyhow::{ensure, Result};
use rangecache::{Operation, Value};
use serde::{Deserialize, Serialize};

/// Shape of a generated workload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadConfig {
    /// Length of the summarized array
    pub array_len: usize,
    /// Number of operations to generate
    pub queries: usize,
    /// Number of distinct hot ranges
    pub hot_pool: usize,
    /// Probability that a range query targets the hot pool
    pub p_hot: f64,
    /// Probability that an operation is an update
    pub p_update: f64,
    /// Largest element or update value (values are drawn from `1..=max_value`)
    pub max_value: Value,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            array_len: 100_000,
            queries: 50_000,
            hot_pool: 30,
            p_hot: 0.95,
            p_update: 0.03,
            max_value: 100,
        }
    }
}

impl WorkloadConfig {
    /// Reject parameters the generator cannot honor
    pub fn validate(&self) -> Result<()> {
        ensure!(self.array_len > 0, "array length must be positive");
        ensure!(self.hot_pool > 0, "hot pool must hold at least one range");
        ensure!(
            (0.0..=1.0).contains(&self.p_hot),
            "p_hot must be within [0, 1], got {}",
            self.p_hot
        );
        ensure!(
            (0.0..=1.0).contains(&self.p_update),
            "p_update must be within [0, 1], got {}",
            self.p_update
        );
        ensure!(self.max_value >= 1, "max value must be at least 1");
        Ok(())
    }
}

/// Array of `len` values drawn from `1..=max_value`
pub fn random_array(rng: &mut fastrand::Rng, len: usize, max_value: Value) -> Vec<Value> {
    (0..len).map(|_| rng.i64(1..=max_value)).collect()
}

/// Generate `config.queries` operations
///
/// Hot ranges start in the first half of the array and end in the second
/// half, so each one covers the midpoint and is sensitive to many updates.
pub fn generate(rng: &mut fastrand::Rng, config: &WorkloadConfig) -> Result<Vec<Operation>> {
    config.validate()?;

    let n = config.array_len;
    let hot: Vec<(usize, usize)> = (0..config.hot_pool)
        .map(|_| (rng.usize(0..=n / 2), rng.usize(n / 2..n)))
        .collect();

    let ops = (0..config.queries)
        .map(|_| {
            if rng.f64() < config.p_update {
                Operation::Update {
                    index: rng.usize(0..n),
                    value: rng.i64(1..=config.max_value),
                }
            } else if rng.f64() < config.p_hot {
                let (left, right) = hot[rng.usize(0..hot.len())];
                Operation::Range { left, right }
            } else {
                let left = rng.usize(0..n);
                let right = rng.usize(left..n);
                Operation::Range { left, right }
            }
        })
        .collect();

    Ok(ops)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> WorkloadConfig {
        WorkloadConfig {
            array_len: 50,
            queries: 2_000,
            hot_pool: 5,
            ..WorkloadConfig::default()
        }
    }

    #[test]
    fn test_generate_in_bounds() {
        let config = small_config();
        let ops = generate(&mut fastrand::Rng::with_seed(1), &config).unwrap();

        assert_eq!(ops.len(), config.queries);
        for op in ops {
            match op {
                Operation::Range { left, right } => {
                    assert!(left <= right && right < config.array_len)
                }
                Operation::Update { index, value } => {
                    assert!(index < config.array_len);
                    assert!((1..=config.max_value).contains(&value));
                }
            }
        }
    }

    #[test]
    fn test_generate_is_deterministic() {
        let config = small_config();
        let a = generate(&mut fastrand::Rng::with_seed(9), &config).unwrap();
        let b = generate(&mut fastrand::Rng::with_seed(9), &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_hot_bias() {
        let config = WorkloadConfig {
            p_update: 0.0,
            p_hot: 1.0,
            ..small_config()
        };
        let ops = generate(&mut fastrand::Rng::with_seed(3), &config).unwrap();

        let mut distinct: Vec<Operation> = ops.clone();
        distinct.sort_by_key(|op| match *op {
            Operation::Range { left, right } => (left, right),
            Operation::Update { index, .. } => (index, index),
        });
        distinct.dedup();
        assert!(distinct.len() <= config.hot_pool);

        for op in ops {
            match op {
                Operation::Range { left, right } => {
                    assert!(left <= config.array_len / 2);
                    assert!(right >= config.array_len / 2);
                }
                Operation::Update { .. } => panic!("no updates expected"),
            }
        }
    }

    #[test]
    fn test_update_only() {
        let config = WorkloadConfig {
            p_update: 1.0,
            ..small_config()
        };
        let ops = generate(&mut fastrand::Rng::with_seed(5), &config).unwrap();
        assert!(ops.iter().all(|op| matches!(op, Operation::Update { .. })));
    }

    #[test]
    fn test_validate_rejects_bad_config() {
        let bad = [
            WorkloadConfig { array_len: 0, ..WorkloadConfig::default() },
            WorkloadConfig { hot_pool: 0, ..WorkloadConfig::default() },
            WorkloadConfig { p_hot: 1.5, ..WorkloadConfig::default() },
            WorkloadConfig { p_update: -0.1, ..WorkloadConfig::default() },
            WorkloadConfig { max_value: 0, ..WorkloadConfig::default() },
        ];
        for config in bad {
            assert!(config.validate().is_err(), "{:?}", config);
        }
        assert!(WorkloadConfig::default().validate().is_ok());
    }

    #[test]
    fn test_random_array() {
        let array = random_array(&mut fastrand::Rng::with_seed(2), 100, 10);
        assert_eq!(array.len(), 100);
        assert!(array.iter().all(|v| (1..=10).contains(v)));
    }
}
