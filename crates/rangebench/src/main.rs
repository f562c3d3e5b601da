//! rangebench - cached vs. uncached range-sum benchmark

mod harness;
mod workload;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::{info, warn};

use crate::harness::Report;
use crate::workload::WorkloadConfig;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Array size
    #[arg(short = 'n', long, default_value_t = 100_000)]
    array_len: usize,

    /// Number of operations
    #[arg(short, long, default_value_t = 50_000)]
    queries: usize,

    /// Cache capacity (number of ranges)
    #[arg(short, long, default_value_t = 1000)]
    capacity: usize,

    /// Number of distinct hot ranges
    #[arg(long, default_value_t = 30)]
    hot_pool: usize,

    /// Probability that a range query hits the hot pool
    #[arg(long, default_value_t = 0.95)]
    p_hot: f64,

    /// Probability that an operation is an update
    #[arg(long, default_value_t = 0.03)]
    p_update: f64,

    /// Largest array / update value
    #[arg(long, default_value_t = 100)]
    max_value: i64,

    /// RNG seed (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn workload(&self) -> WorkloadConfig {
        WorkloadConfig {
            array_len: self.array_len,
            queries: self.queries,
            hot_pool: self.hot_pool,
            p_hot: self.p_hot,
            p_update: self.p_update,
            max_value: self.max_value,
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.workload();
    config.validate()?;

    let seed = args.seed.unwrap_or_else(|| fastrand::u64(..));
    let mut rng = fastrand::Rng::with_seed(seed);

    info!("Array size: {}", config.array_len);
    info!("Number of queries: {}", config.queries);
    info!("Cache capacity: {}", args.capacity);
    info!("Seed: {}", seed);

    info!("Generating test data...");
    let array = workload::random_array(&mut rng, config.array_len, config.max_value);
    let ops = workload::generate(&mut rng, &config)?;
    info!("Generated {} operations", ops.len());

    let report = harness::compare(&array, &ops, args.capacity)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if !report.matches {
        warn!("Cached and uncached runs disagree (seed {})", seed);
        bail!(
            "results mismatch: {} vs {}",
            report.uncached_total,
            report.cached_total
        );
    }

    Ok(())
}

fn print_report(report: &Report) {
    println!("\n{}", "=".repeat(50));
    println!("RESULTS");
    println!("{}", "=".repeat(50));
    println!("No Cache  : {:8.3} s", report.uncached_time.as_secs_f64());
    println!(
        "LRU Cache : {:8.3} s  (speedup {:.1}x)",
        report.cached_time.as_secs_f64(),
        report.speedup
    );
    println!(
        "Hit ratio : {:8.1} %  ({} hits, {} misses)",
        report.stats.hit_ratio * 100.0,
        report.stats.hits,
        report.stats.misses
    );
    println!(
        "Removed   : {} evicted, {} invalidated",
        report.stats.evictions, report.stats.invalidations
    );
    println!("{}", "=".repeat(50));

    if report.matches {
        println!("\nResults match: {}", report.cached_total);
    } else {
        println!(
            "\nResults mismatch: {} vs {}",
            report.uncached_total, report.cached_total
        );
    }
}
