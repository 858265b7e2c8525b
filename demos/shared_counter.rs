//! Summing in parallel: a locked shared counter vs a reduction.
//!
//! Every worker bumping one shared total serialises on the lock. A reduction
//! gives each chunk its own accumulator and merges them afterwards, so there
//! is nothing to lock and the answer is the same in either mode.
//!
//! Run with: `cargo run --release --example shared_counter`

use anyhow::Result;
use ironfold::metrics::ReduceMetrics;
use ironfold::{Reducer, Sum};
use rayon::prelude::*;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

const N: u64 = 10_000_000;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("🔒 Shared Counter Example\n");
    let input: Vec<u64> = (1..=N).collect();
    let expected = N * (N + 1) / 2;

    // Shared mutable total behind a lock.
    let start = Instant::now();
    let total = Mutex::new(0u64);
    input.par_iter().for_each(|x| {
        if let Ok(mut t) = total.lock() {
            *t += x;
        }
    });
    let locked = total
        .into_inner()
        .map_err(|_| anyhow::anyhow!("counter lock poisoned"))?;
    println!("locked counter:  {locked} in {:?}", start.elapsed());

    // Sequential reduction.
    let start = Instant::now();
    let seq = Reducer::sequential().combine(input.clone(), &Sum::<u64>::new());
    println!("sequential fold: {seq} in {:?}", start.elapsed());

    // Parallel reduction.
    let metrics = Arc::new(ReduceMetrics::new());
    let r = Reducer::default().with_metrics(Arc::clone(&metrics));
    let start = Instant::now();
    let par = r.combine(input, &Sum::<u64>::new());
    println!("parallel fold:   {par} in {:?}", start.elapsed());

    anyhow::ensure!(locked == expected && seq == expected && par == expected);
    println!("\nmetrics:\n{}", metrics.to_json()?);
    Ok(())
}
