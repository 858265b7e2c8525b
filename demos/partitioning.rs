//! Sequential vs parallel reductions over the same inputs.
//!
//! Demonstrates:
//! - `reduce` with closures in both modes
//! - Partitioning numbers into even and odd
//! - Empty inputs
//! - Built-in terminal combiners over a word list
//!
//! Run with: `cargo run --example partitioning`
//! Set `RUST_LOG=ironfold=debug` to see chunk planning and merge logs.

use anyhow::Result;
use ironfold::combiners::{
    AllMatch, AnyMatch, AverageF64, Count, FindFirst, GroupBy, Joining, Max, Min, MinBy,
    NoneMatch, PartitionBy,
};
use ironfold::{Reducer, reduce};
use tracing_subscriber::EnvFilter;

fn sum(xs: Vec<i64>, parallel: bool) -> Result<i64> {
    reduce(
        xs,
        || Ok(0i64),
        |acc: &mut i64, x: i64| {
            *acc += x;
            Ok(())
        },
        |a: i64, b: i64| Ok(a + b),
        Ok,
        parallel,
    )
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("🧮 Partitioning Example\n");

    // =============================================================================
    // Sums
    // =============================================================================
    println!("Sum of 1..=5");
    println!("  sequential: {}", sum(vec![1, 2, 3, 4, 5], false)?);
    println!("  parallel:   {}", sum(vec![1, 2, 3, 4, 5], true)?);
    println!("  empty:      {}", sum(Vec::new(), true)?);

    // =============================================================================
    // Even / odd
    // =============================================================================
    let r = Reducer::parallel(4).with_min_chunk_len(1);
    for (label, reducer) in [("sequential", Reducer::sequential()), ("parallel", r.clone())] {
        let parts = reducer.combine(
            (20..=40).collect::<Vec<u32>>(),
            &PartitionBy::new(|n: &u32| n % 2 == 0),
        );
        println!("\n{label} partition of 20..=40:");
        println!("  even: {:?}", parts.get(true));
        println!("  odd:  {:?}", parts.get(false));
    }

    // =============================================================================
    // Terminal combiners
    // =============================================================================
    let words = vec!["apple", "banana", "orange", "kiwi", "grape"];
    let numbers = vec![1, 2, 3, 4, 5, 1, 3, 5];

    println!("\n📊 TERMINAL COMBINERS\n");
    println!("  count:        {}", r.combine(numbers.clone(), &Count));
    println!("  min:          {:?}", r.combine(numbers.clone(), &Min::new()));
    println!("  max:          {:?}", r.combine(numbers.clone(), &Max::new()));
    println!("  average:      {:.2}", r.combine(numbers.clone(), &AverageF64));
    println!("  any > 4:      {}", r.combine(numbers.clone(), &AnyMatch::new(|n: &i32| *n > 4)));
    println!("  all > 0:      {}", r.combine(numbers.clone(), &AllMatch::new(|n: &i32| *n > 0)));
    println!("  none > 5:     {}", r.combine(numbers.clone(), &NoneMatch::new(|n: &i32| *n > 5)));
    println!("  first > 3:    {:?}", r.combine(numbers, &FindFirst::new(|n: &i32| *n > 3)));
    println!(
        "  shortest:     {:?}",
        r.combine(words.clone(), &MinBy::new(|a: &&str, b: &&str| a.len().cmp(&b.len())))
    );
    println!(
        "  joined:       {}",
        r.combine(words.clone(), &Joining::new(", ").with_affixes("[", "]"))
    );
    println!("  by length:");
    for (len, group) in r.combine(words, &GroupBy::new(|w: &&str| w.len())) {
        println!("    {len}: {group:?}");
    }

    Ok(())
}
