//! # ironfold
//!
//! Deterministic folds over in-memory sequences, run either on the calling
//! thread or across rayon workers, with the same answer either way.
//!
//! ## Key Features
//!
//! - **One combiner model** - `create / add_input / merge / finish`, see [`CombineFn`]
//! - **Sequential and parallel execution** - choose per [`Reducer`]
//! - **Deterministic merging** - chunk partials merge in chunk order, not completion order
//! - **Fail fast** - the first error (by chunk order) is returned and later chunks are cancelled
//! - **Built-in combiners** - sums, extremes, averages, grouping, partitioning, joining, matching
//!
//! ## Quick Start
//!
//! ```
//! use ironfold::*;
//!
//! let r = Reducer::parallel(4).with_min_chunk_len(1);
//! let total = r.combine(vec![1u64, 2, 3, 4, 5], &Sum::<u64>::new());
//! assert_eq!(total, 15);
//!
//! let split = r.combine((20..=40).collect::<Vec<u32>>(), &PartitionBy::new(|n: &u32| n % 2 == 0));
//! assert_eq!(split.get(true).first(), Some(&20));
//! assert_eq!(split.get(false).last(), Some(&39));
//! ```
//!
//! ## Core Concepts
//!
//! ### Combiners
//!
//! A [`CombineFn`] creates a fresh accumulator per chunk, feeds it that
//! chunk's elements in order, merges accumulators pairwise and finishes the
//! result. `merge` must be associative; it does not need to be commutative.
//! [`TryCombineFn`] is the fallible form, and [`FnCombiner`] builds one from
//! closures. The [`combiners`] module has ready-made implementations.
//!
//! ### Execution Modes
//!
//! - **Sequential** - [`Reducer::sequential`]: one accumulator, calling thread
//! - **Parallel** - [`Reducer::parallel`] / [`Reducer::new`]: contiguous chunks,
//!   one rayon task per chunk, optional dedicated pool, optional merge fanout
//!
//! Chunk layout depends only on input length and configuration (see
//! [`partition::plan_chunks`]), so repeated parallel runs are bit-identical.
//!
//! ### Errors
//!
//! User-function errors come back exactly as the combiner returned them. An
//! empty input is not an error: it yields `finish(create())`.
//!
//! ## Module Overview
//!
//! - [`combine`] - combiner traits and the closure-backed combiner
//! - [`combiners`] - built-in combiners
//! - [`runner`] - the reduction engine and [`reduce`]
//! - [`partition`] - chunk planning
//! - [`config`] - serialisable reducer configuration
//! - [`metrics`] - execution counters
//! - [`testing`] - assertions for tests

pub mod combine;
pub mod combiners;
pub mod config;
pub mod metrics;
pub mod partition;
pub mod runner;
pub mod testing;

// General re-exports
pub use combine::{CombineFn, FnCombiner, LiftableCombiner, TryCombineFn};
pub use combiners::{
    AllMatch, AnyMatch, AverageF64, Count, DistinctCount, Filtering, FindFirst, GroupBy, Joining,
    Max, MaxBy, Min, MinBy, NoneMatch, PartitionBy, Partitioned, Sum, ToVec, TopK,
};
pub use config::ReduceConfig;
pub use metrics::{MetricsSnapshot, ReduceMetrics};
pub use runner::{ExecMode, Reducer, reduce};
