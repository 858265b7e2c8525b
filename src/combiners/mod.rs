//! Built-in combiners for [`Reducer::combine`](crate::Reducer::combine) and
//! [`Reducer::combine_lifted`](crate::Reducer::combine_lifted).
//!
//! Reusable implementations of [`CombineFn`](crate::CombineFn); the ones
//! marked *lifted* also implement [`LiftableCombiner`](crate::LiftableCombiner):
//!
//! - [`Sum<T>`], [`Count`], [`Min<T>`], [`Max<T>`] -- arithmetic (lifted).
//! - [`AverageF64`] -- average as `f64` (lifted).
//! - [`DistinctCount<T>`] -- number of distinct values (lifted).
//! - [`TopK<T>`] -- the K largest values, descending (lifted).
//! - [`ToVec<T>`] (lifted), [`Filtering`], [`Joining`] -- collect into a `Vec` or `String`.
//! - [`PartitionBy`], [`GroupBy`] -- split into ordered buckets.
//! - [`AnyMatch`], [`AllMatch`], [`NoneMatch`], [`FindFirst`] -- predicate queries.
//! - [`MinBy`], [`MaxBy`] -- extremes under a caller-supplied comparator.
//!
//! Every `merge` here is associative and respects left/right order, so all of
//! them give the same answer in sequential and parallel mode.
//!
//! # Examples
//! ```
//! use ironfold::Reducer;
//! use ironfold::combiners::{Count, GroupBy, Joining, Max, MinBy, TopK};
//!
//! let r = Reducer::parallel(4).with_min_chunk_len(1);
//! let words = vec!["apple", "banana", "orange", "kiwi", "grape"];
//!
//! assert_eq!(r.combine(words.clone(), &Count), 5);
//! assert_eq!(r.combine(vec![1, 2, 3, 4, 5, 1, 3, 5], &Max::new()), Some(5));
//! assert_eq!(r.combine(words.clone(), &MinBy::new(|a: &&str, b: &&str| a.len().cmp(&b.len()))), Some("kiwi"));
//! assert_eq!(r.combine(words.clone(), &Joining::new(", ").with_affixes("[", "]")),
//!            "[apple, banana, orange, kiwi, grape]");
//! assert_eq!(r.combine(vec![3u32, 7, 5], &TopK::new(2)), vec![7, 5]);
//!
//! let by_len = r.combine(words, &GroupBy::new(|w: &&str| w.len()));
//! assert_eq!(by_len[&5], vec!["apple", "grape"]);
//! ```

mod basic;
mod collect;
mod distinct;
mod grouping;
mod matching;
mod statistical;
mod topk;

pub use basic::{Count, Max, Min, Sum};
pub use collect::{Filtering, Joining, ToVec};
pub use distinct::DistinctCount;
pub use grouping::{GroupBy, PartitionBy, Partitioned};
pub use matching::{AllMatch, AnyMatch, FindFirst, MaxBy, MinBy, NoneMatch};
pub use statistical::AverageF64;
pub use topk::TopK;
