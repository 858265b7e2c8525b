//! Splitting combiners: `PartitionBy`, `GroupBy`
//!
//! Both keep elements in input order within each output bucket. Merging
//! appends the right-hand chunk's bucket after the left-hand one, so the
//! chunk-index-ordered merge reproduces the sequential layout exactly.

use crate::combine::CombineFn;
use std::collections::BTreeMap;

/* ===================== PartitionBy<P> ===================== */

/// Elements split in two by a predicate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partitioned<T> {
    matching: Vec<T>,
    rest: Vec<T>,
}

impl<T> Default for Partitioned<T> {
    fn default() -> Self {
        Self {
            matching: Vec::new(),
            rest: Vec::new(),
        }
    }
}

impl<T> Partitioned<T> {
    /// `get(true)` is the matching side, `get(false)` the rest.
    pub fn get(&self, side: bool) -> &[T] {
        if side { &self.matching } else { &self.rest }
    }

    pub fn matching(&self) -> &[T] {
        &self.matching
    }

    pub fn rest(&self) -> &[T] {
        &self.rest
    }

    pub fn into_parts(self) -> (Vec<T>, Vec<T>) {
        (self.matching, self.rest)
    }
}

/// Partition elements by a predicate into a [`Partitioned`].
///
/// ```
/// use ironfold::Reducer;
/// use ironfold::combiners::PartitionBy;
///
/// let r = Reducer::parallel(3).with_min_chunk_len(1);
/// let parts = r.combine((20..=40).collect::<Vec<u32>>(), &PartitionBy::new(|n: &u32| n % 2 == 0));
/// assert_eq!(parts.get(true), (20u32..=40).step_by(2).collect::<Vec<_>>().as_slice());
/// assert_eq!(parts.get(false), (21u32..=39).step_by(2).collect::<Vec<_>>().as_slice());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct PartitionBy<P> {
    pred: P,
}
impl<P> PartitionBy<P> {
    pub const fn new(pred: P) -> Self {
        Self { pred }
    }
}

impl<T, P> CombineFn<T, Partitioned<T>, Partitioned<T>> for PartitionBy<P>
where
    P: Fn(&T) -> bool + Send + Sync,
{
    fn create(&self) -> Partitioned<T> {
        Partitioned::default()
    }

    fn add_input(&self, acc: &mut Partitioned<T>, v: T) {
        if (self.pred)(&v) {
            acc.matching.push(v);
        } else {
            acc.rest.push(v);
        }
    }

    fn merge(&self, acc: &mut Partitioned<T>, mut other: Partitioned<T>) {
        acc.matching.append(&mut other.matching);
        acc.rest.append(&mut other.rest);
    }

    fn finish(&self, acc: Partitioned<T>) -> Partitioned<T> {
        acc
    }
}

/* ===================== GroupBy<F> ===================== */

/// Group elements by a key function into an ordered map.
///
/// - Accumulator / Output: `BTreeMap<K, Vec<T>>`
#[derive(Clone, Copy, Debug)]
pub struct GroupBy<F> {
    key_fn: F,
}
impl<F> GroupBy<F> {
    pub const fn new(key_fn: F) -> Self {
        Self { key_fn }
    }
}

impl<T, K, F> CombineFn<T, BTreeMap<K, Vec<T>>, BTreeMap<K, Vec<T>>> for GroupBy<F>
where
    K: Ord,
    F: Fn(&T) -> K + Send + Sync,
{
    fn create(&self) -> BTreeMap<K, Vec<T>> {
        BTreeMap::new()
    }

    fn add_input(&self, acc: &mut BTreeMap<K, Vec<T>>, v: T) {
        acc.entry((self.key_fn)(&v)).or_default().push(v);
    }

    fn merge(&self, acc: &mut BTreeMap<K, Vec<T>>, other: BTreeMap<K, Vec<T>>) {
        for (k, mut vs) in other {
            acc.entry(k).or_default().append(&mut vs);
        }
    }

    fn finish(&self, acc: BTreeMap<K, Vec<T>>) -> BTreeMap<K, Vec<T>> {
        acc
    }
}
