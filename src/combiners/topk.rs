//! Top-K combiner for selecting the largest values

use crate::combine::{CombineFn, LiftableCombiner};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::marker::PhantomData;

/* ===================== TopK<T> ===================== */

/// The largest **K** values (requires `Ord`).
///
/// The accumulator is a min-heap (`BinaryHeap<Reverse<T>>`) of at most `k`
/// elements, so memory is bounded by `k` per chunk.
///
/// - Accumulator: `BinaryHeap<Reverse<T>>`
/// - Output: `Vec<T>` sorted descending
///
/// `k == 0` always produces an empty vector.
#[derive(Clone, Debug)]
pub struct TopK<T> {
    pub k: usize,
    _m: PhantomData<T>,
}
impl<T> TopK<T> {
    #[must_use]
    pub const fn new(k: usize) -> Self {
        Self { k, _m: PhantomData }
    }

    fn push_bounded(&self, heap: &mut BinaryHeap<Reverse<T>>, v: T)
    where
        T: Ord,
    {
        heap.push(Reverse(v));
        if heap.len() > self.k {
            heap.pop(); // drop smallest
        }
    }
}

impl<T> CombineFn<T, BinaryHeap<Reverse<T>>, Vec<T>> for TopK<T>
where
    T: Send + Sync + Ord,
{
    fn create(&self) -> BinaryHeap<Reverse<T>> {
        BinaryHeap::with_capacity(self.k.saturating_add(1))
    }

    fn add_input(&self, acc: &mut BinaryHeap<Reverse<T>>, v: T) {
        self.push_bounded(acc, v);
    }

    fn merge(&self, acc: &mut BinaryHeap<Reverse<T>>, other: BinaryHeap<Reverse<T>>) {
        if acc.len() + other.len() <= self.k {
            acc.extend(other);
            return;
        }
        for Reverse(x) in other {
            self.push_bounded(acc, x);
        }
    }

    fn finish(&self, acc: BinaryHeap<Reverse<T>>) -> Vec<T> {
        // Ascending Reverse order is descending T order.
        acc.into_sorted_vec().into_iter().map(|Reverse(x)| x).collect()
    }
}

impl<T> LiftableCombiner<T, BinaryHeap<Reverse<T>>, Vec<T>> for TopK<T>
where
    T: Send + Sync + Clone + Ord,
{
    fn build_from_group(&self, values: &[T]) -> BinaryHeap<Reverse<T>> {
        let mut heap = self.create();
        for v in values.iter().cloned() {
            self.push_bounded(&mut heap, v);
        }
        heap
    }
}
