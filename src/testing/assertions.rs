//! Assertion functions for testing reductions.

use crate::combine::{CombineFn, TryCombineFn};
use crate::runner::Reducer;
use std::fmt::Debug;

/// Partition counts every mode comparison runs with, besides sequential.
const PARTITIONS: [usize; 4] = [2, 3, 7, 16];

/// Assert that two collections are equal in order and content.
///
/// # Panics
///
/// Panics if the collections differ in length or content.
///
/// # Example
///
/// ```
/// use ironfold::testing::assert_collections_equal;
///
/// assert_collections_equal(&[1, 2, 3], &[1, 2, 3]);
/// ```
pub fn assert_collections_equal<T: Debug + PartialEq>(actual: &[T], expected: &[T]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Collection length mismatch:\n  Expected length: {}\n  Actual length: {}\n  Expected: {expected:?}\n  Actual: {actual:?}",
        expected.len(),
        actual.len()
    );

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert_eq!(
            a, e,
            "Collection mismatch at index {i}:\n  Expected: {e:?}\n  Actual: {a:?}\n  Full expected: {expected:?}\n  Full actual: {actual:?}"
        );
    }
}

/// The parallel layouts a mode comparison runs: several partition counts,
/// each with and without a fanout of 2.
pub fn parallel_reducers() -> Vec<(String, Reducer)> {
    let mut out = Vec::new();
    for parts in PARTITIONS {
        let r = Reducer::parallel(parts).with_min_chunk_len(1);
        out.push((format!("parallel({parts})"), r.clone()));
        out.push((format!("parallel({parts}), fanout 2"), r.with_fanout(2)));
    }
    out
}

/// Run `comb` over `input` sequentially and in several parallel layouts,
/// assert every run agrees, and return the sequential result.
///
/// # Panics
///
/// Panics if any parallel layout disagrees with the sequential fold.
///
/// # Example
///
/// ```
/// use ironfold::combiners::Sum;
/// use ironfold::testing::assert_modes_agree;
///
/// let total = assert_modes_agree(&(1..=100u64).collect::<Vec<_>>(), &Sum::<u64>::new());
/// assert_eq!(total, 5050);
/// ```
pub fn assert_modes_agree<T, A, O, C>(input: &[T], comb: &C) -> O
where
    T: Clone + Send,
    A: Send,
    O: Debug + PartialEq,
    C: CombineFn<T, A, O>,
{
    let expected = Reducer::sequential().combine::<T, A, O, C>(input.to_vec(), comb);
    for (label, r) in parallel_reducers() {
        let got = r.combine::<T, A, O, C>(input.to_vec(), comb);
        assert_eq!(got, expected, "{label} disagrees with sequential fold");
    }
    expected
}

/// Fallible counterpart of [`assert_modes_agree`]: every layout must return
/// the same `Ok` value or the same error.
///
/// # Panics
///
/// Panics if any parallel layout disagrees with the sequential fold.
pub fn assert_try_modes_agree<T, A, O, C>(input: &[T], comb: &C) -> Result<O, C::Error>
where
    T: Clone + Send,
    A: Send,
    O: Debug + PartialEq,
    C: TryCombineFn<T, A, O>,
    C::Error: Debug + PartialEq,
{
    let expected = Reducer::sequential().try_combine::<T, A, O, C>(input.to_vec(), comb);
    for (label, r) in parallel_reducers() {
        let got = r.try_combine::<T, A, O, C>(input.to_vec(), comb);
        assert_eq!(got, expected, "{label} disagrees with sequential fold");
    }
    expected
}
