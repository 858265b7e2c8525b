//! Combiner traits driven by the [`Reducer`](crate::Reducer).
//!
//! A combiner describes a fold in four steps:
//!
//! 1. `create` a fresh accumulator for a chunk,
//! 2. `add_input` each element of that chunk in order,
//! 3. `merge` two chunk accumulators (left, then right),
//! 4. `finish` the fully merged accumulator into the output.
//!
//! [`CombineFn`] is the infallible form used by the built-in combiners.
//! [`TryCombineFn`] is the fallible form the engine actually runs; any error
//! returned from one of its steps is handed back to the caller unchanged.
//!
//! `merge` must be associative for parallel and sequential runs to agree. The
//! engine cannot check this.

use std::convert::Infallible;
use std::marker::PhantomData;

pub trait CombineFn<V, A, O>: Send + Sync {
    fn create(&self) -> A;
    fn add_input(&self, acc: &mut A, v: V);
    fn merge(&self, acc: &mut A, other: A);
    fn finish(&self, acc: A) -> O;
}

/// A combiner whose steps may fail.
///
/// `try_merge` takes both sides by value so closure-backed combiners can be
/// written as `(A, A) -> A` without requiring `A: Default`.
pub trait TryCombineFn<V, A, O>: Send + Sync {
    type Error: Send;

    fn try_create(&self) -> Result<A, Self::Error>;
    fn try_add_input(&self, acc: &mut A, v: V) -> Result<(), Self::Error>;
    fn try_merge(&self, left: A, right: A) -> Result<A, Self::Error>;
    fn try_finish(&self, acc: A) -> Result<O, Self::Error>;
}

/// Optional fast path that builds a chunk accumulator from the whole chunk.
///
/// Implementations must produce the same accumulator as calling
/// [`CombineFn::add_input`] on every element of `values` in order.
pub trait LiftableCombiner<V, A, O>: CombineFn<V, A, O> {
    fn build_from_group(&self, values: &[V]) -> A;
}

/// Runs an infallible [`CombineFn`] through the fallible engine.
pub(crate) struct NeverFails<'a, C>(pub(crate) &'a C);

impl<V, A, O, C> TryCombineFn<V, A, O> for NeverFails<'_, C>
where
    C: CombineFn<V, A, O>,
{
    type Error = Infallible;

    fn try_create(&self) -> Result<A, Infallible> {
        Ok(self.0.create())
    }

    fn try_add_input(&self, acc: &mut A, v: V) -> Result<(), Infallible> {
        self.0.add_input(acc, v);
        Ok(())
    }

    fn try_merge(&self, mut left: A, right: A) -> Result<A, Infallible> {
        self.0.merge(&mut left, right);
        Ok(left)
    }

    fn try_finish(&self, acc: A) -> Result<O, Infallible> {
        Ok(self.0.finish(acc))
    }
}

/// A [`TryCombineFn`] assembled from four closures.
///
/// ```
/// use ironfold::{FnCombiner, Reducer};
///
/// let sum = FnCombiner::new(
///     || Ok::<_, String>(0u64),
///     |acc: &mut u64, x: u64| {
///         *acc += x;
///         Ok(())
///     },
///     |a: u64, b: u64| Ok(a + b),
///     Ok,
/// );
/// let total = Reducer::default().try_combine(vec![1u64, 2, 3, 4, 5], &sum);
/// assert_eq!(total, Ok(15));
/// ```
pub struct FnCombiner<M, F, C, Fin, E> {
    make_state: M,
    accumulate: F,
    combine: C,
    finish: Fin,
    _e: PhantomData<fn() -> E>,
}

impl<M, F, C, Fin, E> FnCombiner<M, F, C, Fin, E> {
    // Bounds are repeated here so closure arguments get their types inferred.
    pub fn new<T, A, R>(make_state: M, accumulate: F, combine: C, finish: Fin) -> Self
    where
        M: Fn() -> Result<A, E>,
        F: Fn(&mut A, T) -> Result<(), E>,
        C: Fn(A, A) -> Result<A, E>,
        Fin: Fn(A) -> Result<R, E>,
    {
        Self {
            make_state,
            accumulate,
            combine,
            finish,
            _e: PhantomData,
        }
    }
}

impl<T, A, R, E, M, F, C, Fin> TryCombineFn<T, A, R> for FnCombiner<M, F, C, Fin, E>
where
    E: Send,
    M: Fn() -> Result<A, E> + Send + Sync,
    F: Fn(&mut A, T) -> Result<(), E> + Send + Sync,
    C: Fn(A, A) -> Result<A, E> + Send + Sync,
    Fin: Fn(A) -> Result<R, E> + Send + Sync,
{
    type Error = E;

    fn try_create(&self) -> Result<A, E> {
        (self.make_state)()
    }

    fn try_add_input(&self, acc: &mut A, v: T) -> Result<(), E> {
        (self.accumulate)(acc, v)
    }

    fn try_merge(&self, left: A, right: A) -> Result<A, E> {
        (self.combine)(left, right)
    }

    fn try_finish(&self, acc: A) -> Result<R, E> {
        (self.finish)(acc)
    }
}
