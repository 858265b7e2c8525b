//! Predicate and comparator combiners: `AnyMatch`, `AllMatch`, `NoneMatch`,
//! `FindFirst`, `MinBy`, `MaxBy`
//!
//! These do not short-circuit: every element is still offered to the
//! accumulator, which simply stops evaluating the predicate once the answer
//! is settled.

use crate::combine::CombineFn;
use std::cmp::Ordering;

/* ===================== AnyMatch / AllMatch / NoneMatch ===================== */

#[derive(Clone, Copy, Debug)]
pub struct AnyMatch<P> {
    pred: P,
}
impl<P> AnyMatch<P> {
    pub const fn new(pred: P) -> Self {
        Self { pred }
    }
}

impl<T, P> CombineFn<T, bool, bool> for AnyMatch<P>
where
    P: Fn(&T) -> bool + Send + Sync,
{
    fn create(&self) -> bool {
        false
    }

    fn add_input(&self, acc: &mut bool, v: T) {
        if !*acc {
            *acc = (self.pred)(&v);
        }
    }

    fn merge(&self, acc: &mut bool, other: bool) {
        *acc |= other;
    }

    fn finish(&self, acc: bool) -> bool {
        acc
    }
}

/// True when every element matches; vacuously true for empty inputs.
#[derive(Clone, Copy, Debug)]
pub struct AllMatch<P> {
    pred: P,
}
impl<P> AllMatch<P> {
    pub const fn new(pred: P) -> Self {
        Self { pred }
    }
}

impl<T, P> CombineFn<T, bool, bool> for AllMatch<P>
where
    P: Fn(&T) -> bool + Send + Sync,
{
    fn create(&self) -> bool {
        true
    }

    fn add_input(&self, acc: &mut bool, v: T) {
        if *acc {
            *acc = (self.pred)(&v);
        }
    }

    fn merge(&self, acc: &mut bool, other: bool) {
        *acc &= other;
    }

    fn finish(&self, acc: bool) -> bool {
        acc
    }
}

#[derive(Clone, Copy, Debug)]
pub struct NoneMatch<P> {
    any: AnyMatch<P>,
}
impl<P> NoneMatch<P> {
    pub const fn new(pred: P) -> Self {
        Self {
            any: AnyMatch::new(pred),
        }
    }
}

impl<T, P> CombineFn<T, bool, bool> for NoneMatch<P>
where
    P: Fn(&T) -> bool + Send + Sync,
{
    fn create(&self) -> bool {
        false
    }

    fn add_input(&self, acc: &mut bool, v: T) {
        self.any.add_input(acc, v);
    }

    fn merge(&self, acc: &mut bool, other: bool) {
        *acc |= other;
    }

    fn finish(&self, acc: bool) -> bool {
        !acc
    }
}

/* ===================== FindFirst<P> ===================== */

/// The first element, in input order, accepted by a predicate.
///
/// Parallel runs return the same element as a sequential scan: a left chunk's
/// match always wins over a right chunk's.
#[derive(Clone, Copy, Debug)]
pub struct FindFirst<P> {
    pred: P,
}
impl<P> FindFirst<P> {
    pub const fn new(pred: P) -> Self {
        Self { pred }
    }
}

impl<T, P> CombineFn<T, Option<T>, Option<T>> for FindFirst<P>
where
    P: Fn(&T) -> bool + Send + Sync,
{
    fn create(&self) -> Option<T> {
        None
    }

    fn add_input(&self, acc: &mut Option<T>, v: T) {
        if acc.is_none() && (self.pred)(&v) {
            *acc = Some(v);
        }
    }

    fn merge(&self, acc: &mut Option<T>, other: Option<T>) {
        if acc.is_none() {
            *acc = other;
        }
    }

    fn finish(&self, acc: Option<T>) -> Option<T> {
        acc
    }
}

/* ===================== MinBy<F> / MaxBy<F> ===================== */

/// Minimum by comparator; ties keep the earliest element, as
/// [`Iterator::min_by`] does.
#[derive(Clone, Copy, Debug)]
pub struct MinBy<F> {
    cmp: F,
}
impl<F> MinBy<F> {
    pub const fn new(cmp: F) -> Self {
        Self { cmp }
    }
}

impl<T, F> CombineFn<T, Option<T>, Option<T>> for MinBy<F>
where
    F: Fn(&T, &T) -> Ordering + Send + Sync,
{
    fn create(&self) -> Option<T> {
        None
    }

    fn add_input(&self, acc: &mut Option<T>, v: T) {
        match acc {
            Some(cur) if (self.cmp)(&v, cur) != Ordering::Less => {}
            _ => *acc = Some(v),
        }
    }

    fn merge(&self, acc: &mut Option<T>, other: Option<T>) {
        if let Some(b) = other {
            self.add_input(acc, b);
        }
    }

    fn finish(&self, acc: Option<T>) -> Option<T> {
        acc
    }
}

/// Maximum by comparator; ties keep the earliest element.
///
/// This differs from [`Iterator::max_by`], which keeps the last of several
/// equal maxima.
#[derive(Clone, Copy, Debug)]
pub struct MaxBy<F> {
    cmp: F,
}
impl<F> MaxBy<F> {
    pub const fn new(cmp: F) -> Self {
        Self { cmp }
    }
}

impl<T, F> CombineFn<T, Option<T>, Option<T>> for MaxBy<F>
where
    F: Fn(&T, &T) -> Ordering + Send + Sync,
{
    fn create(&self) -> Option<T> {
        None
    }

    fn add_input(&self, acc: &mut Option<T>, v: T) {
        match acc {
            Some(cur) if (self.cmp)(&v, cur) != Ordering::Greater => {}
            _ => *acc = Some(v),
        }
    }

    fn merge(&self, acc: &mut Option<T>, other: Option<T>) {
        if let Some(b) = other {
            self.add_input(acc, b);
        }
    }

    fn finish(&self, acc: Option<T>) -> Option<T> {
        acc
    }
}
