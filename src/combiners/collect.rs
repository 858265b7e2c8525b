//! Collecting combiners: `ToVec`, `Filtering`, `Joining`

use crate::combine::{CombineFn, LiftableCombiner};
use std::marker::PhantomData;

/* ===================== ToVec<T> ===================== */

/// Collect every element, preserving input order.
#[derive(Clone, Copy, Debug, Default)]
pub struct ToVec<T>(pub PhantomData<T>);
impl<T> ToVec<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: Send + Sync> CombineFn<T, Vec<T>, Vec<T>> for ToVec<T> {
    fn create(&self) -> Vec<T> {
        Vec::new()
    }

    fn add_input(&self, acc: &mut Vec<T>, v: T) {
        acc.push(v);
    }

    fn merge(&self, acc: &mut Vec<T>, mut other: Vec<T>) {
        acc.append(&mut other);
    }

    fn finish(&self, acc: Vec<T>) -> Vec<T> {
        acc
    }
}

impl<T: Send + Sync + Clone> LiftableCombiner<T, Vec<T>, Vec<T>> for ToVec<T> {
    fn build_from_group(&self, values: &[T]) -> Vec<T> {
        values.to_vec()
    }
}

/* ===================== Filtering<P> ===================== */

/// Collect the elements accepted by a predicate, preserving input order.
///
/// ```
/// use ironfold::Reducer;
/// use ironfold::combiners::Filtering;
///
/// let words = vec!["apple", "banana", "orange", "kiwi", "grape"];
/// let short = Reducer::sequential().combine(words, &Filtering::new(|w: &&str| w.len() <= 4));
/// assert_eq!(short, vec!["kiwi"]);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Filtering<P> {
    pred: P,
}
impl<P> Filtering<P> {
    pub const fn new(pred: P) -> Self {
        Self { pred }
    }
}

impl<T, P> CombineFn<T, Vec<T>, Vec<T>> for Filtering<P>
where
    P: Fn(&T) -> bool + Send + Sync,
{
    fn create(&self) -> Vec<T> {
        Vec::new()
    }

    fn add_input(&self, acc: &mut Vec<T>, v: T) {
        if (self.pred)(&v) {
            acc.push(v);
        }
    }

    fn merge(&self, acc: &mut Vec<T>, mut other: Vec<T>) {
        acc.append(&mut other);
    }

    fn finish(&self, acc: Vec<T>) -> Vec<T> {
        acc
    }
}

/* ===================== Joining ===================== */

/// Concatenate string-like elements with a separator, then wrap the result in
/// a prefix and suffix.
///
/// The accumulator is `None` until the first element arrives so that merging
/// an empty chunk never introduces a stray separator.
#[derive(Clone, Debug, Default)]
pub struct Joining {
    pub separator: String,
    pub prefix: String,
    pub suffix: String,
}

impl Joining {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_affixes(mut self, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self.suffix = suffix.into();
        self
    }

    fn push(&self, acc: &mut Option<String>, piece: &str) {
        match acc {
            Some(s) => {
                s.push_str(&self.separator);
                s.push_str(piece);
            }
            None => *acc = Some(piece.to_owned()),
        }
    }
}

impl<T> CombineFn<T, Option<String>, String> for Joining
where
    T: AsRef<str>,
{
    fn create(&self) -> Option<String> {
        None
    }

    fn add_input(&self, acc: &mut Option<String>, v: T) {
        self.push(acc, v.as_ref());
    }

    fn merge(&self, acc: &mut Option<String>, other: Option<String>) {
        if let Some(b) = other {
            self.push(acc, &b);
        }
    }

    fn finish(&self, acc: Option<String>) -> String {
        let body = acc.unwrap_or_default();
        let mut out = String::with_capacity(self.prefix.len() + body.len() + self.suffix.len());
        out.push_str(&self.prefix);
        out.push_str(&body);
        out.push_str(&self.suffix);
        out
    }
}
