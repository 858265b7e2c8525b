//! The reduction engine.
//!
//! A [`Reducer`] folds a `Vec<T>` through a combiner, either on the calling
//! thread ([`ExecMode::Sequential`]) or over contiguous chunks on rayon workers
//! ([`ExecMode::Parallel`]). Chunk partials are always merged in chunk-index
//! order, never in completion order, so a parallel run with an associative
//! `merge` returns exactly what the sequential fold returns.
//!
//! On failure the error from the lowest-indexed failing chunk is returned.
//! Chunks above that index are skipped if they have not started and abandon
//! their work at the next element if they have.

use crate::combine::{CombineFn, FnCombiner, LiftableCombiner, NeverFails, TryCombineFn};
use crate::config::{DEFAULT_MIN_CHUNK_LEN, ReduceConfig};
use crate::metrics::ReduceMetrics;
use crate::partition::{plan_chunks, split_owned};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::ops::Range;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::{debug, debug_span, trace};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecMode {
    Sequential,
    Parallel {
        threads: Option<usize>,
        partitions: Option<usize>,
    },
}

#[derive(Clone, Debug)]
pub struct Reducer {
    mode: ExecMode,
    default_partitions: usize,
    min_chunk_len: usize,
    fanout: Option<usize>,
    pool: Option<Arc<rayon::ThreadPool>>,
    metrics: Option<Arc<ReduceMetrics>>,
}

impl Default for Reducer {
    fn default() -> Self {
        Self {
            mode: ExecMode::Parallel {
                threads: None,
                partitions: None,
            },
            default_partitions: num_cpus::get().max(1),
            min_chunk_len: DEFAULT_MIN_CHUNK_LEN,
            fanout: None,
            pool: None,
            metrics: None,
        }
    }
}

impl Reducer {
    /// Build a reducer from a config, creating a dedicated worker pool when
    /// `threads` is set.
    pub fn new(cfg: ReduceConfig) -> Result<Self> {
        let mode = if cfg.parallel {
            ExecMode::Parallel {
                threads: cfg.threads,
                partitions: cfg.partitions,
            }
        } else {
            ExecMode::Sequential
        };
        let pool = match (mode, cfg.threads) {
            (ExecMode::Parallel { .. }, Some(t)) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(t)
                    .thread_name(|i| format!("ironfold-{i}"))
                    .build()
                    .with_context(|| format!("building a {t}-thread reduction pool"))?;
                Some(Arc::new(pool))
            }
            _ => None,
        };
        Ok(Self {
            mode,
            min_chunk_len: cfg.min_chunk_len,
            fanout: cfg.fanout,
            pool,
            ..Self::default()
        })
    }

    pub fn sequential() -> Self {
        Self {
            mode: ExecMode::Sequential,
            ..Self::default()
        }
    }

    /// Parallel on the global rayon pool, aiming for `partitions` chunks.
    pub fn parallel(partitions: usize) -> Self {
        Self {
            mode: ExecMode::Parallel {
                threads: None,
                partitions: Some(partitions),
            },
            ..Self::default()
        }
    }

    pub fn with_min_chunk_len(mut self, min_chunk_len: usize) -> Self {
        self.min_chunk_len = min_chunk_len;
        self
    }

    /// Merge partials in rounds of at most `fanout` (clamped to at least 2).
    pub fn with_fanout(mut self, fanout: usize) -> Self {
        self.fanout = Some(fanout);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<ReduceMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn mode(&self) -> ExecMode {
        self.mode
    }

    /// Chunk layout used for an input of `len` elements.
    pub fn plan(&self, len: usize) -> Vec<Range<usize>> {
        match self.mode {
            ExecMode::Sequential if len == 0 => Vec::new(),
            ExecMode::Sequential => vec![0..len],
            ExecMode::Parallel { partitions, .. } => plan_chunks(
                len,
                partitions.unwrap_or(self.default_partitions),
                self.min_chunk_len,
            ),
        }
    }

    /// Fold `input` through a fallible combiner.
    pub fn try_combine<T, A, O, C>(&self, input: Vec<T>, comb: &C) -> Result<O, C::Error>
    where
        T: Send,
        A: Send,
        C: TryCombineFn<T, A, O>,
    {
        self.execute::<T, A, O, C, _>(input, comb, |rows, index, cancel| {
            fold_chunk::<T, A, O, C>(comb, rows, index, cancel)
        })
    }

    /// Fold `input` through an infallible combiner.
    ///
    /// ```
    /// use ironfold::{Reducer, Sum};
    ///
    /// let r = Reducer::parallel(4).with_min_chunk_len(1);
    /// assert_eq!(r.combine(vec![1u64, 2, 3, 4, 5], &Sum::<u64>::new()), 15);
    /// ```
    pub fn combine<T, A, O, C>(&self, input: Vec<T>, comb: &C) -> O
    where
        T: Send,
        A: Send,
        C: CombineFn<T, A, O>,
    {
        match self.try_combine::<T, A, O, _>(input, &NeverFails(comb)) {
            Ok(out) => out,
            Err(never) => match never {},
        }
    }

    /// Like [`combine`](Self::combine), but builds each chunk accumulator with
    /// [`LiftableCombiner::build_from_group`].
    pub fn combine_lifted<T, A, O, C>(&self, input: Vec<T>, comb: &C) -> O
    where
        T: Send + Sync,
        A: Send,
        C: LiftableCombiner<T, A, O>,
    {
        let res = self.execute::<T, A, O, _, _>(input, &NeverFails(comb), |rows, index, cancel| {
            if cancel.abandons(index) {
                return Chunk::Abandoned;
            }
            Chunk::Done(comb.build_from_group(&rows))
        });
        match res {
            Ok(out) => out,
            Err(never) => match never {},
        }
    }

    fn execute<T, A, O, C, L>(&self, input: Vec<T>, comb: &C, local: L) -> Result<O, C::Error>
    where
        T: Send,
        A: Send,
        C: TryCombineFn<T, A, O>,
        L: Fn(Vec<T>, usize, &Cancellation) -> Chunk<A, C::Error> + Sync,
    {
        let len = input.len();
        let span = debug_span!("reduce", mode = ?self.mode, len);
        let _enter = span.enter();
        let started = Instant::now();
        if let Some(m) = &self.metrics {
            m.record_start(len);
        }

        let out = self.execute_inner(input, comb, local);

        if let Some(m) = &self.metrics {
            m.record_end(started.elapsed(), out.is_err());
        }
        match &out {
            Ok(_) => debug!(elapsed = ?started.elapsed(), "reduction done"),
            Err(_) => debug!(elapsed = ?started.elapsed(), "reduction failed"),
        }
        out
    }

    fn execute_inner<T, A, O, C, L>(
        &self,
        input: Vec<T>,
        comb: &C,
        local: L,
    ) -> Result<O, C::Error>
    where
        T: Send,
        A: Send,
        C: TryCombineFn<T, A, O>,
        L: Fn(Vec<T>, usize, &Cancellation) -> Chunk<A, C::Error> + Sync,
    {
        if input.is_empty() {
            return comb.try_finish(comb.try_create()?);
        }

        let plan = self.plan(input.len());
        debug!(chunks = plan.len(), "partitioned input");
        let cancel = Cancellation::new();

        let outcomes: Vec<Chunk<A, C::Error>> = if plan.len() == 1 {
            vec![local(input, 0, &cancel)]
        } else {
            let chunks = split_owned(input, &plan);
            self.install(|| {
                chunks
                    .into_par_iter()
                    .with_max_len(1)
                    .enumerate()
                    .map(|(i, rows)| local(rows, i, &cancel))
                    .collect()
            })
        };

        if let Some(m) = &self.metrics {
            let abandoned = outcomes
                .iter()
                .filter(|c| matches!(c, Chunk::Abandoned))
                .count();
            m.record_chunks(outcomes.len(), abandoned);
        }

        // Abandoned chunks only exist above a failed one, so the first error
        // in index order is always reached before any of them matter.
        let partials: Vec<A> = outcomes
            .into_iter()
            .map(Chunk::into_result)
            .collect::<Result<Vec<Option<A>>, _>>()?
            .into_iter()
            .flatten()
            .collect();

        let merged = self.merge_partials::<T, A, O, C>(comb, partials)?;
        trace!("finishing");
        comb.try_finish(merged)
    }

    fn merge_partials<T, A, O, C>(&self, comb: &C, mut partials: Vec<A>) -> Result<A, C::Error>
    where
        T: Send,
        A: Send,
        C: TryCombineFn<T, A, O>,
    {
        let Some(fanout) = self.fanout else {
            return fold_partials::<T, A, O, C>(comb, partials);
        };
        let fanout = fanout.max(2);

        let mut round = 0usize;
        while partials.len() > 1 {
            round += 1;
            trace!(round, partials = partials.len(), fanout, "merge round");
            if let Some(m) = &self.metrics {
                m.record_merge_round();
            }

            let groups = group_ranges(partials.len(), fanout);
            let groups = split_owned(partials, &groups);
            let cancel = Cancellation::new();
            let merged: Vec<Chunk<A, C::Error>> = self.install(|| {
                groups
                    .into_par_iter()
                    .with_max_len(1)
                    .enumerate()
                    .map(|(i, group)| fold_group::<T, A, O, C>(comb, group, i, &cancel))
                    .collect()
            });
            // Same rule as for chunks: abandoned groups sit above a failed one.
            partials = merged
                .into_iter()
                .map(Chunk::into_result)
                .collect::<Result<Vec<Option<A>>, _>>()?
                .into_iter()
                .flatten()
                .collect();
        }
        match partials.pop() {
            Some(acc) => Ok(acc),
            None => comb.try_create(),
        }
    }

    fn install<R, OP>(&self, op: OP) -> R
    where
        R: Send,
        OP: FnOnce() -> R + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

/// Fold a sequence with closures; see [`FnCombiner`].
///
/// `parallel = false` folds on the calling thread. `parallel = true` uses
/// [`Reducer::default`], which only splits inputs large enough to be worth it.
///
/// ```
/// let total = ironfold::reduce(
///     vec![1, 2, 3, 4, 5],
///     || Ok::<_, std::convert::Infallible>(0),
///     |acc: &mut i32, x: i32| {
///         *acc += x;
///         Ok(())
///     },
///     |a: i32, b: i32| Ok(a + b),
///     Ok,
///     true,
/// );
/// assert_eq!(total, Ok(15));
/// ```
pub fn reduce<T, A, R, E, M, F, C, Fin>(
    sequence: Vec<T>,
    make_state: M,
    accumulate: F,
    combine: C,
    finish: Fin,
    parallel: bool,
) -> Result<R, E>
where
    T: Send,
    A: Send,
    E: Send,
    M: Fn() -> Result<A, E> + Send + Sync,
    F: Fn(&mut A, T) -> Result<(), E> + Send + Sync,
    C: Fn(A, A) -> Result<A, E> + Send + Sync,
    Fin: Fn(A) -> Result<R, E> + Send + Sync,
{
    let reducer = if parallel {
        Reducer::default()
    } else {
        Reducer::sequential()
    };
    let comb = FnCombiner::new::<T, A, R>(make_state, accumulate, combine, finish);
    reducer.try_combine::<T, A, R, _>(sequence, &comb)
}

/// Lowest index of a failed chunk (or merge group), `usize::MAX` while none
/// has failed.
struct Cancellation {
    lowest_failed: AtomicUsize,
}

impl Cancellation {
    fn new() -> Self {
        Self {
            lowest_failed: AtomicUsize::new(usize::MAX),
        }
    }

    fn abandons(&self, index: usize) -> bool {
        index > self.lowest_failed.load(Ordering::Acquire)
    }

    fn fail(&self, index: usize) {
        let prev = self.lowest_failed.fetch_min(index, Ordering::AcqRel);
        if index < prev {
            debug!(index, "failed, cancelling later work");
        }
    }
}

enum Chunk<A, E> {
    Done(A),
    Failed(E),
    Abandoned,
}

impl<A, E> Chunk<A, E> {
    fn into_result(self) -> Result<Option<A>, E> {
        match self {
            Chunk::Done(a) => Ok(Some(a)),
            Chunk::Failed(e) => Err(e),
            Chunk::Abandoned => Ok(None),
        }
    }
}

fn fold_chunk<T, A, O, C>(
    comb: &C,
    rows: Vec<T>,
    index: usize,
    cancel: &Cancellation,
) -> Chunk<A, C::Error>
where
    C: TryCombineFn<T, A, O>,
{
    if cancel.abandons(index) {
        return Chunk::Abandoned;
    }
    let mut acc = match comb.try_create() {
        Ok(acc) => acc,
        Err(e) => {
            cancel.fail(index);
            return Chunk::Failed(e);
        }
    };
    for v in rows {
        if cancel.abandons(index) {
            return Chunk::Abandoned;
        }
        if let Err(e) = comb.try_add_input(&mut acc, v) {
            cancel.fail(index);
            return Chunk::Failed(e);
        }
    }
    Chunk::Done(acc)
}

/// Left fold of partials in order; an empty list yields a fresh accumulator.
fn fold_partials<T, A, O, C>(comb: &C, partials: Vec<A>) -> Result<A, C::Error>
where
    C: TryCombineFn<T, A, O>,
{
    let mut it = partials.into_iter();
    let Some(mut acc) = it.next() else {
        return comb.try_create();
    };
    for p in it {
        acc = comb.try_merge(acc, p)?;
    }
    Ok(acc)
}

/// Left fold of one merge group, stopping early once a lower group failed.
fn fold_group<T, A, O, C>(
    comb: &C,
    group: Vec<A>,
    index: usize,
    cancel: &Cancellation,
) -> Chunk<A, C::Error>
where
    C: TryCombineFn<T, A, O>,
{
    let mut it = group.into_iter();
    let first = match it.next() {
        Some(acc) => Ok(acc),
        None => comb.try_create(),
    };
    let mut acc = match first {
        Ok(acc) => acc,
        Err(e) => {
            cancel.fail(index);
            return Chunk::Failed(e);
        }
    };
    for p in it {
        if cancel.abandons(index) {
            return Chunk::Abandoned;
        }
        match comb.try_merge(acc, p) {
            Ok(merged) => acc = merged,
            Err(e) => {
                cancel.fail(index);
                return Chunk::Failed(e);
            }
        }
    }
    Chunk::Done(acc)
}

/// Consecutive runs of `size` over `0..len`; the last run may be shorter.
fn group_ranges(len: usize, size: usize) -> Vec<Range<usize>> {
    (0..len)
        .step_by(size)
        .map(|start| start..(start + size).min(len))
        .collect()
}
