//! Execution counters for reductions.
//!
//! Attach a shared [`ReduceMetrics`] to a [`Reducer`](crate::Reducer) with
//! [`with_metrics`](crate::Reducer::with_metrics). Every call on that reducer
//! adds to the counters; read them back with [`ReduceMetrics::snapshot`].
//!
//! ```
//! use std::sync::Arc;
//! use ironfold::{Reducer, Sum};
//! use ironfold::metrics::ReduceMetrics;
//!
//! let metrics = Arc::new(ReduceMetrics::new());
//! let r = Reducer::parallel(4)
//!     .with_min_chunk_len(1)
//!     .with_metrics(Arc::clone(&metrics));
//! let total = r.combine((1..=100u64).collect(), &Sum::<u64>::new());
//! assert_eq!(total, 5050);
//!
//! let snap = metrics.snapshot();
//! assert_eq!(snap.reductions, 1);
//! assert_eq!(snap.chunks_dispatched, 4);
//! println!("{}", metrics.to_json().unwrap());
//! ```

use anyhow::Result;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

#[derive(Debug, Default)]
pub struct ReduceMetrics {
    reductions: AtomicU64,
    failures: AtomicU64,
    elements: AtomicU64,
    chunks_dispatched: AtomicU64,
    chunks_abandoned: AtomicU64,
    merge_rounds: AtomicU64,
    elapsed_micros: AtomicU64,
}

/// Point-in-time copy of [`ReduceMetrics`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub reductions: u64,
    pub failures: u64,
    pub elements: u64,
    pub chunks_dispatched: u64,
    pub chunks_abandoned: u64,
    pub merge_rounds: u64,
    pub elapsed_micros: u64,
}

impl ReduceMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_start(&self, elements: usize) {
        self.reductions.fetch_add(1, Ordering::Relaxed);
        self.elements.fetch_add(elements as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_chunks(&self, dispatched: usize, abandoned: usize) {
        self.chunks_dispatched
            .fetch_add(dispatched as u64, Ordering::Relaxed);
        self.chunks_abandoned
            .fetch_add(abandoned as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_merge_round(&self) {
        self.merge_rounds.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_end(&self, elapsed: Duration, failed: bool) {
        let micros = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        self.elapsed_micros.fetch_add(micros, Ordering::Relaxed);
        if failed {
            self.failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            reductions: self.reductions.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            elements: self.elements.load(Ordering::Relaxed),
            chunks_dispatched: self.chunks_dispatched.load(Ordering::Relaxed),
            chunks_abandoned: self.chunks_abandoned.load(Ordering::Relaxed),
            merge_rounds: self.merge_rounds.load(Ordering::Relaxed),
            elapsed_micros: self.elapsed_micros.load(Ordering::Relaxed),
        }
    }

    /// Render the current snapshot as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }
}
