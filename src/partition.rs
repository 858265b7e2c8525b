//! Chunk planning for parallel reductions.
//!
//! A plan is a list of contiguous, non-overlapping ranges that together cover
//! `0..len` in order. The layout depends only on the input length, the
//! requested partition count and the minimum chunk length, so the same inputs
//! always produce the same chunks (and therefore the same merge tree).

use std::ops::Range;

/// Split `len` elements into at most `partitions` contiguous ranges.
///
/// - an empty input yields no ranges
/// - no range is shorter than `min_chunk_len`, except when the whole input is
///   shorter than that, in which case a single range covers it
/// - range lengths differ by at most one, longer ranges first
///
/// ```
/// use ironfold::partition::plan_chunks;
///
/// assert_eq!(plan_chunks(10, 3, 1), vec![0..4, 4..7, 7..10]);
/// assert_eq!(plan_chunks(10, 8, 5), vec![0..5, 5..10]);
/// assert!(plan_chunks(0, 4, 1).is_empty());
/// ```
pub fn plan_chunks(len: usize, partitions: usize, min_chunk_len: usize) -> Vec<Range<usize>> {
    if len == 0 {
        return Vec::new();
    }
    let by_size = len / min_chunk_len.max(1);
    let parts = partitions.max(1).min(by_size.max(1));
    if parts == 1 {
        return vec![0..len];
    }

    let base = len / parts;
    let extra = len % parts;
    let mut start = 0;
    (0..parts)
        .map(|i| {
            let size = base + usize::from(i < extra);
            let r = start..start + size;
            start += size;
            r
        })
        .collect()
}

/// Move the elements of `v` into one owned `Vec` per range of `plan`.
///
/// `plan` must be a contiguous cover of `0..v.len()` as produced by
/// [`plan_chunks`].
pub(crate) fn split_owned<T>(mut v: Vec<T>, plan: &[Range<usize>]) -> Vec<Vec<T>> {
    debug_assert_eq!(plan.last().map_or(0, |r| r.end), v.len());

    // Peel from the back so each split_off only moves its own tail.
    let mut out: Vec<Vec<T>> = Vec::with_capacity(plan.len());
    for r in plan.iter().rev() {
        out.push(v.split_off(r.start));
    }
    out.reverse();
    out
}
