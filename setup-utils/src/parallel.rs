//! Fan-out / fan-in helpers used by every batch operation of the ceremony.
//!
//! Work over `[0, n)` is split into contiguous, disjoint ranges, one per worker.
//! Workers are spawned into a `rayon` scope, so the call only returns once every
//! range has been processed, and a panic in any worker is resumed in the caller.

use std::ops::Range;

/// Returns the number of workers used when no explicit limit is given.
pub fn default_workers() -> usize {
    rayon::current_num_threads()
}

/// Splits `[0, n)` into `min(workers, n)` contiguous ranges covering every index once.
///
/// When `n` is not a multiple of the number of ranges, the remainder is handed out
/// one index at a time to the earliest ranges, e.g. `n = 10, workers = 4` gives
/// `[0, 3), [3, 6), [6, 8), [8, 10)`.
pub fn partition(n: usize, workers: usize) -> Vec<Range<usize>> {
    let tasks = workers.max(1).min(n);
    if tasks == 0 {
        return vec![];
    }

    let per_task = n / tasks;
    let mut extra = n % tasks;

    let mut ranges = Vec::with_capacity(tasks);
    let mut start = 0;
    for _ in 0..tasks {
        let mut end = start + per_task;
        if extra > 0 {
            end += 1;
            extra -= 1;
        }
        ranges.push(start..end);
        start = end;
    }
    ranges
}

/// Runs `work(start, end)` over each range of the partition of `[0, n)` in parallel.
///
/// `max_workers` overrides the number of ranges, which otherwise defaults to the size
/// of the thread pool. Callers mutating shared state from `work` must only touch
/// indices inside the range they were given.
pub fn parallelize<W>(n: usize, work: W, max_workers: Option<usize>)
where
    W: Fn(usize, usize) + Sync,
{
    let ranges = partition(n, max_workers.unwrap_or_else(default_workers));
    let work = &work;
    rayon::scope(|scope| {
        for range in ranges {
            scope.spawn(move |_| work(range.start, range.end));
        }
    });
}

/// Runs `work(offset, chunk)` in parallel over disjoint mutable chunks of `elements`.
///
/// The chunks follow [`partition`], and `offset` is the index of the first element of
/// `chunk` inside `elements`.
pub fn parallelize_slice_mut<T, W>(elements: &mut [T], work: W, max_workers: Option<usize>)
where
    T: Send,
    W: Fn(usize, &mut [T]) + Sync,
{
    let ranges = partition(elements.len(), max_workers.unwrap_or_else(default_workers));
    let work = &work;
    rayon::scope(|scope| {
        let mut rest = elements;
        for range in ranges {
            let (chunk, tail) = std::mem::take(&mut rest).split_at_mut(range.len());
            rest = tail;
            scope.spawn(move |_| work(range.start, chunk));
        }
    });
}
