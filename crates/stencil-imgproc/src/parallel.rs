use std::ops::Range;

use thiserror::Error;

use stencil_image::Image;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),
}

/// Normalize a requested worker count to `[1, num_rows]`.
///
/// A worker never gets an empty row range, so asking for more threads than rows yields one
/// thread per row. An image without rows still runs on a single worker.
///
/// # Examples
///
/// ```
/// use stencil_imgproc::parallel::num_workers;
///
/// assert_eq!(num_workers(10, 0), 1);
/// assert_eq!(num_workers(10, 4), 4);
/// assert_eq!(num_workers(3, 8), 3);
/// ```
pub fn num_workers(num_rows: usize, num_threads: usize) -> usize {
    num_threads.clamp(1, num_rows.max(1))
}

/// Split `[0, num_rows)` into contiguous, disjoint row ranges, one per worker.
///
/// Range `t` spans `[t * num_rows / n, (t + 1) * num_rows / n)` where `n` is the
/// normalized worker count (see [`num_workers`]). The ranges cover every row exactly once
/// and their lengths differ by at most one.
///
/// # Arguments
///
/// * `num_rows` - The number of rows to split.
/// * `num_threads` - The requested number of workers.
///
/// # Examples
///
/// ```
/// use stencil_imgproc::parallel::row_ranges;
///
/// assert_eq!(row_ranges(10, 3), vec![0..3, 3..6, 6..10]);
/// assert_eq!(row_ranges(2, 5), vec![0..1, 1..2]);
/// ```
pub fn row_ranges(num_rows: usize, num_threads: usize) -> Vec<Range<usize>> {
    let n = num_workers(num_rows, num_threads);
    (0..n)
        .map(|t| (t * num_rows) / n..((t + 1) * num_rows) / n)
        .collect()
}

/// Run `f` over disjoint row ranges of `dst`, one OS thread per range.
///
/// A fresh thread pool with exactly one thread per range is built for the call. Each
/// worker receives its row range and the mutable slice of `dst` holding exactly those
/// rows, so no two workers can touch the same sample. The call returns only after every
/// worker has finished.
///
/// # Arguments
///
/// * `dst` - The destination image, written by the workers.
/// * `num_threads` - The requested number of workers, normalized with [`num_workers`].
/// * `f` - The work to run for each `(row_range, rows)` pair.
///
/// # Errors
///
/// Returns [`ParallelError::BuildError`] if the thread pool cannot be created. In that
/// case no worker has run and `dst` is untouched.
pub fn par_iter_row_ranges<T, const C: usize, F>(
    dst: &mut Image<T, C>,
    num_threads: usize,
    f: F,
) -> Result<(), ParallelError>
where
    T: Send,
    F: Fn(Range<usize>, &mut [T]) + Send + Sync,
{
    let row_stride = dst.row_stride();
    let ranges = row_ranges(dst.rows(), num_threads);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(ranges.len())
        .thread_name(|i| format!("stencil-worker-{i}"))
        .build()
        .map_err(|e| ParallelError::BuildError(e.to_string()))?;

    log::debug!(
        "splitting {} rows across {} workers: {:?}",
        dst.rows(),
        ranges.len(),
        ranges
    );

    let f = &f;
    let mut rest = dst.as_slice_mut();
    pool.scope(move |s| {
        for range in ranges {
            let (rows, tail) = std::mem::take(&mut rest).split_at_mut(range.len() * row_stride);
            rest = tail;
            s.spawn(move |_| f(range, rows));
        }
    });

    Ok(())
}
