use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use rayon::prelude::*;
use thiserror::Error;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The row stride must be valid.
    #[error("row stride must be > 0")]
    InvalidRowStride(usize),

    /// The pass was abandoned through its cancellation token.
    #[error("operation was cancelled")]
    Cancelled,
}

/// Controls how parallel operations are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool to process rows in parallel.
    #[default]
    ParallelRows,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    Fixed(usize),
}

/// A cloneable flag used to abandon a long running pass.
///
/// Clones share the same flag, so one clone can be handed to a signal handler while
/// another is polled by the worker loop.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// Create a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns true once [`CancellationToken::cancel`] has been called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Apply `f(row_index, row)` to every row of `dst`.
///
/// `dst` is split into disjoint rows of `stride` elements, so workers never share output.
/// The token is polled before each row; once it trips the remaining rows are skipped and
/// [`ParallelError::Cancelled`] is returned.
///
/// # Arguments
///
/// * `dst` - The destination slice, `rows * stride` elements long.
/// * `stride` - The number of elements in one row.
/// * `strategy` - The execution strategy.
/// * `cancel` - Optional cancellation token.
/// * `f` - The operation to run on each row.
pub fn par_iter_rows_indexed<T, F>(
    dst: &mut [T],
    stride: usize,
    strategy: ExecutionStrategy,
    cancel: Option<&CancellationToken>,
    f: F,
) -> Result<(), ParallelError>
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    if stride == 0 {
        return Err(ParallelError::InvalidRowStride(stride));
    }

    let cancelled = || cancel.is_some_and(|c| c.is_cancelled());
    let run_row = |(row, chunk): (usize, &mut [T])| {
        if !cancelled() {
            f(row, chunk);
        }
    };

    match strategy {
        ExecutionStrategy::Serial => {
            dst.chunks_exact_mut(stride).enumerate().for_each(run_row);
        }
        ExecutionStrategy::ParallelRows => {
            dst.par_chunks_exact_mut(stride)
                .enumerate()
                .for_each(run_row);
        }
        ExecutionStrategy::Fixed(n) => {
            if n == 0 {
                return Err(ParallelError::InvalidThreadCount(n));
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;

            pool.install(|| {
                dst.par_chunks_exact_mut(stride)
                    .enumerate()
                    .for_each(run_row);
            });
        }
    }

    if cancelled() {
        return Err(ParallelError::Cancelled);
    }

    Ok(())
}
