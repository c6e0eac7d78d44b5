//! # Pagination Module
//!
//! Bounded-concurrency fetch-and-merge for offset/limit REST collections.
//!
//! TIDAL collections are served in pages of at most 50 items. Given the total
//! number of items (usually read from a `limit=1` request first), this module
//! splits the range into chunks, fetches them concurrently with a fixed
//! ceiling, and reassembles one ordered list regardless of which page came
//! back first.
//!
//! ## Pipeline
//!
//! ```text
//! total_count ──► ChunkScheduler ──► BoundedWorkerPool ──► merge ──► transform
//!                 (offsets)          (fan-out, isolate)    (order)   (map)
//! ```
//!
//! ## Failure Policy
//!
//! Fetching is best effort. A page that errors (or exceeds the optional
//! per-chunk timeout) is logged with its `limit`, `offset` and arguments and
//! contributes nothing; all other pages still merge. Only invalid arguments
//! fail the call. Use [`fetch_all_report`] to learn which offsets are missing.
//!
//! ## Example
//!
//! ```rust,ignore
//! let options = FetchOptions::default();
//! let tracks = pagination::fetch_all(
//!     |limit, offset, order| client.page(FavoriteKind::Tracks, limit, offset, order),
//!     total,
//!     PageQuery::default(),
//!     &options,
//! )
//! .await?;
//! ```

mod chunk;
mod error;
mod merge;
mod pool;

use std::{
    fmt::{Debug, Display},
    future::Future,
    time::Duration,
};

pub use chunk::{Chunk, ChunkScheduler};
pub use error::{ChunkFailure, ChunkFetchError, ConfigurationError};
pub use merge::{FetchReport, merge};
pub use pool::{BoundedWorkerPool, ChunkOutcome, IndexedItem};

pub const DEFAULT_CHUNK_SIZE: usize = 50;
pub const DEFAULT_CONCURRENCY: usize = 2;

/// Tuning knobs for a paginated fetch.
///
/// `chunk_timeout` of `None` lets a fetch call run as long as it takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    pub chunk_size: usize,
    pub concurrency: usize,
    pub chunk_timeout: Option<Duration>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            concurrency: DEFAULT_CONCURRENCY,
            chunk_timeout: None,
        }
    }
}

impl FetchOptions {
    /// Checks the options before any chunk is dispatched.
    ///
    /// # Returns
    ///
    /// `Ok(())`, or the [`ConfigurationError`] for a zero `chunk_size` or a
    /// zero `concurrency`.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.chunk_size == 0 {
            return Err(ConfigurationError::ZeroChunkSize);
        }
        if self.concurrency == 0 {
            return Err(ConfigurationError::ZeroConcurrency);
        }
        Ok(())
    }
}

/// Fetches `total_count` items page by page and returns them in order.
pub async fn fetch_all<F, Fut, A, T, E>(
    fetch: F,
    total_count: i64,
    args: A,
    options: &FetchOptions,
) -> Result<Vec<T>, ConfigurationError>
where
    F: Fn(usize, usize, A) -> Fut,
    Fut: Future<Output = Result<Vec<T>, E>>,
    A: Clone + Debug,
    E: Display,
{
    fetch_all_with(fetch, total_count, args, std::convert::identity, options).await
}

/// Like [`fetch_all`], mapping every merged item through `transform`.
pub async fn fetch_all_with<F, Fut, A, T, E, R, M>(
    fetch: F,
    total_count: i64,
    args: A,
    transform: M,
    options: &FetchOptions,
) -> Result<Vec<R>, ConfigurationError>
where
    F: Fn(usize, usize, A) -> Fut,
    Fut: Future<Output = Result<Vec<T>, E>>,
    A: Clone + Debug,
    E: Display,
    M: FnMut(T) -> R,
{
    let report = fetch_all_report(fetch, total_count, args, transform, options).await?;
    Ok(report.items)
}

/// Like [`fetch_all_with`], also returning the chunks that failed.
pub async fn fetch_all_report<F, Fut, A, T, E, R, M>(
    fetch: F,
    total_count: i64,
    args: A,
    transform: M,
    options: &FetchOptions,
) -> Result<FetchReport<R>, ConfigurationError>
where
    F: Fn(usize, usize, A) -> Fut,
    Fut: Future<Output = Result<Vec<T>, E>>,
    A: Clone + Debug,
    E: Display,
    M: FnMut(T) -> R,
{
    options.validate()?;
    let scheduler = ChunkScheduler::new(total_count, options.chunk_size)?;
    let pool = BoundedWorkerPool::new(options.concurrency)?.with_timeout(options.chunk_timeout);

    tracing::debug!(
        total_count,
        chunks = scheduler.len(),
        concurrency = pool.concurrency(),
        "Starting paginated fetch"
    );

    let outcomes = pool.run(scheduler.chunks(), fetch, args).await;
    let report = merge(outcomes, scheduler.total_count());

    if !report.is_complete() {
        tracing::warn!(
            failed_offsets = ?report.failed_offsets(),
            fetched = report.items.len(),
            total_count,
            "Paginated fetch is incomplete"
        );
    }

    Ok(report.map(transform))
}
