use std::time::Duration;

use thiserror::Error;

/// Invalid arguments handed to the pagination helper.
///
/// Raised before any chunk is dispatched; never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("chunk size must be greater than zero")]
    ZeroChunkSize,
    #[error("concurrency must be at least one")]
    ZeroConcurrency,
    #[error("total count must not be negative, got {0}")]
    NegativeTotal(i64),
}

/// Why a single chunk produced no items.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChunkFailure {
    #[error("{0}")]
    Failed(String),
    #[error("timed out after {0:?}")]
    TimedOut(Duration),
}

/// A page fetch that failed inside the worker pool.
///
/// Carries everything needed to replay the call: the fetcher identity, the
/// `limit`/`offset` pair and the forwarded arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to run {fetcher}(limit={limit}, offset={offset}, args={args}): {reason}")]
pub struct ChunkFetchError {
    pub fetcher: String,
    pub limit: usize,
    pub offset: usize,
    pub args: String,
    pub reason: ChunkFailure,
}
