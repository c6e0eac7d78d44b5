use std::{
    fmt::{Debug, Display},
    future::Future,
    time::Duration,
};

use futures::stream::{self, StreamExt};
use tokio::time::timeout;

use super::{
    chunk::Chunk,
    error::{ChunkFailure, ChunkFetchError, ConfigurationError},
};

/// An item paired with its position in the full logical collection.
pub type IndexedItem<T> = (usize, T);

/// What a single chunk produced.
///
/// A `Failed` chunk merges as if it had returned nothing; the error is kept
/// so callers can tell which offsets are missing.
#[derive(Debug)]
pub enum ChunkOutcome<T> {
    Fetched {
        chunk: Chunk,
        items: Vec<IndexedItem<T>>,
    },
    Failed {
        chunk: Chunk,
        error: ChunkFetchError,
    },
}

impl<T> ChunkOutcome<T> {
    pub fn chunk(&self) -> Chunk {
        match self {
            ChunkOutcome::Fetched { chunk, .. } | ChunkOutcome::Failed { chunk, .. } => *chunk,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ChunkOutcome::Failed { .. })
    }
}

/// Runs one fetch per chunk with a ceiling on how many are in flight.
///
/// Chunks are dispatched in the order they are given and may complete in
/// any order. Each chunk is attempted exactly once. A failing fetch is
/// logged and turned into [`ChunkOutcome::Failed`]; siblings keep running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundedWorkerPool {
    concurrency: usize,
    chunk_timeout: Option<Duration>,
}

impl BoundedWorkerPool {
    pub fn new(concurrency: usize) -> Result<Self, ConfigurationError> {
        if concurrency == 0 {
            return Err(ConfigurationError::ZeroConcurrency);
        }

        Ok(Self {
            concurrency,
            chunk_timeout: None,
        })
    }

    /// Bounds every fetch call; a call that runs longer counts as failed.
    pub fn with_timeout(mut self, chunk_timeout: Option<Duration>) -> Self {
        self.chunk_timeout = chunk_timeout;
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Fetches every chunk and returns the outcomes in completion order.
    ///
    /// `fetch` is called as `fetch(limit, offset, args)` with a clone of
    /// `args` for each chunk.
    pub async fn run<I, F, Fut, A, T, E>(&self, chunks: I, fetch: F, args: A) -> Vec<ChunkOutcome<T>>
    where
        I: IntoIterator<Item = Chunk>,
        F: Fn(usize, usize, A) -> Fut,
        Fut: Future<Output = Result<Vec<T>, E>>,
        A: Clone + Debug,
        E: Display,
    {
        let fetcher = std::any::type_name::<F>();
        let fetch = &fetch;
        let args = &args;

        stream::iter(chunks)
            .map(|chunk| async move { self.run_chunk(fetcher, chunk, fetch, args.clone()).await })
            .buffer_unordered(self.concurrency)
            .collect()
            .await
    }

    async fn run_chunk<F, Fut, A, T, E>(
        &self,
        fetcher: &str,
        chunk: Chunk,
        fetch: &F,
        args: A,
    ) -> ChunkOutcome<T>
    where
        F: Fn(usize, usize, A) -> Fut,
        Fut: Future<Output = Result<Vec<T>, E>>,
        A: Debug,
        E: Display,
    {
        let described_args = format!("{:?}", args);
        tracing::debug!(
            fetcher,
            limit = chunk.limit,
            offset = chunk.offset,
            "Dispatching chunk"
        );

        let call = fetch(chunk.limit, chunk.offset, args);
        let result = match self.chunk_timeout {
            Some(limit) => match timeout(limit, call).await {
                Ok(res) => res.map_err(|e| ChunkFailure::Failed(e.to_string())),
                Err(_) => Err(ChunkFailure::TimedOut(limit)),
            },
            None => call.await.map_err(|e| ChunkFailure::Failed(e.to_string())),
        };

        match result {
            Ok(mut items) => {
                if items.len() > chunk.limit {
                    tracing::warn!(
                        fetcher,
                        limit = chunk.limit,
                        offset = chunk.offset,
                        returned = items.len(),
                        "Fetcher returned more items than requested, extra items dropped"
                    );
                    items.truncate(chunk.limit);
                }

                ChunkOutcome::Fetched {
                    chunk,
                    items: items
                        .into_iter()
                        .enumerate()
                        .map(|(position, item)| (chunk.global_index(position), item))
                        .collect(),
                }
            }
            Err(reason) => {
                tracing::error!(
                    fetcher,
                    limit = chunk.limit,
                    offset = chunk.offset,
                    args = %described_args,
                    error = %reason,
                    "Failed to fetch chunk"
                );

                ChunkOutcome::Failed {
                    chunk,
                    error: ChunkFetchError {
                        fetcher: fetcher.to_string(),
                        limit: chunk.limit,
                        offset: chunk.offset,
                        args: described_args,
                        reason,
                    },
                }
            }
        }
    }
}
