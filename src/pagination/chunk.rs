use super::error::ConfigurationError;

/// One `(offset, limit)` unit of pagination work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Chunk {
    pub offset: usize,
    pub limit: usize,
}

impl Chunk {
    /// Global index of the `position`-th item returned for this chunk.
    pub fn global_index(&self, position: usize) -> usize {
        self.offset + position
    }
}

/// Partitions a known total item count into fixed-size offset chunks.
///
/// Offsets run `0, chunk_size, 2 * chunk_size, ...` while strictly below the
/// total. Every chunk asks for `chunk_size` items, so the last one may ask
/// for more than remain; short pages are the fetcher's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkScheduler {
    total_count: usize,
    chunk_size: usize,
}

impl ChunkScheduler {
    /// Creates a scheduler for `total_count` items in chunks of `chunk_size`.
    ///
    /// # Arguments
    ///
    /// * `total_count` - Number of items in the collection, as reported by the API
    /// * `chunk_size` - Items requested per fetch call
    ///
    /// # Returns
    ///
    /// The scheduler, or [`ConfigurationError`] when `chunk_size` is zero or
    /// `total_count` is negative.
    ///
    /// # Example
    ///
    /// ```
    /// let scheduler = ChunkScheduler::new(120, 50)?;
    /// assert_eq!(scheduler.offsets().collect::<Vec<_>>(), vec![0, 50, 100]);
    /// ```
    pub fn new(total_count: i64, chunk_size: usize) -> Result<Self, ConfigurationError> {
        if chunk_size == 0 {
            return Err(ConfigurationError::ZeroChunkSize);
        }
        let total_count =
            usize::try_from(total_count).map_err(|_| ConfigurationError::NegativeTotal(total_count))?;

        Ok(Self {
            total_count,
            chunk_size,
        })
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Number of chunks, i.e. fetch calls needed to cover the total.
    pub fn len(&self) -> usize {
        self.total_count.div_ceil(self.chunk_size)
    }

    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    /// Chunk start offsets in ascending order.
    pub fn offsets(&self) -> impl Iterator<Item = usize> + use<> {
        (0..self.total_count).step_by(self.chunk_size)
    }

    /// Chunks in generation order; this is also the dispatch order.
    pub fn chunks(&self) -> impl Iterator<Item = Chunk> + use<> {
        let limit = self.chunk_size;
        self.offsets().map(move |offset| Chunk { offset, limit })
    }
}
