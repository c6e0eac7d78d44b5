use super::{
    error::ChunkFetchError,
    pool::{ChunkOutcome, IndexedItem},
};

/// Items reassembled in global order, plus the chunks that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchReport<T> {
    pub items: Vec<T>,
    pub failures: Vec<ChunkFetchError>,
}

impl<T> Default for FetchReport<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            failures: Vec::new(),
        }
    }
}

impl<T> FetchReport<T> {
    /// True when no chunk failed. Short pages do not count as failures.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed_offsets(&self) -> Vec<usize> {
        self.failures.iter().map(|f| f.offset).collect()
    }

    /// Applies `transform` to every item, in order, on the calling task.
    pub fn map<R, M>(self, transform: M) -> FetchReport<R>
    where
        M: FnMut(T) -> R,
    {
        FetchReport {
            items: self.items.into_iter().map(transform).collect(),
            failures: self.failures,
        }
    }
}

/// Flattens chunk outcomes into one sequence ordered by global index.
///
/// Outcomes may arrive in any completion order. Failed chunks contribute no
/// items. Indices at or beyond `total_count` are dropped, and when two items
/// claim the same index the one from the lower chunk offset wins.
pub fn merge<T>(mut outcomes: Vec<ChunkOutcome<T>>, total_count: usize) -> FetchReport<T> {
    outcomes.sort_by_key(|outcome| outcome.chunk().offset);

    let mut indexed: Vec<IndexedItem<T>> = Vec::new();
    let mut failures = Vec::new();
    for outcome in outcomes {
        match outcome {
            ChunkOutcome::Fetched { items, .. } => indexed.extend(items),
            ChunkOutcome::Failed { error, .. } => failures.push(error),
        }
    }

    indexed.sort_by_key(|(index, _)| *index);

    let before = indexed.len();
    indexed.retain(|(index, _)| *index < total_count);
    indexed.dedup_by_key(|(index, _)| *index);
    if indexed.len() != before {
        tracing::warn!(
            dropped = before - indexed.len(),
            total_count,
            "Dropped out-of-range or duplicate items while merging pages"
        );
    }

    FetchReport {
        items: indexed.into_iter().map(|(_, item)| item).collect(),
        failures,
    }
}
