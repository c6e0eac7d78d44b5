use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

use crate::{config, types::Queue};

/// Change notifications emitted by [`QueueManager`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueEvent {
    Size(usize),
    CurrentTrack { id: String, index: usize },
    Finished,
    Unfinished,
    Cleared,
    Contains(String),
}

/// Receiver of queue notifications. Delivery is fire-and-forget.
pub trait QueueSink {
    fn notify(&self, event: QueueEvent);
}

impl QueueSink for UnboundedSender<QueueEvent> {
    fn notify(&self, event: QueueEvent) {
        // a closed receiver just means nobody is listening anymore
        let _ = self.send(event);
    }
}

#[derive(Debug, Error)]
pub enum QueueError {
    #[error("position {index} is out of range for a queue of {len} tracks")]
    OutOfRange { index: usize, len: usize },
    #[error("the queue has no current track")]
    Empty,
    #[error("queue file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("queue file is invalid: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Play queue: an ordered list of track ids and a cursor into it.
///
/// Every change is announced to the sink `S` as [`QueueEvent`]s. The cursor
/// is `None` until a track is played; "finished" means the cursor sits on the
/// last track.
///
/// # Example
///
/// ```
/// let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
/// let mut queue = QueueManager::new(tx);
/// queue.append("123");
/// queue.play("456");
/// assert_eq!(queue.current_track(), Some("456"));
/// ```
pub struct QueueManager<S: QueueSink> {
    queue: Queue,
    sink: S,
}

impl<S: QueueSink> QueueManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            queue: Queue::default(),
            sink,
        }
    }

    /// Wraps a stored queue. A cursor past the end is dropped.
    pub fn with_queue(queue: Queue, sink: S) -> Self {
        let current = queue.current.filter(|&i| i < queue.tracks.len());
        Self {
            queue: Queue {
                tracks: queue.tracks,
                current,
            },
            sink,
        }
    }

    /// Loads the queue from `queue.json` in the data directory.
    ///
    /// # Returns
    ///
    /// [`QueueError::Io`] when the file is missing or unreadable,
    /// [`QueueError::Serde`] when it is not a valid queue.
    pub async fn load(sink: S) -> Result<Self, QueueError> {
        Self::load_from(&Self::queue_path(), sink).await
    }

    pub async fn load_from(path: &Path, sink: S) -> Result<Self, QueueError> {
        let content = async_fs::read_to_string(path).await?;
        let queue: Queue = serde_json::from_str(&content)?;
        Ok(Self::with_queue(queue, sink))
    }

    /// Saves the queue to `queue.json` in the data directory.
    pub async fn persist(&self) -> Result<(), QueueError> {
        self.persist_to(&Self::queue_path()).await
    }

    pub async fn persist_to(&self, path: &Path) -> Result<(), QueueError> {
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.queue)?;
        async_fs::write(path, json).await?;
        Ok(())
    }

    /// Adds a track at the end of the queue.
    pub fn append(&mut self, id: impl Into<String>) {
        self.queue.tracks.push(id.into());
        self.sink.notify(QueueEvent::Size(self.len()));
        self.notify_progress();
    }

    /// Queues a track right after the current one without moving the cursor.
    pub fn insert_next(&mut self, id: impl Into<String>) {
        let at = self.next_slot();
        self.queue.tracks.insert(at, id.into());
        self.sink.notify(QueueEvent::Size(self.len()));
        self.notify_progress();
        self.notify_current();
    }

    /// Queues a track right after the current one and makes it current.
    pub fn play(&mut self, id: impl Into<String>) {
        let at = self.next_slot();
        self.queue.tracks.insert(at, id.into());
        self.queue.current = Some(at);
        self.sink.notify(QueueEvent::Size(self.len()));
        self.notify_current();
        self.notify_progress();
    }

    /// Jumps to `position`.
    pub fn play_position(&mut self, position: usize) -> Result<&str, QueueError> {
        if position >= self.len() {
            return Err(QueueError::OutOfRange {
                index: position,
                len: self.len(),
            });
        }

        self.queue.current = Some(position);
        self.notify_current();
        self.notify_progress();
        Ok(&self.queue.tracks[position])
    }

    /// Advances to the next track.
    ///
    /// On the last track the cursor stays put, `Finished` is emitted and
    /// `None` is returned.
    pub fn next(&mut self) -> Option<&str> {
        if self.is_finished() || self.queue.tracks.is_empty() {
            self.sink.notify(QueueEvent::Finished);
            return None;
        }

        let index = self.next_slot();
        self.queue.current = Some(index);
        self.notify_current();
        self.notify_progress();
        Some(&self.queue.tracks[index])
    }

    /// Steps back one track. On the first track it restarts that track.
    pub fn previous(&mut self) -> Result<&str, QueueError> {
        let index = match self.queue.current {
            Some(current) => current.saturating_sub(1),
            None => return Err(QueueError::Empty),
        };

        self.queue.current = Some(index);
        self.notify_current();
        self.notify_progress();
        Ok(&self.queue.tracks[index])
    }

    /// Announces the current track again.
    pub fn restart(&self) -> Result<&str, QueueError> {
        let index = self.queue.current.ok_or(QueueError::Empty)?;
        self.notify_current();
        Ok(&self.queue.tracks[index])
    }

    /// Replays the whole queue to the sink.
    pub fn list(&self) {
        self.sink.notify(QueueEvent::Cleared);
        for id in &self.queue.tracks {
            self.sink.notify(QueueEvent::Contains(id.clone()));
        }
    }

    /// Removes all tracks and resets the cursor.
    pub fn clear(&mut self) {
        self.queue.tracks.clear();
        self.queue.current = None;
        self.sink.notify(QueueEvent::Cleared);
    }

    /// Track id at `index`.
    ///
    /// # Arguments
    ///
    /// * `index` - Zero-based queue position
    ///
    /// # Returns
    ///
    /// The id, or [`QueueError::OutOfRange`] when `index` is past the end.
    pub fn track_id(&self, index: usize) -> Result<&str, QueueError> {
        self.queue
            .tracks
            .get(index)
            .map(String::as_str)
            .ok_or(QueueError::OutOfRange {
                index,
                len: self.len(),
            })
    }

    pub fn current_index(&self) -> Option<usize> {
        self.queue.current
    }

    /// Id of the track under the cursor.
    pub fn current_track(&self) -> Option<&str> {
        self.queue
            .current
            .and_then(|i| self.queue.tracks.get(i))
            .map(String::as_str)
    }

    pub fn tracks(&self) -> &[String] {
        &self.queue.tracks
    }

    pub fn len(&self) -> usize {
        self.queue.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.tracks.is_empty()
    }

    /// True when the cursor is on the last track.
    pub fn is_finished(&self) -> bool {
        matches!(self.queue.current, Some(i) if i + 1 == self.len())
    }

    fn next_slot(&self) -> usize {
        self.queue.current.map_or(0, |i| i + 1)
    }

    fn notify_current(&self) {
        if let Some(index) = self.queue.current {
            self.sink.notify(QueueEvent::CurrentTrack {
                id: self.queue.tracks[index].clone(),
                index,
            });
        }
    }

    fn notify_progress(&self) {
        if self.is_finished() {
            self.sink.notify(QueueEvent::Finished);
        } else {
            self.sink.notify(QueueEvent::Unfinished);
        }
    }

    fn queue_path() -> PathBuf {
        let mut path = config::data_dir();
        path.push("queue.json");
        path
    }
}
