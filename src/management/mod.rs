mod favorites;
mod queue;

pub use favorites::FavoritesCache;
pub use queue::QueueError;
pub use queue::QueueEvent;
pub use queue::QueueManager;
pub use queue::QueueSink;
