//! # CLI Module
//!
//! Command-line layer for tidalplayer. Each command loads what it needs from
//! configuration and the local caches, delegates to the [`crate::tidal`] and
//! [`crate::management`] modules, and reports to the terminal with the
//! crate's console macros.
//!
//! ## Commands
//!
//! - [`update_favorites`] - Fetch a favorites collection from TIDAL into the cache
//! - [`list_favorites`] - Print a cached collection, optionally filtered
//! - [`info`] - Summarize cached collections and the play queue
//! - [`queue`] - Inspect and change the persisted play queue
//!
//! ## Data Flow
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! Management Layer (Caches, Queue)
//!     ↓
//! TIDAL Layer (Favorites client, pagination)
//!     ↓
//! Network Layer (HTTP Requests)
//! ```
//!
//! ## Usage Patterns
//!
//! ```bash
//! tidalplayer favorites tracks update      # Cache all favorite tracks
//! tidalplayer favorites tracks --search x  # Find cached tracks
//! tidalplayer queue play 12345             # Play a track next
//! tidalplayer info                         # Cache status
//! ```

mod favorites;
mod info;
mod queue;

pub use favorites::list_favorites;
pub use favorites::update_favorites;
pub use info::info;
pub use queue::QueueAction;
pub use queue::queue;
