//! TIDAL Favorites and Play Queue Library
//!
//! This library loads a user's TIDAL favorites and keeps a local play queue.
//! Its centerpiece is a bounded-concurrency pagination helper that fetches
//! offset/limit pages in parallel and reassembles them in order.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `logging` - Tracing subscriber setup
//! - `management` - Play queue and favorites caches
//! - `pagination` - Parallel offset/limit fetching with ordered merge
//! - `tidal` - TIDAL REST API client
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use tidalplayer::{config, pagination::FetchOptions, tidal::FavoritesClient, types::*};
//!
//! #[tokio::main]
//! async fn main() -> tidalplayer::Res<()> {
//!     config::load_env().await?;
//!     let client = FavoritesClient::from_env()?;
//!     let report = client
//!         .paginated(FavoriteKind::Tracks, PageQuery::default(), &FetchOptions::default())
//!         .await?;
//!     println!("{} tracks", report.items.len());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod logging;
pub mod management;
pub mod pagination;
pub mod tidal;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern at the application edge
/// using a boxed dynamic error trait object. Library modules return their
/// own error enums, which convert into this via `?`.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching {} favorites...", kind);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Cached {} tracks", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for fatal errors at the command-line edge; library code returns
/// errors instead.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("{} pages could not be fetched", failed);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
