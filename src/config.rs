//! Configuration management for tidalplayer.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Values that have a sensible default fall back to it;
//! values that identify the user or authorize requests are required and reported
//! as errors when missing.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf, time::Duration};

use crate::pagination::{DEFAULT_CHUNK_SIZE, DEFAULT_CONCURRENCY, FetchOptions};

pub const DEFAULT_API_URL: &str = "https://api.tidal.com/v1";
pub const DEFAULT_API_V2_URL: &str = "https://api.tidal.com/v2";
pub const DEFAULT_COUNTRY_CODE: &str = "US";
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Directory holding the `.env` file, caches and the persisted queue.
///
/// - Linux: `~/.local/share/tidalplayer`
/// - macOS: `~/Library/Application Support/tidalplayer`
/// - Windows: `%LOCALAPPDATA%/tidalplayer`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("tidalplayer");
    path
}

/// Loads environment variables from `.env` in the local data directory.
///
/// Creates the directory when it doesn't exist. A missing `.env` file is not
/// an error; the process environment is used as is.
///
/// # Example
///
/// ```
/// if let Err(e) = tidalplayer::config::load_env().await {
///     eprintln!("Configuration error: {}", e);
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    let dir = data_dir();
    async_fs::create_dir_all(&dir)
        .await
        .map_err(|e| e.to_string())?;

    let path = dir.join(".env");
    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn required(key: &str) -> Result<String, String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(format!("{} must be set", key)),
    }
}

fn parsed<T: std::str::FromStr>(key: &str, default: T) -> Result<T, String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<T>()
            .map_err(|_| format!("{} has an invalid value: {}", key, value)),
        _ => Ok(default),
    }
}

/// Base URL of the TIDAL v1 API, e.g. `https://api.tidal.com/v1`.
pub fn tidal_api_url() -> String {
    env::var("TIDAL_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Base URL of the TIDAL v2 API, used for playlist folders.
pub fn tidal_api_v2_url() -> String {
    env::var("TIDAL_API_V2_URL").unwrap_or_else(|_| DEFAULT_API_V2_URL.to_string())
}

/// The TIDAL user id whose favorites are read.
pub fn tidal_user_id() -> Result<String, String> {
    required("TIDAL_USER_ID")
}

/// Country code sent with every request; it affects availability.
pub fn tidal_country_code() -> String {
    env::var("TIDAL_COUNTRY_CODE").unwrap_or_else(|_| DEFAULT_COUNTRY_CODE.to_string())
}

/// Bearer token for API requests. Obtaining it is left to the user.
pub fn tidal_access_token() -> Result<String, String> {
    required("TIDAL_ACCESS_TOKEN")
}

/// Filter directive for the tracing subscriber, e.g. `info` or `tidalplayer=debug`.
pub fn log_filter() -> String {
    env::var("TIDALPLAYER_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string())
}

/// Pagination settings from `TIDALPLAYER_CHUNK_SIZE`, `TIDALPLAYER_CONCURRENCY`
/// and `TIDALPLAYER_CHUNK_TIMEOUT` (seconds).
pub fn fetch_options() -> Result<FetchOptions, String> {
    let chunk_size = parsed("TIDALPLAYER_CHUNK_SIZE", DEFAULT_CHUNK_SIZE)?;
    let concurrency = parsed("TIDALPLAYER_CONCURRENCY", DEFAULT_CONCURRENCY)?;
    let timeout_secs: Option<u64> = match env::var("TIDALPLAYER_CHUNK_TIMEOUT") {
        Ok(value) if !value.trim().is_empty() => Some(
            value
                .trim()
                .parse()
                .map_err(|_| format!("TIDALPLAYER_CHUNK_TIMEOUT has an invalid value: {}", value))?,
        ),
        _ => None,
    };

    let options = FetchOptions {
        chunk_size,
        concurrency,
        chunk_timeout: timeout_secs.map(Duration::from_secs),
    };
    options.validate().map_err(|e| e.to_string())?;
    Ok(options)
}
