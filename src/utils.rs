use std::time::Duration;

use chrono::{DateTime, Local, Utc};

use crate::{
    pagination::FetchOptions,
    types::{Favorite, FavoriteTableRow, QueueTableRow},
};

/// Formats a track length in seconds as `m:ss`, or `h:mm:ss` past an hour.
pub fn format_duration(seconds: u64) -> String {
    let (hours, minutes, secs) = (seconds / 3600, (seconds % 3600) / 60, seconds % 60);
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

pub fn favorite_rows(favorites: &[Favorite]) -> Vec<FavoriteTableRow> {
    favorites
        .iter()
        .map(|f| FavoriteTableRow {
            name: f.name.clone(),
            artist: f.artist.clone().unwrap_or_default(),
            duration: f.duration.map(format_duration).unwrap_or_default(),
            id: f.id.clone(),
        })
        .collect()
}

pub fn queue_rows(tracks: &[String], current: Option<usize>) -> Vec<QueueTableRow> {
    tracks
        .iter()
        .enumerate()
        .map(|(position, id)| QueueTableRow {
            position,
            track: id.clone(),
            playing: if current == Some(position) {
                "▶".to_string()
            } else {
                String::new()
            },
        })
        .collect()
}

/// Applies command-line overrides on top of the configured fetch options.
pub fn merge_fetch_options(
    base: FetchOptions,
    chunk_size: Option<usize>,
    concurrency: Option<usize>,
    timeout_secs: Option<u64>,
) -> FetchOptions {
    FetchOptions {
        chunk_size: chunk_size.unwrap_or(base.chunk_size),
        concurrency: concurrency.unwrap_or(base.concurrency),
        chunk_timeout: timeout_secs.map(Duration::from_secs).or(base.chunk_timeout),
    }
}
