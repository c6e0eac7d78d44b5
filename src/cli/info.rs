use tabled::Table;

use crate::{
    management::{FavoritesCache, QueueEvent, QueueManager, QueueSink},
    types::{FavoriteKind, InfoTableRow},
    utils,
};

struct Silent;

impl QueueSink for Silent {
    fn notify(&self, _event: QueueEvent) {}
}

/// Shows what is cached locally: favorites per kind and the play queue.
pub async fn info() {
    let mut rows = Vec::new();
    for kind in FavoriteKind::ALL {
        let row = match FavoritesCache::load(kind).await {
            Ok(cache) => InfoTableRow {
                kind: kind.to_string(),
                cached: cache.count(),
                updated: utils::format_timestamp(cache.updated_at()),
            },
            Err(_) => InfoTableRow {
                kind: kind.to_string(),
                cached: 0,
                updated: "never".to_string(),
            },
        };
        rows.push(row);
    }

    println!("{}", Table::new(rows));

    match QueueManager::load(Silent).await {
        Ok(queue) => match queue.current_track() {
            Some(track) => crate::info!("Queue: {} track(s), playing {}", queue.len(), track),
            None => crate::info!("Queue: {} track(s)", queue.len()),
        },
        Err(_) => crate::info!("Queue: empty"),
    }
}
