use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    error,
    management::FavoritesCache,
    pagination::FetchOptions,
    success,
    tidal::FavoritesClient,
    types::{FavoriteKind, PageQuery},
    utils, warning,
};

/// Fetches every favorite of `kind` from TIDAL and replaces the local cache.
///
/// Pages are fetched in parallel according to `options`. Pages that fail are
/// reported but do not stop the update; the cache then holds what could be
/// fetched.
///
/// # Example Usage
///
/// ```bash
/// tidalplayer favorites tracks update --order date --direction desc
/// tidalplayer favorites albums update --concurrency 4 --timeout 30
/// ```
pub async fn update_favorites(kind: FavoriteKind, query: PageQuery, options: FetchOptions) {
    let client = match FavoritesClient::from_env() {
        Ok(client) => client,
        Err(e) => error!(
            "Cannot create TIDAL client. Check your .env configuration.\n Error: {}",
            e
        ),
    };

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Fetching favorite {}...", kind));
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let report = match client.paginated(kind, query, &options).await {
        Ok(report) => report,
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to fetch favorite {}. Err: {}", kind, e);
        }
    };
    pb.finish_and_clear();

    if !report.is_complete() {
        warning!(
            "{} page(s) of {} could not be fetched (offsets {:?}); the cache is incomplete.",
            report.failures.len(),
            kind,
            report.failed_offsets()
        );
    }

    let count = report.items.len();
    let cache = FavoritesCache::new(kind, report.items);
    if let Err(e) = cache.persist().await {
        error!("Failed to cache favorite {}. Err: {}", kind, e);
    }

    success!("Cached {} favorite {}!", count, kind);
}

/// Prints the cached favorites of `kind`, optionally filtered by `search`.
pub async fn list_favorites(kind: FavoriteKind, search: Option<String>) {
    let cache = match FavoritesCache::load(kind).await {
        Ok(cache) => cache,
        Err(e) => {
            warning!(
                "Failed to load cached {}. Run tidalplayer favorites {} update.\n Err: {}",
                kind,
                kind,
                e
            );
            return;
        }
    };

    let favorites = match search {
        Some(term) => cache.search(&term),
        None => cache.items().to_vec(),
    };

    let table = Table::new(utils::favorite_rows(&favorites));
    println!("{}", table);
}
