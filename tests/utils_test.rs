use std::time::Duration;

use serde_json::json;
use serial_test::serial;
use tidalplayer::config;
use tidalplayer::management::FavoritesCache;
use tidalplayer::pagination::{ConfigurationError, FetchOptions};
use tidalplayer::types::*;
use tidalplayer::utils::*;

// Helper function to create a test favorite
fn create_test_favorite(id: &str, name: &str, artist: Option<&str>, duration: Option<u64>) -> Favorite {
    Favorite {
        id: id.to_string(),
        name: name.to_string(),
        artist: artist.map(str::to_string),
        duration,
    }
}

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(0), "0:00");
    assert_eq!(format_duration(59), "0:59");
    assert_eq!(format_duration(185), "3:05");
    // Past an hour the hours are shown
    assert_eq!(format_duration(3600), "1:00:00");
    assert_eq!(format_duration(3725), "1:02:05");
}

#[test]
fn test_merge_fetch_options_overrides() {
    let base = FetchOptions {
        chunk_size: 100,
        concurrency: 4,
        chunk_timeout: Some(Duration::from_secs(30)),
    };

    // Nothing given keeps the configured values
    let merged = merge_fetch_options(base, None, None, None);
    assert_eq!(merged, base);

    let merged = merge_fetch_options(base, Some(25), Some(1), Some(5));
    assert_eq!(merged.chunk_size, 25);
    assert_eq!(merged.concurrency, 1);
    assert_eq!(merged.chunk_timeout, Some(Duration::from_secs(5)));
}

#[test]
fn test_favorite_kind_parsing() {
    assert_eq!("tracks".parse::<FavoriteKind>().unwrap(), FavoriteKind::Tracks);
    assert_eq!(" Albums ".parse::<FavoriteKind>().unwrap(), FavoriteKind::Albums);
    assert_eq!("PLAYLISTS".parse::<FavoriteKind>().unwrap(), FavoriteKind::Playlists);

    let err = "mixes".parse::<FavoriteKind>().unwrap_err();
    assert!(err.contains("mixes"));

    for kind in FavoriteKind::ALL {
        assert_eq!(kind.to_string().parse::<FavoriteKind>().unwrap(), kind);
    }
}

#[test]
fn test_order_parsing() {
    assert_eq!("name".parse::<Order>().unwrap(), Order::Name);
    assert_eq!("release-date".parse::<Order>().unwrap(), Order::ReleaseDate);
    assert_eq!("RELEASE_DATE".parse::<Order>().unwrap(), Order::ReleaseDate);
    assert!("popularity".parse::<Order>().is_err());

    assert_eq!("asc".parse::<OrderDirection>().unwrap(), OrderDirection::Ascending);
    assert_eq!("Descending".parse::<OrderDirection>().unwrap(), OrderDirection::Descending);
    assert!("sideways".parse::<OrderDirection>().is_err());
}

#[test]
fn test_page_query_supports() {
    // No order is always fine
    assert!(PageQuery::default().supports(FavoriteKind::Artists));

    let release_date = PageQuery {
        order: Some(Order::ReleaseDate),
        direction: None,
    };
    assert!(release_date.supports(FavoriteKind::Albums));
    assert!(!release_date.supports(FavoriteKind::Tracks));
    assert!(!release_date.supports(FavoriteKind::Artists));
}

#[test]
fn test_favorite_from_v1_item() {
    let value = json!({
        "created": "2024-01-01T00:00:00.000+0000",
        "item": {
            "id": 12345,
            "title": "Song",
            "duration": 201,
            "artist": { "name": "Band" }
        }
    });

    let favorite = Favorite::from_page_item(&value).unwrap();
    assert_eq!(favorite, create_test_favorite("12345", "Song", Some("Band"), Some(201)));
}

#[test]
fn test_favorite_from_v2_and_artist_items() {
    let playlist = json!({
        "itemType": "PLAYLIST",
        "data": { "uuid": "abc-def", "title": "Mix" }
    });
    let favorite = Favorite::from_page_item(&playlist).unwrap();
    assert_eq!(favorite.id, "abc-def");
    assert_eq!(favorite.name, "Mix");
    assert_eq!(favorite.artist, None);

    // Artists use `name`, albums may list several artists
    let artist = json!({ "item": { "id": 7, "name": "Someone" } });
    assert_eq!(Favorite::from_page_item(&artist).unwrap().name, "Someone");

    let album = json!({ "item": { "id": "9", "title": "LP", "artists": [{ "name": "First" }, { "name": "Second" }] } });
    assert_eq!(Favorite::from_page_item(&album).unwrap().artist.as_deref(), Some("First"));
}

#[test]
fn test_favorite_without_id_is_skipped() {
    assert!(Favorite::from_page_item(&json!({ "item": { "title": "No id" } })).is_none());
    assert!(Favorite::from_page_item(&json!({ "item": { "id": [1] } })).is_none());
}

#[test]
fn test_favorite_rows() {
    let rows = favorite_rows(&[
        create_test_favorite("1", "Song", Some("Band"), Some(65)),
        create_test_favorite("2", "Artist", None, None),
    ]);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].duration, "1:05");
    assert_eq!(rows[0].artist, "Band");
    assert_eq!(rows[1].duration, "");
    assert_eq!(rows[1].artist, "");
}

#[test]
fn test_queue_rows_mark_current_track() {
    let tracks = vec!["a".to_string(), "b".to_string(), "c".to_string()];
    let rows = queue_rows(&tracks, Some(1));

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1].track, "b");
    assert_eq!(rows[1].position, 1);
    assert!(!rows[1].playing.is_empty());
    assert!(rows[0].playing.is_empty());
    assert!(rows[2].playing.is_empty());

    // Without a cursor nothing is marked
    assert!(queue_rows(&tracks, None).iter().all(|r| r.playing.is_empty()));
}

#[test]
fn test_favorites_cache_search() {
    let cache = FavoritesCache::new(
        FavoriteKind::Tracks,
        vec![
            create_test_favorite("1", "Blue Monday", Some("New Order"), Some(448)),
            create_test_favorite("2", "True Faith", Some("New Order"), Some(355)),
            create_test_favorite("3", "Bluebird", Some("Other"), None),
        ],
    );

    assert_eq!(cache.count(), 3);
    assert_eq!(cache.kind(), FavoriteKind::Tracks);

    let blue: Vec<String> = cache.search("BLUE").into_iter().map(|f| f.id).collect();
    assert_eq!(blue, vec!["1", "3"]);

    // Artist names are searched too
    assert_eq!(cache.search("new order").len(), 2);
    assert!(cache.search("nothing").is_empty());
}

#[tokio::test]
async fn test_favorites_cache_round_trip() {
    let path = std::env::temp_dir().join(format!("tidalplayer-cache-{}.json", std::process::id()));
    let cache = FavoritesCache::new(
        FavoriteKind::Albums,
        vec![create_test_favorite("10", "LP", Some("Band"), None)],
    );
    cache.persist_to(&path).await.unwrap();

    let loaded = FavoritesCache::load_from(&path).await.unwrap();
    assert_eq!(loaded.kind(), FavoriteKind::Albums);
    assert_eq!(loaded.items(), cache.items());
    assert_eq!(loaded.updated_at(), cache.updated_at());

    let _ = std::fs::remove_file(&path);
}

const FETCH_VARS: [&str; 3] = [
    "TIDALPLAYER_CHUNK_SIZE",
    "TIDALPLAYER_CONCURRENCY",
    "TIDALPLAYER_CHUNK_TIMEOUT",
];

// Helper function to set the pagination variables; `None` removes one
fn set_fetch_vars(values: [Option<&str>; 3]) {
    for (key, value) in FETCH_VARS.iter().zip(values) {
        // SAFETY: env-touching tests are serialized with #[serial]
        unsafe {
            match value {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }
    }
}

#[test]
#[serial]
fn test_fetch_options_from_env() {
    // Unset variables fall back to the defaults
    set_fetch_vars([None, None, None]);
    assert_eq!(config::fetch_options().unwrap(), FetchOptions::default());

    set_fetch_vars([Some("25"), Some(" 4 "), Some("30")]);
    let options = config::fetch_options().unwrap();
    assert_eq!(options.chunk_size, 25);
    assert_eq!(options.concurrency, 4);
    assert_eq!(options.chunk_timeout, Some(Duration::from_secs(30)));

    // Empty values count as unset
    set_fetch_vars([Some(""), None, Some("")]);
    assert_eq!(config::fetch_options().unwrap(), FetchOptions::default());

    set_fetch_vars([None, None, None]);
}

#[test]
#[serial]
fn test_fetch_options_rejects_invalid_values() {
    set_fetch_vars([Some("many"), None, None]);
    let err = config::fetch_options().unwrap_err();
    assert!(err.contains("TIDALPLAYER_CHUNK_SIZE"));

    set_fetch_vars([None, None, Some("-5")]);
    let err = config::fetch_options().unwrap_err();
    assert!(err.contains("TIDALPLAYER_CHUNK_TIMEOUT"));

    // Parses fine but cannot run any chunk
    set_fetch_vars([None, Some("0"), None]);
    let err = config::fetch_options().unwrap_err();
    assert_eq!(err, ConfigurationError::ZeroConcurrency.to_string());

    set_fetch_vars([Some("0"), None, None]);
    let err = config::fetch_options().unwrap_err();
    assert_eq!(err, ConfigurationError::ZeroChunkSize.to_string());

    set_fetch_vars([None, None, None]);
}
