use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::{
    config,
    types::{CachedFavorites, Favorite, FavoriteKind},
};

/// Local copy of one favorites collection.
pub struct FavoritesCache {
    cached: CachedFavorites,
}

impl FavoritesCache {
    pub fn new(kind: FavoriteKind, items: Vec<Favorite>) -> Self {
        Self {
            cached: CachedFavorites {
                kind,
                updated_at: Utc::now(),
                items,
            },
        }
    }

    pub async fn load(kind: FavoriteKind) -> Result<Self, String> {
        Self::load_from(&Self::cache_path(kind)).await
    }

    pub async fn load_from(path: &Path) -> Result<Self, String> {
        let content = async_fs::read_to_string(path)
            .await
            .map_err(|e| e.to_string())?;
        let cached: CachedFavorites = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self { cached })
    }

    pub async fn persist(&self) -> Result<(), String> {
        self.persist_to(&Self::cache_path(self.cached.kind)).await
    }

    pub async fn persist_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.cached).map_err(|e| e.to_string())?;
        async_fs::write(path, json)
            .await
            .map_err(|e| e.to_string())
    }

    pub fn kind(&self) -> FavoriteKind {
        self.cached.kind
    }

    pub fn items(&self) -> &[Favorite] {
        &self.cached.items
    }

    pub fn count(&self) -> usize {
        self.cached.items.len()
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.cached.updated_at
    }

    /// Favorites whose name or artist contains `term`, ignoring case.
    pub fn search(&self, term: &str) -> Vec<Favorite> {
        let term = term.to_lowercase();
        self.cached
            .items
            .iter()
            .filter(|f| {
                f.name.to_lowercase().contains(&term)
                    || f.artist
                        .as_ref()
                        .is_some_and(|a| a.to_lowercase().contains(&term))
            })
            .cloned()
            .collect()
    }

    fn cache_path(kind: FavoriteKind) -> PathBuf {
        let mut path = config::data_dir();
        path.push(format!("cache/{kind}.json", kind = kind.as_str()));
        path
    }
}
