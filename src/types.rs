use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tabled::Tabled;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteKind {
    Artists,
    Albums,
    Tracks,
    Videos,
    Playlists,
}

impl FavoriteKind {
    pub const ALL: [FavoriteKind; 5] = [
        FavoriteKind::Artists,
        FavoriteKind::Albums,
        FavoriteKind::Tracks,
        FavoriteKind::Videos,
        FavoriteKind::Playlists,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FavoriteKind::Artists => "artists",
            FavoriteKind::Albums => "albums",
            FavoriteKind::Tracks => "tracks",
            FavoriteKind::Videos => "videos",
            FavoriteKind::Playlists => "playlists",
        }
    }

    /// Orders the collection endpoint of this kind accepts.
    pub fn allowed_orders(&self) -> &'static [Order] {
        match self {
            FavoriteKind::Artists => &[Order::Date, Order::Name],
            FavoriteKind::Albums => &[Order::Artist, Order::Date, Order::Name, Order::ReleaseDate],
            FavoriteKind::Tracks => &[
                Order::Album,
                Order::Artist,
                Order::Date,
                Order::Index,
                Order::Length,
                Order::Name,
            ],
            FavoriteKind::Videos => &[Order::Artist, Order::Date, Order::Name],
            FavoriteKind::Playlists => &[Order::Date, Order::Name],
        }
    }
}

impl fmt::Display for FavoriteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FavoriteKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FavoriteKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown favorite kind '{}', expected one of: artists, albums, tracks, videos, playlists",
                    s
                )
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    Album,
    Artist,
    Date,
    Index,
    Length,
    Name,
    ReleaseDate,
}

impl Order {
    const ALL: [Order; 7] = [
        Order::Album,
        Order::Artist,
        Order::Date,
        Order::Index,
        Order::Length,
        Order::Name,
        Order::ReleaseDate,
    ];

    /// Value sent as the `order` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Order::Album => "ALBUM",
            Order::Artist => "ARTIST",
            Order::Date => "DATE",
            Order::Index => "INDEX",
            Order::Length => "LENGTH",
            Order::Name => "NAME",
            Order::ReleaseDate => "RELEASE_DATE",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Order {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_");
        Order::ALL
            .into_iter()
            .find(|order| order.as_str().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| format!("unknown order '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderDirection {
    Ascending,
    Descending,
}

impl OrderDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderDirection::Ascending => "ASC",
            OrderDirection::Descending => "DESC",
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(OrderDirection::Ascending),
            "desc" | "descending" => Ok(OrderDirection::Descending),
            _ => Err(format!("unknown order direction '{}'", s)),
        }
    }
}

/// Sorting applied to every page of a paginated favorites request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageQuery {
    pub order: Option<Order>,
    pub direction: Option<OrderDirection>,
}

impl PageQuery {
    pub fn supports(&self, kind: FavoriteKind) -> bool {
        self.order
            .is_none_or(|order| kind.allowed_orders().contains(&order))
    }
}

/// Wire shape of a TIDAL collection page.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub items: Vec<Value>,
    #[serde(rename = "totalNumberOfItems", default)]
    pub total_number_of_items: i64,
}

/// A favorite resource flattened to what the CLI and the queue need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: String,
    pub name: String,
    pub artist: Option<String>,
    pub duration: Option<u64>,
}

impl Favorite {
    /// Parses one entry of a favorites page.
    ///
    /// v1 entries wrap the resource in `item`, v2 folder entries in `data`.
    pub fn from_page_item(value: &Value) -> Option<Self> {
        let resource = value
            .get("item")
            .or_else(|| value.get("data"))
            .unwrap_or(value);

        let id = match resource.get("id").or_else(|| resource.get("uuid"))? {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };

        let name = resource
            .get("title")
            .or_else(|| resource.get("name"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let artist = resource
            .get("artist")
            .and_then(|a| a.get("name"))
            .or_else(|| {
                resource
                    .get("artists")
                    .and_then(|a| a.get(0))
                    .and_then(|a| a.get("name"))
            })
            .and_then(Value::as_str)
            .map(str::to_string);

        let duration = resource.get("duration").and_then(Value::as_u64);

        Some(Favorite {
            id,
            name,
            artist,
            duration,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedFavorites {
    pub kind: FavoriteKind,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<Favorite>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Queue {
    pub tracks: Vec<String>,
    pub current: Option<usize>,
}

#[derive(Tabled)]
pub struct FavoriteTableRow {
    pub name: String,
    pub artist: String,
    pub duration: String,
    pub id: String,
}

#[derive(Tabled)]
pub struct QueueTableRow {
    pub position: usize,
    pub track: String,
    pub playing: String,
}

#[derive(Tabled)]
pub struct InfoTableRow {
    pub kind: String,
    pub cached: usize,
    pub updated: String,
}
