//! # TIDAL Integration Module
//!
//! Thin client for the parts of the TIDAL REST API that tidalplayer needs: the
//! favorites collections of a user. Every collection is offset/limit paged with
//! at most 50 items per page, so loading a whole collection means asking for the
//! total first and then fetching all pages through [`crate::pagination`].
//!
//! ## Endpoints
//!
//! - `GET {v1}/users/{user}/favorites/{artists|albums|tracks|videos}`
//! - `GET {v2}/my-collection/playlists/folders?folderId=root`
//!
//! Both answer with `{"items": [...], "totalNumberOfItems": n}`. A `limit=1`
//! request is used to read the total without transferring the collection.
//!
//! ## Error Handling
//!
//! - **502 Bad Gateway** is retried after a short delay, a bounded number of times.
//! - Any other non-success status becomes [`ApiError::Status`].
//! - Inside a paginated fetch a failing page does not fail the call; it is
//!   reported in the returned [`crate::pagination::FetchReport`].
//!
//! ## Authentication
//!
//! Requests carry a bearer token taken from configuration. Obtaining and
//! refreshing that token is outside this crate.

pub mod favorites;

use reqwest::StatusCode;
use thiserror::Error;

use crate::{
    pagination::ConfigurationError,
    types::{FavoriteKind, Order},
};

pub use favorites::FavoritesClient;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} returned {status}")]
    Status { status: StatusCode, url: String },
    #[error("configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Pagination(#[from] ConfigurationError),
    #[error("{kind} cannot be ordered by {order}")]
    UnsupportedOrder { kind: FavoriteKind, order: Order },
}
