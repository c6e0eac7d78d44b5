use std::{fmt, time::Duration};

use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use super::ApiError;
use crate::{
    config,
    pagination::{self, FetchOptions, FetchReport},
    types::{Favorite, FavoriteKind, Order, OrderDirection, Page, PageQuery},
};

const BAD_GATEWAY_RETRIES: usize = 3;
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(10);

/// Reads a user's favorites collections.
#[derive(Clone)]
pub struct FavoritesClient {
    http: Client,
    api_url: String,
    api_v2_url: String,
    user_id: String,
    country_code: String,
    access_token: String,
    retry_delay: Duration,
}

impl fmt::Debug for FavoritesClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FavoritesClient")
            .field("api_url", &self.api_url)
            .field("api_v2_url", &self.api_v2_url)
            .field("user_id", &self.user_id)
            .field("country_code", &self.country_code)
            .field("access_token", &"<redacted>")
            .field("retry_delay", &self.retry_delay)
            .finish()
    }
}

impl FavoritesClient {
    pub fn new(
        api_url: impl Into<String>,
        api_v2_url: impl Into<String>,
        user_id: impl Into<String>,
        country_code: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_v2_url: api_v2_url.into().trim_end_matches('/').to_string(),
            user_id: user_id.into(),
            country_code: country_code.into(),
            access_token: access_token.into(),
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    /// Builds a client from `TIDAL_*` environment variables.
    pub fn from_env() -> Result<Self, ApiError> {
        Ok(Self::new(
            config::tidal_api_url(),
            config::tidal_api_v2_url(),
            config::tidal_user_id().map_err(ApiError::Config)?,
            config::tidal_country_code(),
            config::tidal_access_token().map_err(ApiError::Config)?,
        ))
    }

    /// Delay before retrying a request answered with 502.
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Total number of favorites of `kind`, read with a single-item request.
    pub async fn count(&self, kind: FavoriteKind) -> Result<i64, ApiError> {
        let params = self.params(kind, 1, 0, &PageQuery::default(), true);
        let page = self.get_page(kind, &params).await?;
        Ok(page.total_number_of_items)
    }

    /// One page of favorites starting at `offset`.
    ///
    /// Entries that cannot be parsed are skipped with a warning, so the page
    /// may hold fewer than `limit` favorites.
    pub async fn page(
        &self,
        kind: FavoriteKind,
        limit: usize,
        offset: usize,
        query: PageQuery,
    ) -> Result<Vec<Favorite>, ApiError> {
        let items = self.page_items(kind, limit, offset, query).await?;
        Ok(items
            .into_iter()
            .filter_map(|value| parse_favorite(kind, value))
            .collect())
    }

    /// Every favorite of `kind`, fetched page by page in parallel.
    ///
    /// Pages that fail are left out and listed in the report's failures; the
    /// call itself only fails when the total cannot be read or the query or
    /// options are invalid.
    pub async fn paginated(
        &self,
        kind: FavoriteKind,
        query: PageQuery,
        options: &FetchOptions,
    ) -> Result<FetchReport<Favorite>, ApiError> {
        if let Some(order) = query.order.filter(|_| !query.supports(kind)) {
            return Err(ApiError::UnsupportedOrder { kind, order });
        }
        options.validate()?;

        let total = self.count(kind).await?;
        tracing::info!(kind = kind.as_str(), total, "Fetching favorites");

        let report = pagination::fetch_all_report(
            |limit, offset, query: PageQuery| self.page_items(kind, limit, offset, query),
            total,
            query,
            |value| parse_favorite(kind, value),
            options,
        )
        .await?;

        Ok(FetchReport {
            items: report.items.into_iter().flatten().collect(),
            failures: report.failures,
        })
    }

    async fn page_items(
        &self,
        kind: FavoriteKind,
        limit: usize,
        offset: usize,
        query: PageQuery,
    ) -> Result<Vec<serde_json::Value>, ApiError> {
        let params = self.params(kind, limit, offset, &query, false);
        let page = self.get_page(kind, &params).await?;
        Ok(page.items)
    }

    fn endpoint(&self, kind: FavoriteKind) -> String {
        match kind {
            FavoriteKind::Playlists => format!("{}/my-collection/playlists/folders", self.api_v2_url),
            _ => format!(
                "{uri}/users/{user}/favorites/{kind}",
                uri = self.api_url,
                user = self.user_id,
                kind = kind.as_str()
            ),
        }
    }

    fn params(
        &self,
        kind: FavoriteKind,
        limit: usize,
        offset: usize,
        query: &PageQuery,
        counting: bool,
    ) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
            ("countryCode", self.country_code.clone()),
        ];

        let (order, direction) = match kind {
            FavoriteKind::Playlists => {
                params.push(("folderId", "root".to_string()));
                let include = if counting { "" } else { "PLAYLIST" };
                params.push(("includeOnly", include.to_string()));
                if counting {
                    (None, None)
                } else {
                    (
                        Some(query.order.unwrap_or(Order::Date)),
                        Some(query.direction.unwrap_or(OrderDirection::Descending)),
                    )
                }
            }
            _ => (query.order, query.direction),
        };

        if let Some(order) = order {
            params.push(("order", order.as_str().to_string()));
        }
        if let Some(direction) = direction {
            params.push(("orderDirection", direction.as_str().to_string()));
        }
        params
    }

    async fn get_page(
        &self,
        kind: FavoriteKind,
        params: &[(&'static str, String)],
    ) -> Result<Page, ApiError> {
        let url = self.endpoint(kind);
        let mut attempt = 0;

        loop {
            let response = self
                .http
                .get(&url)
                .bearer_auth(&self.access_token)
                .query(params)
                .send()
                .await?;

            let response = match response.error_for_status() {
                Ok(valid_response) => valid_response,
                Err(err) => match err.status() {
                    Some(status) if status == StatusCode::BAD_GATEWAY && attempt < BAD_GATEWAY_RETRIES => {
                        attempt += 1;
                        tracing::warn!(url = %url, attempt, "Bad gateway, retrying");
                        sleep(self.retry_delay).await;
                        continue; // retry
                    }
                    Some(status) => return Err(ApiError::Status { status, url }),
                    None => return Err(err.into()),
                },
            };

            return Ok(response.json::<Page>().await?);
        }
    }
}

fn parse_favorite(kind: FavoriteKind, value: serde_json::Value) -> Option<Favorite> {
    let parsed = Favorite::from_page_item(&value);
    if parsed.is_none() {
        tracing::warn!(kind = kind.as_str(), item = %value, "Skipping unparsable favorite");
    }
    parsed
}
