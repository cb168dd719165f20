//! WordPress REST client module
//!
//! The main component is [`WordPressClient`], which implements [`ListingStore`] for a
//! WordPress site. Reads try the configured primary route first and fall back to the
//! secondary route when the primary one answers 404; the route that served a listing
//! read is reported back in [`ListingPage::source`].

use reqwest::{Client, RequestBuilder, Response};
use serde_json::{Map, Value};
use staylist_common::{
    create_client, BlockedDaysUpdate, BoxFuture, DataSource, ListingFilter, ListingId,
    ListingPage, ListingRecord, ListingStore, StoreError,
};
use staylist_config::WordPressConfig;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Header carrying the number of result pages of a collection request.
const TOTAL_PAGES_HEADER: &str = "X-WP-TotalPages";

/// Upper bound on followed pages, in case a misbehaving site reports a bogus total.
const MAX_PAGES: u32 = 50;

/// Errors that can occur while setting up the WordPress client
#[derive(Error, Debug)]
pub enum WordPressError {
    /// Missing or invalid configuration
    #[error("Invalid WordPress configuration: {0}")]
    ConfigError(String),

    /// The HTTP client could not be built
    #[error("HTTP client error: {0}")]
    ClientError(#[from] reqwest::Error),
}

/// Client for the listing routes of the WordPress REST API
pub struct WordPressClient {
    /// HTTP client for making requests to the site
    client: Client,

    /// Site location, credentials and field names
    config: WordPressConfig,
}

impl WordPressClient {
    /// Creates a new client from the WordPress section of the app config.
    ///
    /// # Errors
    ///
    /// Returns a `WordPressError` if the base URL is empty or the HTTP client
    /// cannot be built.
    pub fn new(config: WordPressConfig) -> Result<Self, WordPressError> {
        if config.base_url.trim().is_empty() {
            return Err(WordPressError::ConfigError(
                "wordpress.base_url must not be empty".to_string(),
            ));
        }
        if config.listings_path.trim().is_empty() {
            return Err(WordPressError::ConfigError(
                "wordpress.listings_path must not be empty".to_string(),
            ));
        }
        let client = create_client(config.timeout_secs, true)?;
        Ok(Self { client, config })
    }

    fn endpoint(&self, route: &str) -> String {
        format!(
            "{}/wp-json/{}",
            self.config.base_url.trim_end_matches('/'),
            route.trim_matches('/')
        )
    }

    /// Routes to try, primary first.
    fn routes(&self) -> Vec<(&str, DataSource)> {
        let mut routes = vec![(self.config.listings_path.as_str(), DataSource::Primary)];
        if let Some(fallback) = self
            .config
            .fallback_listings_path
            .as_deref()
            .filter(|path| !path.trim().is_empty())
        {
            routes.push((fallback, DataSource::Fallback));
        }
        routes
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.username {
            Some(username) => {
                request.basic_auth(username, self.config.application_password.as_deref())
            }
            None => request,
        }
    }

    fn to_record(&self, listing: crate::wire::WpListing) -> ListingRecord {
        listing.into_record(
            &self.config.admin_blocked_field,
            &self.config.host_blocked_field,
        )
    }

    async fn check(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::from_status(
            status.as_u16(),
            crate::wire::WpErrorBody::describe(&body),
        ))
    }

    async fn get_listing_from(
        &self,
        route: &str,
        listing_id: ListingId,
    ) -> Result<ListingRecord, StoreError> {
        let url = format!("{}/{}", self.endpoint(route), listing_id);
        debug!("GET {}", url);
        let response = self
            .authorize(self.client.get(&url).query(&[("context", "edit")]))
            .send()
            .await?;
        let listing: crate::wire::WpListing = Self::check(response).await?.json().await?;
        Ok(self.to_record(listing))
    }

    async fn list_from(
        &self,
        route: &str,
        filter: &ListingFilter,
    ) -> Result<Vec<ListingRecord>, StoreError> {
        let url = self.endpoint(route);
        let mut records = Vec::new();
        let mut page = 1u32;

        loop {
            let mut query = vec![
                ("context", "edit".to_string()),
                ("per_page", self.config.per_page.to_string()),
                ("page", page.to_string()),
            ];
            if let Some(status) = &filter.status {
                query.push(("status", status.clone()));
            }
            if let Some(search) = &filter.search {
                query.push(("search", search.clone()));
            }

            debug!("GET {} page {}", url, page);
            let response = self
                .authorize(self.client.get(&url).query(&query))
                .send()
                .await?;
            let response = Self::check(response).await?;
            let total_pages = response
                .headers()
                .get(TOTAL_PAGES_HEADER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse::<u32>().ok())
                .unwrap_or(1);

            let listings: Vec<crate::wire::WpListing> = response.json().await?;
            records.extend(listings.into_iter().map(|listing| self.to_record(listing)));

            if page >= total_pages.min(MAX_PAGES) {
                break;
            }
            page += 1;
        }

        Ok(records)
    }

    async fn write_to(
        &self,
        route: &str,
        listing_id: ListingId,
        body: &Map<String, Value>,
    ) -> Result<(), StoreError> {
        let url = format!("{}/{}", self.endpoint(route), listing_id);
        debug!("POST {} fields {:?}", url, body.keys().collect::<Vec<_>>());
        let response = self
            .authorize(self.client.post(&url).json(body))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    fn update_body(&self, update: &BlockedDaysUpdate) -> Map<String, Value> {
        let mut body = Map::new();
        if let Some(admin) = &update.admin_blocked_days_raw {
            body.insert(
                self.config.admin_blocked_field.clone(),
                Value::String(admin.clone()),
            );
        }
        if let Some(host) = &update.host_blocked_days_raw {
            body.insert(
                self.config.host_blocked_field.clone(),
                Value::String(host.clone()),
            );
        }
        body
    }

    /// Fetches one listing, trying the fallback route when the primary answers 404.
    pub async fn get_listing(&self, listing_id: ListingId) -> Result<ListingRecord, StoreError> {
        let mut last_error = StoreError::NotFound(format!("listing {}", listing_id));
        for (route, source) in self.routes() {
            match self.get_listing_from(route, listing_id).await {
                Ok(record) => return Ok(record),
                Err(StoreError::NotFound(message)) => {
                    debug!("{:?} route {} has no listing {}", source, route, listing_id);
                    last_error = StoreError::NotFound(message);
                }
                Err(err) => return Err(err),
            }
        }
        Err(last_error)
    }

    /// Fetches every listing matching `filter`, tagging the route that served it.
    pub async fn list_listings(&self, filter: &ListingFilter) -> Result<ListingPage, StoreError> {
        let mut last_error = StoreError::NotFound("no listing route available".to_string());
        for (route, source) in self.routes() {
            match self.list_from(route, filter).await {
                Ok(listings) => {
                    if source == DataSource::Fallback {
                        warn!(
                            "listing route {} missing, served from fallback {}",
                            self.config.listings_path, route
                        );
                    }
                    info!("fetched {} listings from {}", listings.len(), route);
                    return Ok(ListingPage { listings, source });
                }
                Err(StoreError::NotFound(message)) => last_error = StoreError::NotFound(message),
                Err(err) => return Err(err),
            }
        }
        Err(last_error)
    }

    /// Writes the supplied blocklist fields, trying the fallback route on 404.
    pub async fn write_blocked_days(
        &self,
        listing_id: ListingId,
        update: &BlockedDaysUpdate,
    ) -> Result<(), StoreError> {
        if update.is_empty() {
            return Ok(());
        }
        let body = self.update_body(update);
        let mut last_error = StoreError::NotFound(format!("listing {}", listing_id));
        for (route, _) in self.routes() {
            match self.write_to(route, listing_id, &body).await {
                Ok(()) => {
                    info!("updated blocked days of listing {}", listing_id);
                    return Ok(());
                }
                Err(StoreError::NotFound(message)) => last_error = StoreError::NotFound(message),
                Err(err) => return Err(err),
            }
        }
        Err(last_error)
    }
}

impl ListingStore for WordPressClient {
    fn fetch_listing(&self, listing_id: ListingId) -> BoxFuture<'_, ListingRecord, StoreError> {
        Box::pin(async move { self.get_listing(listing_id).await })
    }

    fn fetch_listings(&self, filter: ListingFilter) -> BoxFuture<'_, ListingPage, StoreError> {
        Box::pin(async move { self.list_listings(&filter).await })
    }

    fn update_blocked_days(
        &self,
        listing_id: ListingId,
        update: BlockedDaysUpdate,
    ) -> BoxFuture<'_, (), StoreError> {
        Box::pin(async move { self.write_blocked_days(listing_id, &update).await })
    }
}
