//! Typed HTTP client for the orders API
//!
//! `OrdersClient` wraps reqwest with a page cache and next-page prefetching;
//! `OrdersBrowser` carries the filter/page view state a listing UI needs.

pub mod cache;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::core::order::{Order, StatusFilter};
use crate::core::payload::{CreateOrder, UpdateOrder};
use crate::core::query::OrdersPage;

pub use cache::OrdersCache;

/// Errors surfaced by the client
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with an error status
    #[error("{message}")]
    Api { status: u16, message: String },
}

impl ClientError {
    /// HTTP status of an API error, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Transport(_) => None,
        }
    }
}

/// Client for the orders API with caching and prefetching.
///
/// Listing consults the injected [`OrdersCache`] first; after a page loads,
/// the next page is prefetched in the background so "Next" navigation is
/// instant. Mutations invalidate every cached page.
#[derive(Clone)]
pub struct OrdersClient {
    http: reqwest::Client,
    base_url: String,
    cache: OrdersCache,
}

impl OrdersClient {
    /// Create a client with its own empty cache
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_cache(base_url, OrdersCache::new())
    }

    /// Create a client around an explicitly injected cache
    pub fn with_cache(base_url: impl Into<String>, cache: OrdersCache) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            cache,
        }
    }

    /// The cache backing this client
    pub fn cache(&self) -> &OrdersCache {
        &self.cache
    }

    fn orders_url(&self) -> String {
        format!("{}/api/orders", self.base_url)
    }

    fn order_url(&self, id: &Uuid) -> String {
        format!("{}/api/orders/{}", self.base_url, id)
    }

    /// List one page of orders.
    ///
    /// Returns the cached page when present; otherwise fetches and caches
    /// it. When the loaded page is not the last one, the following page is
    /// prefetched fire-and-forget: its failures are swallowed and never
    /// surface to the caller.
    pub async fn list_orders(
        &self,
        filter: StatusFilter,
        page: i64,
        limit: i64,
    ) -> Result<OrdersPage, ClientError> {
        if let Some(cached) = self.cache.get(filter, page) {
            self.prefetch_next(filter, page, limit, cached.pagination.total_pages);
            return Ok(cached);
        }

        let fetched = self.fetch_page(filter, page, limit).await?;
        self.cache.insert(filter, page, fetched.clone());
        self.prefetch_next(filter, page, limit, fetched.pagination.total_pages);
        Ok(fetched)
    }

    /// Fetch a page from the server, bypassing the cache.
    pub async fn fetch_page(
        &self,
        filter: StatusFilter,
        page: i64,
        limit: i64,
    ) -> Result<OrdersPage, ClientError> {
        let response = self
            .http
            .get(self.orders_url())
            .query(&[
                ("page", page.to_string()),
                ("limit", limit.to_string()),
                ("status", filter.to_string()),
            ])
            .send()
            .await?;
        Self::json_or_error(response).await
    }

    fn prefetch_next(&self, filter: StatusFilter, page: i64, limit: i64, total_pages: i64) {
        let next = page + 1;
        if page >= total_pages || self.cache.contains(filter, next) {
            return;
        }

        let client = self.clone();
        tokio::spawn(async move {
            match client.fetch_page(filter, next, limit).await {
                Ok(fetched) => client.cache.insert(filter, next, fetched),
                Err(err) => {
                    tracing::debug!(error = %err, page = next, "prefetch failed");
                }
            }
        });
    }

    /// Create an order and invalidate all cached pages.
    pub async fn create_order(&self, payload: &CreateOrder) -> Result<Order, ClientError> {
        let response = self
            .http
            .post(self.orders_url())
            .json(payload)
            .send()
            .await?;
        let order = Self::json_or_error(response).await?;
        self.cache.invalidate_all();
        Ok(order)
    }

    /// Fetch a single order by id.
    pub async fn get_order(&self, id: &Uuid) -> Result<Order, ClientError> {
        let response = self.http.get(self.order_url(id)).send().await?;
        Self::json_or_error(response).await
    }

    /// Partially update an order and invalidate all cached pages.
    pub async fn update_order(
        &self,
        id: &Uuid,
        payload: &UpdateOrder,
    ) -> Result<Order, ClientError> {
        let response = self
            .http
            .put(self.order_url(id))
            .json(payload)
            .send()
            .await?;
        let order = Self::json_or_error(response).await?;
        self.cache.invalidate_all();
        Ok(order)
    }

    /// Delete an order and invalidate all cached pages.
    ///
    /// Returns the server's confirmation message.
    pub async fn delete_order(&self, id: &Uuid) -> Result<String, ClientError> {
        let response = self.http.delete(self.order_url(id)).send().await?;
        let body: Value = Self::json_or_error(response).await?;
        self.cache.invalidate_all();
        Ok(body["message"].as_str().unwrap_or_default().to_string())
    }

    async fn json_or_error<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| body["message"].as_str().map(str::to_string))
            .unwrap_or_else(|| format!("request failed with status {}", status));

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// View state for browsing the order list.
///
/// Tracks the current filter, page, and page size. Changing the status
/// filter resets pagination to page 1; next/previous navigation clamps to
/// the page range reported by the last load.
pub struct OrdersBrowser {
    client: OrdersClient,
    filter: StatusFilter,
    page: i64,
    limit: i64,
    total_pages: i64,
}

impl OrdersBrowser {
    pub fn new(client: OrdersClient, limit: i64) -> Self {
        Self {
            client,
            filter: StatusFilter::All,
            page: 1,
            limit,
            total_pages: 0,
        }
    }

    /// Load the currently viewed page
    pub async fn load(&mut self) -> Result<OrdersPage, ClientError> {
        let page = self
            .client
            .list_orders(self.filter, self.page, self.limit)
            .await?;
        self.total_pages = page.pagination.total_pages;
        Ok(page)
    }

    /// Change the status filter, resetting to the first page
    pub fn set_filter(&mut self, filter: StatusFilter) {
        if filter != self.filter {
            self.filter = filter;
            self.page = 1;
        }
    }

    /// Advance to the next page if one exists; true when the page changed
    pub fn next_page(&mut self) -> bool {
        if self.page < self.total_pages {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page; true when the page changed
    pub fn prev_page(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn total_pages(&self) -> i64 {
        self.total_pages
    }
}
