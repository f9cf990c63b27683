//! Catalog service client.
//!
//! # Architecture
//!
//! - Plain REST over `reqwest`; the backend is a black box that has
//!   shipped several response shapes, so all parsing goes through the
//!   tolerant [`normalize`] layer
//! - In-memory caching via `moka` for list responses (5 minute TTL)
//! - An opaque bearer credential is attached when configured; the
//!   client never inspects it
//!
//! # Endpoints
//!
//! - `GET /products` - raw product records in any accepted shape
//! - `GET /categories` - raw category records; only active entries are
//!   returned by [`CatalogClient::get_categories`]
//! - `POST /orders` - order payload submission, single attempt

pub mod normalize;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

use corner_market_core::{Category, OrderPayload, Product};

use crate::config::CatalogConfig;
use normalize::{normalize_categories, normalize_products};

const CACHE_TTL: Duration = Duration::from_secs(300); // 5 minutes
const PRODUCTS_CACHE_KEY: &str = "products";
const CATEGORIES_CACHE_KEY: &str = "categories";

/// Errors that can occur when talking to the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Non-success HTTP status.
    #[error("Unexpected status: {0}")]
    Status(reqwest::StatusCode),
}

/// Response body of `POST /orders`.
///
/// Some backend versions omit the server-assigned id entirely; the
/// submitter substitutes a local fallback id in that case.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderResponse {
    pub order_id: Option<String>,
}

/// Cached list responses.
#[derive(Debug, Clone)]
enum CacheValue {
    Products(Vec<Product>),
    Categories(Vec<Category>),
}

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the catalog service.
///
/// Cheaply cloneable; list responses are cached for 5 minutes.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    config: CatalogConfig,
    cache: Cache<&'static str, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        let cache = Cache::builder()
            .max_capacity(8)
            .time_to_live(CACHE_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                config,
                cache,
            }),
        })
    }

    /// Fetch a path and parse the body as JSON.
    async fn get_json(&self, path: &str) -> Result<serde_json::Value, CatalogError> {
        let url = format!("{}{path}", self.inner.config.base_url);
        let mut request = self.inner.client.get(&url);
        if let Some(token) = &self.inner.config.bearer_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Get the normalized product list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or parse fails. An unrecognized
    /// response shape is not an error; it yields an empty list.
    #[instrument(skip(self))]
    pub async fn get_products(&self) -> Result<Vec<Product>, CatalogError> {
        if let Some(CacheValue::Products(products)) =
            self.inner.cache.get(PRODUCTS_CACHE_KEY).await
        {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let response = self.get_json("/products").await?;
        let products = normalize_products(&response);

        self.inner
            .cache
            .insert(PRODUCTS_CACHE_KEY, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Get the normalized category list, active entries only.
    ///
    /// Campaign-category injection is the session's job, not the
    /// client's, so a cached list stays free of synthetic entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or parse fails.
    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> Result<Vec<Category>, CatalogError> {
        if let Some(CacheValue::Categories(categories)) =
            self.inner.cache.get(CATEGORIES_CACHE_KEY).await
        {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let response = self.get_json("/categories").await?;
        let mut categories = normalize_categories(&response);
        categories.retain(|category| category.is_active);

        self.inner
            .cache
            .insert(
                CATEGORIES_CACHE_KEY,
                CacheValue::Categories(categories.clone()),
            )
            .await;

        Ok(categories)
    }

    /// Submit an order payload. Single attempt, no retry; recovery is
    /// the submitter's responsibility.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure or a non-2xx status.
    #[instrument(skip(self, payload), fields(items = payload.items.len()))]
    pub async fn submit_order(&self, payload: &OrderPayload) -> Result<OrderResponse, CatalogError> {
        let url = format!("{}/orders", self.inner.config.base_url);
        let mut request = self.inner.client.post(&url).json(payload);
        if let Some(token) = &self.inner.config.bearer_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        // A 2xx with a missing or malformed body still confirms the
        // submission; the id is simply absent.
        let body = response.text().await?;
        Ok(serde_json::from_str(&body).unwrap_or_default())
    }

    /// Invalidate all cached list responses.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}

// =============================================================================
// Fallback Catalog
// =============================================================================

/// Built-in product list used when the catalog fetch fails or returns
/// nothing, so the storefront is never empty.
#[must_use]
pub fn fallback_products() -> Vec<Product> {
    vec![Product {
        id: "sample-water".to_string(),
        name: "Spring Water 5L".to_string(),
        price: Decimal::new(4590, 2),
        image: Some("https://cdn.example.com/water.png".to_string()),
        category_tags: vec!["Beverages".to_string(), "Staples".to_string()],
        is_campaign: true,
        is_discounted: false,
    }]
}

/// Built-in category list paired with [`fallback_products`].
#[must_use]
pub fn fallback_categories() -> Vec<Category> {
    vec![
        Category {
            id: "Beverages".to_string(),
            name: "Beverages".to_string(),
            is_active: true,
            created_at: String::new(),
        },
        Category {
            id: "Staples".to_string(),
            name: "Staples".to_string(),
            is_active: true,
            created_at: String::new(),
        },
    ]
}
