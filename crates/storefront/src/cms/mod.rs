//! CMS API client for homepage content and search.
//!
//! # Architecture
//!
//! - One method per JSON endpoint (`/api/hero-slides`, `/api/categories`, ...)
//! - Responses are cached in memory via `moka` for the staleness window
//!   (5 minutes by default); an expired entry is refetched on next access
//! - `invalidate_home_content` marks every homepage resource stale at once
//! - No retries: a failed request is returned to the caller as-is
//!
//! # Example
//!
//! ```rust,ignore
//! use furnish_storefront::cms::CmsClient;
//!
//! let client = CmsClient::new(&config.cms)?;
//!
//! let slides = client.hero_slides().await?;
//! let rooms = client.categories(Some(CategoryKind::Room)).await?;
//!
//! // After an admin edit, force the homepage to refetch
//! client.invalidate_home_content().await;
//! ```

mod cache;
mod query;

pub use cache::{CacheEntry, CmsKey, CmsValue};
pub use query::QueryState;

use std::sync::Arc;

use furnish_core::{
    Category, CategoryKind, CustomerReview, FeatureCard, FeaturedProduct, HeroSlide, HomeContent,
    Product, SearchResult, SiteSettings, TrustedCompany,
};
use moka::future::Cache;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::config::CmsConfig;

/// Default number of search results requested.
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;

/// Errors that can occur when talking to the CMS API.
#[derive(Debug, Error)]
pub enum CmsError {
    /// The request could not be sent or the body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("failed to fetch {resource}")]
    FetchFailed {
        resource: &'static str,
        status: reqwest::StatusCode,
    },

    /// The body was not the expected JSON shape.
    #[error("failed to parse {resource} response: {source}")]
    Parse {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The endpoint URL could not be built from the base URL.
    #[error("invalid CMS URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

// =============================================================================
// CmsClient
// =============================================================================

/// Client for the storefront CMS endpoints.
///
/// Cheaply cloneable; clones share the HTTP connection pool and the cache.
#[derive(Clone)]
pub struct CmsClient {
    inner: Arc<CmsClientInner>,
}

struct CmsClientInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Cache<CmsKey, CmsValue>,
}

impl CmsClient {
    /// Create a new CMS client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &CmsConfig) -> Result<Self, CmsError> {
        let cache = Cache::builder()
            .max_capacity(config.cache_capacity)
            .time_to_live(config.stale_time)
            .build();

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(CmsClientInner {
                client,
                base_url: config.base_url.clone(),
                cache,
            }),
        })
    }

    /// Base URL all endpoint paths are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    fn url_for(&self, key: &CmsKey) -> Result<Url, CmsError> {
        // Relative join keeps any path prefix on the base URL.
        let mut url = self
            .inner
            .base_url
            .join(key.path().trim_start_matches('/'))?;
        if let CmsKey::Search { query, limit } = key {
            url.query_pairs_mut()
                .append_pair("q", query)
                .append_pair("limit", &limit.to_string());
        }
        Ok(url)
    }

    /// GET an endpoint and decode its JSON body.
    async fn fetch<T: DeserializeOwned>(&self, key: &CmsKey) -> Result<T, CmsError> {
        let resource = key.resource();
        let url = self.url_for(key)?;

        let response = self
            .inner
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                resource,
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "CMS API returned non-success status"
            );
            return Err(CmsError::FetchFailed { resource, status });
        }

        serde_json::from_str(&body).map_err(|source| {
            tracing::error!(
                resource,
                error = %source,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse CMS response"
            );
            CmsError::Parse { resource, source }
        })
    }

    /// Serve `key` from cache, fetching and caching it on a miss.
    async fn cached<T: CacheEntry + DeserializeOwned>(&self, key: CmsKey) -> Result<T, CmsError> {
        if let Some(value) = self.inner.cache.get(&key).await
            && let Some(hit) = T::from_value(value)
        {
            debug!(resource = key.resource(), "Cache hit");
            return Ok(hit);
        }

        let fresh: T = self.fetch(&key).await?;

        self.inner
            .cache
            .insert(key, fresh.clone().into_value())
            .await;

        Ok(fresh)
    }

    // =========================================================================
    // Homepage resources
    // =========================================================================

    /// Everything the homepage renders, in one request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    #[instrument(skip(self))]
    pub async fn home_content(&self) -> Result<HomeContent, CmsError> {
        self.cached(CmsKey::HomeContent).await
    }

    /// Carousel slides.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    #[instrument(skip(self))]
    pub async fn hero_slides(&self) -> Result<Vec<HeroSlide>, CmsError> {
        self.cached(CmsKey::HeroSlides).await
    }

    /// Categories, optionally restricted to one grouping. Each filter is
    /// cached separately.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    #[instrument(skip(self))]
    pub async fn categories(&self, kind: Option<CategoryKind>) -> Result<Vec<Category>, CmsError> {
        self.cached(CmsKey::Categories(kind)).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    #[instrument(skip(self))]
    pub async fn new_arrivals(&self) -> Result<Vec<Product>, CmsError> {
        self.cached(CmsKey::NewArrivals).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    #[instrument(skip(self))]
    pub async fn featured_products(&self) -> Result<Vec<Product>, CmsError> {
        self.cached(CmsKey::FeaturedProducts).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    #[instrument(skip(self))]
    pub async fn best_sellers(&self) -> Result<Vec<Product>, CmsError> {
        self.cached(CmsKey::BestSellers).await
    }

    /// The spotlight product block; `None` when the server has none configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    #[instrument(skip(self))]
    pub async fn featured_product(&self) -> Result<Option<FeaturedProduct>, CmsError> {
        self.cached(CmsKey::FeaturedProduct).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    #[instrument(skip(self))]
    pub async fn trusted_companies(&self) -> Result<Vec<TrustedCompany>, CmsError> {
        self.cached(CmsKey::TrustedCompanies).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    #[instrument(skip(self))]
    pub async fn customer_reviews(&self) -> Result<Vec<CustomerReview>, CmsError> {
        self.cached(CmsKey::CustomerReviews).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    #[instrument(skip(self))]
    pub async fn feature_cards(&self) -> Result<Vec<FeatureCard>, CmsError> {
        self.cached(CmsKey::FeatureCards).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    #[instrument(skip(self))]
    pub async fn site_settings(&self) -> Result<SiteSettings, CmsError> {
        self.cached(CmsKey::SiteSettings).await
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Product search for the command palette.
    ///
    /// A blank query returns no results without contacting the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        query: &str,
        limit: Option<u32>,
    ) -> Result<Vec<SearchResult>, CmsError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        self.cached(CmsKey::Search {
            query: query.to_string(),
            limit: limit.unwrap_or(DEFAULT_SEARCH_LIMIT),
        })
        .await
    }

    // =========================================================================
    // Invalidation
    // =========================================================================

    /// Mark every homepage resource stale so the next access refetches it.
    /// Cached search results are kept.
    pub async fn invalidate_home_content(&self) {
        for key in &CmsKey::HOME_CONTENT {
            self.inner.cache.invalidate(key).await;
        }
        debug!("Invalidated home content caches");
    }

    /// Drop every cached response.
    pub fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
    }
}

impl std::fmt::Debug for CmsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CmsClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}
