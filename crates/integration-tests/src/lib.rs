//! Integration tests for Furnish.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p furnish-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cms_client` - CMS client against an in-process mock API
//! - `stores` - file-backed stores and checkout across reloads
//!
//! The mock API ([`MockCms`]) serves fixture JSON on `127.0.0.1:0`, counts
//! requests per path, and can be told to fail individual paths.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use furnish_storefront::config::CmsConfig;
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::task::JoinHandle;
use url::Url;

/// How a path should misbehave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Answer `500` with a plain-text body.
    ServerError,
    /// Answer `200` with a body that is not JSON.
    MalformedBody,
}

#[derive(Default)]
struct MockState {
    hits: Mutex<HashMap<String, usize>>,
    faults: Mutex<HashMap<String, Fault>>,
    revision: AtomicUsize,
}

impl MockState {
    fn record(&self, path: &str) -> Option<Fault> {
        *self.hits.lock().entry(path.to_string()).or_default() += 1;
        self.faults.lock().get(path).copied()
    }

    fn revision(&self) -> usize {
        self.revision.load(Ordering::SeqCst)
    }
}

/// In-process stand-in for the storefront CMS API.
pub struct MockCms {
    base_url: Url,
    state: Arc<MockState>,
    server: JoinHandle<()>,
}

impl MockCms {
    /// Bind to an ephemeral port and start serving.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound.
    pub async fn start() -> std::io::Result<Self> {
        let state = Arc::new(MockState::default());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let base_url = Url::parse(&format!("http://{addr}/")).map_err(std::io::Error::other)?;

        let app = router(Arc::clone(&state));
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            base_url,
            state,
            server,
        })
    }

    /// Base URL with a trailing slash, as the client expects.
    #[must_use]
    pub fn base_url(&self) -> Url {
        self.base_url.clone()
    }

    /// Client configuration pointing at this server.
    #[must_use]
    pub fn cms_config(&self, stale_time: Duration) -> CmsConfig {
        CmsConfig {
            base_url: self.base_url(),
            stale_time,
            cache_capacity: 100,
            request_timeout: Duration::from_secs(5),
        }
    }

    /// Requests received for `path` (query string excluded).
    #[must_use]
    pub fn hits(&self, path: &str) -> usize {
        self.state.hits.lock().get(path).copied().unwrap_or(0)
    }

    /// Requests received across all paths.
    #[must_use]
    pub fn total_hits(&self) -> usize {
        self.state.hits.lock().values().sum()
    }

    /// Make `path` misbehave until [`MockCms::heal`] is called.
    pub fn break_path(&self, path: &str, fault: Fault) {
        self.state.faults.lock().insert(path.to_string(), fault);
    }

    pub fn heal(&self, path: &str) {
        self.state.faults.lock().remove(path);
    }

    /// Simulate an admin edit: fixture titles change from now on.
    pub fn publish_revision(&self) -> usize {
        self.state.revision.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl Drop for MockCms {
    fn drop(&mut self) {
        self.server.abort();
    }
}

fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/api/search", get(search))
        .route("/api/categories/{kind}", get(categories_by_kind))
        .route("/api/{resource}", get(resource))
        .with_state(state)
}

fn respond(fault: Option<Fault>, body: Option<Value>) -> Response {
    match (fault, body) {
        (Some(Fault::ServerError), _) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "upstream unavailable").into_response()
        }
        (Some(Fault::MalformedBody), _) => (StatusCode::OK, "<html>oops</html>").into_response(),
        (None, Some(body)) => Json(body).into_response(),
        (None, None) => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn resource(State(state): State<Arc<MockState>>, Path(name): Path<String>) -> Response {
    let fault = state.record(&format!("/api/{name}"));
    respond(fault, fixtures::resource(&name, state.revision()))
}

async fn categories_by_kind(
    State(state): State<Arc<MockState>>,
    Path(kind): Path<String>,
) -> Response {
    let fault = state.record(&format!("/api/categories/{kind}"));
    respond(fault, Some(fixtures::categories(Some(&kind))))
}

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
    limit: Option<usize>,
}

async fn search(
    State(state): State<Arc<MockState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let fault = state.record("/api/search");
    respond(
        fault,
        Some(fixtures::search(&params.q, params.limit.unwrap_or(10))),
    )
}

/// Fixture records in the shape the storefront API returns.
pub mod fixtures {
    use super::{Value, json};

    fn products(rail: &str) -> Value {
        json!([
            {
                "id": format!("{rail}-teak-sofa"),
                "name": "Teak Sofa",
                "slug": "teak-sofa",
                "price": "45000",
                "salePrice": "39999",
                "image": "/img/teak-sofa.jpg",
                "rating": 4.5,
                "reviewCount": 12,
                "isNew": rail == "new"
            },
            {
                "id": format!("{rail}-oak-chair"),
                "name": "Oak Chair",
                "slug": "oak-chair",
                "price": "4500",
                "image": "/img/oak-chair.jpg"
            }
        ])
    }

    fn hero_slides(revision: usize) -> Value {
        json!([
            {
                "id": "slide-2",
                "title": format!("Monsoon Sale r{revision}"),
                "image": "/img/hero-2.jpg",
                "order": 2
            },
            {
                "id": "slide-1",
                "title": format!("New Season r{revision}"),
                "subtitle": "Handmade in Dhaka",
                "image": "/img/hero-1.jpg",
                "ctaText": "Shop now",
                "ctaLink": "/shop",
                "order": 1
            },
            {
                "id": "slide-hidden",
                "title": "Draft",
                "image": "/img/draft.jpg",
                "order": 0,
                "isActive": false
            }
        ])
    }

    /// All categories, or those of one kind.
    #[must_use]
    pub fn categories(kind: Option<&str>) -> Value {
        let all = [
            json!({ "id": "c-living", "name": "Living Room", "slug": "living-room", "type": "room", "productCount": 42 }),
            json!({ "id": "c-bedroom", "name": "Bedroom", "slug": "bedroom", "type": "room" }),
            json!({ "id": "c-sofas", "name": "Sofas", "slug": "sofas", "type": "product" }),
        ];
        Value::Array(
            all.into_iter()
                .filter(|c| kind.is_none_or(|k| c["type"] == k))
                .collect(),
        )
    }

    fn site_settings(revision: usize) -> Value {
        json!({
            "siteName": "Furnish",
            "tagline": format!("Crafted furniture r{revision}"),
            "contactPhone": "+8801712345678",
            "announcement": "Free delivery inside Dhaka",
            "socialLinks": [{ "platform": "facebook", "url": "https://facebook.com/furnish" }]
        })
    }

    /// Products whose name contains `query`, at most `limit` of them.
    #[must_use]
    pub fn search(query: &str, limit: usize) -> Value {
        let catalog = [
            ("teak-sofa", "Teak Sofa", "45000"),
            ("teak-bed", "Teak Bed", "85000"),
            ("oak-chair", "Oak Chair", "4500"),
            ("oak-table", "Oak Dining Table", "38000"),
        ];
        let needle = query.to_lowercase();
        Value::Array(
            catalog
                .iter()
                .filter(|(_, name, _)| name.to_lowercase().contains(&needle))
                .take(limit)
                .map(|(slug, name, price)| {
                    json!({ "id": slug, "name": name, "slug": slug, "price": price, "category": "Furniture" })
                })
                .collect(),
        )
    }

    /// Body for `/api/<name>`, or `None` for an unknown resource.
    #[must_use]
    pub fn resource(name: &str, revision: usize) -> Option<Value> {
        let body = match name {
            "hero-slides" => hero_slides(revision),
            "categories" => categories(None),
            "new-arrivals" => products("new"),
            "featured-products" => products("featured"),
            "best-sellers" => products("best"),
            // No spotlight block configured.
            "featured-product" => Value::Null,
            "trusted-companies" => json!([
                { "id": "co-1", "name": "Dhaka Hotels", "logo": "/img/dh.png", "website": "https://example.com" }
            ]),
            "customer-reviews" => json!([
                { "id": "r-1", "customerName": "Nusrat J.", "rating": 5, "comment": "Beautiful finish", "location": "Sylhet" }
            ]),
            "feature-cards" => json!([
                { "id": "f-1", "title": "Free delivery", "description": "Inside Dhaka city", "order": 1 }
            ]),
            "site-settings" => site_settings(revision),
            "home-content" => json!({
                "heroSlides": hero_slides(revision),
                "categories": categories(None),
                "newArrivals": products("new"),
                "bestSellers": products("best"),
                "featuredProduct": null,
                "siteSettings": site_settings(revision)
            }),
            _ => return None,
        };
        Some(body)
    }
}
