//! Integration tests for the CMS client.
//!
//! Each test starts its own mock API so request counts are isolated.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use furnish_core::CategoryKind;
use furnish_integration_tests::{Fault, MockCms};
use furnish_storefront::cms::{CmsClient, CmsError, QueryState};

const STALE_TIME: Duration = Duration::from_secs(300);

async fn setup() -> (MockCms, CmsClient) {
    let mock = MockCms::start().await.unwrap();
    let client = CmsClient::new(&mock.cms_config(STALE_TIME)).unwrap();
    (mock, client)
}

// =============================================================================
// Caching
// =============================================================================

#[tokio::test]
async fn test_fresh_resource_is_served_from_cache() {
    let (mock, client) = setup().await;

    let first = client.hero_slides().await.unwrap();
    let second = client.hero_slides().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(mock.hits("/api/hero-slides"), 1);
}

#[tokio::test]
async fn test_clones_share_one_cache() {
    let (mock, client) = setup().await;
    let clone = client.clone();

    client.site_settings().await.unwrap();
    clone.site_settings().await.unwrap();

    assert_eq!(mock.hits("/api/site-settings"), 1);
}

#[tokio::test]
async fn test_category_filters_are_cached_separately() {
    let (mock, client) = setup().await;

    let all = client.categories(None).await.unwrap();
    let rooms = client.categories(Some(CategoryKind::Room)).await.unwrap();
    let products = client.categories(Some(CategoryKind::Product)).await.unwrap();
    client.categories(Some(CategoryKind::Room)).await.unwrap();

    assert_eq!(all.len(), 3);
    assert_eq!(rooms.len(), 2);
    assert!(rooms.iter().all(|c| c.kind == Some(CategoryKind::Room)));
    assert_eq!(products.len(), 1);

    assert_eq!(mock.hits("/api/categories"), 1);
    assert_eq!(mock.hits("/api/categories/room"), 1);
    assert_eq!(mock.hits("/api/categories/product"), 1);
}

#[tokio::test]
async fn test_stale_resource_is_refetched() {
    let mock = MockCms::start().await.unwrap();
    let client = CmsClient::new(&mock.cms_config(Duration::from_millis(100))).unwrap();

    client.best_sellers().await.unwrap();
    tokio::time::sleep(Duration::from_millis(300)).await;
    client.best_sellers().await.unwrap();

    assert_eq!(mock.hits("/api/best-sellers"), 2);
}

// =============================================================================
// Invalidation
// =============================================================================

#[tokio::test]
async fn test_invalidate_home_content_refetches_homepage_but_not_search() {
    let (mock, client) = setup().await;

    let before = client.hero_slides().await.unwrap();
    client.categories(Some(CategoryKind::Room)).await.unwrap();
    client.home_content().await.unwrap();
    client.search("teak", None).await.unwrap();

    mock.publish_revision();

    // Still cached: the edit is not visible yet.
    assert_eq!(client.hero_slides().await.unwrap(), before);

    client.invalidate_home_content().await;

    let after = client.hero_slides().await.unwrap();
    assert!(after.iter().any(|s| s.title == "New Season r1"));
    client.categories(Some(CategoryKind::Room)).await.unwrap();
    client.home_content().await.unwrap();
    client.search("teak", None).await.unwrap();

    assert_eq!(mock.hits("/api/hero-slides"), 2);
    assert_eq!(mock.hits("/api/categories/room"), 2);
    assert_eq!(mock.hits("/api/home-content"), 2);
    assert_eq!(mock.hits("/api/search"), 1);
}

#[tokio::test]
async fn test_invalidate_all_drops_search_results_too() {
    let (mock, client) = setup().await;

    client.search("oak", Some(2)).await.unwrap();
    client.invalidate_all();
    client.search("oak", Some(2)).await.unwrap();

    assert_eq!(mock.hits("/api/search"), 2);
}

// =============================================================================
// Decoding
// =============================================================================

#[tokio::test]
async fn test_home_content_aggregate() {
    let (_mock, client) = setup().await;

    let home = client.home_content().await.unwrap();

    let titles: Vec<&str> = home
        .active_hero_slides()
        .iter()
        .map(|s| s.title.as_str())
        .collect();
    assert_eq!(titles, ["New Season r0", "Monsoon Sale r0"]);
    assert!(home.featured_product.is_none());
    assert!(home.featured_products.is_empty());
    assert_eq!(
        home.site_settings.unwrap().announcement.as_deref(),
        Some("Free delivery inside Dhaka")
    );
}

#[tokio::test]
async fn test_featured_product_may_be_absent() {
    let (_mock, client) = setup().await;
    assert!(client.featured_product().await.unwrap().is_none());
}

#[tokio::test]
async fn test_product_rails_decode_prices() {
    let (_mock, client) = setup().await;

    let arrivals = client.new_arrivals().await.unwrap();
    let sofa = arrivals.first().unwrap();
    assert!(sofa.is_new);
    assert!(sofa.is_on_sale());
    assert_eq!(sofa.effective_price().to_string(), "39999");

    let item = sofa.to_cart_item();
    assert_eq!(item.quantity, 1);
    assert_eq!(item.price, sofa.effective_price());
}

#[tokio::test]
async fn test_small_resources_decode() {
    let (_mock, client) = setup().await;

    assert_eq!(client.trusted_companies().await.unwrap().len(), 1);
    assert_eq!(client.customer_reviews().await.unwrap()[0].rating, 5);
    assert_eq!(client.feature_cards().await.unwrap()[0].title, "Free delivery");
    assert_eq!(client.featured_products().await.unwrap().len(), 2);
}

// =============================================================================
// Search
// =============================================================================

#[tokio::test]
async fn test_search_sends_query_and_limit() {
    let (mock, client) = setup().await;

    let teak = client.search("teak", None).await.unwrap();
    assert_eq!(teak.len(), 2);

    let one_oak = client.search("oak", Some(1)).await.unwrap();
    assert_eq!(one_oak.len(), 1);
    assert_eq!(one_oak[0].name, "Oak Chair");

    // Different limit is a different cache entry.
    let two_oak = client.search("oak", Some(2)).await.unwrap();
    assert_eq!(two_oak.len(), 2);

    assert_eq!(mock.hits("/api/search"), 3);
}

#[tokio::test]
async fn test_blank_search_makes_no_request() {
    let (mock, client) = setup().await;

    assert!(client.search("  ", None).await.unwrap().is_empty());
    assert_eq!(mock.total_hits(), 0);
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_server_error_is_reported_generically() {
    let (mock, client) = setup().await;
    mock.break_path("/api/trusted-companies", Fault::ServerError);

    let err = client.trusted_companies().await.unwrap_err();
    assert!(matches!(err, CmsError::FetchFailed { status, .. } if status.as_u16() == 500));
    assert_eq!(err.to_string(), "failed to fetch trusted-companies");
}

#[tokio::test]
async fn test_failures_are_not_cached() {
    let (mock, client) = setup().await;
    mock.break_path("/api/feature-cards", Fault::ServerError);

    assert!(client.feature_cards().await.is_err());
    mock.heal("/api/feature-cards");
    assert!(client.feature_cards().await.is_ok());

    assert_eq!(mock.hits("/api/feature-cards"), 2);
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let (mock, client) = setup().await;
    mock.break_path("/api/site-settings", Fault::MalformedBody);

    let err = client.site_settings().await.unwrap_err();
    assert!(matches!(
        err,
        CmsError::Parse {
            resource: "site-settings",
            ..
        }
    ));
}

#[tokio::test]
async fn test_query_state_for_views() {
    let (mock, client) = setup().await;

    let ok = QueryState::run(client.customer_reviews()).await;
    assert!(ok.is_success());
    assert_eq!(ok.data.map(|r| r.len()), Some(1));

    mock.break_path("/api/new-arrivals", Fault::ServerError);
    let failed = QueryState::run(client.new_arrivals()).await;
    assert!(!failed.is_loading);
    assert!(failed.data.is_none());
    assert_eq!(failed.error.as_deref(), Some("failed to fetch new-arrivals"));
}
