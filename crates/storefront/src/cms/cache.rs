//! Cache types for CMS API responses.

use std::sync::Arc;

use furnish_core::{
    Category, CategoryKind, CustomerReview, FeatureCard, FeaturedProduct, HeroSlide, HomeContent,
    Product, SearchResult, SiteSettings, TrustedCompany,
};

/// Cache key: one per endpoint, plus its parameters.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CmsKey {
    HomeContent,
    HeroSlides,
    Categories(Option<CategoryKind>),
    NewArrivals,
    FeaturedProducts,
    BestSellers,
    FeaturedProduct,
    TrustedCompanies,
    CustomerReviews,
    FeatureCards,
    SiteSettings,
    Search { query: String, limit: u32 },
}

impl CmsKey {
    /// Every key that backs the homepage. Search results are not included.
    pub const HOME_CONTENT: [Self; 13] = [
        Self::HomeContent,
        Self::HeroSlides,
        Self::Categories(None),
        Self::Categories(Some(CategoryKind::Room)),
        Self::Categories(Some(CategoryKind::Product)),
        Self::NewArrivals,
        Self::FeaturedProducts,
        Self::BestSellers,
        Self::FeaturedProduct,
        Self::TrustedCompanies,
        Self::CustomerReviews,
        Self::FeatureCards,
        Self::SiteSettings,
    ];

    /// Endpoint path, relative to the API base URL.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Categories(Some(kind)) => format!("/api/categories/{}", kind.as_str()),
            other => format!("/api/{}", other.resource()),
        }
    }

    /// Resource name used in logs and error messages.
    #[must_use]
    pub const fn resource(&self) -> &'static str {
        match self {
            Self::HomeContent => "home-content",
            Self::HeroSlides => "hero-slides",
            Self::Categories(_) => "categories",
            Self::NewArrivals => "new-arrivals",
            Self::FeaturedProducts => "featured-products",
            Self::BestSellers => "best-sellers",
            Self::FeaturedProduct => "featured-product",
            Self::TrustedCompanies => "trusted-companies",
            Self::CustomerReviews => "customer-reviews",
            Self::FeatureCards => "feature-cards",
            Self::SiteSettings => "site-settings",
            Self::Search { .. } => "search",
        }
    }
}

/// Cached value types. Payloads sit behind `Arc` so cache reads stay cheap.
#[derive(Debug, Clone)]
pub enum CmsValue {
    HomeContent(Arc<HomeContent>),
    HeroSlides(Arc<Vec<HeroSlide>>),
    Categories(Arc<Vec<Category>>),
    Products(Arc<Vec<Product>>),
    FeaturedProduct(Arc<Option<FeaturedProduct>>),
    TrustedCompanies(Arc<Vec<TrustedCompany>>),
    CustomerReviews(Arc<Vec<CustomerReview>>),
    FeatureCards(Arc<Vec<FeatureCard>>),
    SiteSettings(Arc<SiteSettings>),
    SearchResults(Arc<Vec<SearchResult>>),
}

/// Conversion between a decoded response type and its cache slot.
pub trait CacheEntry: Sized + Clone {
    fn into_value(self) -> CmsValue;
    fn from_value(value: CmsValue) -> Option<Self>;
}

macro_rules! cache_entry {
    ($variant:ident, $ty:ty) => {
        impl CacheEntry for $ty {
            fn into_value(self) -> CmsValue {
                CmsValue::$variant(Arc::new(self))
            }

            fn from_value(value: CmsValue) -> Option<Self> {
                match value {
                    CmsValue::$variant(inner) => Some(Arc::unwrap_or_clone(inner)),
                    _ => None,
                }
            }
        }
    };
}

cache_entry!(HomeContent, HomeContent);
cache_entry!(HeroSlides, Vec<HeroSlide>);
cache_entry!(Categories, Vec<Category>);
cache_entry!(Products, Vec<Product>);
cache_entry!(FeaturedProduct, Option<FeaturedProduct>);
cache_entry!(TrustedCompanies, Vec<TrustedCompany>);
cache_entry!(CustomerReviews, Vec<CustomerReview>);
cache_entry!(FeatureCards, Vec<FeatureCard>);
cache_entry!(SiteSettings, SiteSettings);
cache_entry!(SearchResults, Vec<SearchResult>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(CmsKey::HeroSlides.path(), "/api/hero-slides");
        assert_eq!(CmsKey::Categories(None).path(), "/api/categories");
        assert_eq!(
            CmsKey::Categories(Some(CategoryKind::Room)).path(),
            "/api/categories/room"
        );
        assert_eq!(CmsKey::FeaturedProduct.path(), "/api/featured-product");
        assert_eq!(
            CmsKey::Search {
                query: "sofa".into(),
                limit: 5
            }
            .path(),
            "/api/search"
        );
    }

    #[test]
    fn test_home_content_keys_exclude_search() {
        assert!(
            !CmsKey::HOME_CONTENT
                .iter()
                .any(|k| matches!(k, CmsKey::Search { .. }))
        );
    }

    #[test]
    fn test_cache_entry_rejects_other_variant() {
        let value = Vec::<HeroSlide>::new().into_value();
        assert!(Vec::<Category>::from_value(value.clone()).is_none());
        assert_eq!(Vec::<HeroSlide>::from_value(value), Some(Vec::new()));
    }
}
