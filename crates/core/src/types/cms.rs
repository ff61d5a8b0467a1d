//! CMS record shapes returned by the storefront JSON API.
//!
//! The server is the source of truth; these types only mirror its records.
//! Optional fields default so that older or partial records still decode.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::commerce::{CartItem, WishlistItem};
use super::id::{CategoryId, CompanyId, FeatureCardId, HeroSlideId, ProductId, ReviewId};
use super::status::CategoryKind;

const fn default_true() -> bool {
    true
}

/// A homepage carousel slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroSlide {
    pub id: HeroSlideId,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub image: String,
    #[serde(default)]
    pub cta_text: Option<String>,
    #[serde(default)]
    pub cta_link: Option<String>,
    #[serde(default)]
    pub order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// A product category (by room or by product type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<CategoryKind>,
    #[serde(default)]
    pub product_count: Option<u32>,
}

/// A catalog product as listed on the homepage rails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub price: Decimal,
    #[serde(default)]
    pub sale_price: Option<Decimal>,
    pub image: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub review_count: Option<u32>,
    #[serde(default = "default_true")]
    pub in_stock: bool,
    #[serde(default)]
    pub is_new: bool,
}

impl Product {
    /// Whether a sale price below the list price is set.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.sale_price.is_some_and(|sale| sale < self.price)
    }

    /// The price the customer pays now.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        if self.is_on_sale() {
            self.sale_price.unwrap_or(self.price)
        } else {
            self.price
        }
    }

    /// A single-unit cart line at the current price.
    #[must_use]
    pub fn to_cart_item(&self) -> CartItem {
        CartItem::new(
            self.id.clone(),
            self.name.clone(),
            self.effective_price(),
            self.image.clone(),
        )
    }

    /// A wishlist entry stamped now.
    #[must_use]
    pub fn to_wishlist_item(&self) -> WishlistItem {
        let item = WishlistItem::new(
            self.id.clone(),
            self.name.clone(),
            self.slug.clone(),
            self.price,
            self.image.clone(),
        );
        match self.sale_price {
            Some(sale) if self.is_on_sale() => item.with_sale_price(sale),
            _ => item,
        }
    }
}

/// A "why shop with us" card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureCard {
    pub id: FeatureCardId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub order: i32,
}

/// A client logo shown in the "trusted by" strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustedCompany {
    pub id: CompanyId,
    pub name: String,
    pub logo: String,
    #[serde(default)]
    pub website: Option<String>,
}

/// A social profile link in the site footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

/// Site-wide settings (branding, contact details, announcement bar).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteSettings {
    pub site_name: String,
    pub tagline: Option<String>,
    pub logo: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub address: Option<String>,
    /// Announcement bar text; `None` hides the bar.
    pub announcement: Option<String>,
    pub social_links: Vec<SocialLink>,
}

/// The single spotlight product block on the homepage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedProduct {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub image: String,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub product_id: Option<ProductId>,
    #[serde(default)]
    pub cta_text: Option<String>,
    #[serde(default)]
    pub cta_link: Option<String>,
}

/// A customer testimonial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerReview {
    pub id: ReviewId,
    pub customer_name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    /// 1-5 stars.
    pub rating: u8,
    pub comment: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Everything the homepage renders, fetched in one request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HomeContent {
    pub hero_slides: Vec<HeroSlide>,
    pub categories: Vec<Category>,
    pub new_arrivals: Vec<Product>,
    pub featured_products: Vec<Product>,
    pub best_sellers: Vec<Product>,
    pub featured_product: Option<FeaturedProduct>,
    pub trusted_companies: Vec<TrustedCompany>,
    pub customer_reviews: Vec<CustomerReview>,
    pub feature_cards: Vec<FeatureCard>,
    pub site_settings: Option<SiteSettings>,
}

impl HomeContent {
    /// Active slides in display order.
    #[must_use]
    pub fn active_hero_slides(&self) -> Vec<&HeroSlide> {
        let mut slides: Vec<&HeroSlide> = self.hero_slides.iter().filter(|s| s.is_active).collect();
        slides.sort_by_key(|s| s.order);
        slides
    }
}

/// A row in the search command palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub price: Decimal,
    #[serde(default)]
    pub sale_price: Option<Decimal>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_decodes_with_defaults() {
        let product: Product = serde_json::from_str(
            r#"{"id":"p1","name":"Teak Bed","slug":"teak-bed","price":85000,"image":"/bed.jpg"}"#,
        )
        .unwrap();
        assert!(product.in_stock);
        assert!(!product.is_new);
        assert!(product.images.is_empty());
        assert_eq!(product.price, Decimal::new(85_000, 0));
    }

    #[test]
    fn test_product_sale_price() {
        let mut product: Product = serde_json::from_str(
            r#"{"id":"p1","name":"Sofa","slug":"sofa","price":"60000","salePrice":"52000","image":""}"#,
        )
        .unwrap();
        assert!(product.is_on_sale());
        assert_eq!(product.effective_price(), Decimal::new(52_000, 0));
        assert_eq!(product.to_cart_item().price, Decimal::new(52_000, 0));
        assert_eq!(product.to_wishlist_item().sale_price, Some(Decimal::new(52_000, 0)));

        product.sale_price = Some(Decimal::new(70_000, 0));
        assert!(!product.is_on_sale());
        assert_eq!(product.effective_price(), Decimal::new(60_000, 0));
    }

    #[test]
    fn test_category_type_field() {
        let category: Category = serde_json::from_str(
            r#"{"id":"c1","name":"Bedroom","slug":"bedroom","type":"room"}"#,
        )
        .unwrap();
        assert_eq!(category.kind, Some(CategoryKind::Room));
    }

    #[test]
    fn test_home_content_partial_body() {
        let home: HomeContent = serde_json::from_str(
            r#"{"heroSlides":[
                {"id":"h2","title":"B","image":"b.jpg","order":2},
                {"id":"h1","title":"A","image":"a.jpg","order":1},
                {"id":"h3","title":"C","image":"c.jpg","order":0,"isActive":false}
            ]}"#,
        )
        .unwrap();
        let ids: Vec<&str> = home
            .active_hero_slides()
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(ids, ["h1", "h2"]);
        assert!(home.featured_product.is_none());
    }
}
