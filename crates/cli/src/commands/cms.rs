//! `furnish cms`

use clap::Subcommand;
use furnish_core::CategoryKind;
use furnish_storefront::{AppState, Result};

use super::print_json;

#[derive(Subcommand)]
pub enum CmsAction {
    /// Everything the homepage renders
    Home,
    #[command(name = "hero-slides")]
    HeroSlides,
    Categories {
        /// Restrict to `room` or `product` categories
        #[arg(long)]
        kind: Option<CategoryKind>,
    },
    #[command(name = "new-arrivals")]
    NewArrivals,
    #[command(name = "featured-products")]
    FeaturedProducts,
    #[command(name = "best-sellers")]
    BestSellers,
    #[command(name = "featured-product")]
    FeaturedProduct,
    #[command(name = "trusted-companies")]
    TrustedCompanies,
    Reviews,
    #[command(name = "feature-cards")]
    FeatureCards,
    Settings,
    /// Search products by name
    Search {
        query: String,
        #[arg(long)]
        limit: Option<u32>,
    },
}

pub async fn run(state: &AppState, action: CmsAction) -> Result<()> {
    let cms = state.cms();

    match action {
        CmsAction::Home => print_json(&cms.home_content().await?),
        CmsAction::HeroSlides => print_json(&cms.hero_slides().await?),
        CmsAction::Categories { kind } => print_json(&cms.categories(kind).await?),
        CmsAction::NewArrivals => print_json(&cms.new_arrivals().await?),
        CmsAction::FeaturedProducts => print_json(&cms.featured_products().await?),
        CmsAction::BestSellers => print_json(&cms.best_sellers().await?),
        CmsAction::FeaturedProduct => print_json(&cms.featured_product().await?),
        CmsAction::TrustedCompanies => print_json(&cms.trusted_companies().await?),
        CmsAction::Reviews => print_json(&cms.customer_reviews().await?),
        CmsAction::FeatureCards => print_json(&cms.feature_cards().await?),
        CmsAction::Settings => print_json(&cms.site_settings().await?),
        CmsAction::Search { query, limit } => {
            print_json(&cms.search(&query, limit).await?);
        }
    }

    Ok(())
}
