//! `furnish wishlist`

use clap::Subcommand;
use furnish_core::{ProductId, WishlistItem};
use furnish_storefront::{AppState, Result};
use rust_decimal::Decimal;
use tracing::info;

use super::print_json;

#[derive(Subcommand)]
pub enum WishlistAction {
    /// List saved products
    Show,
    /// Save a product, or unsave it if already saved
    Toggle {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        /// Product page slug; defaults to the id
        #[arg(long)]
        slug: Option<String>,
        /// Regular price in BDT
        #[arg(long)]
        price: Decimal,
        #[arg(long)]
        sale_price: Option<Decimal>,
        #[arg(long, default_value = "")]
        image: String,
    },
    /// Unsave a product
    Remove { id: String },
    /// Remove every saved product
    Clear,
}

pub fn run(state: &AppState, action: WishlistAction) -> Result<()> {
    let mut wishlist = state.wishlist()?;

    match action {
        WishlistAction::Show => print_json(wishlist.state().items()),
        WishlistAction::Toggle {
            id,
            name,
            slug,
            price,
            sale_price,
            image,
        } => {
            let slug = slug.unwrap_or_else(|| id.clone());
            let mut item = WishlistItem::new(id.as_str(), name, slug, price, image);
            if let Some(sale) = sale_price {
                item = item.with_sale_price(sale);
            }
            let saved = wishlist.toggle_item(item)?;
            info!(product_id = %id, saved, "Wishlist toggled");
        }
        WishlistAction::Remove { id } => {
            wishlist.remove_item(&ProductId::new(id))?;
        }
        WishlistAction::Clear => {
            wishlist.clear_wishlist()?;
        }
    }

    Ok(())
}
