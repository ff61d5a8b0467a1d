//! `furnish cart`

use clap::Subcommand;
use furnish_core::{CartItem, Email, GuestInfo, PhoneNumber, ProductId};
use furnish_storefront::{AppState, Result};
use rust_decimal::Decimal;
use serde_json::json;
use tracing::info;

use super::print_json;

#[derive(Subcommand)]
pub enum CartAction {
    /// Show cart lines and totals
    Show,
    /// Add one unit of a product
    Add {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        /// Unit price in BDT
        #[arg(long)]
        price: Decimal,
        #[arg(long, default_value = "")]
        image: String,
    },
    /// Remove a product line
    Remove { id: String },
    /// Set a line's quantity; zero or less removes it
    #[command(name = "set-qty")]
    SetQty {
        id: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
    /// Record guest checkout details
    Guest {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: Email,
        #[arg(long)]
        phone: PhoneNumber,
        #[arg(long)]
        address: String,
        #[arg(long)]
        city: String,
    },
    /// Forget guest checkout details
    #[command(name = "clear-guest")]
    ClearGuest,
}

pub fn run(state: &AppState, action: CartAction) -> Result<()> {
    let mut cart = state.cart()?;

    match action {
        CartAction::Show => {
            let cart = cart.state();
            print_json(&json!({
                "items": cart.items(),
                "guestInfo": cart.guest_info(),
                "totalItems": cart.total_items(),
                "totalPrice": cart.total_price().map(|p| p.display()),
            }));
        }
        CartAction::Add {
            id,
            name,
            price,
            image,
        } => {
            cart.add_item(CartItem::new(id.as_str(), name, price, image))?;
            let quantity = cart
                .state()
                .item(&ProductId::new(&id))
                .map_or(0, |line| line.quantity);
            info!(product_id = %id, quantity, "Added to cart");
        }
        CartAction::Remove { id } => {
            cart.remove_item(&ProductId::new(id))?;
        }
        CartAction::SetQty { id, quantity } => {
            cart.update_quantity(&ProductId::new(id), quantity)?;
        }
        CartAction::Clear => {
            cart.clear_cart()?;
            info!("Cart cleared");
        }
        CartAction::Guest {
            name,
            email,
            phone,
            address,
            city,
        } => {
            cart.set_guest_info(GuestInfo {
                name,
                email,
                phone,
                address,
                city,
            })?;
        }
        CartAction::ClearGuest => {
            cart.clear_guest_info()?;
        }
    }

    Ok(())
}
