//! Furnish CLI - drive the storefront stores and CMS client from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Cart
//! furnish cart add --id oak-chair --name "Oak Chair" --price 4500 --image /chair.jpg
//! furnish cart set-qty oak-chair 3
//! furnish cart show
//!
//! # Addresses
//! furnish address add --label Home --name "Ayesha Rahman" --phone 01712345678 \
//!     --address "House 12, Road 5" --city Dhaka --postal-code 1205
//!
//! # Homepage content (cached for the staleness window within one run)
//! furnish cms categories --kind room
//! furnish cms search "teak sofa" --limit 5
//!
//! # Checkout
//! furnish checkout --method bkash --wallet-phone 01812345678
//! ```
//!
//! Snapshots are written under `FURNISH_DATA_DIR`; see
//! `furnish_storefront::config` for every variable.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use furnish_storefront::AppState;
use furnish_storefront::config::{LogFormat, StorefrontConfig};

mod commands;

use commands::{
    address::AddressAction, cart::CartAction, checkout::CheckoutArgs, cms::CmsAction,
    prefs::PrefsAction, validate::ValidateAction, wishlist::WishlistAction,
};

#[derive(Parser)]
#[command(name = "furnish")]
#[command(author, version, about = "Furnish storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Manage saved delivery addresses
    Address {
        #[command(subcommand)]
        action: AddressAction,
    },
    /// Fetch homepage content and search results
    Cms {
        #[command(subcommand)]
        action: CmsAction,
    },
    /// Check payment fields
    Validate {
        #[command(subcommand)]
        action: ValidateAction,
    },
    /// UI preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
    /// Place an order from the current cart
    Checkout(CheckoutArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            furnish_storefront::telemetry::init(LogFormat::default());
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };
    furnish_storefront::telemetry::init(config.log_format);

    let result = run(cli, config).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: StorefrontConfig) -> furnish_storefront::Result<()> {
    // Validation needs no stores or network.
    if let Commands::Validate { action } = &cli.command {
        commands::validate::run(action);
        return Ok(());
    }

    let state = AppState::new(config)?;

    match cli.command {
        Commands::Cart { action } => commands::cart::run(&state, action)?,
        Commands::Wishlist { action } => commands::wishlist::run(&state, action)?,
        Commands::Address { action } => commands::address::run(&state, action)?,
        Commands::Cms { action } => commands::cms::run(&state, action).await?,
        Commands::Prefs { action } => commands::prefs::run(&state, &action)?,
        Commands::Checkout(args) => commands::checkout::run(&state, args)?,
        Commands::Validate { .. } => {}
    }
    Ok(())
}
