//! Integration tests for file-backed stores.
//!
//! Every test writes snapshots into its own temporary directory and reloads
//! them through a fresh `FileStorage`, the way a new session would.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use furnish_core::{
    AddressId, AddressUpdate, CartItem, Email, GuestInfo, NewAddress, PaymentMethod,
    PaymentStep, PhoneNumber, ProductId, WishlistItem,
};
use furnish_storefront::AppState;
use furnish_storefront::checkout::{CheckoutSummary, process_payment};
use furnish_storefront::config::StorefrontConfig;
use furnish_storefront::storage::{FileStorage, Storage};
use furnish_storefront::stores::{
    AddressStore, CartState, CartStore, PaymentState, PersistedState, PreferencesStore,
    WishlistStore,
};
use rust_decimal::Decimal;
use tempfile::TempDir;

fn storage(dir: &TempDir) -> Arc<dyn Storage> {
    Arc::new(FileStorage::open(dir.path()).unwrap())
}

fn chair() -> CartItem {
    CartItem::new("oak-chair", "Oak Chair", Decimal::new(4_500, 0), "/img/oak-chair.jpg")
}

fn sofa() -> CartItem {
    CartItem::new("teak-sofa", "Teak Sofa", Decimal::new(45_000, 0), "/img/teak-sofa.jpg")
}

fn address(label: &str) -> NewAddress {
    NewAddress {
        label: label.into(),
        name: "Ayesha Rahman".into(),
        phone: "01712345678".into(),
        address: "House 12, Road 5, Dhanmondi".into(),
        city: "Dhaka".into(),
        postal_code: "1205".into(),
        is_default: false,
    }
}

// =============================================================================
// Reload
// =============================================================================

#[test]
fn test_cart_survives_reload() {
    let dir = TempDir::new().unwrap();
    {
        let mut cart = CartStore::load(storage(&dir)).unwrap();
        cart.add_item(chair()).unwrap();
        cart.add_item(chair()).unwrap();
        cart.add_item(sofa()).unwrap();
        cart.set_guest_info(GuestInfo {
            name: "Rafiq Islam".into(),
            email: Email::parse("rafiq@example.com").unwrap(),
            phone: PhoneNumber::parse("01812345678").unwrap(),
            address: "12 Agrabad".into(),
            city: "Chattogram".into(),
        })
        .unwrap();
    }

    let cart = CartStore::load(storage(&dir)).unwrap();
    assert_eq!(cart.state().total_items(), 3);
    assert_eq!(
        cart.state().item(&ProductId::new("oak-chair")).unwrap().quantity,
        2
    );
    assert_eq!(cart.state().total_price().unwrap().display(), "৳54,000.00");
    assert_eq!(cart.state().guest_info().unwrap().city, "Chattogram");
}

#[test]
fn test_snapshot_file_layout() {
    let dir = TempDir::new().unwrap();
    let mut cart = CartStore::load(storage(&dir)).unwrap();
    cart.add_item(chair()).unwrap();

    let path = dir.path().join(format!("{}.json", CartState::KEY));
    let raw = std::fs::read_to_string(path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(json["version"], 0);
    assert_eq!(json["state"]["items"][0]["productId"], "oak-chair");
    assert_eq!(json["state"]["items"][0]["quantity"], 1);
}

#[test]
fn test_wishlist_and_addresses_survive_reload() {
    let dir = TempDir::new().unwrap();
    let office_id;
    {
        let mut wishlist = WishlistStore::load(storage(&dir)).unwrap();
        let item = WishlistItem::new(
            "teak-bed",
            "Teak Bed",
            "teak-bed",
            Decimal::new(85_000, 0),
            "/img/teak-bed.jpg",
        );
        assert!(wishlist.toggle_item(item).unwrap());

        let mut book = AddressStore::load(storage(&dir)).unwrap();
        book.add_address(address("Home")).unwrap();
        office_id = book
            .add_address(NewAddress {
                is_default: true,
                ..address("Office")
            })
            .unwrap()
            .id;
    }

    let wishlist = WishlistStore::load(storage(&dir)).unwrap();
    assert!(wishlist.state().is_in_wishlist(&ProductId::new("teak-bed")));

    let book = AddressStore::load(storage(&dir)).unwrap();
    assert_eq!(book.state().addresses().len(), 2);
    assert_eq!(book.state().get_default_address().unwrap().id, office_id);
}

#[test]
fn test_unreadable_snapshot_starts_empty() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("wishlist-storage.json"), "{ not json").unwrap();

    let mut wishlist = WishlistStore::load(storage(&dir)).unwrap();
    assert_eq!(wishlist.state().item_count(), 0);

    // The next mutation replaces the bad snapshot.
    wishlist
        .add_item(WishlistItem::new(
            "oak-table",
            "Oak Dining Table",
            "oak-table",
            Decimal::new(38_000, 0),
            "/img/oak-table.jpg",
        ))
        .unwrap();
    let reloaded = WishlistStore::load(storage(&dir)).unwrap();
    assert_eq!(reloaded.state().item_count(), 1);
}

#[test]
fn test_snapshot_with_other_version_is_discarded() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("furniture-cart.json"),
        r#"{"state":{"items":[]},"version":7}"#,
    )
    .unwrap();

    let cart = CartStore::load(storage(&dir)).unwrap();
    assert!(cart.state().is_empty());
}

#[test]
fn test_preferences_survive_reload() {
    let dir = TempDir::new().unwrap();
    let now = Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();
    {
        let mut prefs = PreferencesStore::load(storage(&dir)).unwrap();
        assert!(prefs.sidebar_open());
        prefs.set_sidebar_open(false).unwrap();
        prefs.dismiss_founder_popup(now).unwrap();
    }

    let prefs = PreferencesStore::load(storage(&dir)).unwrap();
    assert!(!prefs.sidebar_open());
    assert!(!prefs.should_show_founder_popup(now + chrono::Duration::days(29)));
    assert!(prefs.should_show_founder_popup(now + chrono::Duration::days(30)));
}

// =============================================================================
// Independence
// =============================================================================

#[test]
fn test_clearing_cart_leaves_other_stores_alone() {
    let dir = TempDir::new().unwrap();
    let mut cart = CartStore::load(storage(&dir)).unwrap();
    let mut wishlist = WishlistStore::load(storage(&dir)).unwrap();
    let mut book = AddressStore::load(storage(&dir)).unwrap();

    cart.add_item(sofa()).unwrap();
    wishlist.add_item(WishlistItem::new(
        "teak-sofa",
        "Teak Sofa",
        "teak-sofa",
        Decimal::new(45_000, 0),
        "/img/teak-sofa.jpg",
    ))
    .unwrap();
    book.add_address(address("Home")).unwrap();

    cart.clear_cart().unwrap();

    assert!(CartStore::load(storage(&dir)).unwrap().state().is_empty());
    assert_eq!(
        WishlistStore::load(storage(&dir)).unwrap().state().item_count(),
        1
    );
    assert_eq!(
        AddressStore::load(storage(&dir))
            .unwrap()
            .state()
            .addresses()
            .len(),
        1
    );
}

#[test]
fn test_reset_removes_snapshot() {
    let dir = TempDir::new().unwrap();
    let mut cart = CartStore::load(storage(&dir)).unwrap();
    cart.add_item(chair()).unwrap();
    cart.reset().unwrap();

    assert!(!dir.path().join("furniture-cart.json").exists());
    assert!(CartStore::load(storage(&dir)).unwrap().state().is_empty());
}

// =============================================================================
// Address default bookkeeping across sessions
// =============================================================================

#[test]
fn test_removing_default_promotes_first_remaining_after_reload() {
    let dir = TempDir::new().unwrap();
    let mut book = AddressStore::load(storage(&dir)).unwrap();
    let home = book.add_address(address("Home")).unwrap();
    let office = book.add_address(address("Office")).unwrap();
    let studio = book.add_address(address("Studio")).unwrap();
    book.set_default_address(&studio.id).unwrap();

    let mut book = AddressStore::load(storage(&dir)).unwrap();
    book.remove_address(&studio.id).unwrap();

    let book = AddressStore::load(storage(&dir)).unwrap();
    let defaults: Vec<&AddressId> = book
        .state()
        .addresses()
        .iter()
        .filter(|a| a.is_default)
        .map(|a| &a.id)
        .collect();
    assert_eq!(defaults, [&home.id]);
    assert!(!book.state().get(&office.id).unwrap().is_default);
}

#[test]
fn test_address_update_persists() {
    let dir = TempDir::new().unwrap();
    let mut book = AddressStore::load(storage(&dir)).unwrap();
    let home = book.add_address(address("Home")).unwrap();
    book.update_address(
        &home.id,
        &AddressUpdate {
            city: Some("Sylhet".into()),
            postal_code: Some("3100".into()),
            ..AddressUpdate::default()
        },
    )
    .unwrap();

    let book = AddressStore::load(storage(&dir)).unwrap();
    let saved = book.state().get(&home.id).unwrap();
    assert_eq!(saved.city, "Sylhet");
    assert_eq!(saved.postal_code, "3100");
    assert_eq!(saved.label, "Home");
    assert!(saved.is_default);
}

// =============================================================================
// Checkout across stores
// =============================================================================

#[test]
fn test_checkout_from_file_backed_session() {
    let dir = TempDir::new().unwrap();
    let config = StorefrontConfig::from_lookup(|key| match key {
        "FURNISH_DATA_DIR" => Some(dir.path().join("session").display().to_string()),
        _ => None,
    })
    .unwrap();
    let state = AppState::new(config).unwrap();
    assert!(dir.path().join("session").is_dir());

    let mut cart = state.cart().unwrap();
    cart.add_item(sofa()).unwrap();
    cart.update_quantity(&ProductId::new("teak-sofa"), 2).unwrap();
    state.addresses().unwrap().add_address(address("Home")).unwrap();

    let mut payment = PaymentState::new();
    payment.set_payment_method(PaymentMethod::Bkash);
    payment.set_mobile_wallet_details(furnish_core::MobileWalletDetails {
        phone_number: "01912345678".into(),
        wallet_reference: Some("8N7A6D5C".into()),
    });

    let summary = CheckoutSummary::build(
        state.cart().unwrap().state(),
        state.addresses().unwrap().state(),
        &payment,
    );
    assert_eq!(summary.subtotal.unwrap().display(), "৳90,000.00");

    let transaction_id = process_payment(&mut payment, &summary).unwrap();
    assert_eq!(payment.payment_step, PaymentStep::Complete);
    assert_eq!(payment.transaction_id.as_ref(), Some(&transaction_id));

    // Payment state is never written to disk.
    let files: Vec<String> = std::fs::read_dir(dir.path().join("session"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert!(files.iter().all(|f| !f.contains("payment")));
}
