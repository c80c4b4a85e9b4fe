//! End-to-end flow through the public API: design a bouquet, price it for a
//! trade customer, cart it and place the order.

use chrono::{TimeZone, Utc};
use petal_core::checkout::{place_order, DeliveryOption, OrderForm};
use petal_core::{
    BouquetBuilder, Cart, Catalog, CoreError, MemoryConfigStore, PricingSummary, WholesaleManager,
    WrapStyle,
};

fn form() -> OrderForm {
    OrderForm {
        first_name: "Iris".to_string(),
        last_name: "Vale".to_string(),
        email: "iris@petalprose.com".to_string(),
        phone: "555-0100".to_string(),
        delivery_option: DeliveryOption::Pickup,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_wholesale_design_to_order() {
    let catalog = Catalog::standard().unwrap();

    let mut builder = BouquetBuilder::new();
    builder.add_flower(catalog.require("f1").unwrap()).unwrap();
    builder.add_flower(catalog.require("f2").unwrap()).unwrap();
    builder.set_wrap(WrapStyle::Silk);

    let mut wholesale = WholesaleManager::load(MemoryConfigStore::new()).await.unwrap();
    wholesale
        .update(|cfg| {
            cfg.enabled = true;
            cfg.select_segment(Some("c1"));
            cfg.set_simulated_quantity(60);
        })
        .await
        .unwrap();

    let summary =
        PricingSummary::summarize(builder.composition(), &catalog, wholesale.config()).unwrap();
    assert_eq!(summary.unit_price.cents(), 3550);
    // 3550 × 0.85 × 0.80 = 2414
    assert_eq!(summary.wholesale_unit_price.cents(), 2414);
    assert_eq!(summary.total_order_price.cents(), 2414 * 60);
    assert_eq!(summary.multiplier_label, "Boutique");

    let mut cart = Cart::new();
    cart.add_custom(builder.composition().clone(), summary.checkout_amount())
        .unwrap();

    let now = Utc.with_ymd_and_hms(2024, 5, 10, 9, 30, 0).unwrap();
    let confirmation = place_order(&cart, &form(), now).unwrap();
    assert!(confirmation.order_id.starts_with("PP-"));
    assert_eq!(confirmation.summary.total.cents(), 144_840);
}

#[tokio::test]
async fn test_undo_after_carting_does_not_touch_cart() {
    let catalog = Catalog::standard().unwrap();
    let mut builder = BouquetBuilder::new();
    builder.load_preset("Modern Minimalist").unwrap();

    let mut cart = Cart::new();
    let summary = PricingSummary::summarize(
        builder.composition(),
        &catalog,
        &Default::default(),
    )
    .unwrap();
    cart.add_custom(builder.composition().clone(), summary.checkout_amount())
        .unwrap();

    builder.undo();
    assert!(builder.composition().is_empty());

    let carted = cart.items[0].composition.as_ref().unwrap();
    assert_eq!(carted.placements.len(), 2);
    // f7 $18.00 + f5 $4.50 + paper $2.00
    assert_eq!(cart.subtotal().cents(), 2450);
}

#[test]
fn test_checkout_rejects_incomplete_form() {
    let mut cart = Cart::new();
    cart.add_ready_made(Catalog::standard().unwrap().require("f5").unwrap(), 3)
        .unwrap();

    let incomplete = OrderForm {
        email: "not-an-email".to_string(),
        ..form()
    };

    match place_order(&cart, &incomplete, Utc::now()) {
        Err(CoreError::InvalidOrderForm(errors)) => assert_eq!(errors.len(), 1),
        other => panic!("expected form errors, got {:?}", other),
    }
}
