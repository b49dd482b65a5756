//! Integration tests for a full checkout session.
//!
//! Covers the customer path from an empty cart through validation, review,
//! and confirmation, including retry after a declined payment.

use food_delivery_core::{
    CartUpdate, Email, OrderError, OrderPlacement, OrderStage, RestaurantMenu, Session, UserProfile,
};
use food_delivery_integration_tests::{ScriptedPayment, dec};

fn new_session() -> Session {
    Session::new(
        Email::parse("diner@example.com").expect("valid email"),
        UserProfile::new("123 Main St"),
    )
}

fn menu() -> RestaurantMenu {
    RestaurantMenu::new(["Burger", "Pizza", "Salad"])
}

#[test]
fn test_full_checkout() {
    let mut session = new_session();
    let menu = menu();
    let payment = ScriptedPayment::approving();

    let cart = session.cart_mut();
    cart.add_item("Burger", dec("8.99"), 1).expect("add burger");
    cart.add_item("Salad", dec("6.50"), 2).expect("add salad");
    let update = cart.add_item("Burger", dec("8.99"), 1).expect("add burger again");
    assert_eq!(update.to_string(), "Updated Burger quantity to 2");

    let summary = session.checkout(&menu).expect("valid order");
    assert_eq!(summary.items.len(), 2);
    assert_eq!(summary.totals.subtotal, dec("30.98"));
    assert_eq!(summary.totals.tax, dec("3.098"));
    assert_eq!(summary.totals.delivery_fee, dec("5.00"));
    assert_eq!(summary.totals.total, dec("39.078"));

    let confirmation = session.confirm(&menu, &payment).expect("payment approved");
    assert_eq!(confirmation.message(), "Order confirmed");
    assert!(!confirmation.order_id.as_str().is_empty());
    assert_eq!(confirmation.estimated_delivery(), "30 minutes");
    assert_eq!(payment.charges(), vec![dec("39.078")]);
    assert_eq!(session.stage(), OrderStage::Confirmed);
    assert!(session.cart().is_empty());
}

#[test]
fn test_retry_after_declined_payment() {
    let mut session = new_session();
    let menu = menu();
    session
        .cart_mut()
        .add_item("Pizza", dec("12.99"), 1)
        .expect("add pizza");

    let declined = ScriptedPayment::declining();
    let err = session.confirm(&menu, &declined).expect_err("declined");
    assert_eq!(err, OrderError::PaymentDeclined);
    assert_eq!(err.to_string(), "Payment failed");
    assert_eq!(session.stage(), OrderStage::PaymentFailed);

    let approved = ScriptedPayment::approving();
    assert!(session.confirm(&menu, &approved).is_ok());
    assert_eq!(approved.charges(), declined.charges());
}

#[test]
fn test_fix_rejected_cart_and_resubmit() {
    let mut session = new_session();
    let menu = menu();
    session
        .cart_mut()
        .add_item("Pasta", dec("15.99"), 1)
        .expect("add pasta");

    assert_eq!(
        session.validate(&menu),
        Err(OrderError::ItemUnavailable("Pasta".to_string()))
    );
    assert_eq!(session.stage(), OrderStage::Rejected);

    let cart = session.cart_mut();
    assert_eq!(
        cart.remove_item("Pasta"),
        CartUpdate::Removed {
            name: "Pasta".to_string()
        }
    );
    cart.add_item("Pizza", dec("12.99"), 1).expect("add pizza");

    assert_eq!(session.validate(&menu), Ok(()));
    assert_eq!(session.stage(), OrderStage::ReadyForCheckout);
}

#[test]
fn test_checkout_review_does_not_change_cart() {
    let mut session = new_session();
    let menu = menu();
    session
        .cart_mut()
        .add_item("Burger", dec("8.99"), 2)
        .expect("add burger");
    let before = session.cart().clone();

    let first = session.checkout(&menu).expect("valid order");
    let second = session.checkout(&menu).expect("valid order");

    assert_eq!(first, second);
    assert_eq!(session.cart(), &before);
    assert_eq!(first.totals.total, dec("24.778"));
}

#[test]
fn test_summary_serializes_for_display() {
    let mut session = new_session();
    let menu = menu();
    session
        .cart_mut()
        .add_item("Burger", dec("8.99"), 2)
        .expect("add burger");

    let summary =
        OrderPlacement::new(session.cart(), session.profile(), &menu).proceed_to_checkout();
    let json = serde_json::to_value(&summary).expect("serializable");

    assert_eq!(json["delivery_address"], "123 Main St");
    assert_eq!(json["items"][0]["name"], "Burger");
    assert_eq!(json["totals"]["total"], "24.778");
}
