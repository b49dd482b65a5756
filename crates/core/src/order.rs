//! Order placement.
//!
//! [`OrderPlacement`] borrows a live [`Cart`] together with the customer's
//! [`UserProfile`] and the [`RestaurantMenu`] being ordered from. It never
//! mutates the cart: validation and checkout summaries are pure reads, and
//! confirmation only charges the payment method and issues an id.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use crate::cart::{Cart, CartLine};
use crate::catalog::RestaurantMenu;
use crate::payment::PaymentMethod;
use crate::profile::UserProfile;
use crate::types::{OrderId, OrderTotals, Pricing};

/// Message reported for an order that passed validation.
pub const ORDER_VALID_MESSAGE: &str = "Order is valid";

/// Message reported with a confirmed order.
pub const ORDER_CONFIRMED_MESSAGE: &str = "Order confirmed";

/// Quoted delivery time for every confirmed order.
pub const ESTIMATED_DELIVERY_MINUTES: i64 = 30;

/// Reasons an order cannot be placed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// The cart has no items.
    #[error("Cart is empty")]
    EmptyCart,
    /// A cart item is not on the restaurant's menu.
    #[error("{0} is not available")]
    ItemUnavailable(String),
    /// The order total is not positive.
    #[error("Order total is zero or negative")]
    NonPositiveTotal,
    /// The payment method declined the charge.
    #[error("Payment failed")]
    PaymentDeclined,
}

/// Everything the customer reviews before confirming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    /// Cart lines in insertion order.
    pub items: Vec<CartLine>,
    /// Price breakdown.
    pub totals: OrderTotals,
    /// Delivery address from the profile.
    pub delivery_address: String,
}

/// A confirmed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderConfirmation {
    /// Issued order id.
    pub order_id: OrderId,
    /// Amount charged.
    pub amount_charged: Decimal,
    /// When the order was confirmed.
    pub placed_at: DateTime<Utc>,
    /// Quoted delivery time.
    pub estimated_delivery_minutes: i64,
}

impl OrderConfirmation {
    /// Status message shown with the confirmation.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        ORDER_CONFIRMED_MESSAGE
    }

    /// Quoted delivery time as text, e.g. `"30 minutes"`.
    #[must_use]
    pub fn estimated_delivery(&self) -> String {
        format!("{} minutes", self.estimated_delivery_minutes)
    }

    /// Expected arrival time.
    #[must_use]
    pub fn estimated_arrival(&self) -> DateTime<Utc> {
        self.placed_at + Duration::minutes(self.estimated_delivery_minutes)
    }
}

/// One checkout attempt over a live cart.
///
/// ```
/// use food_delivery_core::{Cart, OrderError, OrderPlacement, RestaurantMenu, UserProfile};
/// use rust_decimal::Decimal;
///
/// let menu = RestaurantMenu::new(["Burger", "Pizza", "Salad"]);
/// let profile = UserProfile::new("123 Main St");
/// let mut cart = Cart::new();
/// cart.add_item("Pasta", Decimal::new(1599, 2), 1).unwrap();
///
/// let order = OrderPlacement::new(&cart, &profile, &menu);
/// assert_eq!(
///     order.validate_order(),
///     Err(OrderError::ItemUnavailable("Pasta".to_string()))
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct OrderPlacement<'a> {
    cart: &'a Cart,
    profile: &'a UserProfile,
    menu: &'a RestaurantMenu,
    pricing: Pricing,
}

impl<'a> OrderPlacement<'a> {
    /// Start a checkout attempt at standard pricing.
    #[must_use]
    pub fn new(cart: &'a Cart, profile: &'a UserProfile, menu: &'a RestaurantMenu) -> Self {
        Self {
            cart,
            profile,
            menu,
            pricing: Pricing::default(),
        }
    }

    /// Use a different pricing for this attempt.
    #[must_use]
    pub const fn with_pricing(mut self, pricing: Pricing) -> Self {
        self.pricing = pricing;
        self
    }

    /// Current totals for the cart.
    #[must_use]
    pub fn totals(&self) -> OrderTotals {
        self.cart.calculate_total_with(&self.pricing)
    }

    /// Check that the order can be placed.
    ///
    /// Checks run in order: the cart must have items, every item must be on
    /// the menu (the first missing one, in cart order, is reported), and the
    /// total must be positive.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::EmptyCart`], [`OrderError::ItemUnavailable`], or
    /// [`OrderError::NonPositiveTotal`].
    pub fn validate_order(&self) -> Result<(), OrderError> {
        if self.cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        if let Some(item) = self
            .cart
            .items()
            .iter()
            .find(|item| !self.menu.is_item_available(item.name()))
        {
            return Err(OrderError::ItemUnavailable(item.name().to_owned()));
        }

        if self.totals().total <= Decimal::ZERO {
            return Err(OrderError::NonPositiveTotal);
        }

        Ok(())
    }

    /// Summarize the order for review. Does not validate or mutate anything.
    #[must_use]
    pub fn proceed_to_checkout(&self) -> OrderSummary {
        OrderSummary {
            items: self.cart.view_cart().collect(),
            totals: self.totals(),
            delivery_address: self.profile.delivery_address().to_owned(),
        }
    }

    /// Validate the order and charge its total to `payment`.
    ///
    /// # Errors
    ///
    /// Returns any validation error from [`Self::validate_order`] without
    /// charging, or [`OrderError::PaymentDeclined`] if the charge fails.
    pub fn confirm_order<P>(&self, payment: &P) -> Result<OrderConfirmation, OrderError>
    where
        P: PaymentMethod + ?Sized,
    {
        self.validate_order()?;
        self.charge(payment)
    }

    /// Charge the total to `payment` without validating first.
    pub(crate) fn charge<P>(&self, payment: &P) -> Result<OrderConfirmation, OrderError>
    where
        P: PaymentMethod + ?Sized,
    {
        let total = self.totals().total;
        if !payment.process_payment(total) {
            warn!(method = payment.kind(), %total, "Payment declined");
            return Err(OrderError::PaymentDeclined);
        }

        let confirmation = OrderConfirmation {
            order_id: OrderId::generate(),
            amount_charged: total,
            placed_at: Utc::now(),
            estimated_delivery_minutes: ESTIMATED_DELIVERY_MINUTES,
        };
        info!(
            order_id = %confirmation.order_id,
            method = payment.kind(),
            %total,
            "Order confirmed"
        );
        Ok(confirmation)
    }
}
