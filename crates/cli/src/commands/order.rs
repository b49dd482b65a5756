//! Order placement: log in, fill the cart, check out, and pay.
//!
//! # Usage
//!
//! ```bash
//! fd-cli order -e diner@example.com -p hunter22 -r "Burger Barn" \
//!     --item Burger:2 --item Fries \
//!     --payment credit-card --card 1234567812345678
//! ```

use core::str::FromStr;

use clap::ValueEnum;
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use food_delivery_core::{
    CartError, CreditCard, IdentityError, IdentityStore, OrderConfirmation, OrderError,
    OrderSummary, PayPal, PaymentError, PaymentMethod, RestaurantDirectory, RestaurantMenu,
    Session, UserProfile, format_price,
};

/// Errors that can occur while placing an order.
#[derive(Debug, Error)]
pub enum OrderCommandError {
    /// Login failed.
    #[error("Login failed: {0}")]
    Identity(#[from] IdentityError),

    /// Restaurant name not in the directory.
    #[error("Unknown restaurant: {0}")]
    UnknownRestaurant(String),

    /// Cart rejected an item.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Order could not be placed.
    #[error("{0}")]
    Order(#[from] OrderError),

    /// Payment details invalid.
    #[error("Payment error: {0}")]
    Payment(#[from] PaymentError),

    /// Credit card chosen without a card number.
    #[error("--card is required when paying by credit card")]
    MissingCardNumber,
}

/// Errors parsing a `DISH[:QTY]` argument.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DishSpecError {
    #[error("dish name cannot be empty")]
    EmptyName,
    #[error("invalid quantity {0:?}: must be a whole number greater than 0")]
    InvalidQuantity(String),
}

/// A dish and how many to add, parsed from `DISH[:QTY]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DishSpec {
    pub name: String,
    pub quantity: u32,
}

impl FromStr for DishSpec {
    type Err = DishSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, quantity) = match s.rsplit_once(':') {
            Some((name, quantity)) => {
                let quantity = quantity
                    .trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|&q| q > 0)
                    .ok_or_else(|| DishSpecError::InvalidQuantity(quantity.to_string()))?;
                (name, quantity)
            }
            None => (s, 1),
        };

        let name = name.trim();
        if name.is_empty() {
            return Err(DishSpecError::EmptyName);
        }

        Ok(Self {
            name: name.to_string(),
            quantity,
        })
    }
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum PaymentChoice {
    #[default]
    CreditCard,
    Paypal,
}

/// Everything needed to place one order.
#[derive(Debug)]
pub struct OrderRequest {
    pub email: String,
    pub password: SecretString,
    pub restaurant: String,
    pub items: Vec<DishSpec>,
    pub remove: Vec<String>,
    pub delivery_address: String,
    pub dish_price: Decimal,
    pub payment: PaymentChoice,
    pub card_number: Option<String>,
}

/// Log in, build the cart, check out and confirm.
///
/// # Errors
///
/// Returns `OrderCommandError` for failed login, unknown restaurant, invalid
/// cart input, invalid payment details, a rejected order, or a declined
/// payment.
pub fn place_order(
    store: &impl IdentityStore,
    directory: &RestaurantDirectory,
    request: &OrderRequest,
) -> Result<OrderConfirmation, OrderCommandError> {
    let email = store.authenticate(&request.email, request.password.expose_secret())?;
    tracing::info!("Welcome, {}", email);

    let restaurant = directory
        .get(&request.restaurant)
        .ok_or_else(|| OrderCommandError::UnknownRestaurant(request.restaurant.clone()))?;
    let menu = RestaurantMenu::from(restaurant);

    // Validate payment details before touching the cart
    let payment: Box<dyn PaymentMethod> = match request.payment {
        PaymentChoice::CreditCard => {
            let number = request
                .card_number
                .as_deref()
                .ok_or(OrderCommandError::MissingCardNumber)?;
            Box::new(CreditCard::parse(number)?)
        }
        PaymentChoice::Paypal => Box::new(PayPal::new(email.clone())),
    };

    let mut session = Session::new(email, UserProfile::new(request.delivery_address.clone()));

    for dish in &request.items {
        let update = session
            .cart_mut()
            .add_item(&dish.name, request.dish_price, dish.quantity)?;
        tracing::info!("{update}");
    }
    for name in &request.remove {
        let update = session.cart_mut().remove_item(name);
        tracing::info!("{update}");
    }

    if session.open_cart_view() {
        log_cart(&session);
        session.close_cart_view();
    }

    let summary = session.checkout(&menu)?;
    log_summary(&restaurant.name, &summary);

    let confirmation = session.confirm(&menu, payment.as_ref())?;
    tracing::info!("{}", confirmation.message());
    tracing::info!("  Order ID: {}", confirmation.order_id);
    tracing::info!("  Charged: {}", format_price(confirmation.amount_charged));
    tracing::info!("  Estimated Delivery: {}", confirmation.estimated_delivery());

    Ok(confirmation)
}

fn log_cart(session: &Session) {
    let cart = session.cart();
    if cart.is_empty() {
        tracing::info!("Your cart is empty");
        return;
    }

    tracing::info!("Cart ({} item(s)):", cart.item_count());
    for line in cart.view_cart() {
        tracing::info!("  {} x{} = {}", line.name, line.quantity, format_price(line.subtotal));
    }
}

fn log_summary(restaurant: &str, summary: &OrderSummary) {
    tracing::info!("Review your order from {}:", restaurant);
    for line in &summary.items {
        tracing::info!("  {} x{} = {}", line.name, line.quantity, format_price(line.subtotal));
    }
    tracing::info!("  Subtotal: {}", format_price(summary.totals.subtotal));
    tracing::info!("  Tax: {}", format_price(summary.totals.tax));
    tracing::info!("  Delivery Fee: {}", format_price(summary.totals.delivery_fee));
    tracing::info!("  Total: {}", format_price(summary.totals.total));
    tracing::info!("  Delivery Address: {}", summary.delivery_address);
}
