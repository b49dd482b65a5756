//! Food Delivery Core - cart pricing and order placement.
//!
//! This crate provides the ordering logic shared by Food Delivery front ends:
//! - [`cart`] - Shopping cart with add/remove/update and totals
//! - [`order`] - Order validation, checkout summary and confirmation
//! - [`catalog`] - Restaurant directory and orderable menus
//! - [`payment`] - Payment capability and the built-in methods
//! - [`identity`] - Registration rules and the account store interface
//! - [`session`] - Per-customer session state
//!
//! # Architecture
//!
//! The core crate contains only types and logic - no file access, no
//! terminal, no network. Account storage and configuration live in the CLI.
//!
//! # Pricing
//!
//! Every order is charged 10% tax on the item subtotal plus a flat 5.00
//! delivery fee. Amounts use [`rust_decimal::Decimal`] and are not rounded
//! until display.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod identity;
pub mod order;
pub mod payment;
pub mod profile;
pub mod session;
pub mod types;

pub use cart::{Cart, CartError, CartItem, CartLine, CartUpdate};
pub use catalog::{CatalogError, Restaurant, RestaurantDirectory, RestaurantFilter, RestaurantMenu};
pub use identity::{IdentityError, IdentityStore, validate_registration};
pub use order::{OrderConfirmation, OrderError, OrderPlacement, OrderSummary};
pub use payment::{CreditCard, PayPal, PaymentError, PaymentMethod};
pub use profile::UserProfile;
pub use session::Session;
pub use types::*;
