//! Core value types for Food Delivery.
//!
//! Type-safe wrappers for identities, ids, money and order stages.

pub mod credential;
pub mod email;
pub mod id;
pub mod money;
pub mod status;

pub use credential::StoredPasswordHash;
pub use email::{Email, EmailError};
pub use id::OrderId;
pub use money::{
    DELIVERY_FEE, MAX_SUBTOTAL, OrderTotals, Pricing, PricingError, TAX_RATE, format_price,
};
pub use status::OrderStage;
