//! End-to-end ordering tests for Food Delivery.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p food-delivery-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - Session from empty cart to confirmed order
//! - `catalog_ordering` - Menus derived from the restaurant directory

use std::cell::RefCell;

use rust_decimal::Decimal;

use food_delivery_core::PaymentMethod;

/// Payment double that records every charge and answers with a fixed result.
#[derive(Debug, Default)]
pub struct ScriptedPayment {
    approve: bool,
    charges: RefCell<Vec<Decimal>>,
}

impl ScriptedPayment {
    /// A payment method that approves every positive charge.
    #[must_use]
    pub fn approving() -> Self {
        Self {
            approve: true,
            charges: RefCell::default(),
        }
    }

    /// A payment method that declines every charge.
    #[must_use]
    pub fn declining() -> Self {
        Self::default()
    }

    /// Amounts charged so far.
    #[must_use]
    pub fn charges(&self) -> Vec<Decimal> {
        self.charges.borrow().clone()
    }
}

impl PaymentMethod for ScriptedPayment {
    fn kind(&self) -> &'static str {
        "scripted"
    }

    fn process_payment(&self, amount: Decimal) -> bool {
        self.charges.borrow_mut().push(amount);
        self.approve && amount > Decimal::ZERO
    }
}

/// Parse a decimal literal used in tests.
///
/// # Panics
///
/// Panics if `s` is not a valid decimal.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}
