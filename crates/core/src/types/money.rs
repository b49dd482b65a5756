//! Order pricing using decimal arithmetic.
//!
//! Every order is charged a 10% tax on the item subtotal plus a flat delivery
//! fee of 5.00. Amounts are kept unrounded; rounding only happens at display
//! time via [`format_price`].
//!
//! Item subtotals are capped at [`MAX_SUBTOTAL`] and a [`Pricing`] can only
//! hold a tax rate up to 100% and a fee up to the same cap, so computing
//! [`OrderTotals`] never overflows.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tax rate applied to the item subtotal (10%).
pub const TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Flat delivery fee added to every order (5.00).
pub const DELIVERY_FEE: Decimal = Decimal::from_parts(500, 0, 0, false, 2);

/// Largest item subtotal a cart accepts (1,000,000,000.00).
pub const MAX_SUBTOTAL: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Errors constructing a [`Pricing`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("tax rate must be between 0 and 1, got {0}")]
    InvalidTaxRate(Decimal),
    #[error("delivery fee must be between 0 and {MAX_SUBTOTAL}, got {0}")]
    InvalidDeliveryFee(Decimal),
}

/// Rates used to turn an item subtotal into order totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pricing {
    tax_rate: Decimal,
    delivery_fee: Decimal,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            tax_rate: TAX_RATE,
            delivery_fee: DELIVERY_FEE,
        }
    }
}

impl Pricing {
    /// Create a pricing with a custom tax rate and delivery fee.
    ///
    /// # Errors
    ///
    /// Returns `PricingError` if the tax rate is outside `0..=1` or the fee
    /// is outside `0..=MAX_SUBTOTAL`.
    pub fn new(tax_rate: Decimal, delivery_fee: Decimal) -> Result<Self, PricingError> {
        if tax_rate < Decimal::ZERO || tax_rate > Decimal::ONE {
            return Err(PricingError::InvalidTaxRate(tax_rate));
        }
        if delivery_fee < Decimal::ZERO || delivery_fee > MAX_SUBTOTAL {
            return Err(PricingError::InvalidDeliveryFee(delivery_fee));
        }
        Ok(Self {
            tax_rate,
            delivery_fee,
        })
    }

    /// Fraction of the subtotal charged as tax.
    #[must_use]
    pub const fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    /// Flat fee per order.
    #[must_use]
    pub const fn delivery_fee(&self) -> Decimal {
        self.delivery_fee
    }

    /// Compute the full breakdown for an item subtotal.
    ///
    /// `subtotal` must not exceed [`MAX_SUBTOTAL`]; carts never hold more.
    #[must_use]
    pub fn totals(&self, subtotal: Decimal) -> OrderTotals {
        let tax = subtotal * self.tax_rate;
        OrderTotals {
            subtotal,
            tax,
            delivery_fee: self.delivery_fee,
            total: subtotal + tax + self.delivery_fee,
        }
    }
}

/// Price breakdown of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    /// Sum of line subtotals.
    pub subtotal: Decimal,
    /// Tax on the subtotal.
    pub tax: Decimal,
    /// Delivery fee.
    pub delivery_fee: Decimal,
    /// Amount charged to the customer.
    pub total: Decimal,
}

/// Format an amount for display (e.g. `$24.78`).
#[must_use]
pub fn format_price(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rates() {
        assert_eq!(TAX_RATE, Decimal::new(10, 2));
        assert_eq!(DELIVERY_FEE, Decimal::new(500, 2));
        assert_eq!(Pricing::default().tax_rate(), TAX_RATE);
        assert_eq!(Pricing::default().delivery_fee(), DELIVERY_FEE);
    }

    #[test]
    fn test_pricing_bounds() {
        assert!(Pricing::new(Decimal::ZERO, Decimal::ZERO).is_ok());
        assert!(Pricing::new(Decimal::ONE, MAX_SUBTOTAL).is_ok());
        assert_eq!(
            Pricing::new(Decimal::new(11, 1), DELIVERY_FEE),
            Err(PricingError::InvalidTaxRate(Decimal::new(11, 1)))
        );
        assert_eq!(
            Pricing::new(TAX_RATE, Decimal::NEGATIVE_ONE),
            Err(PricingError::InvalidDeliveryFee(Decimal::NEGATIVE_ONE))
        );
        assert_eq!(
            Pricing::new(TAX_RATE, Decimal::MAX),
            Err(PricingError::InvalidDeliveryFee(Decimal::MAX))
        );
    }

    #[test]
    fn test_totals_at_the_limits() {
        let pricing = Pricing::new(Decimal::ONE, MAX_SUBTOTAL).unwrap();
        let totals = pricing.totals(MAX_SUBTOTAL);
        assert_eq!(totals.total, MAX_SUBTOTAL * Decimal::from(3));
    }

    #[test]
    fn test_totals_breakdown() {
        let totals = Pricing::default().totals(Decimal::new(1798, 2));
        assert_eq!(totals.subtotal, Decimal::new(1798, 2));
        assert_eq!(totals.tax, Decimal::new(1798, 3));
        assert_eq!(totals.delivery_fee, Decimal::new(5, 0));
        assert_eq!(totals.total, Decimal::new(24778, 3));
    }

    #[test]
    fn test_totals_on_zero_subtotal_is_just_the_fee() {
        let totals = Pricing::default().totals(Decimal::ZERO);
        assert_eq!(totals.tax, Decimal::ZERO);
        assert_eq!(totals.total, DELIVERY_FEE);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Decimal::new(24778, 3)), "$24.78");
        assert_eq!(format_price(Decimal::new(5, 0)), "$5.00");
        assert_eq!(format_price(Decimal::new(1798, 3)), "$1.80");
    }
}
