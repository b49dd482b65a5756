//! Payment capability.
//!
//! The ordering core only needs to know whether a charge went through, so a
//! payment method is anything that can answer `process_payment(amount)` with
//! a boolean. Real gateways are out of scope; the two methods here are the
//! ones the checkout form offers.

use rust_decimal::Decimal;

use crate::types::Email;

/// Number of digits in an accepted card number.
pub const CARD_NUMBER_LENGTH: usize = 16;

/// Errors constructing a payment method.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// Card number is not exactly 16 digits.
    #[error("card number must be {CARD_NUMBER_LENGTH} digits")]
    InvalidCardNumber,
}

/// Something that can charge the customer.
pub trait PaymentMethod {
    /// Short name for logs (e.g. `"credit_card"`).
    fn kind(&self) -> &'static str;

    /// Attempt to charge `amount`. Returns `true` if the charge succeeded.
    ///
    /// Implementations must return `false` for amounts `<= 0`.
    fn process_payment(&self, amount: Decimal) -> bool;
}

/// Whether `amount` is something that can be charged at all.
#[must_use]
pub fn is_chargeable(amount: Decimal) -> bool {
    amount > Decimal::ZERO
}

/// Credit card payment.
///
/// `Debug` only shows the last four digits.
#[derive(Clone, PartialEq, Eq)]
pub struct CreditCard {
    number: String,
}

impl CreditCard {
    /// Validate a card number. Spaces and dashes are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::InvalidCardNumber`] unless the remaining
    /// characters are exactly 16 ASCII digits.
    pub fn parse(number: &str) -> Result<Self, PaymentError> {
        let digits: String = number
            .chars()
            .filter(|c| !matches!(c, ' ' | '-'))
            .collect();

        if digits.len() != CARD_NUMBER_LENGTH || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(PaymentError::InvalidCardNumber);
        }

        Ok(Self { number: digits })
    }

    /// Last four digits of the card.
    #[must_use]
    pub fn last_four(&self) -> &str {
        self.number
            .get(CARD_NUMBER_LENGTH - 4..)
            .unwrap_or_default()
    }

    /// Card number with all but the last four digits hidden.
    #[must_use]
    pub fn masked(&self) -> String {
        format!("**** **** **** {}", self.last_four())
    }
}

impl std::fmt::Debug for CreditCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreditCard")
            .field("number", &self.masked())
            .finish()
    }
}

impl PaymentMethod for CreditCard {
    fn kind(&self) -> &'static str {
        "credit_card"
    }

    fn process_payment(&self, amount: Decimal) -> bool {
        is_chargeable(amount)
    }
}

/// `PayPal` payment bound to an account email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayPal {
    account: Email,
}

impl PayPal {
    /// Pay from the given account.
    #[must_use]
    pub const fn new(account: Email) -> Self {
        Self { account }
    }

    /// Account being charged.
    #[must_use]
    pub const fn account(&self) -> &Email {
        &self.account
    }
}

impl PaymentMethod for PayPal {
    fn kind(&self) -> &'static str {
        "paypal"
    }

    fn process_payment(&self, amount: Decimal) -> bool {
        is_chargeable(amount)
    }
}
