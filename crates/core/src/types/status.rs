//! Order attempt lifecycle.

use serde::{Deserialize, Serialize};

/// Stage of a single order attempt.
///
/// ```text
/// Building -> Validating -> Rejected
///                        -> ReadyForCheckout -> Confirming -> Confirmed
///                                                          -> PaymentFailed
/// ```
///
/// Any stage except `Confirming` may return to `Building`, which is how a
/// customer edits the cart and re-attempts after a rejection or a declined
/// payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStage {
    /// Cart is being edited.
    #[default]
    Building,
    /// Cart is being checked against the menu.
    Validating,
    /// Validation failed.
    Rejected,
    /// Validation passed; summary can be shown.
    ReadyForCheckout,
    /// Payment is being processed.
    Confirming,
    /// Payment succeeded and an order id was issued.
    Confirmed,
    /// Payment was declined.
    PaymentFailed,
}

impl OrderStage {
    /// Whether the attempt has finished, successfully or not.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Confirmed | Self::PaymentFailed)
    }

    /// Whether moving from `self` to `next` is a legal step.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        match (self, next) {
            (Self::Confirming, next) => matches!(next, Self::Confirmed | Self::PaymentFailed),
            (_, Self::Building) => true,
            (Self::Building | Self::ReadyForCheckout, Self::Validating) => true,
            (Self::Validating, next) => matches!(next, Self::Rejected | Self::ReadyForCheckout),
            (Self::ReadyForCheckout, Self::Confirming) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for OrderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Building => "building",
            Self::Validating => "validating",
            Self::Rejected => "rejected",
            Self::ReadyForCheckout => "ready_for_checkout",
            Self::Confirming => "confirming",
            Self::Confirmed => "confirmed",
            Self::PaymentFailed => "payment_failed",
        };
        f.write_str(name)
    }
}
