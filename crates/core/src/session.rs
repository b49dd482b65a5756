//! Per-customer ordering session.
//!
//! A [`Session`] is created at login and owned by the front end's top-level
//! controller. It holds the live cart, tracks the stage of the current order
//! attempt, and remembers whether the cart view is already open so the front
//! end shows at most one.

use tracing::{debug, info};

use crate::cart::Cart;
use crate::catalog::RestaurantMenu;
use crate::order::{
    ORDER_VALID_MESSAGE, OrderConfirmation, OrderError, OrderPlacement, OrderSummary,
};
use crate::payment::PaymentMethod;
use crate::profile::UserProfile;
use crate::types::{Email, OrderStage};

/// State for one logged-in customer.
#[derive(Debug, Clone)]
pub struct Session {
    email: Email,
    profile: UserProfile,
    cart: Cart,
    stage: OrderStage,
    cart_view_open: bool,
}

impl Session {
    /// Start a session with an empty cart.
    #[must_use]
    pub const fn new(email: Email, profile: UserProfile) -> Self {
        Self {
            email,
            profile,
            cart: Cart::new(),
            stage: OrderStage::Building,
            cart_view_open: false,
        }
    }

    /// Logged-in customer.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Customer profile.
    #[must_use]
    pub const fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Read the cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Edit the cart. Returns the attempt to [`OrderStage::Building`].
    pub fn cart_mut(&mut self) -> &mut Cart {
        self.transition(OrderStage::Building);
        &mut self.cart
    }

    /// Stage of the current order attempt.
    #[must_use]
    pub const fn stage(&self) -> OrderStage {
        self.stage
    }

    /// Open the cart view. Returns `false` if it was already open, in which
    /// case the front end should focus the existing view.
    pub fn open_cart_view(&mut self) -> bool {
        !std::mem::replace(&mut self.cart_view_open, true)
    }

    /// Mark the cart view closed.
    pub fn close_cart_view(&mut self) {
        self.cart_view_open = false;
    }

    /// Whether the cart view is open.
    #[must_use]
    pub const fn is_cart_view_open(&self) -> bool {
        self.cart_view_open
    }

    /// A checkout attempt over this session's cart.
    #[must_use]
    pub fn placement<'a>(&'a self, menu: &'a RestaurantMenu) -> OrderPlacement<'a> {
        OrderPlacement::new(&self.cart, &self.profile, menu)
    }

    /// Validate the cart against `menu`.
    ///
    /// # Errors
    ///
    /// Returns the validation failure; the stage becomes
    /// [`OrderStage::Rejected`].
    pub fn validate(&mut self, menu: &RestaurantMenu) -> Result<(), OrderError> {
        if !self.stage.can_transition_to(OrderStage::Validating) {
            self.transition(OrderStage::Building);
        }
        self.transition(OrderStage::Validating);

        let result = self.placement(menu).validate_order();
        if result.is_ok() {
            info!(items = self.cart.len(), "{ORDER_VALID_MESSAGE}");
            self.transition(OrderStage::ReadyForCheckout);
        } else {
            self.transition(OrderStage::Rejected);
        }
        result
    }

    /// Validate and summarize the order for review.
    ///
    /// # Errors
    ///
    /// Returns the validation failure, as [`Self::validate`].
    pub fn checkout(&mut self, menu: &RestaurantMenu) -> Result<OrderSummary, OrderError> {
        self.validate(menu)?;
        Ok(self.placement(menu).proceed_to_checkout())
    }

    /// Confirm the order and charge `payment`.
    ///
    /// Always validates against `menu` first, so a rejected order ends in
    /// [`OrderStage::Rejected`] and is never charged. The cart is emptied once
    /// the order is confirmed; after a declined payment it is kept so the
    /// customer can try again.
    ///
    /// # Errors
    ///
    /// Returns a validation failure or [`OrderError::PaymentDeclined`].
    pub fn confirm<P>(
        &mut self,
        menu: &RestaurantMenu,
        payment: &P,
    ) -> Result<OrderConfirmation, OrderError>
    where
        P: PaymentMethod + ?Sized,
    {
        self.validate(menu)?;
        self.transition(OrderStage::Confirming);

        match self.placement(menu).charge(payment) {
            Ok(confirmation) => {
                self.transition(OrderStage::Confirmed);
                self.cart.clear();
                Ok(confirmation)
            }
            Err(err) => {
                self.transition(OrderStage::PaymentFailed);
                Err(err)
            }
        }
    }

    fn transition(&mut self, next: OrderStage) {
        if self.stage == next {
            return;
        }
        debug_assert!(
            self.stage.can_transition_to(next),
            "illegal order stage transition {} -> {next}",
            self.stage
        );
        debug!(from = %self.stage, to = %next, "Order stage changed");
        self.stage = next;
    }
}
