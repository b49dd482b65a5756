//! Shopping cart.
//!
//! A [`Cart`] is an insertion-ordered list of [`CartItem`]s keyed by item
//! name. At rest every quantity is positive and no two items share a name:
//! adding a name that is already present bumps its quantity, and setting a
//! quantity to zero removes the line. Names are compared after trimming
//! surrounding whitespace, and the item subtotal never exceeds
//! [`MAX_SUBTOTAL`].
//!
//! Mutations report what happened through [`CartUpdate`], whose `Display`
//! output is the status line shown to the customer.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{MAX_SUBTOTAL, OrderTotals, Pricing};

/// Errors for cart operations that break the cart's contract.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Item name is empty or whitespace.
    #[error("item name cannot be empty")]
    EmptyName,
    /// Quantity to add was zero.
    #[error("quantity must be greater than 0")]
    InvalidQuantity,
    /// Unit price was below zero.
    #[error("price cannot be negative: {0}")]
    NegativePrice(Decimal),
    /// Adding would overflow the line quantity.
    #[error("quantity for {0} is too large")]
    QuantityOverflow(String),
    /// The change would push the item subtotal past [`MAX_SUBTOTAL`].
    #[error("order amount for {0} is too large")]
    AmountTooLarge(String),
    /// A stored cart lists the same item twice.
    #[error("{0} appears more than once")]
    DuplicateItem(String),
}

/// Outcome of a cart mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CartUpdate {
    /// A new line was appended.
    Added {
        /// Item name.
        name: String,
    },
    /// An existing line now has `quantity`.
    Updated {
        /// Item name.
        name: String,
        /// Quantity after the update.
        quantity: u32,
    },
    /// A line was removed.
    Removed {
        /// Item name.
        name: String,
    },
    /// No line with that name exists; the cart is unchanged.
    NotFound {
        /// Item name.
        name: String,
    },
}

impl CartUpdate {
    /// Whether the cart contents changed.
    #[must_use]
    pub const fn changed(&self) -> bool {
        !matches!(self, Self::NotFound { .. })
    }
}

impl fmt::Display for CartUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added { name } => write!(f, "Added {name} to cart"),
            Self::Updated { name, quantity } => write!(f, "Updated {name} quantity to {quantity}"),
            Self::Removed { name } => write!(f, "Removed {name} from cart"),
            Self::NotFound { name } => write!(f, "{name} not found in cart"),
        }
    }
}

/// One line in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItem {
    name: String,
    unit_price: Decimal,
    quantity: u32,
}

impl CartItem {
    /// Item name, unique within its cart.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Price of a single unit.
    #[must_use]
    pub const fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Number of units, always at least 1.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// `unit_price * quantity`.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Read-only view of a cart line, as shown to the customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    /// Item name.
    pub name: String,
    /// Number of units.
    pub quantity: u32,
    /// Line subtotal.
    pub subtotal: Decimal,
}

impl From<&CartItem> for CartLine {
    fn from(item: &CartItem) -> Self {
        Self {
            name: item.name.clone(),
            quantity: item.quantity,
            subtotal: item.subtotal(),
        }
    }
}

/// A shopping cart.
///
/// ```
/// use food_delivery_core::Cart;
/// use rust_decimal::Decimal;
///
/// let mut cart = Cart::new();
/// cart.add_item("Apple", Decimal::ONE, 5).unwrap();
/// let update = cart.add_item("Apple", Decimal::ONE, 3).unwrap();
///
/// assert_eq!(update.to_string(), "Updated Apple quantity to 8");
/// assert_eq!(cart.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredCart")]
pub struct Cart {
    items: Vec<CartItem>,
}

/// Wire shape of a serialized [`Cart`], checked line by line on load.
#[derive(Deserialize)]
struct StoredCart {
    items: Vec<StoredItem>,
}

#[derive(Deserialize)]
struct StoredItem {
    name: String,
    unit_price: Decimal,
    quantity: u32,
}

impl TryFrom<StoredCart> for Cart {
    type Error = CartError;

    fn try_from(stored: StoredCart) -> Result<Self, Self::Error> {
        let mut cart = Self::new();
        for item in stored.items {
            if cart.get(&item.name).is_some() {
                return Err(CartError::DuplicateItem(item.name.trim().to_owned()));
            }
            cart.add_item(&item.name, item.unit_price, item.quantity)?;
        }
        Ok(cart)
    }
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add `quantity` units of `name` at `unit_price`.
    ///
    /// If the name is already in the cart the quantity is added to the
    /// existing line and its original unit price is kept.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] and leaves the cart untouched if the name is
    /// blank, the quantity is zero, the price is negative, the new quantity
    /// would overflow, or the item subtotal would exceed [`MAX_SUBTOTAL`].
    pub fn add_item(
        &mut self,
        name: &str,
        unit_price: Decimal,
        quantity: u32,
    ) -> Result<CartUpdate, CartError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CartError::EmptyName);
        }
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }
        if unit_price < Decimal::ZERO {
            return Err(CartError::NegativePrice(unit_price));
        }

        if let Some(existing) = self.get(name) {
            let (unit_price, current) = (existing.unit_price, existing.quantity);
            let quantity = current
                .checked_add(quantity)
                .ok_or_else(|| CartError::QuantityOverflow(name.to_owned()))?;
            self.check_amount(name, unit_price, quantity)?;
            self.set_quantity(name, quantity);
            debug!(item = name, quantity, "Cart line updated");
            return Ok(CartUpdate::Updated {
                name: name.to_owned(),
                quantity,
            });
        }

        self.check_amount(name, unit_price, quantity)?;
        self.items.push(CartItem {
            name: name.to_owned(),
            unit_price,
            quantity,
        });
        debug!(item = name, quantity, "Cart line added");
        Ok(CartUpdate::Added {
            name: name.to_owned(),
        })
    }

    /// Remove the line named `name`, if any.
    pub fn remove_item(&mut self, name: &str) -> CartUpdate {
        let name = name.trim();
        let before = self.items.len();
        self.items.retain(|item| item.name != name);

        if self.items.len() == before {
            CartUpdate::NotFound {
                name: name.to_owned(),
            }
        } else {
            debug!(item = name, "Cart line removed");
            CartUpdate::Removed {
                name: name.to_owned(),
            }
        }
    }

    /// Set the quantity of an existing line. A quantity of zero removes it.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::AmountTooLarge`] and leaves the line untouched if
    /// the item subtotal would exceed [`MAX_SUBTOTAL`].
    pub fn update_item_quantity(
        &mut self,
        name: &str,
        quantity: u32,
    ) -> Result<CartUpdate, CartError> {
        let name = name.trim();
        if quantity == 0 {
            return Ok(self.remove_item(name));
        }

        let Some(unit_price) = self.get(name).map(CartItem::unit_price) else {
            return Ok(CartUpdate::NotFound {
                name: name.to_owned(),
            });
        };

        self.check_amount(name, unit_price, quantity)?;
        self.set_quantity(name, quantity);
        debug!(item = name, quantity, "Cart line quantity set");
        Ok(CartUpdate::Updated {
            name: name.to_owned(),
            quantity,
        })
    }

    /// Sum of all line subtotals.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    /// Totals at the standard 10% tax and 5.00 delivery fee.
    #[must_use]
    pub fn calculate_total(&self) -> OrderTotals {
        self.calculate_total_with(&Pricing::default())
    }

    /// Totals under a specific pricing.
    #[must_use]
    pub fn calculate_total_with(&self, pricing: &Pricing) -> OrderTotals {
        pricing.totals(self.subtotal())
    }

    /// Lazily walk the cart lines in insertion order.
    pub fn view_cart(&self) -> impl Iterator<Item = CartLine> + '_ {
        self.items.iter().map(CartLine::from)
    }

    /// Borrow the underlying items.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Look up a line by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CartItem> {
        let name = name.trim();
        self.items.iter().find(|item| item.name == name)
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Fail unless the cart stays within [`MAX_SUBTOTAL`] with the line
    /// `name` holding `quantity` units at `unit_price`.
    fn check_amount(
        &self,
        name: &str,
        unit_price: Decimal,
        quantity: u32,
    ) -> Result<(), CartError> {
        let subtotal = unit_price
            .checked_mul(Decimal::from(quantity))
            .and_then(|line| {
                self.items
                    .iter()
                    .filter(|item| item.name != name)
                    .try_fold(line, |sum, item| sum.checked_add(item.subtotal()))
            });

        match subtotal {
            Some(subtotal) if subtotal <= MAX_SUBTOTAL => Ok(()),
            _ => Err(CartError::AmountTooLarge(name.to_owned())),
        }
    }

    fn set_quantity(&mut self, name: &str, quantity: u32) {
        if let Some(item) = self.items.iter_mut().find(|item| item.name == name) {
            item.quantity = quantity;
        }
    }
}
