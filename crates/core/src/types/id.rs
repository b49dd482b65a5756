//! Order identifiers.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier handed back to the customer when an order is confirmed.
///
/// Generated ids look like `ORD1A2B3C4D`: the `ORD` prefix followed by eight
/// uppercase hex digits taken from a random v4 UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Prefix shared by every generated order id.
    pub const PREFIX: &'static str = "ORD";

    /// Generate a fresh random order id.
    #[must_use]
    pub fn generate() -> Self {
        let (high, ..) = Uuid::new_v4().as_fields();
        Self(format!("{}{high:08X}", Self::PREFIX))
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<OrderId> for String {
    fn from(id: OrderId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_format() {
        let id = OrderId::generate();
        assert!(id.as_str().starts_with(OrderId::PREFIX));
        assert_eq!(id.as_str().len(), OrderId::PREFIX.len() + 8);
        assert!(
            id.as_str()
                .trim_start_matches(OrderId::PREFIX)
                .chars()
                .all(|c| c.is_ascii_hexdigit())
        );
    }

    #[test]
    fn test_generate_is_unique() {
        assert_ne!(OrderId::generate(), OrderId::generate());
    }
}
