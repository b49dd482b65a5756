//! Customer profile.

use serde::{Deserialize, Serialize};

/// Delivery details for the logged-in customer.
///
/// Read-only for the lifetime of an order attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    delivery_address: String,
}

impl UserProfile {
    /// Create a profile with the given delivery address.
    #[must_use]
    pub fn new(delivery_address: impl Into<String>) -> Self {
        Self {
            delivery_address: delivery_address.into(),
        }
    }

    /// Where orders are delivered.
    #[must_use]
    pub fn delivery_address(&self) -> &str {
        &self.delivery_address
    }
}
