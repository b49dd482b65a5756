//! Account registration.
//!
//! # Usage
//!
//! ```bash
//! fd-cli register -e diner@example.com -p hunter22 -c hunter22
//! ```

use secrecy::{ExposeSecret, SecretString};

use food_delivery_core::{Email, IdentityError, IdentityStore};

/// Register a new account in `store`.
///
/// # Errors
///
/// Returns `IdentityError` if the form is invalid, the email is taken, or
/// the store cannot be written.
pub fn register(
    store: &mut impl IdentityStore,
    email: &str,
    password: &SecretString,
    confirm_password: &SecretString,
) -> Result<Email, IdentityError> {
    let email = store.register(
        email,
        password.expose_secret(),
        confirm_password.expose_secret(),
    )?;

    tracing::info!("Registration successful! Please log in.");
    tracing::info!("  Email: {}", email);

    Ok(email)
}
