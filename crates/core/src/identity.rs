//! User identity.
//!
//! Ordering only ever needs an [`Email`]. How accounts are stored and how
//! passwords are checked lives behind [`IdentityStore`], so front ends can
//! plug in whatever storage they have.

use crate::types::{Email, EmailError};

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Errors that can occur during registration or login.
#[derive(thiserror::Error, Debug)]
pub enum IdentityError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Password too weak.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Password and confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// Email is already registered.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Unknown email or wrong password.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The backing store failed.
    #[error("identity store error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Check a registration form and return the normalized email.
///
/// # Errors
///
/// Returns [`IdentityError::InvalidEmail`] for a malformed email,
/// [`IdentityError::WeakPassword`] for a password shorter than
/// [`MIN_PASSWORD_LENGTH`], or [`IdentityError::PasswordMismatch`] when the
/// confirmation differs.
pub fn validate_registration(
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<Email, IdentityError> {
    let email = Email::parse(email)?;

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(IdentityError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    if password != confirm_password {
        return Err(IdentityError::PasswordMismatch);
    }

    Ok(email)
}

/// Account storage used for registration and login.
pub trait IdentityStore {
    /// Whether an account exists for `email`.
    fn contains(&self, email: &Email) -> bool;

    /// Create an account.
    ///
    /// # Errors
    ///
    /// Returns a validation error from [`validate_registration`],
    /// [`IdentityError::UserAlreadyExists`], or [`IdentityError::Storage`].
    fn register(
        &mut self,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Email, IdentityError>;

    /// Check credentials and return the account's email.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::InvalidCredentials`] for an unknown email or a
    /// wrong password.
    fn authenticate(&self, email: &str, password: &str) -> Result<Email, IdentityError>;
}
