//! JSON file credential store.
//!
//! Accounts are kept in a single pretty-printed JSON object keyed by email.
//! The file is read once at startup and rewritten after every successful
//! registration. Passwords are stored as Argon2id hashes.

use std::collections::BTreeMap;
use std::path::PathBuf;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use food_delivery_core::{
    Email, IdentityError, IdentityStore, StoredPasswordHash, validate_registration,
};

/// Errors reading or writing the credential file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File contents are not a valid account map.
    #[error("invalid credential file: {0}")]
    Json(#[from] serde_json::Error),

    /// Password hashing failed.
    #[error("password hashing error")]
    PasswordHash,
}

impl From<StoreError> for IdentityError {
    fn from(err: StoreError) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// One account record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredUser {
    pub password_hash: StoredPasswordHash,
    pub registered_at: DateTime<Utc>,
}

/// Credential store backed by a JSON file.
#[derive(Debug)]
pub struct JsonUserStore {
    path: PathBuf,
    users: BTreeMap<Email, StoredUser>,
}

impl JsonUserStore {
    /// Load the store from `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file exists but cannot be read or parsed.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let users = match std::fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        Ok(Self { path, users })
    }

    /// Write all accounts back to the file.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if serialization or the write fails.
    pub fn save(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.users)?;
        std::fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl IdentityStore for JsonUserStore {
    fn contains(&self, email: &Email) -> bool {
        self.users.contains_key(email)
    }

    fn register(
        &mut self,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Email, IdentityError> {
        let email = validate_registration(email, password, confirm_password)?;

        if self.contains(&email) {
            return Err(IdentityError::UserAlreadyExists);
        }

        let user = StoredUser {
            password_hash: hash_password(password)?,
            registered_at: Utc::now(),
        };
        self.users.insert(email.clone(), user);

        if let Err(e) = self.save() {
            self.users.remove(&email);
            return Err(e.into());
        }

        info!(email = %email, path = %self.path.display(), "Registered user");
        Ok(email)
    }

    fn authenticate(&self, email: &str, password: &str) -> Result<Email, IdentityError> {
        let email = Email::parse(email)?;

        let user = self
            .users
            .get(&email)
            .ok_or(IdentityError::InvalidCredentials)?;

        verify_password(password, &user.password_hash)?;

        Ok(email)
    }
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<StoredPasswordHash, StoreError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| StoredPasswordHash::new(hash.to_string()))
        .map_err(|_| StoreError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &StoredPasswordHash) -> Result<(), IdentityError> {
    let parsed_hash =
        PasswordHash::new(hash.as_str()).map_err(|_| IdentityError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| IdentityError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Unique file path in the system temp dir, removed on drop.
    struct TempFile(PathBuf);

    impl TempFile {
        fn new() -> Self {
            Self(std::env::temp_dir().join(format!("fd-users-{}.json", uuid::Uuid::new_v4())))
        }
    }

    impl Drop for TempFile {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.0);
        }
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let file = TempFile::new();
        let store = JsonUserStore::load(&file.0).unwrap();
        assert!(!store.contains(&Email::parse("diner@example.com").unwrap()));
        assert!(!file.0.exists());
    }

    #[test]
    fn test_register_persists_and_reloads() {
        let file = TempFile::new();
        let mut store = JsonUserStore::load(&file.0).unwrap();

        let email = store
            .register("Diner@Example.com", "hunter22", "hunter22")
            .unwrap();
        assert_eq!(email.as_str(), "diner@example.com");
        assert!(file.0.exists());

        let reloaded = JsonUserStore::load(&file.0).unwrap();
        assert!(reloaded.contains(&email));
        assert_eq!(
            reloaded.authenticate("diner@example.com", "hunter22").unwrap(),
            email
        );
    }

    #[test]
    fn test_file_never_contains_plaintext_password() {
        let file = TempFile::new();
        let mut store = JsonUserStore::load(&file.0).unwrap();
        store
            .register("diner@example.com", "hunter22", "hunter22")
            .unwrap();

        let contents = std::fs::read_to_string(&file.0).unwrap();
        assert!(!contents.contains("hunter22"));
        assert!(contents.contains("$argon2id$"));
    }

    #[test]
    fn test_register_duplicate() {
        let file = TempFile::new();
        let mut store = JsonUserStore::load(&file.0).unwrap();
        store
            .register("diner@example.com", "hunter22", "hunter22")
            .unwrap();

        assert!(matches!(
            store.register("DINER@example.com", "another1", "another1"),
            Err(IdentityError::UserAlreadyExists)
        ));
    }

    #[test]
    fn test_register_validation_does_not_touch_file() {
        let file = TempFile::new();
        let mut store = JsonUserStore::load(&file.0).unwrap();

        assert!(matches!(
            store.register("diner@example.com", "hunter22", "hunter23"),
            Err(IdentityError::PasswordMismatch)
        ));
        assert!(!file.0.exists());
    }

    #[test]
    fn test_authenticate_failures() {
        let file = TempFile::new();
        let mut store = JsonUserStore::load(&file.0).unwrap();
        store
            .register("diner@example.com", "hunter22", "hunter22")
            .unwrap();

        assert!(matches!(
            store.authenticate("diner@example.com", "wrong-password"),
            Err(IdentityError::InvalidCredentials)
        ));
        assert!(matches!(
            store.authenticate("stranger@example.com", "hunter22"),
            Err(IdentityError::InvalidCredentials)
        ));
        assert!(matches!(
            store.authenticate("not-an-email", "hunter22"),
            Err(IdentityError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let file = TempFile::new();
        std::fs::write(&file.0, "not json").unwrap();

        assert!(matches!(
            JsonUserStore::load(&file.0),
            Err(StoreError::Json(_))
        ));
    }

    #[test]
    fn test_unwritable_path_rolls_back_registration() {
        let dir = std::env::temp_dir().join(format!("fd-missing-{}", uuid::Uuid::new_v4()));
        let mut store = JsonUserStore::load(dir.join("users.json")).unwrap();

        assert!(matches!(
            store.register("diner@example.com", "hunter22", "hunter22"),
            Err(IdentityError::Storage(_))
        ));
        assert!(!store.contains(&Email::parse("diner@example.com").unwrap()));
    }
}
