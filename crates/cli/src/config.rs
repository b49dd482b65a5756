//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `FD_USERS_FILE` - Credential store path (default: users.json)
//! - `FD_RESTAURANTS_FILE` - Restaurant catalog JSON (default: built-in catalog)
//! - `FD_DELIVERY_ADDRESS` - Default delivery address (default: 123 Main St)
//! - `FD_DISH_PRICE` - Unit price charged for every dish (default: 10.00)

use std::path::PathBuf;

use food_delivery_core::{CatalogError, MAX_SUBTOTAL, RestaurantDirectory};
use rust_decimal::Decimal;
use thiserror::Error;

const DEFAULT_USERS_FILE: &str = "users.json";
const DEFAULT_DELIVERY_ADDRESS: &str = "123 Main St";
const DEFAULT_DISH_PRICE: &str = "10.00";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Failed to read restaurant catalog {path}: {source}")]
    ReadCatalog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid restaurant catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Food Delivery CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Path of the JSON credential store
    pub users_file: PathBuf,
    /// Optional restaurant catalog file
    pub restaurants_file: Option<PathBuf>,
    /// Delivery address used when an order doesn't give one
    pub delivery_address: String,
    /// Unit price for every dish
    pub dish_price: Decimal,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_optional = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let get_or_default =
            |key: &str, default: &str| get_optional(key).unwrap_or_else(|| default.to_string());

        let users_file = PathBuf::from(get_or_default("FD_USERS_FILE", DEFAULT_USERS_FILE));
        let restaurants_file = get_optional("FD_RESTAURANTS_FILE").map(PathBuf::from);
        let delivery_address = get_or_default("FD_DELIVERY_ADDRESS", DEFAULT_DELIVERY_ADDRESS);

        let dish_price = get_or_default("FD_DISH_PRICE", DEFAULT_DISH_PRICE)
            .trim()
            .parse::<Decimal>()
            .map_err(|e| ConfigError::InvalidEnvVar("FD_DISH_PRICE".to_string(), e.to_string()))?;
        if dish_price < Decimal::ZERO {
            return Err(ConfigError::InvalidEnvVar(
                "FD_DISH_PRICE".to_string(),
                "price cannot be negative".to_string(),
            ));
        }
        if dish_price > MAX_SUBTOTAL {
            return Err(ConfigError::InvalidEnvVar(
                "FD_DISH_PRICE".to_string(),
                format!("price cannot exceed {MAX_SUBTOTAL}"),
            ));
        }

        Ok(Self {
            users_file,
            restaurants_file,
            delivery_address,
            dish_price,
        })
    }

    /// Load the restaurant directory: the configured catalog file, or the
    /// built-in catalog when none is set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the catalog file cannot be read or parsed.
    pub fn load_directory(&self) -> Result<RestaurantDirectory, ConfigError> {
        let Some(path) = &self.restaurants_file else {
            return Ok(RestaurantDirectory::builtin());
        };

        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadCatalog {
            path: path.clone(),
            source,
        })?;
        let directory = RestaurantDirectory::from_json(&json)?;
        tracing::debug!(
            path = %path.display(),
            restaurants = directory.len(),
            "Loaded restaurant catalog"
        );
        Ok(directory)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<CliConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        CliConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.users_file, PathBuf::from("users.json"));
        assert_eq!(config.restaurants_file, None);
        assert_eq!(config.delivery_address, "123 Main St");
        assert_eq!(config.dish_price, Decimal::new(1000, 2));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("FD_USERS_FILE", "/tmp/accounts.json"),
            ("FD_RESTAURANTS_FILE", "restaurants.json"),
            ("FD_DELIVERY_ADDRESS", "42 Elm St"),
            ("FD_DISH_PRICE", "12.50"),
        ])
        .unwrap();

        assert_eq!(config.users_file, PathBuf::from("/tmp/accounts.json"));
        assert_eq!(
            config.restaurants_file,
            Some(PathBuf::from("restaurants.json"))
        );
        assert_eq!(config.delivery_address, "42 Elm St");
        assert_eq!(config.dish_price, Decimal::new(1250, 2));
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config =
            config_from(&[("FD_DELIVERY_ADDRESS", "  "), ("FD_RESTAURANTS_FILE", "")]).unwrap();
        assert_eq!(config.delivery_address, "123 Main St");
        assert_eq!(config.restaurants_file, None);
    }

    #[test]
    fn test_invalid_dish_price() {
        assert!(matches!(
            config_from(&[("FD_DISH_PRICE", "ten")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "FD_DISH_PRICE"
        ));
        assert!(matches!(
            config_from(&[("FD_DISH_PRICE", "-1")]),
            Err(ConfigError::InvalidEnvVar(..))
        ));
        assert!(matches!(
            config_from(&[("FD_DISH_PRICE", "79228162514264337593543950335")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "FD_DISH_PRICE"
        ));
    }

    #[test]
    fn test_load_directory_builtin() {
        let directory = config_from(&[]).unwrap().load_directory().unwrap();
        assert!(directory.get("Burger Barn").is_some());
    }

    #[test]
    fn test_load_directory_missing_file() {
        let config =
            config_from(&[("FD_RESTAURANTS_FILE", "/nonexistent/restaurants.json")]).unwrap();
        assert!(matches!(
            config.load_directory(),
            Err(ConfigError::ReadCatalog { .. })
        ));
    }
}
