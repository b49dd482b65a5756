//! Restaurants and menus.
//!
//! [`RestaurantDirectory`] is the read-only restaurant data source used for
//! browsing. [`RestaurantMenu`] is the narrow view order validation needs: a
//! set of dish names that can be ordered.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Highest rating a restaurant can have.
pub const MAX_RATING: f64 = 5.0;

/// Errors that can occur when loading a restaurant catalog.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    /// The catalog is not valid JSON or has the wrong shape.
    #[error("invalid catalog: {0}")]
    Parse(#[from] serde_json::Error),
    /// A rating is outside `0..=5`.
    #[error("rating for {name} must be between 0 and 5, got {rating}")]
    InvalidRating {
        /// Restaurant name.
        name: String,
        /// Offending rating.
        rating: f64,
    },
    /// A restaurant lists no dishes.
    #[error("{0} has no dishes")]
    EmptyMenu(String),
}

/// A restaurant as listed in the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    /// Display name, unique within a directory.
    pub name: String,
    /// Cuisine type (e.g. "Italian").
    pub cuisine: String,
    /// Neighborhood or address.
    pub location: String,
    /// Average rating out of 5.
    pub rating: f64,
    /// Dishes that can be ordered.
    pub dishes: Vec<String>,
}

/// Catalog file entry; the restaurant name is the map key.
#[derive(Debug, Deserialize)]
struct RestaurantEntry {
    cuisine: String,
    location: String,
    rating: f64,
    dishes: Vec<String>,
}

/// Filter for [`RestaurantDirectory::search`]. Unset fields match anything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestaurantFilter {
    /// Cuisine, compared case-insensitively.
    pub cuisine: Option<String>,
    /// Case-insensitive substring of the location.
    pub location: Option<String>,
    /// Minimum rating, inclusive.
    pub min_rating: Option<f64>,
}

impl RestaurantFilter {
    /// Whether `restaurant` passes every set criterion.
    #[must_use]
    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        let cuisine_ok = self
            .cuisine
            .as_deref()
            .is_none_or(|cuisine| restaurant.cuisine.eq_ignore_ascii_case(cuisine.trim()));
        let location_ok = self.location.as_deref().is_none_or(|location| {
            restaurant
                .location
                .to_lowercase()
                .contains(&location.trim().to_lowercase())
        });
        let rating_ok = self
            .min_rating
            .is_none_or(|min_rating| restaurant.rating >= min_rating);

        cuisine_ok && location_ok && rating_ok
    }
}

/// Read-only collection of restaurants, ordered by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestaurantDirectory {
    restaurants: BTreeMap<String, Restaurant>,
}

impl RestaurantDirectory {
    /// Build a directory from restaurants. Later duplicates replace earlier ones.
    #[must_use]
    pub fn new(restaurants: impl IntoIterator<Item = Restaurant>) -> Self {
        Self {
            restaurants: restaurants
                .into_iter()
                .map(|restaurant| (restaurant.name.clone(), restaurant))
                .collect(),
        }
    }

    /// The catalog used when no catalog file is configured.
    #[must_use]
    pub fn builtin() -> Self {
        const BUILTIN: [(&str, &str, &str, f64, [&str; 3]); 4] = [
            (
                "Burger Barn",
                "American",
                "Uptown",
                4.0,
                ["Burger", "Fries", "Salad"],
            ),
            (
                "Italian Bistro",
                "Italian",
                "Downtown",
                4.5,
                ["Pizza", "Pasta", "Salad"],
            ),
            (
                "Sushi World",
                "Japanese",
                "Midtown",
                4.8,
                ["Sushi", "Ramen", "Miso Soup"],
            ),
            (
                "Taco Town",
                "Mexican",
                "Downtown",
                3.9,
                ["Tacos", "Burrito", "Nachos"],
            ),
        ];

        Self::new(
            BUILTIN
                .iter()
                .map(|&(name, cuisine, location, rating, dishes)| Restaurant {
                    name: name.to_owned(),
                    cuisine: cuisine.to_owned(),
                    location: location.to_owned(),
                    rating,
                    dishes: dishes.iter().map(|&dish| dish.to_owned()).collect(),
                }),
        )
    }

    /// Parse a catalog from JSON shaped as `{ "<name>": { cuisine, location, rating, dishes } }`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the JSON is malformed, a rating is outside
    /// `0..=5`, or a restaurant has no dishes.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let entries: BTreeMap<String, RestaurantEntry> = serde_json::from_str(json)?;

        let mut restaurants = Vec::with_capacity(entries.len());
        for (name, entry) in entries {
            if !(0.0..=MAX_RATING).contains(&entry.rating) {
                return Err(CatalogError::InvalidRating {
                    name,
                    rating: entry.rating,
                });
            }
            if entry.dishes.is_empty() {
                return Err(CatalogError::EmptyMenu(name));
            }
            restaurants.push(Restaurant {
                name,
                cuisine: entry.cuisine,
                location: entry.location,
                rating: entry.rating,
                dishes: entry.dishes,
            });
        }

        Ok(Self::new(restaurants))
    }

    /// All restaurants, by name.
    pub fn restaurants(&self) -> impl Iterator<Item = &Restaurant> {
        self.restaurants.values()
    }

    /// Look up a restaurant by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Restaurant> {
        self.restaurants.get(name)
    }

    /// Restaurants matching `filter`, by name.
    #[must_use]
    pub fn search(&self, filter: &RestaurantFilter) -> Vec<&Restaurant> {
        self.restaurants
            .values()
            .filter(|restaurant| filter.matches(restaurant))
            .collect()
    }

    /// Number of restaurants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    /// Whether the directory is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }
}

/// The set of item names that can currently be ordered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantMenu {
    available_items: BTreeSet<String>,
}

impl RestaurantMenu {
    /// Create a menu from item names.
    #[must_use]
    pub fn new<I, S>(available_items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            available_items: available_items.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `name` can be ordered.
    #[must_use]
    pub fn is_item_available(&self, name: &str) -> bool {
        self.available_items.contains(name)
    }

    /// Orderable item names, sorted.
    pub fn available_items(&self) -> impl Iterator<Item = &str> {
        self.available_items.iter().map(String::as_str)
    }
}

impl From<&Restaurant> for RestaurantMenu {
    fn from(restaurant: &Restaurant) -> Self {
        Self::new(restaurant.dishes.iter().cloned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_sorted_by_name() {
        let directory = RestaurantDirectory::builtin();
        let names: Vec<&str> = directory.restaurants().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            ["Burger Barn", "Italian Bistro", "Sushi World", "Taco Town"]
        );
    }

    #[test]
    fn test_search_by_cuisine_is_case_insensitive() {
        let directory = RestaurantDirectory::builtin();
        let filter = RestaurantFilter {
            cuisine: Some("italian".to_string()),
            ..RestaurantFilter::default()
        };

        let results = directory.search(&filter);
        assert_eq!(results.len(), 1);
        assert_eq!(results.first().unwrap().name, "Italian Bistro");
    }

    #[test]
    fn test_search_combines_filters() {
        let directory = RestaurantDirectory::builtin();
        let filter = RestaurantFilter {
            location: Some("down".to_string()),
            min_rating: Some(4.0),
            ..RestaurantFilter::default()
        };

        let names: Vec<&str> = directory
            .search(&filter)
            .into_iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, ["Italian Bistro"]);
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let directory = RestaurantDirectory::builtin();
        assert_eq!(
            directory.search(&RestaurantFilter::default()).len(),
            directory.len()
        );
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "Noodle House": {
                "cuisine": "Chinese",
                "location": "Chinatown",
                "rating": 4.2,
                "dishes": ["Dumplings", "Chow Mein"]
            }
        }"#;

        let directory = RestaurantDirectory::from_json(json).unwrap();
        let restaurant = directory.get("Noodle House").unwrap();
        assert_eq!(restaurant.cuisine, "Chinese");
        assert_eq!(restaurant.dishes, ["Dumplings", "Chow Mein"]);
    }

    #[test]
    fn test_from_json_rejects_bad_entries() {
        let bad_rating =
            r#"{"X": {"cuisine": "A", "location": "B", "rating": 7.5, "dishes": ["C"]}}"#;
        assert!(matches!(
            RestaurantDirectory::from_json(bad_rating),
            Err(CatalogError::InvalidRating { .. })
        ));

        let no_dishes = r#"{"X": {"cuisine": "A", "location": "B", "rating": 3.0, "dishes": []}}"#;
        assert!(matches!(
            RestaurantDirectory::from_json(no_dishes),
            Err(CatalogError::EmptyMenu(name)) if name == "X"
        ));

        assert!(matches!(
            RestaurantDirectory::from_json("[]"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_menu_from_restaurant() {
        let directory = RestaurantDirectory::builtin();
        let menu = RestaurantMenu::from(directory.get("Burger Barn").unwrap());

        assert!(menu.is_item_available("Burger"));
        assert!(!menu.is_item_available("Pizza"));
        assert!(!menu.is_item_available("burger"));
    }

    #[test]
    fn test_menu_available_items_sorted() {
        let menu = RestaurantMenu::new(["Salad", "Burger", "Pizza"]);
        let items: Vec<&str> = menu.available_items().collect();
        assert_eq!(items, ["Burger", "Pizza", "Salad"]);
    }
}
