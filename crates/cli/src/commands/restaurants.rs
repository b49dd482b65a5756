//! Restaurant browsing.
//!
//! # Usage
//!
//! ```bash
//! # List every restaurant
//! fd-cli restaurants list
//!
//! # Filter by cuisine, location and rating
//! fd-cli restaurants search --cuisine italian --min-rating 4
//! ```

use food_delivery_core::{Restaurant, RestaurantDirectory, RestaurantFilter};

/// Log every restaurant in the directory.
pub fn list(directory: &RestaurantDirectory) {
    let restaurants: Vec<&Restaurant> = directory.restaurants().collect();
    log_results(&restaurants);
}

/// Log the restaurants matching `filter` and return how many matched.
pub fn search(directory: &RestaurantDirectory, filter: &RestaurantFilter) -> usize {
    let results = directory.search(filter);
    log_results(&results);
    results.len()
}

fn log_results(restaurants: &[&Restaurant]) {
    if restaurants.is_empty() {
        tracing::info!("No restaurants found");
        return;
    }

    tracing::info!("{} restaurant(s)", restaurants.len());
    for restaurant in restaurants {
        tracing::info!(
            "  {} | {} | {} | {:.1}",
            restaurant.name,
            restaurant.cuisine,
            restaurant.location,
            restaurant.rating
        );
        tracing::info!("    Dishes: {}", restaurant.dishes.join(", "));
    }
}
