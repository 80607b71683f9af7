//! Meal catalog and favorites API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::retry::RetryPolicy;
use crate::{MealId, Paginated, Result};

/// A surplus meal offer.
#[derive(Clone, Debug, Deserialize)]
pub struct Meal {
    pub id: MealId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Discounted price the customer pays.
    pub price: f64,
    /// Pre-discount price, when the restaurant provides one.
    #[serde(default)]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub restaurant_name: Option<String>,
    #[serde(default)]
    pub quantity_available: Option<u32>,
    #[serde(default)]
    pub pickup_window_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pickup_window_end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_favorite: Option<bool>,
}

/// Query parameters for the meal listing.
#[derive(Clone, Debug, Default, Serialize)]
pub struct MealQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
}

impl MealQuery {
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn price_between(mut self, min: f64, max: f64) -> Self {
        self.min_price = Some(min);
        self.max_price = Some(max);
        self
    }
}

/// Available filter values for the catalog screen.
#[derive(Clone, Debug, Deserialize)]
pub struct MealFilters {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub price_range: Option<PriceRange>,
}

/// Inclusive price bounds across the catalog.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

/// Response to a favorite toggle.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct FavoriteStatus {
    pub favorited: bool,
}

/// Meals API surface.
pub struct MealsApi<'a> {
    client: &'a ApiClient,
    retry: RetryPolicy,
}

impl<'a> MealsApi<'a> {
    /// Create the API surface over a shared client.
    pub fn new(client: &'a ApiClient) -> Self {
        let retry = RetryPolicy::from_config(&client.config().retry);
        Self { client, retry }
    }

    /// Fetch one page of the catalog.
    pub async fn list(&self, query: &MealQuery) -> Result<Paginated<Meal>> {
        self.retry
            .run(|| self.client.get_with_query("meals", query))
            .await
    }

    /// Fetch the filter values for the catalog screen.
    pub async fn filters(&self) -> Result<MealFilters> {
        self.retry.run(|| self.client.get("meals/filters")).await
    }

    /// Fetch a single meal.
    pub async fn get(&self, id: MealId) -> Result<Meal> {
        let path = format!("meals/{}", id);
        self.retry.run(|| self.client.get(&path)).await
    }

    /// Toggle the favorite flag on a meal.
    pub async fn toggle_favorite(&self, id: MealId) -> Result<FavoriteStatus> {
        self.client
            .post_empty(&format!("meals/{}/favorite", id))
            .await
    }

    /// Fetch one page of the caller's favorite meals.
    pub async fn favorites(&self, page: u32) -> Result<Paginated<Meal>> {
        let query = [("page", page)];
        self.retry
            .run(|| self.client.get_with_query("meals/favorites", &query))
            .await
    }
}
