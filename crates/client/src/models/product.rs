//! Catalog records.

use chrono::{DateTime, Utc};
use relic_arcade_core::{PaginationParams, Price, ProductCondition, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<Price>,
    /// Platforms the title runs on.
    pub platform: Vec<String>,
    pub genre: Vec<String>,
    pub developer: String,
    pub publisher: String,
    pub release_year: i32,
    pub condition: ProductCondition,
    /// Image URLs.
    #[serde(default)]
    pub images: Vec<String>,
    pub stock: u32,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    pub console: String,
    pub region: String,
    /// Original release rather than a reproduction.
    pub is_original: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Price the customer pays: the discount price when one is set.
    #[must_use]
    pub fn effective_price(&self) -> Price {
        self.discount_price.unwrap_or(self.price)
    }

    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Payload for creating a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    pub price: Price,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<Price>,
    pub platform: Vec<String>,
    pub genre: Vec<String>,
    pub developer: String,
    pub publisher: String,
    pub release_year: i32,
    pub condition: ProductCondition,
    pub stock: u32,
    pub console: String,
    pub region: String,
    pub is_original: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Fields of a listing to change. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<ProductCondition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub console: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_original: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Catalog filter, sent as query parameters to `/product/filter`.
///
/// Filtering happens server-side; the client sends what is set and trusts
/// the result.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilters {
    #[serde(flatten)]
    pub pagination: PaginationParams,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub console: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<ProductCondition>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price_min: Option<Decimal>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price_max: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_year_min: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_year_max: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_original: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl ProductFilters {
    /// Filter on a single platform.
    #[must_use]
    pub fn platform(platform: impl Into<String>) -> Self {
        Self {
            platform: Some(platform.into()),
            ..Self::default()
        }
    }

    /// Restrict to a price range (either bound optional).
    #[must_use]
    pub const fn with_price_range(mut self, min: Option<Decimal>, max: Option<Decimal>) -> Self {
        self.price_min = min;
        self.price_max = max;
        self
    }

    /// Restrict to a release-year range (either bound optional).
    #[must_use]
    pub const fn with_release_years(mut self, min: Option<i32>, max: Option<i32>) -> Self {
        self.release_year_min = min;
        self.release_year_max = max;
        self
    }
}

/// Query for endpoints that only take a result size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct LimitQuery {
    pub limit: u32,
}

/// Response from the image upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUploadResponse {
    pub image_urls: Vec<String>,
}
