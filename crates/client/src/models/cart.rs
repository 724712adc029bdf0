//! Shopping cart records.

use chrono::{DateTime, Utc};
use relic_arcade_core::{CartId, CartItemId, Price, ProductId, UserId};
use serde::{Deserialize, Serialize};

use super::product::Product;

/// A line in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub product: Product,
    pub quantity: u32,
    /// Unit price computed by the server when the item was added.
    pub price: Price,
    pub created_at: DateTime<Utc>,
}

impl CartItem {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// The current user's cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: CartId,
    pub user_id: UserId,
    #[serde(default)]
    pub items: Vec<CartItem>,
    /// Server-computed total.
    pub total: Price,
    pub item_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for adding a product to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Payload for changing a line's quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCartItemRequest {
    pub quantity: u32,
}

/// Number of items in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartCount {
    pub count: u32,
}

/// Server verdict on whether the cart can be checked out.
///
/// The rules are entirely server-defined; the client only reports them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartValidation {
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl CartValidation {
    /// Reported problems, empty when there are none.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        self.errors.as_deref().unwrap_or_default()
    }
}
