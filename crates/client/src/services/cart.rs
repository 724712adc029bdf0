//! Cart service.

use relic_arcade_core::CartItemId;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::client::{ApiClient, Empty};
use crate::error::ApiError;
use crate::models::{
    AddToCartRequest, Cart, CartCount, CartItem, CartValidation, UpdateCartItemRequest,
};
use crate::resource::{Resource, item_path};

const ENDPOINT: &str = "/cart";
const ITEMS_ENDPOINT: &str = "/cart/items";

/// Operations on the current user's cart.
///
/// Cart rules (stock limits, pricing) live on the server; this service only
/// relays requests.
#[derive(Debug, Clone)]
pub struct CartService {
    client: ApiClient,
    resource: Resource<Cart, Value, Value>,
}

impl CartService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            resource: Resource::new(client.clone(), ENDPOINT),
            client,
        }
    }

    /// Generic CRUD + search over `/cart`.
    #[must_use]
    pub const fn resource(&self) -> &Resource<Cart, Value, Value> {
        &self.resource
    }

    /// Fetch the current cart.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn get_cart(&self) -> Result<Cart, ApiError> {
        self.client.get(ENDPOINT).await
    }

    /// Add a product to the cart.
    ///
    /// Returns the created line, including the server-computed unit price.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(
        skip(self, request),
        fields(product_id = %request.product_id, quantity = request.quantity)
    )]
    pub async fn add_item(&self, request: &AddToCartRequest) -> Result<CartItem, ApiError> {
        let item: CartItem = self.client.post(ITEMS_ENDPOINT, request).await?;
        debug!(item_id = %item.id, price = %item.price, "Item added to cart");
        Ok(item)
    }

    /// Change the quantity of a cart line.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn update_item(
        &self,
        item_id: &CartItemId,
        quantity: u32,
    ) -> Result<CartItem, ApiError> {
        self.client
            .put(
                &item_path(ITEMS_ENDPOINT, item_id),
                &UpdateCartItemRequest { quantity },
            )
            .await
    }

    /// Remove a line from the cart.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn remove_item(&self, item_id: &CartItemId) -> Result<(), ApiError> {
        self.client
            .delete::<Empty>(&item_path(ITEMS_ENDPOINT, item_id))
            .await
            .map(|_| ())
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<(), ApiError> {
        self.client
            .delete::<Empty>("/cart/clear")
            .await
            .map(|_| ())
    }

    /// Number of items in the cart.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn item_count(&self) -> Result<u32, ApiError> {
        let count: CartCount = self.client.get("/cart/count").await?;
        Ok(count.count)
    }

    /// Ask the server whether the cart can be checked out.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn validate(&self) -> Result<CartValidation, ApiError> {
        self.client.get("/cart/validate").await
    }
}
