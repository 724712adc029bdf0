//! Cart commands.

use clap::Subcommand;
use relic_arcade_client::RelicArcade;
use relic_arcade_client::models::AddToCartRequest;
use relic_arcade_core::{CartItemId, ProductId};
use serde_json::json;

use super::{CliError, print_json};

#[derive(Subcommand)]
pub enum CartAction {
    /// Show the cart
    Show,
    /// Add a product
    Add {
        product_id: ProductId,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Change the quantity of a cart line
    Update {
        item_id: CartItemId,

        #[arg(short, long)]
        quantity: u32,
    },
    /// Remove a cart line
    Remove { item_id: CartItemId },
    /// Empty the cart
    Clear,
    /// Number of items in the cart
    Count,
    /// Check whether the cart can be checked out
    Validate,
}

pub async fn run(arcade: &RelicArcade, action: CartAction) -> Result<(), CliError> {
    let cart = arcade.cart();

    match action {
        CartAction::Show => print_json(&cart.get_cart().await?),
        CartAction::Add {
            product_id,
            quantity,
        } => {
            if quantity == 0 {
                return Err(CliError::InvalidArgument(
                    "quantity must be at least 1".to_string(),
                ));
            }
            let item = cart
                .add_item(&AddToCartRequest {
                    product_id,
                    quantity,
                })
                .await?;
            print_json(&item)
        }
        CartAction::Update { item_id, quantity } => {
            print_json(&cart.update_item(&item_id, quantity).await?)
        }
        CartAction::Remove { item_id } => {
            cart.remove_item(&item_id).await?;
            print_json(&json!({ "removed": item_id }))
        }
        CartAction::Clear => {
            cart.clear().await?;
            print_json(&json!({ "cleared": true }))
        }
        CartAction::Count => print_json(&json!({ "count": cart.item_count().await? })),
        CartAction::Validate => print_json(&cart.validate().await?),
    }
}
