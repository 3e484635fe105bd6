//! Cart API endpoints
//!
//! Maps to the server's cart controller:
//! - Add a product to the cart
//! - Change the quantity of a cart item
//! - Remove a cart item
//! - List the cart's items

use super::response::ActionResponse;
use crate::client::StorefrontClient;
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};

/// Cart API interface
#[derive(Clone)]
pub struct CartApi {
    client: StorefrontClient,
}

impl CartApi {
    /// Create a new cart API interface
    pub(crate) fn new(client: StorefrontClient) -> Self {
        Self { client }
    }

    /// Add a product to the cart
    ///
    /// POST /cart/api/add (form: productId, quantity)
    pub async fn add(&self, product_id: u64, quantity: i32) -> ApiResult<ActionResponse> {
        let response = self
            .client
            .post_form(
                "/cart/api/add",
                &[
                    ("productId", product_id.to_string()),
                    ("quantity", quantity.to_string()),
                ],
            )
            .await?;
        ActionResponse::from_response(&response)
    }

    /// Set the quantity of a cart item
    ///
    /// PUT /cart/api/update/{id} (form: quantity)
    pub async fn update(&self, cart_item_id: u64, quantity: i32) -> ApiResult<ActionResponse> {
        let path = format!("/cart/api/update/{cart_item_id}");
        let response = self
            .client
            .put_form(&path, &[("quantity", quantity.to_string())])
            .await?;
        ActionResponse::from_response(&response)
    }

    /// Remove a cart item
    ///
    /// DELETE /cart/api/remove/{id}
    pub async fn remove(&self, cart_item_id: u64) -> ApiResult<ActionResponse> {
        let path = format!("/cart/api/remove/{cart_item_id}");
        let response = self.client.delete(&path).await?;
        ActionResponse::from_response(&response)
    }

    /// List the signed-in user's cart items
    ///
    /// GET /cart/api/items. Anonymous users get an empty list.
    pub async fn items(&self) -> ApiResult<Vec<CartItem>> {
        self.client.get("/cart/api/items").await?.json()
    }
}

/// Cart item as listed by the server
///
/// Only the length of the list matters to the storefront, so every field is
/// optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartItem {
    /// Cart item id, used by update and remove
    #[serde(default)]
    pub id: Option<u64>,
    /// Units in the cart
    #[serde(default)]
    pub quantity: Option<i32>,
    /// Product the item refers to
    #[serde(default)]
    pub product: Option<CartProduct>,
}

/// Product embedded in a cart item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartProduct {
    /// Product id
    #[serde(default)]
    pub id: Option<u64>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Unit price
    #[serde(default)]
    pub price: Option<f64>,
}
