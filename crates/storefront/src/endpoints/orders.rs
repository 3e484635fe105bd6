//! Order API endpoints

use super::response::ActionResponse;
use crate::client::StorefrontClient;
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};

/// Order API interface
#[derive(Clone)]
pub struct OrdersApi {
    client: StorefrontClient,
}

impl OrdersApi {
    /// Create a new orders API interface
    pub(crate) fn new(client: StorefrontClient) -> Self {
        Self { client }
    }

    /// Turn the current cart into an order
    ///
    /// POST /orders/api/place (no body)
    pub async fn place(&self) -> ApiResult<PlaceOrderResponse> {
        let response = self.client.post_empty("/orders/api/place").await?;
        let mut placed: PlaceOrderResponse = response.json()?;
        placed.outcome.status = response.status;
        Ok(placed)
    }

    /// The signed-in user's orders, newest first
    ///
    /// GET /orders/api/my-orders
    pub async fn mine(&self) -> ApiResult<Vec<Order>> {
        self.client.get("/orders/api/my-orders").await?.json()
    }
}

/// Reply to an order placement
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaceOrderResponse {
    /// `success`/`message` envelope
    #[serde(flatten)]
    pub outcome: ActionResponse,
    /// Id of the created order, present on success
    #[serde(rename = "orderId", default)]
    pub order_id: Option<u64>,
}

impl PlaceOrderResponse {
    /// Page showing the created order
    #[must_use]
    pub fn order_path(&self) -> Option<String> {
        self.order_id.map(|id| format!("/orders/{id}"))
    }
}

/// Order summary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Order {
    /// Order id
    #[serde(default)]
    pub id: Option<u64>,
    /// Order total
    #[serde(rename = "totalPrice", default)]
    pub total_price: Option<f64>,
    /// Status name, e.g. `PENDING`
    #[serde(default)]
    pub status: Option<String>,
    /// Placement time as the server formats it
    #[serde(rename = "orderDate", default)]
    pub order_date: Option<String>,
}
