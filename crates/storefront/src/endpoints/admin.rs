//! Admin API endpoints
//!
//! Product management and order status changes. The server rejects these for
//! non-admin users; the client does not check roles.

use super::response::ActionResponse;
use crate::client::StorefrontClient;
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};

/// Admin API interface
#[derive(Clone)]
pub struct AdminApi {
    client: StorefrontClient,
}

impl AdminApi {
    /// Create a new admin API interface
    pub(crate) fn new(client: StorefrontClient) -> Self {
        Self { client }
    }

    /// Create a product
    ///
    /// POST /admin/api/products (form: name, description, category, price, imageURL, stock)
    pub async fn create_product(&self, product: &NewProduct) -> ApiResult<ActionResponse> {
        let response = self
            .client
            .post_form("/admin/api/products", &product.form_fields())
            .await?;
        ActionResponse::from_response(&response)
    }

    /// Change some fields of a product
    ///
    /// PUT /admin/api/products/{id}; unset fields are not sent
    pub async fn update_product(
        &self,
        product_id: u64,
        update: &ProductUpdate,
    ) -> ApiResult<ActionResponse> {
        let path = format!("/admin/api/products/{product_id}");
        let response = self.client.put_form(&path, &update.form_fields()).await?;
        ActionResponse::from_response(&response)
    }

    /// Delete a product
    ///
    /// DELETE /admin/api/products/{id}
    pub async fn delete_product(&self, product_id: u64) -> ApiResult<ActionResponse> {
        let path = format!("/admin/api/products/{product_id}");
        let response = self.client.delete(&path).await?;
        ActionResponse::from_response(&response)
    }

    /// Move an order to another status (e.g. `SHIPPED`)
    ///
    /// POST /admin/api/orders/{id}/status (form: status)
    pub async fn update_order_status(&self, order_id: u64, status: &str) -> ApiResult<ActionResponse> {
        let path = format!("/admin/api/orders/{order_id}/status");
        let response = self
            .client
            .post_form(&path, &[("status", status.to_string())])
            .await?;
        ActionResponse::from_response(&response)
    }
}

/// Product creation form, sent exactly as entered
///
/// Values are raw strings: the server is the only validator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    /// Product name
    pub name: String,
    /// Longer description
    pub description: String,
    /// Category label
    pub category: String,
    /// Price as entered
    pub price: String,
    /// Image URL, sent as `imageURL`
    #[serde(rename = "imageURL")]
    pub image_url: String,
    /// Units in stock as entered
    pub stock: String,
}

impl NewProduct {
    /// Form fields in the order the server documents them
    #[must_use]
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            ("description", self.description.clone()),
            ("category", self.category.clone()),
            ("price", self.price.clone()),
            ("imageURL", self.image_url.clone()),
            ("stock", self.stock.clone()),
        ]
    }
}

/// Partial product update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductUpdate {
    /// New name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New category
    pub category: Option<String>,
    /// New price
    pub price: Option<String>,
    /// New image URL, sent as `imageURL`
    #[serde(rename = "imageURL")]
    pub image_url: Option<String>,
    /// New stock count
    pub stock: Option<String>,
}

impl ProductUpdate {
    /// Only the fields that are set
    #[must_use]
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        [
            ("name", &self.name),
            ("description", &self.description),
            ("category", &self.category),
            ("price", &self.price),
            ("imageURL", &self.image_url),
            ("stock", &self.stock),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.clone().map(|v| (key, v)))
        .collect()
    }

    /// Whether nothing would change
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.form_fields().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::recording_client;
    use reqwest::Method;

    fn sample_product() -> NewProduct {
        NewProduct {
            name: "Mug".to_string(),
            description: "Blue mug".to_string(),
            category: "Kitchen".to_string(),
            price: "9.50".to_string(),
            image_url: "https://img.example.com/mug.png".to_string(),
            stock: "12".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_product_form() {
        let (client, transport) = recording_client(Some("admin-token"));
        transport.respond_json(r#"{"success":true,"message":"Product created successfully"}"#);

        client.admin().create_product(&sample_product()).await.unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "/admin/api/products");
        assert_eq!(
            request.body.as_deref(),
            Some(
                "name=Mug&description=Blue+mug&category=Kitchen&price=9.50\
                 &imageURL=https%3A%2F%2Fimg.example.com%2Fmug.png&stock=12"
            )
        );
    }

    #[tokio::test]
    async fn test_empty_fields_are_sent_as_is() {
        let (client, transport) = recording_client(None);
        transport.respond_json(r#"{"success":false,"message":"Invalid price"}"#);

        let envelope = client.admin().create_product(&NewProduct::default()).await.unwrap();
        assert!(!envelope.success);
        assert_eq!(
            transport.last_request().unwrap().body.as_deref(),
            Some("name=&description=&category=&price=&imageURL=&stock=")
        );
    }

    #[tokio::test]
    async fn test_update_product_sends_only_set_fields() {
        let (client, transport) = recording_client(None);
        transport.respond_json(r#"{"success":true}"#);

        let update = ProductUpdate {
            price: Some("7.25".to_string()),
            stock: Some("0".to_string()),
            ..ProductUpdate::default()
        };
        client.admin().update_product(5, &update).await.unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.path, "/admin/api/products/5");
        assert_eq!(request.body.as_deref(), Some("price=7.25&stock=0"));
    }

    #[tokio::test]
    async fn test_delete_and_status_paths() {
        let (client, transport) = recording_client(None);
        transport.respond_json(r#"{"success":true}"#);
        transport.respond_json(r#"{"success":true}"#);

        client.admin().delete_product(8).await.unwrap();
        client.admin().update_order_status(3, "SHIPPED").await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::DELETE);
        assert_eq!(requests[0].path, "/admin/api/products/8");
        assert_eq!(requests[1].path, "/admin/api/orders/3/status");
        assert_eq!(requests[1].body.as_deref(), Some("status=SHIPPED"));
    }

    #[test]
    fn test_product_update_is_empty() {
        assert!(ProductUpdate::default().is_empty());
        let update = ProductUpdate {
            name: Some("Cup".to_string()),
            ..ProductUpdate::default()
        };
        assert!(!update.is_empty());
    }
}
