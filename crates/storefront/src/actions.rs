//! One async function per storefront action
//!
//! Every action is linear: optional confirmation, one request, then render the
//! outcome on the [`Page`]. Two failure tiers exist:
//!
//! - the server answers `success: false`: show its message, or the action's
//!   fallback when it sent none
//! - the request or its decoding fails: show the action's fixed error text;
//!   the cause only goes to the log
//!
//! Nothing is retried, cached, or de-duplicated. Concurrent actions run
//! independently and each renders its own outcome.

use crate::client::StorefrontClient;
use crate::endpoints::{ActionResponse, ProductUpdate};
use crate::error::ApiError;
use crate::page::{Page, Severity};
use catchy_telemetry::metrics;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Where users sign in
pub const LOGIN_PATH: &str = "/login";

/// Order list, used when a placed order comes back without an id
pub const ORDERS_PATH: &str = "/orders";

/// User-facing texts
pub mod messages {
    #![allow(missing_docs)]

    pub const ADDED_TO_CART: &str = "Product added to cart!";
    pub const ADD_TO_CART_ERROR: &str = "Error adding to cart";
    pub const UPDATE_CART_ERROR: &str = "Error updating cart";
    pub const CONFIRM_REMOVE_ITEM: &str = "Are you sure you want to remove this item from cart?";
    pub const ITEM_REMOVED: &str = "Item removed from cart";
    pub const REMOVE_ITEM_ERROR: &str = "Error removing item";
    pub const CONFIRM_PLACE_ORDER: &str = "Are you sure you want to place this order?";
    pub const ORDER_PLACED: &str = "Order placed successfully!";
    pub const PLACE_ORDER_ERROR: &str = "Error placing order";
    pub const PRODUCT_CREATED: &str = "Product created successfully!";
    pub const CREATE_PRODUCT_ERROR: &str = "Error creating product";
    pub const PRODUCT_UPDATED: &str = "Product updated successfully!";
    pub const UPDATE_PRODUCT_ERROR: &str = "Error updating product";
    pub const CONFIRM_DELETE_PRODUCT: &str = "Are you sure you want to delete this product?";
    pub const PRODUCT_DELETED: &str = "Product deleted successfully!";
    pub const DELETE_PRODUCT_ERROR: &str = "Error deleting product";
    pub const ORDER_STATUS_UPDATED: &str = "Order status updated";
    pub const ORDER_STATUS_ERROR: &str = "Error updating order status";
}

use messages::*;

/// How an action settled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The server applied the change
    Completed,
    /// The server said no; `message` is what the user saw
    Rejected {
        /// Banner text shown
        message: String,
    },
    /// The request or its decoding failed
    Failed,
    /// The user declined the confirmation; nothing was sent
    Declined,
    /// The server wants a signed-in user; the page went to the login screen
    LoginRequired,
}

impl ActionOutcome {
    /// Short name for logs and metrics
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Rejected { .. } => "rejected",
            Self::Failed => "failed",
            Self::Declined => "declined",
            Self::LoginRequired => "login_required",
        }
    }
}

impl fmt::Display for ActionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The storefront's action surface
#[derive(Clone)]
pub struct Storefront {
    client: StorefrontClient,
    page: Arc<dyn Page>,
    navigation_delay: Duration,
}

impl Storefront {
    /// Bind a client to a page; the navigation delay comes from the client config
    pub fn new(client: StorefrontClient, page: Arc<dyn Page>) -> Self {
        let navigation_delay = client.config().navigation_delay;
        Self {
            client,
            page,
            navigation_delay,
        }
    }

    /// Underlying client
    #[must_use]
    pub fn client(&self) -> &StorefrontClient {
        &self.client
    }

    /// Page initialisation: refresh the cart counter once
    pub async fn on_page_load(&self) {
        self.refresh_cart_count().await;
    }

    /// Add a product to the cart
    ///
    /// Success shows a banner and refreshes the cart counter without
    /// reloading. A login-required reply navigates to the login page instead
    /// of showing an error.
    #[instrument(skip(self))]
    pub async fn add_to_cart(&self, product_id: u64, quantity: i32) -> ActionOutcome {
        let outcome = match self.client.cart().add(product_id, quantity).await {
            Ok(reply) if reply.success => {
                self.page.show_message(ADDED_TO_CART, Severity::Success);
                self.refresh_cart_count().await;
                ActionOutcome::Completed
            }
            Ok(reply) if reply.requires_login() => {
                self.page.navigate(LOGIN_PATH);
                ActionOutcome::LoginRequired
            }
            Ok(reply) => self.reject(&reply, ADD_TO_CART_ERROR),
            Err(e) => self.fail(&e, ADD_TO_CART_ERROR),
        };
        finish("add_to_cart", outcome)
    }

    /// Change a cart item's quantity; success reloads the page at once
    #[instrument(skip(self))]
    pub async fn update_cart_quantity(&self, cart_item_id: u64, quantity: i32) -> ActionOutcome {
        let outcome = match self.client.cart().update(cart_item_id, quantity).await {
            Ok(reply) if reply.success => {
                self.page.reload();
                ActionOutcome::Completed
            }
            Ok(reply) => self.reject(&reply, UPDATE_CART_ERROR),
            Err(e) => self.fail(&e, UPDATE_CART_ERROR),
        };
        finish("update_cart_quantity", outcome)
    }

    /// Remove a cart item after confirmation; success reloads the page at once
    #[instrument(skip(self))]
    pub async fn remove_from_cart(&self, cart_item_id: u64) -> ActionOutcome {
        if !self.page.confirm(CONFIRM_REMOVE_ITEM) {
            return finish("remove_from_cart", ActionOutcome::Declined);
        }

        let outcome = match self.client.cart().remove(cart_item_id).await {
            Ok(reply) if reply.success => {
                self.page.show_message(ITEM_REMOVED, Severity::Success);
                self.page.reload();
                ActionOutcome::Completed
            }
            Ok(reply) => self.reject(&reply, REMOVE_ITEM_ERROR),
            Err(e) => self.fail(&e, REMOVE_ITEM_ERROR),
        };
        finish("remove_from_cart", outcome)
    }

    /// Place an order after confirmation
    ///
    /// Success shows a banner, waits the navigation delay so it can be read,
    /// then opens the new order's page.
    #[instrument(skip(self))]
    pub async fn place_order(&self) -> ActionOutcome {
        if !self.page.confirm(CONFIRM_PLACE_ORDER) {
            return finish("place_order", ActionOutcome::Declined);
        }

        let outcome = match self.client.orders().place().await {
            Ok(placed) if placed.outcome.success => {
                self.page.show_message(ORDER_PLACED, Severity::Success);
                let target = placed.order_path().unwrap_or_else(|| {
                    warn!("Order placed without an orderId");
                    ORDERS_PATH.to_string()
                });
                tokio::time::sleep(self.navigation_delay).await;
                self.page.navigate(&target);
                ActionOutcome::Completed
            }
            Ok(placed) => self.reject(&placed.outcome, PLACE_ORDER_ERROR),
            Err(e) => self.fail(&e, PLACE_ORDER_ERROR),
        };
        finish("place_order", outcome)
    }

    /// Submit the product form
    ///
    /// Field values go out exactly as read. Success clears the form and
    /// reloads after the navigation delay.
    #[instrument(skip(self))]
    pub async fn create_product(&self) -> ActionOutcome {
        let product = self.page.read_product_form();

        let outcome = match self.client.admin().create_product(&product).await {
            Ok(reply) if reply.success => {
                self.page.show_message(PRODUCT_CREATED, Severity::Success);
                self.page.reset_product_form();
                self.delayed_reload().await;
                ActionOutcome::Completed
            }
            Ok(reply) => self.reject(&reply, CREATE_PRODUCT_ERROR),
            Err(e) => self.fail(&e, CREATE_PRODUCT_ERROR),
        };
        finish("create_product", outcome)
    }

    /// Change some fields of a product; success reloads after the navigation delay
    #[instrument(skip(self))]
    pub async fn update_product(&self, product_id: u64, update: &ProductUpdate) -> ActionOutcome {
        let outcome = match self.client.admin().update_product(product_id, update).await {
            Ok(reply) if reply.success => {
                self.page.show_message(PRODUCT_UPDATED, Severity::Success);
                self.delayed_reload().await;
                ActionOutcome::Completed
            }
            Ok(reply) => self.reject(&reply, UPDATE_PRODUCT_ERROR),
            Err(e) => self.fail(&e, UPDATE_PRODUCT_ERROR),
        };
        finish("update_product", outcome)
    }

    /// Delete a product after confirmation; success reloads after the navigation delay
    #[instrument(skip(self))]
    pub async fn delete_product(&self, product_id: u64) -> ActionOutcome {
        if !self.page.confirm(CONFIRM_DELETE_PRODUCT) {
            return finish("delete_product", ActionOutcome::Declined);
        }

        let outcome = match self.client.admin().delete_product(product_id).await {
            Ok(reply) if reply.success => {
                self.page.show_message(PRODUCT_DELETED, Severity::Success);
                self.delayed_reload().await;
                ActionOutcome::Completed
            }
            Ok(reply) => self.reject(&reply, DELETE_PRODUCT_ERROR),
            Err(e) => self.fail(&e, DELETE_PRODUCT_ERROR),
        };
        finish("delete_product", outcome)
    }

    /// Move an order to another status; success reloads after the navigation delay
    #[instrument(skip(self))]
    pub async fn update_order_status(&self, order_id: u64, status: &str) -> ActionOutcome {
        let outcome = match self.client.admin().update_order_status(order_id, status).await {
            Ok(reply) if reply.success => {
                self.page.show_message(ORDER_STATUS_UPDATED, Severity::Success);
                self.delayed_reload().await;
                ActionOutcome::Completed
            }
            Ok(reply) => self.reject(&reply, ORDER_STATUS_ERROR),
            Err(e) => self.fail(&e, ORDER_STATUS_ERROR),
        };
        finish("update_order_status", outcome)
    }

    /// Fetch the cart and write its size into the counter
    ///
    /// Failures leave the counter untouched and are only logged. Returns the
    /// count that was written.
    pub async fn refresh_cart_count(&self) -> Option<usize> {
        match self.client.cart().items().await {
            Ok(items) => {
                let count = items.len();
                self.page.set_cart_count(count);
                metrics().gauge("cart.count", count as u64);
                Some(count)
            }
            Err(e) => {
                debug!(error = %e, "Cart count refresh failed");
                None
            }
        }
    }

    async fn delayed_reload(&self) {
        tokio::time::sleep(self.navigation_delay).await;
        self.page.reload();
    }

    fn reject(&self, reply: &ActionResponse, fallback: &str) -> ActionOutcome {
        let message = reply.message_or(fallback);
        self.page.show_message(&message, Severity::Error);
        ActionOutcome::Rejected { message }
    }

    fn fail(&self, error: &ApiError, generic: &str) -> ActionOutcome {
        warn!(
            error = %error,
            transport = error.is_transport(),
            timeout = error.is_timeout(),
            "Action request failed"
        );
        self.page.show_message(generic, Severity::Error);
        ActionOutcome::Failed
    }
}

fn finish(action: &str, outcome: ActionOutcome) -> ActionOutcome {
    metrics().increment(&format!("action.{action}.{}", outcome.as_str()));
    info!(action, outcome = %outcome, "Action settled");
    outcome
}
