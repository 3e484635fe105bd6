//! Endpoint-specific API implementations
//!
//! Each module provides a typed interface for one controller on the server.
//!
//! | Module | Server routes | Description |
//! |--------|---------------|-------------|
//! | `cart` | `/cart/api/*` | Add, update, remove and list cart items |
//! | `orders` | `/orders/api/*` | Place an order, list own orders |
//! | `admin` | `/admin/api/*` | Product CRUD and order status changes |

pub mod admin;
pub mod cart;
pub mod orders;
pub mod response;

pub use admin::{AdminApi, NewProduct, ProductUpdate};
pub use cart::{CartApi, CartItem};
pub use orders::{Order, OrdersApi, PlaceOrderResponse};
pub use response::ActionResponse;
