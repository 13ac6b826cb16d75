//! Orders and the cart-to-order transition.
//!
//! Placing an order consumes the user's active cart: the cart is marked
//! purchased and a new empty one takes its place, all in one transaction.
//! Each order selects one delivery mode, see [`delivery`].
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/orders` | Yes | Own orders, newest first (all orders for admins) |
//! | POST | `/api/orders` | Yes | Place an order from the active cart |
//! | GET | `/api/orders/{id}` | Owner/Admin | Get order |
//! | PUT | `/api/orders/{id}` | Owner/Admin | Replace delivery fields |
//! | DELETE | `/api/orders/{id}` | Owner/Admin | Delete order, keeping its cart |

pub mod delivery;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::OrderService;
