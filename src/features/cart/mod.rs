//! Shopping cart lifecycle.
//!
//! Every user has at most one active cart (`is_purchase = false`). It is
//! created on the first add-to-cart and replaced by a fresh one when an order
//! is placed (see `features::orders`). Purchased carts are never modified.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/cart` | Yes | Active cart with its items |
//! | GET | `/api/cart-products` | Yes | Items of the active cart |
//! | POST | `/api/cart-products` | Yes | Add a product (amounts accumulate) |
//! | DELETE | `/api/cart-products/{id}` | Yes | Remove an item from the active cart |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::CartService;
