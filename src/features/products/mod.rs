//! Product catalog.
//!
//! Product names are unique across the catalog. Deleting a product that sits
//! in any cart is refused.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/products` | No | List products, optionally by category |
//! | GET | `/api/products/{id}` | No | Get product |
//! | POST | `/api/admin/products` | Admin | Create product |
//! | PUT | `/api/admin/products/{id}` | Admin | Replace product fields |
//! | DELETE | `/api/admin/products/{id}` | Admin | Delete product |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ProductService;
