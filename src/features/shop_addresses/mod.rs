//! Pickup points for orders with `delivery_type = true`.
//!
//! An address referenced by an order cannot be deleted.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ShopAddressService;
