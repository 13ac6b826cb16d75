//! Delivery status lookup table (e.g. "Packing", "Shipped", "Delivered").
//!
//! Orders reference a status once staff start processing them; a status in
//! use cannot be deleted.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::DeliveryStatusService;
