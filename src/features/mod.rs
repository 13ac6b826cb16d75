pub mod auth;
pub mod cart;
pub mod categories;
pub mod delivery_statuses;
pub mod orders;
pub mod products;
pub mod shop_addresses;
