mod shop_address_handler;

pub use shop_address_handler::*;
