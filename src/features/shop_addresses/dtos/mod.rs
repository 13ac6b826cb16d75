mod shop_address_dto;

pub use shop_address_dto::*;
