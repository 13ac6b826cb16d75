mod shop_address_service;

pub use shop_address_service::ShopAddressService;
