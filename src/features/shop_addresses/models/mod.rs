mod shop_address;

pub use shop_address::ShopAddress;
