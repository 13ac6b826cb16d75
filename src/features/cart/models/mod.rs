mod cart;
mod cart_product;

pub use cart::Cart;
pub use cart_product::CartProduct;
