use std::sync::Arc;

use axum::{
    routing::{delete, get},
    Router,
};

use crate::features::cart::handlers;
use crate::features::cart::services::CartService;

/// Cart routes (mounted behind JWT authentication)
pub fn routes(service: Arc<CartService>) -> Router {
    Router::new()
        .route("/api/cart", get(handlers::get_cart))
        .route(
            "/api/cart-products",
            get(handlers::list_cart_products).post(handlers::add_cart_product),
        )
        .route(
            "/api/cart-products/{id}",
            delete(handlers::remove_cart_product),
        )
        .with_state(service)
}
