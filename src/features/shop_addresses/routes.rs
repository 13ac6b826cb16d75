use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::shop_addresses::handlers;
use crate::features::shop_addresses::services::ShopAddressService;

/// Public read routes
pub fn routes(service: Arc<ShopAddressService>) -> Router {
    Router::new()
        .route("/api/shop-addresses", get(handlers::list_shop_addresses))
        .route("/api/shop-addresses/{id}", get(handlers::get_shop_address))
        .with_state(service)
}

/// Admin write routes (mounted behind JWT authentication)
pub fn admin_routes(service: Arc<ShopAddressService>) -> Router {
    Router::new()
        .route(
            "/api/admin/shop-addresses",
            post(handlers::create_shop_address),
        )
        .route(
            "/api/admin/shop-addresses/{id}",
            put(handlers::update_shop_address).delete(handlers::delete_shop_address),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{create_admin_user, lazy_pool, with_user};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_rejects_overlong_address() {
        let service = Arc::new(ShopAddressService::new(lazy_pool()));
        let app = with_user(admin_routes(service), create_admin_user());
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/admin/shop-addresses")
            .json(&json!({ "address": "a".repeat(151) }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
