use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::products::handlers;
use crate::features::products::services::ProductService;

/// Public read routes
pub fn routes(service: Arc<ProductService>) -> Router {
    Router::new()
        .route("/api/products", get(handlers::list_products))
        .route("/api/products/{id}", get(handlers::get_product))
        .with_state(service)
}

/// Admin write routes (mounted behind JWT authentication)
pub fn admin_routes(service: Arc<ProductService>) -> Router {
    Router::new()
        .route("/api/admin/products", post(handlers::create_product))
        .route(
            "/api/admin/products/{id}",
            put(handlers::update_product).delete(handlers::delete_product),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{
        create_admin_user, create_customer_user, lazy_pool, with_user,
    };
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    fn server_as(user: crate::features::auth::model::AuthenticatedUser) -> TestServer {
        let service = Arc::new(ProductService::new(lazy_pool()));
        TestServer::new(with_user(admin_routes(service), user)).unwrap()
    }

    #[tokio::test]
    async fn test_customer_cannot_delete_product() {
        let server = server_as(create_customer_user("u1"));

        let response = server
            .delete(&format!("/api/admin/products/{}", uuid::Uuid::new_v4()))
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_create_rejects_three_decimal_price() {
        let server = server_as(create_admin_user());

        let response = server
            .post("/api/admin/products")
            .json(&json!({
                "name": "Phone X",
                "price": "10.999",
                "description": "A phone",
                "category_id": uuid::Uuid::new_v4(),
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("at most 2 decimal places"));
    }

    #[tokio::test]
    async fn test_create_requires_category() {
        let server = server_as(create_admin_user());

        let response = server
            .post("/api/admin/products")
            .json(&json!({ "name": "Phone X", "price": "10.00" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
