use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Public read routes
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/api/categories", get(handlers::list_categories))
        .route("/api/categories/{id}", get(handlers::get_category))
        .with_state(service)
}

/// Admin write routes (mounted behind JWT authentication)
pub fn admin_routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/api/admin/categories", post(handlers::create_category))
        .route(
            "/api/admin/categories/{id}",
            put(handlers::update_category).delete(handlers::delete_category),
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

    fn service() -> Arc<CategoryService> {
        Arc::new(CategoryService::new(lazy_pool()))
    }

    #[tokio::test]
    async fn test_create_requires_authentication() {
        let server = TestServer::new(admin_routes(service())).unwrap();

        let response = server
            .post("/api/admin/categories")
            .json(&json!({ "name": "Laptops" }))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_requires_admin_role() {
        let app = with_user(admin_routes(service()), create_customer_user("u1"));
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/admin/categories")
            .json(&json!({ "name": "Laptops" }))
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let app = with_user(admin_routes(service()), create_admin_user());
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/admin/categories")
            .json(&json!({ "name": "   " }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_update_rejects_malformed_json() {
        let app = with_user(admin_routes(service()), create_admin_user());
        let server = TestServer::new(app).unwrap();

        let response = server
            .put(&format!("/api/admin/categories/{}", uuid::Uuid::new_v4()))
            .json(&json!({ "title": "Laptops" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
