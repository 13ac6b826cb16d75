use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::delivery_statuses::handlers;
use crate::features::delivery_statuses::services::DeliveryStatusService;

/// Public read routes
pub fn routes(service: Arc<DeliveryStatusService>) -> Router {
    Router::new()
        .route(
            "/api/delivery-statuses",
            get(handlers::list_delivery_statuses),
        )
        .route(
            "/api/delivery-statuses/{id}",
            get(handlers::get_delivery_status),
        )
        .with_state(service)
}

/// Admin write routes (mounted behind JWT authentication)
pub fn admin_routes(service: Arc<DeliveryStatusService>) -> Router {
    Router::new()
        .route(
            "/api/admin/delivery-statuses",
            post(handlers::create_delivery_status),
        )
        .route(
            "/api/admin/delivery-statuses/{id}",
            put(handlers::update_delivery_status).delete(handlers::delete_delivery_status),
        )
        .with_state(service)
}
