use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::core::extractor::ValidatedJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::orders::dtos::{CreateOrderDto, OrderResponseDto, UpdateOrderDto};
use crate::features::orders::services::OrderService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// Admins act on every order, everyone else only on their own
fn owner_scope(user: &AuthenticatedUser) -> Option<&str> {
    if user.is_admin() {
        None
    } else {
        Some(user.user_id.as_str())
    }
}

/// List orders
#[utoipa::path(
    get,
    path = "/api/orders",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Orders, newest first", body = ApiResponse<Vec<OrderResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "orders",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_orders(
    user: AuthenticatedUser,
    State(service): State<Arc<OrderService>>,
    Query(page): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<OrderResponseDto>>>> {
    let (orders, total) = service.list(owner_scope(&user), &page).await?;
    Ok(Json(ApiResponse::success(
        Some(orders),
        None,
        Some(Meta { total }),
    )))
}

/// Place an order from the active cart
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderDto,
    responses(
        (status = 201, description = "Order placed", body = ApiResponse<OrderResponseDto>),
        (status = 400, description = "Invalid delivery fields or unknown shop address"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No active cart")
    ),
    tag = "orders",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_order(
    user: AuthenticatedUser,
    State(service): State<Arc<OrderService>>,
    ValidatedJson(dto): ValidatedJson<CreateOrderDto>,
) -> Result<(StatusCode, Json<ApiResponse<OrderResponseDto>>)> {
    let order = service.place_order(&user.user_id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(order),
            Some("Order placed".to_string()),
            None,
        )),
    ))
}

/// Get order by ID
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order found", body = ApiResponse<OrderResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Order not found")
    ),
    tag = "orders",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_order(
    user: AuthenticatedUser,
    State(service): State<Arc<OrderService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<OrderResponseDto>>> {
    let order = service.get_by_id(owner_scope(&user), id).await?;
    Ok(Json(ApiResponse::success(Some(order), None, None)))
}

/// Edit an order's delivery fields
///
/// Only admins may set `delivery_status_id`.
#[utoipa::path(
    put,
    path = "/api/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    request_body = UpdateOrderDto,
    responses(
        (status = 200, description = "Order updated", body = ApiResponse<OrderResponseDto>),
        (status = 400, description = "Invalid delivery fields or unknown reference"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Delivery status can only be set by admins"),
        (status = 404, description = "Order not found")
    ),
    tag = "orders",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_order(
    user: AuthenticatedUser,
    State(service): State<Arc<OrderService>>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateOrderDto>,
) -> Result<Json<ApiResponse<OrderResponseDto>>> {
    if dto.delivery_status_id.is_some() && !user.is_admin() {
        return Err(AppError::Forbidden(
            "Only admins can change the delivery status".to_string(),
        ));
    }

    let order = service.update(owner_scope(&user), id, dto).await?;
    Ok(Json(ApiResponse::success(Some(order), None, None)))
}

/// Delete an order
#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Order not found")
    ),
    tag = "orders",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_order(
    user: AuthenticatedUser,
    State(service): State<Arc<OrderService>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    service.delete(owner_scope(&user), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
