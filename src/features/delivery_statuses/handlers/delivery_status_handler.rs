use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::ValidatedJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::delivery_statuses::dtos::{
    DeliveryStatusRequestDto, DeliveryStatusResponseDto,
};
use crate::features::delivery_statuses::services::DeliveryStatusService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// List delivery statuses in creation order
#[utoipa::path(
    get,
    path = "/api/delivery-statuses",
    params(PaginationQuery),
    responses(
        (status = 200, description = "List of delivery statuses", body = ApiResponse<Vec<DeliveryStatusResponseDto>>),
    ),
    tag = "delivery-statuses"
)]
pub async fn list_delivery_statuses(
    State(service): State<Arc<DeliveryStatusService>>,
    Query(page): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<DeliveryStatusResponseDto>>>> {
    let (statuses, total) = service.list(&page).await?;
    Ok(Json(ApiResponse::success(
        Some(statuses),
        None,
        Some(Meta { total }),
    )))
}

#[utoipa::path(
    get,
    path = "/api/delivery-statuses/{id}",
    params(
        ("id" = Uuid, Path, description = "Delivery status ID")
    ),
    responses(
        (status = 200, description = "Delivery status found", body = ApiResponse<DeliveryStatusResponseDto>),
        (status = 404, description = "Delivery status not found")
    ),
    tag = "delivery-statuses"
)]
pub async fn get_delivery_status(
    State(service): State<Arc<DeliveryStatusService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeliveryStatusResponseDto>>> {
    let status = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(status), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/admin/delivery-statuses",
    request_body = DeliveryStatusRequestDto,
    responses(
        (status = 201, description = "Delivery status created", body = ApiResponse<DeliveryStatusResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "delivery-statuses",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_delivery_status(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<DeliveryStatusService>>,
    ValidatedJson(dto): ValidatedJson<DeliveryStatusRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<DeliveryStatusResponseDto>>)> {
    let status = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(status), None, None)),
    ))
}

#[utoipa::path(
    put,
    path = "/api/admin/delivery-statuses/{id}",
    params(
        ("id" = Uuid, Path, description = "Delivery status ID")
    ),
    request_body = DeliveryStatusRequestDto,
    responses(
        (status = 200, description = "Delivery status updated", body = ApiResponse<DeliveryStatusResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Delivery status not found"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "delivery-statuses",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_delivery_status(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<DeliveryStatusService>>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<DeliveryStatusRequestDto>,
) -> Result<Json<ApiResponse<DeliveryStatusResponseDto>>> {
    let status = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(status), None, None)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/delivery-statuses/{id}",
    params(
        ("id" = Uuid, Path, description = "Delivery status ID")
    ),
    responses(
        (status = 204, description = "Delivery status deleted"),
        (status = 404, description = "Delivery status not found"),
        (status = 409, description = "Delivery status is referenced by an order"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "delivery-statuses",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_delivery_status(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<DeliveryStatusService>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
