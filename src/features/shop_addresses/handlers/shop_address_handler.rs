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
use crate::features::shop_addresses::dtos::{ShopAddressRequestDto, ShopAddressResponseDto};
use crate::features::shop_addresses::services::ShopAddressService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// List pickup points
#[utoipa::path(
    get,
    path = "/api/shop-addresses",
    params(PaginationQuery),
    responses(
        (status = 200, description = "List of shop addresses", body = ApiResponse<Vec<ShopAddressResponseDto>>),
    ),
    tag = "shop-addresses"
)]
pub async fn list_shop_addresses(
    State(service): State<Arc<ShopAddressService>>,
    Query(page): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<ShopAddressResponseDto>>>> {
    let (addresses, total) = service.list(&page).await?;
    Ok(Json(ApiResponse::success(
        Some(addresses),
        None,
        Some(Meta { total }),
    )))
}

#[utoipa::path(
    get,
    path = "/api/shop-addresses/{id}",
    params(
        ("id" = Uuid, Path, description = "Shop address ID")
    ),
    responses(
        (status = 200, description = "Shop address found", body = ApiResponse<ShopAddressResponseDto>),
        (status = 404, description = "Shop address not found")
    ),
    tag = "shop-addresses"
)]
pub async fn get_shop_address(
    State(service): State<Arc<ShopAddressService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ShopAddressResponseDto>>> {
    let address = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(address), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/admin/shop-addresses",
    request_body = ShopAddressRequestDto,
    responses(
        (status = 201, description = "Shop address created", body = ApiResponse<ShopAddressResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "shop-addresses",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_shop_address(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ShopAddressService>>,
    ValidatedJson(dto): ValidatedJson<ShopAddressRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<ShopAddressResponseDto>>)> {
    let address = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(address), None, None)),
    ))
}

#[utoipa::path(
    put,
    path = "/api/admin/shop-addresses/{id}",
    params(
        ("id" = Uuid, Path, description = "Shop address ID")
    ),
    request_body = ShopAddressRequestDto,
    responses(
        (status = 200, description = "Shop address updated", body = ApiResponse<ShopAddressResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Shop address not found"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "shop-addresses",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_shop_address(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ShopAddressService>>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<ShopAddressRequestDto>,
) -> Result<Json<ApiResponse<ShopAddressResponseDto>>> {
    let address = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(address), None, None)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/shop-addresses/{id}",
    params(
        ("id" = Uuid, Path, description = "Shop address ID")
    ),
    responses(
        (status = 204, description = "Shop address deleted"),
        (status = 404, description = "Shop address not found"),
        (status = 409, description = "Shop address is referenced by an order"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "shop-addresses",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_shop_address(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ShopAddressService>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
