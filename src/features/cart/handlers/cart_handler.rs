use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::ValidatedJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::cart::dtos::{AddCartProductDto, CartProductResponseDto, CartResponseDto};
use crate::features::cart::services::CartService;
use crate::shared::types::{ApiResponse, Meta};

/// Get the active cart of the current user
#[utoipa::path(
    get,
    path = "/api/cart",
    responses(
        (status = 200, description = "Active cart with items", body = ApiResponse<CartResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No active cart")
    ),
    tag = "cart",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_cart(
    user: AuthenticatedUser,
    State(service): State<Arc<CartService>>,
) -> Result<Json<ApiResponse<CartResponseDto>>> {
    let cart = service.get_active_cart(&user.user_id).await?;
    Ok(Json(ApiResponse::success(Some(cart), None, None)))
}

/// List items of the active cart
#[utoipa::path(
    get,
    path = "/api/cart-products",
    responses(
        (status = 200, description = "Cart items", body = ApiResponse<Vec<CartProductResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "cart",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_cart_products(
    user: AuthenticatedUser,
    State(service): State<Arc<CartService>>,
) -> Result<Json<ApiResponse<Vec<CartProductResponseDto>>>> {
    let items = service.list_items(&user.user_id).await?;
    let total = items.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

/// Add a product to the active cart
///
/// Creates the cart on first use. Adding a product that is already in the
/// cart increases its amount.
#[utoipa::path(
    post,
    path = "/api/cart-products",
    request_body = AddCartProductDto,
    responses(
        (status = 201, description = "Cart item created or incremented", body = ApiResponse<CartProductResponseDto>),
        (status = 400, description = "Validation error or unknown product"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "cart",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn add_cart_product(
    user: AuthenticatedUser,
    State(service): State<Arc<CartService>>,
    ValidatedJson(dto): ValidatedJson<AddCartProductDto>,
) -> Result<(StatusCode, Json<ApiResponse<CartProductResponseDto>>)> {
    let item = service.add_item(&user.user_id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(item), None, None)),
    ))
}

/// Remove an item from the active cart
#[utoipa::path(
    delete,
    path = "/api/cart-products/{id}",
    params(
        ("id" = Uuid, Path, description = "Cart item ID")
    ),
    responses(
        (status = 204, description = "Cart item removed"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Cart item not found in the active cart")
    ),
    tag = "cart",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn remove_cart_product(
    user: AuthenticatedUser,
    State(service): State<Arc<CartService>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    service.remove_item(&user.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
