use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::cart::{dtos as cart_dtos, handlers as cart_handlers};
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::delivery_statuses::{
    dtos as delivery_statuses_dtos, handlers as delivery_statuses_handlers,
};
use crate::features::orders::{dtos as orders_dtos, handlers as orders_handlers};
use crate::features::products::{dtos as products_dtos, handlers as products_handlers};
use crate::features::shop_addresses::{
    dtos as shop_addresses_dtos, handlers as shop_addresses_handlers,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handler::get_me,
        // Categories
        categories_handlers::list_categories,
        categories_handlers::get_category,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Products
        products_handlers::list_products,
        products_handlers::get_product,
        products_handlers::create_product,
        products_handlers::update_product,
        products_handlers::delete_product,
        // Shop addresses
        shop_addresses_handlers::list_shop_addresses,
        shop_addresses_handlers::get_shop_address,
        shop_addresses_handlers::create_shop_address,
        shop_addresses_handlers::update_shop_address,
        shop_addresses_handlers::delete_shop_address,
        // Delivery statuses
        delivery_statuses_handlers::list_delivery_statuses,
        delivery_statuses_handlers::get_delivery_status,
        delivery_statuses_handlers::create_delivery_status,
        delivery_statuses_handlers::update_delivery_status,
        delivery_statuses_handlers::delete_delivery_status,
        // Cart
        cart_handlers::get_cart,
        cart_handlers::list_cart_products,
        cart_handlers::add_cart_product,
        cart_handlers::remove_cart_product,
        // Orders
        orders_handlers::list_orders,
        orders_handlers::create_order,
        orders_handlers::get_order,
        orders_handlers::update_order,
        orders_handlers::delete_order,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth::dto::MeResponseDto,
            auth::model::AuthenticatedUser,
            ApiResponse<auth::dto::MeResponseDto>,
            // Categories
            categories_dtos::CategoryRequestDto,
            categories_dtos::CategoryResponseDto,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            // Products
            products_dtos::ProductRequestDto,
            products_dtos::ProductResponseDto,
            ApiResponse<Vec<products_dtos::ProductResponseDto>>,
            ApiResponse<products_dtos::ProductResponseDto>,
            // Shop addresses
            shop_addresses_dtos::ShopAddressRequestDto,
            shop_addresses_dtos::ShopAddressResponseDto,
            ApiResponse<Vec<shop_addresses_dtos::ShopAddressResponseDto>>,
            ApiResponse<shop_addresses_dtos::ShopAddressResponseDto>,
            // Delivery statuses
            delivery_statuses_dtos::DeliveryStatusRequestDto,
            delivery_statuses_dtos::DeliveryStatusResponseDto,
            ApiResponse<Vec<delivery_statuses_dtos::DeliveryStatusResponseDto>>,
            ApiResponse<delivery_statuses_dtos::DeliveryStatusResponseDto>,
            // Cart
            cart_dtos::AddCartProductDto,
            cart_dtos::CartProductResponseDto,
            cart_dtos::CartResponseDto,
            ApiResponse<cart_dtos::CartResponseDto>,
            ApiResponse<Vec<cart_dtos::CartProductResponseDto>>,
            ApiResponse<cart_dtos::CartProductResponseDto>,
            // Orders
            orders_dtos::CreateOrderDto,
            orders_dtos::UpdateOrderDto,
            orders_dtos::OrderResponseDto,
            ApiResponse<Vec<orders_dtos::OrderResponseDto>>,
            ApiResponse<orders_dtos::OrderResponseDto>,
        )
    ),
    tags(
        (name = "auth", description = "Identity resolved from the bearer token"),
        (name = "categories", description = "Product categories (public reads, admin writes)"),
        (name = "products", description = "Product catalog (public reads, admin writes)"),
        (name = "shop-addresses", description = "Pickup locations (public reads, admin writes)"),
        (name = "delivery-statuses", description = "Order delivery statuses (public reads, admin writes)"),
        (name = "cart", description = "The current user's active cart"),
        (name = "orders", description = "Placing and managing orders"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Storefront API",
        version = "0.1.0",
        description = "Products, carts, orders and delivery",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
