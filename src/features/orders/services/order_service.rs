use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::cart::models::Cart;
use crate::features::orders::delivery::normalize_address;
use crate::features::orders::dtos::{CreateOrderDto, OrderResponseDto, UpdateOrderDto};
use crate::features::orders::models::Order;
use crate::shared::types::PaginationQuery;

const ORDER_COLUMNS: &str = "id, delivery_address, delivery_type, delivery_phone_number, date, \
                             cart_id, user_id, shop_address_id, delivery_status_id, updated_at";

pub struct OrderService {
    pool: PgPool,
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Order {} not found", id))
}

impl OrderService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Turn the user's active cart into an order.
    ///
    /// The cart is locked, bound to the new order and marked purchased, and a
    /// fresh empty cart becomes the user's active one. Either all of it
    /// commits or none of it does.
    ///
    /// Placements of one user are serialized on a transaction-scoped advisory
    /// lock, so a placement that waited on another one reads the replacement
    /// cart, exactly as a later sequential call would.
    pub async fn place_order(&self, user_id: &str, dto: CreateOrderDto) -> Result<OrderResponseDto> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to take order lock for user {}: {:?}", user_id, e);
                AppError::Database(e)
            })?;

        let cart: Cart = sqlx::query_as(
            r#"
            SELECT id, user_id, is_purchase, created_at, updated_at
            FROM carts
            WHERE user_id = $1 AND NOT is_purchase
            FOR UPDATE
            "#,
        )
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to lock active cart: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("No active cart found".to_string()))?;

        let order: Order = sqlx::query_as(&format!(
            r#"
            INSERT INTO orders
                (delivery_address, delivery_type, delivery_phone_number, cart_id, user_id, shop_address_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            ORDER_COLUMNS
        ))
        .bind(normalize_address(dto.delivery_address.as_deref()))
        .bind(dto.delivery_type)
        .bind(dto.delivery_phone_number.as_deref())
        .bind(cart.id)
        .bind(user_id)
        .bind(dto.shop_address_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::from_write(e, "Cart has already been ordered"))?;

        sqlx::query("UPDATE carts SET is_purchase = TRUE, updated_at = NOW() WHERE id = $1")
            .bind(cart.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to finalize cart {}: {:?}", cart.id, e);
                AppError::Database(e)
            })?;

        let next_cart: Uuid =
            sqlx::query_scalar("INSERT INTO carts (user_id) VALUES ($1) RETURNING id")
                .bind(user_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to open new cart: {:?}", e);
                    AppError::Database(e)
                })?;

        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!(
            "User {} placed order {} from cart {}; new active cart {}",
            user_id,
            order.id,
            cart.id,
            next_cart
        );

        Ok(order.into())
    }

    /// Orders newest first. `owner = None` lists every user's orders.
    pub async fn list(
        &self,
        owner: Option<&str>,
        page: &PaginationQuery,
    ) -> Result<(Vec<OrderResponseDto>, i64)> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE ($1::text IS NULL OR user_id = $1)")
                .bind(owner)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to count orders: {:?}", e);
                    AppError::Database(e)
                })?;

        let orders: Vec<Order> = sqlx::query_as(&format!(
            r#"
            SELECT {}
            FROM orders
            WHERE ($1::text IS NULL OR user_id = $1)
            ORDER BY date DESC, id
            LIMIT $2 OFFSET $3
            "#,
            ORDER_COLUMNS
        ))
        .bind(owner)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list orders: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((orders.into_iter().map(Into::into).collect(), total))
    }

    /// Orders of other users are reported as not found unless `owner` is `None`
    pub async fn get_by_id(&self, owner: Option<&str>, id: Uuid) -> Result<OrderResponseDto> {
        let order: Option<Order> = sqlx::query_as(&format!(
            "SELECT {} FROM orders WHERE id = $1 AND ($2::text IS NULL OR user_id = $2)",
            ORDER_COLUMNS
        ))
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get order: {:?}", e);
            AppError::Database(e)
        })?;

        order.map(Into::into).ok_or_else(|| not_found(id))
    }

    pub async fn update(
        &self,
        owner: Option<&str>,
        id: Uuid,
        dto: UpdateOrderDto,
    ) -> Result<OrderResponseDto> {
        let order: Option<Order> = sqlx::query_as(&format!(
            r#"
            UPDATE orders
            SET delivery_address = $1,
                delivery_type = $2,
                delivery_phone_number = $3,
                shop_address_id = $4,
                delivery_status_id = COALESCE($5, delivery_status_id),
                updated_at = NOW()
            WHERE id = $6 AND ($7::text IS NULL OR user_id = $7)
            RETURNING {}
            "#,
            ORDER_COLUMNS
        ))
        .bind(normalize_address(dto.delivery_address.as_deref()))
        .bind(dto.delivery_type)
        .bind(dto.delivery_phone_number.as_deref())
        .bind(dto.shop_address_id)
        .bind(dto.delivery_status_id)
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "Order conflicts with an existing order"))?;

        let order = order.ok_or_else(|| not_found(id))?;

        tracing::info!("Updated order {}", order.id);

        Ok(order.into())
    }

    /// Delete an order. Its cart stays purchased.
    pub async fn delete(&self, owner: Option<&str>, id: Uuid) -> Result<()> {
        let result =
            sqlx::query("DELETE FROM orders WHERE id = $1 AND ($2::text IS NULL OR user_id = $2)")
                .bind(id)
                .bind(owner)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::from_delete(e, "Order is still referenced"))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        tracing::info!("Deleted order {}", id);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::cart::dtos::AddCartProductDto;
    use crate::features::cart::CartService;
    use crate::shared::test_helpers::seed_product;

    async fn seed_shop_address(pool: &PgPool) -> Uuid {
        sqlx::query_scalar("INSERT INTO shop_addresses (address) VALUES ('Main st. 1') RETURNING id")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    async fn seed_delivery_status(pool: &PgPool) -> Uuid {
        sqlx::query_scalar("INSERT INTO delivery_statuses (name) VALUES ('Shipped') RETURNING id")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    async fn fill_cart(pool: &PgPool, user_id: &str) {
        let product_id = seed_product(pool).await;
        CartService::new(pool.clone())
            .add_item(
                user_id,
                AddCartProductDto {
                    product_id,
                    amount: 2,
                },
            )
            .await
            .unwrap();
    }

    fn pickup(shop_address_id: Uuid) -> CreateOrderDto {
        CreateOrderDto {
            delivery_type: true,
            delivery_address: None,
            delivery_phone_number: Some("+375291234567".to_string()),
            shop_address_id: Some(shop_address_id),
        }
    }

    fn home_delivery(status: Option<Uuid>) -> UpdateOrderDto {
        UpdateOrderDto {
            delivery_type: false,
            delivery_address: Some("  Lenina 5  ".to_string()),
            delivery_phone_number: None,
            shop_address_id: None,
            delivery_status_id: status,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_place_order_replaces_active_cart(pool: PgPool) {
        fill_cart(&pool, "u1").await;
        let shop = seed_shop_address(&pool).await;
        let service = OrderService::new(pool.clone());

        let order = service.place_order("u1", pickup(shop)).await.unwrap();
        assert_eq!(order.user_id, "u1");
        assert!(order.delivery_status_id.is_none());

        let carts: Vec<(Uuid, bool)> =
            sqlx::query_as("SELECT id, is_purchase FROM carts WHERE user_id = 'u1'")
                .fetch_all(&pool)
                .await
                .unwrap();
        assert_eq!(carts.len(), 2);

        let active: Vec<Uuid> = carts
            .iter()
            .filter(|(_, purchased)| !purchased)
            .map(|(id, _)| *id)
            .collect();
        assert_eq!(active.len(), 1);
        assert_ne!(active[0], order.cart_id);

        let active_items: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM cart_products WHERE cart_id = $1")
                .bind(active[0])
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(active_items, 0);

        let ordered_items: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM cart_products WHERE cart_id = $1")
                .bind(order.cart_id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(ordered_items, 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_concurrent_placements_each_consume_a_cart(pool: PgPool) {
        fill_cart(&pool, "u1").await;
        let shop = seed_shop_address(&pool).await;
        let service = std::sync::Arc::new(OrderService::new(pool.clone()));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let service = std::sync::Arc::clone(&service);
                tokio::spawn(async move { service.place_order("u1", pickup(shop)).await })
            })
            .collect();

        let mut cart_ids = Vec::new();
        for handle in handles {
            cart_ids.push(handle.await.unwrap().unwrap().cart_id);
        }
        cart_ids.sort();
        cart_ids.dedup();
        assert_eq!(cart_ids.len(), 4);

        let active: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM carts WHERE user_id = 'u1' AND NOT is_purchase",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(active, 1);

        let purchased: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM carts WHERE user_id = 'u1' AND is_purchase")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(purchased, 4);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_place_order_without_active_cart_is_not_found(pool: PgPool) {
        let shop = seed_shop_address(&pool).await;
        let service = OrderService::new(pool);

        let result = service.place_order("nobody", pickup(shop)).await;
        assert!(matches!(result, Err(AppError::NotFound(msg)) if msg == "No active cart found"));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_unknown_shop_address_rolls_back(pool: PgPool) {
        fill_cart(&pool, "u1").await;
        let service = OrderService::new(pool.clone());

        let result = service.place_order("u1", pickup(Uuid::new_v4())).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        let carts: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM carts WHERE user_id = 'u1'")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(carts, 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_orders_are_scoped_to_owner(pool: PgPool) {
        fill_cart(&pool, "owner").await;
        let shop = seed_shop_address(&pool).await;
        let service = OrderService::new(pool);

        let order = service.place_order("owner", pickup(shop)).await.unwrap();

        let result = service.get_by_id(Some("intruder"), order.id).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(service.get_by_id(None, order.id).await.is_ok());

        let (own, total) = service
            .list(Some("owner"), &PaginationQuery::default())
            .await
            .unwrap();
        assert_eq!(total, 1);
        assert_eq!(own[0].id, order.id);

        let (_, total) = service
            .list(Some("intruder"), &PaginationQuery::default())
            .await
            .unwrap();
        assert_eq!(total, 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_update_replaces_delivery_fields(pool: PgPool) {
        fill_cart(&pool, "u1").await;
        let shop = seed_shop_address(&pool).await;
        let status = seed_delivery_status(&pool).await;
        let service = OrderService::new(pool);

        let order = service.place_order("u1", pickup(shop)).await.unwrap();

        let updated = service
            .update(None, order.id, home_delivery(Some(status)))
            .await
            .unwrap();
        assert!(!updated.delivery_type);
        assert_eq!(updated.delivery_address.as_deref(), Some("Lenina 5"));
        assert!(updated.shop_address_id.is_none());
        assert!(updated.delivery_phone_number.is_none());
        assert_eq!(updated.delivery_status_id, Some(status));
        assert_eq!(updated.cart_id, order.cart_id);

        // Omitted status keeps the current one
        let updated = service
            .update(Some("u1"), order.id, home_delivery(None))
            .await
            .unwrap();
        assert_eq!(updated.delivery_status_id, Some(status));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_referenced_delivery_status_is_protected(pool: PgPool) {
        fill_cart(&pool, "u1").await;
        let shop = seed_shop_address(&pool).await;
        let status = seed_delivery_status(&pool).await;
        let service = OrderService::new(pool.clone());

        let order = service.place_order("u1", pickup(shop)).await.unwrap();
        service
            .update(None, order.id, home_delivery(Some(status)))
            .await
            .unwrap();

        let statuses =
            crate::features::delivery_statuses::DeliveryStatusService::new(pool.clone());
        let result = statuses.delete(status).await;
        assert!(matches!(result, Err(AppError::ProtectedReference(_))));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_delete_keeps_cart(pool: PgPool) {
        fill_cart(&pool, "u1").await;
        let shop = seed_shop_address(&pool).await;
        let service = OrderService::new(pool.clone());

        let order = service.place_order("u1", pickup(shop)).await.unwrap();

        let result = service.delete(Some("intruder"), order.id).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        service.delete(Some("u1"), order.id).await.unwrap();

        let purchased: bool = sqlx::query_scalar("SELECT is_purchase FROM carts WHERE id = $1")
            .bind(order.cart_id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert!(purchased);
    }
}
