use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::cart::dtos::{
    AddCartProductDto, CartProductResponseDto, CartResponseDto, MAX_LINE_AMOUNT,
};
use crate::features::cart::models::{Cart, CartProduct};

pub struct CartService {
    pool: PgPool,
}

/// Return the user's active cart, creating it if needed.
///
/// Concurrent callers converge on the same row: the partial unique index on
/// `carts(user_id) WHERE NOT is_purchase` turns the second insert into a no-op
/// update, which also row-locks the cart until the caller's transaction ends.
async fn upsert_active_cart(conn: &mut PgConnection, user_id: &str) -> Result<Cart> {
    sqlx::query_as(
        r#"
        INSERT INTO carts (user_id)
        VALUES ($1)
        ON CONFLICT (user_id) WHERE NOT is_purchase
        DO UPDATE SET updated_at = NOW()
        RETURNING id, user_id, is_purchase, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .fetch_one(conn)
    .await
    .map_err(|e| {
        tracing::error!("Failed to get or create active cart: {:?}", e);
        AppError::Database(e)
    })
}

async fn find_active_cart(pool: &PgPool, user_id: &str) -> Result<Option<Cart>> {
    sqlx::query_as(
        r#"
        SELECT id, user_id, is_purchase, created_at, updated_at
        FROM carts
        WHERE user_id = $1 AND NOT is_purchase
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to find active cart: {:?}", e);
        AppError::Database(e)
    })
}

async fn items_of(pool: &PgPool, cart_id: Uuid) -> Result<Vec<CartProduct>> {
    sqlx::query_as(
        r#"
        SELECT id, amount, product_id, cart_id, created_at, updated_at
        FROM cart_products
        WHERE cart_id = $1
        ORDER BY created_at, id
        "#,
    )
    .bind(cart_id)
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list cart items: {:?}", e);
        AppError::Database(e)
    })
}

impl CartService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Active cart with its items
    pub async fn get_active_cart(&self, user_id: &str) -> Result<CartResponseDto> {
        let cart = find_active_cart(&self.pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("No active cart found".to_string()))?;

        let items = items_of(&self.pool, cart.id).await?;
        Ok(CartResponseDto::new(cart, items))
    }

    /// Items of the active cart; empty when the user has none yet
    pub async fn list_items(&self, user_id: &str) -> Result<Vec<CartProductResponseDto>> {
        let Some(cart) = find_active_cart(&self.pool, user_id).await? else {
            return Ok(Vec::new());
        };

        let items = items_of(&self.pool, cart.id).await?;
        Ok(items.into_iter().map(Into::into).collect())
    }

    /// Add `dto.amount` of a product to the user's active cart.
    ///
    /// Adding a product that is already in the cart increments its amount. The
    /// accumulated amount of a line never exceeds [`MAX_LINE_AMOUNT`].
    pub async fn add_item(
        &self,
        user_id: &str,
        dto: AddCartProductDto,
    ) -> Result<CartProductResponseDto> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let cart = upsert_active_cart(&mut tx, user_id).await?;

        // The conflict branch is skipped when the sum would pass the cap, so no row comes back
        let item: Option<CartProduct> = sqlx::query_as(
            r#"
            INSERT INTO cart_products (cart_id, product_id, amount)
            VALUES ($1, $2, $3)
            ON CONFLICT (cart_id, product_id)
            DO UPDATE SET amount = cart_products.amount + EXCLUDED.amount,
                          updated_at = NOW()
            WHERE cart_products.amount::BIGINT + EXCLUDED.amount <= $4
            RETURNING id, amount, product_id, cart_id, created_at, updated_at
            "#,
        )
        .bind(cart.id)
        .bind(dto.product_id)
        .bind(dto.amount)
        .bind(i64::from(MAX_LINE_AMOUNT))
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| match AppError::from_write(e, "Cart item already exists") {
            AppError::BadRequest(_) => {
                AppError::BadRequest(format!("Product {} does not exist", dto.product_id))
            }
            other => other,
        })?;

        let item = item.ok_or_else(|| {
            AppError::BadRequest(format!(
                "Amount of product {} in the cart cannot exceed {}",
                dto.product_id, MAX_LINE_AMOUNT
            ))
        })?;

        tx.commit().await.map_err(AppError::Database)?;

        tracing::debug!(
            "Cart {} of user {}: product {} amount now {}",
            cart.id,
            user_id,
            item.product_id,
            item.amount
        );

        Ok(item.into())
    }

    /// Remove a line item from the user's active cart.
    ///
    /// Items of other users' carts and of purchased carts are reported as not found.
    pub async fn remove_item(&self, user_id: &str, item_id: Uuid) -> Result<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM cart_products cp
            USING carts c
            WHERE cp.id = $1
              AND cp.cart_id = c.id
              AND c.user_id = $2
              AND NOT c.is_purchase
            "#,
        )
        .bind(item_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to remove cart item: {:?}", e);
            AppError::Database(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Cart item {} not found",
                item_id
            )));
        }

        tracing::debug!("Removed cart item {} for user {}", item_id, user_id);

        Ok(())
    }
}
