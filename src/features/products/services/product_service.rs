use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::products::dtos::{ProductQueryParams, ProductRequestDto, ProductResponseDto};
use crate::features::products::models::Product;

const PRODUCT_NAME_TAKEN: &str = "Product with this name already exists";

pub struct ProductService {
    pool: PgPool,
}

impl ProductService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List products, newest first, optionally restricted to one category
    pub async fn list(&self, params: &ProductQueryParams) -> Result<(Vec<ProductResponseDto>, i64)> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM products WHERE ($1::uuid IS NULL OR category_id = $1)",
        )
        .bind(params.category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count products: {:?}", e);
            AppError::Database(e)
        })?;

        let products: Vec<Product> = sqlx::query_as(
            r#"
            SELECT id, name, price, photo, description, category_id, created_at, updated_at
            FROM products
            WHERE ($1::uuid IS NULL OR category_id = $1)
            ORDER BY created_at DESC, id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(params.category_id)
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list products: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((products.into_iter().map(Into::into).collect(), total))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<ProductResponseDto> {
        let product: Option<Product> = sqlx::query_as(
            r#"
            SELECT id, name, price, photo, description, category_id, created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get product: {:?}", e);
            AppError::Database(e)
        })?;

        product
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))
    }

    /// Create a product. An unknown category is reported as a bad request.
    pub async fn create(&self, dto: ProductRequestDto) -> Result<ProductResponseDto> {
        let product: Product = sqlx::query_as(
            r#"
            INSERT INTO products (name, price, photo, description, category_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, price, photo, description, category_id, created_at, updated_at
            "#,
        )
        .bind(dto.name.trim())
        .bind(dto.price)
        .bind(dto.photo)
        .bind(dto.description)
        .bind(dto.category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, PRODUCT_NAME_TAKEN))?;

        tracing::info!("Created product {} ({})", product.id, product.name);

        Ok(product.into())
    }

    pub async fn update(&self, id: Uuid, dto: ProductRequestDto) -> Result<ProductResponseDto> {
        let product: Option<Product> = sqlx::query_as(
            r#"
            UPDATE products
            SET name = $1,
                price = $2,
                photo = $3,
                description = $4,
                category_id = $5,
                updated_at = NOW()
            WHERE id = $6
            RETURNING id, name, price, photo, description, category_id, created_at, updated_at
            "#,
        )
        .bind(dto.name.trim())
        .bind(dto.price)
        .bind(dto.photo)
        .bind(dto.description)
        .bind(dto.category_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, PRODUCT_NAME_TAKEN))?;

        product
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::from_delete(e, "Product is referenced by carts and cannot be deleted")
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Product {} not found", id)));
        }

        tracing::info!("Deleted product {}", id);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    async fn seed_category(pool: &PgPool) -> Uuid {
        sqlx::query_scalar("INSERT INTO categories (name) VALUES ('Phones') RETURNING id")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    fn product(name: &str, category_id: Uuid) -> ProductRequestDto {
        ProductRequestDto {
            name: name.to_string(),
            price: Decimal::new(19999, 2),
            photo: None,
            description: String::new(),
            category_id,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_product_names_are_unique(pool: PgPool) {
        let category_id = seed_category(&pool).await;
        let service = ProductService::new(pool);

        service.create(product("Phone X", category_id)).await.unwrap();
        let other = service.create(product("Phone Y", category_id)).await.unwrap();

        let result = service.create(product("Phone X", category_id)).await;
        assert!(matches!(result, Err(AppError::Conflict(msg)) if msg == PRODUCT_NAME_TAKEN));

        // Names are stored trimmed, so padding does not dodge the constraint
        let result = service.create(product(" Phone X ", category_id)).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));

        let result = service.update(other.id, product("Phone X", category_id)).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));

        let result = service.update(other.id, product(" Phone X", category_id)).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));

        let renamed = service
            .update(other.id, product("Phone Z", category_id))
            .await
            .unwrap();
        assert_eq!(renamed.name, "Phone Z");
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_unknown_category_is_bad_request(pool: PgPool) {
        let service = ProductService::new(pool);

        let result = service.create(product("Phone X", Uuid::new_v4())).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
