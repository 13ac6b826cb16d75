use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{CategoryRequestDto, CategoryResponseDto};
use crate::features::categories::models::Category;
use crate::shared::types::PaginationQuery;

/// Service for category operations
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List categories ordered by name
    pub async fn list(&self, page: &PaginationQuery) -> Result<(Vec<CategoryResponseDto>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count categories: {:?}", e);
                AppError::Database(e)
            })?;

        let categories: Vec<Category> = sqlx::query_as(
            r#"
            SELECT id, name, created_at, updated_at
            FROM categories
            ORDER BY name, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((categories.into_iter().map(Into::into).collect(), total))
    }

    /// Get category by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<CategoryResponseDto> {
        let category: Option<Category> = sqlx::query_as(
            r#"
            SELECT id, name, created_at, updated_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get category: {:?}", e);
            AppError::Database(e)
        })?;

        category
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    pub async fn create(&self, dto: CategoryRequestDto) -> Result<CategoryResponseDto> {
        let category: Category = sqlx::query_as(
            r#"
            INSERT INTO categories (name)
            VALUES ($1)
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(dto.name.trim())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "Category already exists"))?;

        tracing::info!("Created category {} ({})", category.id, category.name);

        Ok(category.into())
    }

    pub async fn update(&self, id: Uuid, dto: CategoryRequestDto) -> Result<CategoryResponseDto> {
        let category: Option<Category> = sqlx::query_as(
            r#"
            UPDATE categories
            SET name = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(dto.name.trim())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "Category already exists"))?;

        category
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    /// Delete a category. Its products are removed with it.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::from_delete(
                    e,
                    "Category has products referenced by carts and cannot be deleted",
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Category {} not found", id)));
        }

        tracing::info!("Deleted category {}", id);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::seed_product;

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_delete_cascades_to_products(pool: PgPool) {
        let product_id = seed_product(&pool).await;
        let category_id: Uuid = sqlx::query_scalar("SELECT category_id FROM products WHERE id = $1")
            .bind(product_id)
            .fetch_one(&pool)
            .await
            .unwrap();

        let service = CategoryService::new(pool.clone());
        service.delete(category_id).await.unwrap();

        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE id = $1")
            .bind(product_id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(remaining, 0);

        let result = service.delete(category_id).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_delete_refused_while_product_in_cart(pool: PgPool) {
        let product_id = seed_product(&pool).await;
        let category_id: Uuid = sqlx::query_scalar("SELECT category_id FROM products WHERE id = $1")
            .bind(product_id)
            .fetch_one(&pool)
            .await
            .unwrap();

        let cart_id: Uuid =
            sqlx::query_scalar("INSERT INTO carts (user_id) VALUES ('u1') RETURNING id")
                .fetch_one(&pool)
                .await
                .unwrap();
        sqlx::query("INSERT INTO cart_products (cart_id, product_id, amount) VALUES ($1, $2, 1)")
            .bind(cart_id)
            .bind(product_id)
            .execute(&pool)
            .await
            .unwrap();

        let result = CategoryService::new(pool).delete(category_id).await;
        assert!(matches!(result, Err(AppError::ProtectedReference(_))));
    }
}
