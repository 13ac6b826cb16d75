use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::shop_addresses::dtos::{ShopAddressRequestDto, ShopAddressResponseDto};
use crate::features::shop_addresses::models::ShopAddress;
use crate::shared::types::PaginationQuery;

pub struct ShopAddressService {
    pool: PgPool,
}

impl ShopAddressService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, page: &PaginationQuery) -> Result<(Vec<ShopAddressResponseDto>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shop_addresses")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count shop addresses: {:?}", e);
                AppError::Database(e)
            })?;

        let addresses: Vec<ShopAddress> = sqlx::query_as(
            r#"
            SELECT id, address, created_at, updated_at
            FROM shop_addresses
            ORDER BY address, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list shop addresses: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((addresses.into_iter().map(Into::into).collect(), total))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<ShopAddressResponseDto> {
        let address: Option<ShopAddress> = sqlx::query_as(
            "SELECT id, address, created_at, updated_at FROM shop_addresses WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get shop address: {:?}", e);
            AppError::Database(e)
        })?;

        address
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Shop address {} not found", id)))
    }

    pub async fn create(&self, dto: ShopAddressRequestDto) -> Result<ShopAddressResponseDto> {
        let address: ShopAddress = sqlx::query_as(
            r#"
            INSERT INTO shop_addresses (address)
            VALUES ($1)
            RETURNING id, address, created_at, updated_at
            "#,
        )
        .bind(dto.address.trim())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "Shop address already exists"))?;

        tracing::info!("Created shop address {}", address.id);

        Ok(address.into())
    }

    pub async fn update(
        &self,
        id: Uuid,
        dto: ShopAddressRequestDto,
    ) -> Result<ShopAddressResponseDto> {
        let address: Option<ShopAddress> = sqlx::query_as(
            r#"
            UPDATE shop_addresses
            SET address = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING id, address, created_at, updated_at
            "#,
        )
        .bind(dto.address.trim())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "Shop address already exists"))?;

        address
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Shop address {} not found", id)))
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM shop_addresses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::from_delete(
                    e,
                    "Shop address is referenced by orders and cannot be deleted",
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Shop address {} not found", id)));
        }

        tracing::info!("Deleted shop address {}", id);

        Ok(())
    }
}
