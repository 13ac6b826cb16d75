use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::delivery_statuses::dtos::{
    DeliveryStatusRequestDto, DeliveryStatusResponseDto,
};
use crate::features::delivery_statuses::models::DeliveryStatus;
use crate::shared::types::PaginationQuery;

pub struct DeliveryStatusService {
    pool: PgPool,
}

impl DeliveryStatusService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        page: &PaginationQuery,
    ) -> Result<(Vec<DeliveryStatusResponseDto>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM delivery_statuses")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count delivery statuses: {:?}", e);
                AppError::Database(e)
            })?;

        let statuses: Vec<DeliveryStatus> = sqlx::query_as(
            r#"
            SELECT id, name, created_at, updated_at
            FROM delivery_statuses
            ORDER BY created_at, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list delivery statuses: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((statuses.into_iter().map(Into::into).collect(), total))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<DeliveryStatusResponseDto> {
        let status: Option<DeliveryStatus> = sqlx::query_as(
            "SELECT id, name, created_at, updated_at FROM delivery_statuses WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get delivery status: {:?}", e);
            AppError::Database(e)
        })?;

        status
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Delivery status {} not found", id)))
    }

    pub async fn create(&self, dto: DeliveryStatusRequestDto) -> Result<DeliveryStatusResponseDto> {
        let status: DeliveryStatus = sqlx::query_as(
            r#"
            INSERT INTO delivery_statuses (name)
            VALUES ($1)
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(dto.name.trim())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "Delivery status already exists"))?;

        tracing::info!("Created delivery status {} ({})", status.id, status.name);

        Ok(status.into())
    }

    pub async fn update(
        &self,
        id: Uuid,
        dto: DeliveryStatusRequestDto,
    ) -> Result<DeliveryStatusResponseDto> {
        let status: Option<DeliveryStatus> = sqlx::query_as(
            r#"
            UPDATE delivery_statuses
            SET name = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(dto.name.trim())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "Delivery status already exists"))?;

        status
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Delivery status {} not found", id)))
    }

    /// Delete a status. Fails with a protected-reference error while any order uses it.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM delivery_statuses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::from_delete(
                    e,
                    "Delivery status is referenced by orders and cannot be deleted",
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Delivery status {} not found",
                id
            )));
        }

        tracing::info!("Deleted delivery status {}", id);

        Ok(())
    }
}
