use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Line item; unique per (cart_id, product_id)
#[derive(Debug, Clone, FromRow)]
pub struct CartProduct {
    pub id: Uuid,
    pub amount: i32,
    pub product_id: Uuid,
    pub cart_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
